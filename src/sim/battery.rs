//! Home battery model: SoC bookkeeping and per-bucket dispatch.

use crate::config::{BatteryConfig, ConfigError};
use crate::sim::bucket::{BUCKET_HOURS, BUCKET_SECONDS, EnergyBucket};
use crate::sim::types::BatteryTrace;

/// Tolerance for classifying the SoC as at its ceiling or floor.
pub const SOC_EPSILON: f64 = 1e-6;

/// Below this, an efficiency x delay-factor product counts as zero and the
/// corresponding phase is skipped outright instead of dividing by it.
const GAIN_FLOOR: f64 = 1e-12;

/// A home battery stepping through quarter-hour energy buckets.
///
/// Holds the derived dispatch parameters and the state of charge. The SoC is
/// private mutable state threaded strictly sequentially through [`step`];
/// collaborators only see the emitted [`BatteryTrace`].
///
/// [`step`]: Battery::step
#[derive(Debug, Clone)]
pub struct Battery {
    soc_kwh: f64,
    soc_min_kwh: f64,
    soc_max_kwh: f64,
    max_energy_per_bucket_kwh: f64,
    /// charge_efficiency x charge delay factor.
    charge_gain: f64,
    /// discharge_efficiency x discharge delay factor.
    discharge_gain: f64,
}

/// Fraction of the quarter-hour during which the battery effectively
/// responds, given its reaction time.
fn delay_factor(reaction_s: f64) -> f64 {
    (1.0 - reaction_s / BUCKET_SECONDS).clamp(0.0, 1.0)
}

impl Battery {
    /// Builds a battery from validated configuration, starting at half
    /// capacity.
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` if the configuration is invalid.
    pub fn from_config(cfg: &BatteryConfig) -> Result<Self, ConfigError> {
        if let Some(error) = cfg.validate().into_iter().next() {
            return Err(error);
        }

        Ok(Self {
            soc_kwh: cfg.capacity_kwh / 2.0,
            soc_min_kwh: cfg.soc_min_pct / 100.0 * cfg.capacity_kwh,
            soc_max_kwh: cfg.soc_max_pct / 100.0 * cfg.capacity_kwh,
            max_energy_per_bucket_kwh: cfg.max_power_kw * BUCKET_HOURS,
            charge_gain: cfg.charge_efficiency * delay_factor(cfg.charge_reaction_s),
            discharge_gain: cfg.discharge_efficiency * delay_factor(cfg.discharge_reaction_s),
        })
    }

    /// Dispatches the battery for one bucket and returns the trace.
    ///
    /// Charging (driven by export surplus) is evaluated first; discharging
    /// (driven by import demand) runs in the same step against the
    /// post-charge SoC. A bucket with both import and export therefore both
    /// feeds the battery and draws from it. This charge-first ordering is
    /// deliberate; netting import against export beforehand would change
    /// the loss accounting.
    pub fn step(&mut self, bucket: &EnergyBucket) -> BatteryTrace {
        // Charging phase. A zero gain (efficiency 0, or reaction time of a
        // full bucket) means no charging at all: the surplus stays on the
        // grid untouched.
        let (charged_kwh, grid_export_kwh) = if self.charge_gain < GAIN_FLOOR {
            (0.0, bucket.export_kwh)
        } else {
            let potential = bucket.export_kwh * self.charge_gain;
            let headroom = (self.soc_max_kwh - self.soc_kwh).max(0.0);
            let charged = potential
                .min(self.max_energy_per_bucket_kwh)
                .min(headroom)
                .max(0.0);
            // The export reduction is the pre-loss energy taken off the meter.
            let residual = (bucket.export_kwh - charged / self.charge_gain).max(0.0);
            (charged, residual)
        };
        self.soc_kwh += charged_kwh;

        // Discharging phase, against the post-charge SoC. `drawn` is the
        // energy leaving the battery; `delivered` is what reaches the load.
        let (drawn_kwh, discharged_kwh) = if self.discharge_gain < GAIN_FLOOR {
            (0.0, 0.0)
        } else {
            let available = (self.soc_kwh - self.soc_min_kwh).max(0.0);
            let drawn = (bucket.import_kwh / self.discharge_gain)
                .min(self.max_energy_per_bucket_kwh)
                .min(available)
                .max(0.0);
            (drawn, drawn * self.discharge_gain)
        };
        self.soc_kwh -= drawn_kwh;
        let grid_import_kwh = (bucket.import_kwh - discharged_kwh).max(0.0);

        BatteryTrace {
            timestamp: bucket.timestamp,
            import_kwh: bucket.import_kwh,
            export_kwh: bucket.export_kwh,
            charged_kwh,
            discharged_kwh,
            grid_import_kwh,
            grid_export_kwh,
            soc_kwh: self.soc_kwh,
        }
    }

    /// Current state of charge (kWh).
    pub fn soc_kwh(&self) -> f64 {
        self.soc_kwh
    }

    /// SoC floor (kWh).
    pub fn soc_min_kwh(&self) -> f64 {
        self.soc_min_kwh
    }

    /// SoC ceiling (kWh).
    pub fn soc_max_kwh(&self) -> f64 {
        self.soc_max_kwh
    }

    /// Inverter energy budget per bucket (kWh).
    pub fn max_energy_per_bucket_kwh(&self) -> f64 {
        self.max_energy_per_bucket_kwh
    }
}
