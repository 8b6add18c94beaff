//! Sequential dispatch pass over an ordered bucket sequence.

use chrono::NaiveDateTime;

use crate::config::SimulationConfig;
use crate::error::SimError;
use crate::sim::battery::Battery;
use crate::sim::bucket::EnergyBucket;
use crate::sim::types::{BatteryTrace, RunningTotals};

/// Output of a complete simulation run.
#[derive(Debug, Clone)]
pub struct SimulationResult {
    /// One trace per input bucket, in timestamp order.
    pub traces: Vec<BatteryTrace>,
    /// Cumulative energy totals over the whole run.
    pub totals: RunningTotals,
    /// State of charge after the last bucket (kWh).
    pub final_soc_kwh: f64,
}

/// The stateful dispatch simulator.
///
/// Owns the battery state and the running totals; [`step`] must be invoked
/// in strictly increasing timestamp order and rejects anything else. For the
/// common batch case use [`Simulator::run`].
///
/// [`step`]: Simulator::step
pub struct Simulator {
    battery: Battery,
    last_timestamp: Option<NaiveDateTime>,
    totals: RunningTotals,
}

impl Simulator {
    /// Creates a simulator from the given configuration.
    ///
    /// # Errors
    ///
    /// Fails fast with the first configuration error; no step can execute on
    /// an invalid configuration.
    pub fn new(config: &SimulationConfig) -> Result<Self, SimError> {
        if let Some(error) = config.validate().into_iter().next() {
            return Err(error.into());
        }
        Ok(Self {
            battery: Battery::from_config(&config.battery)?,
            last_timestamp: None,
            totals: RunningTotals::default(),
        })
    }

    /// Dispatches one bucket and returns its trace.
    ///
    /// # Errors
    ///
    /// Returns a data error if the bucket carries a non-finite or negative
    /// energy value, or if its timestamp does not strictly increase over the
    /// previous bucket (duplicates included).
    pub fn step(&mut self, bucket: &EnergyBucket) -> Result<BatteryTrace, SimError> {
        check_energy(bucket.timestamp, "import_kwh", bucket.import_kwh)?;
        check_energy(bucket.timestamp, "export_kwh", bucket.export_kwh)?;
        if let Some(previous) = self.last_timestamp {
            if bucket.timestamp <= previous {
                return Err(SimError::OutOfOrder {
                    timestamp: bucket.timestamp,
                    previous,
                });
            }
        }
        self.last_timestamp = Some(bucket.timestamp);

        let trace = self.battery.step(bucket);
        self.totals.record(&trace);
        Ok(trace)
    }

    /// Runs the full left-to-right pass over an ordered bucket sequence.
    ///
    /// # Errors
    ///
    /// Any configuration or data error fails the whole run; no partial
    /// result is returned.
    pub fn run(
        config: &SimulationConfig,
        buckets: &[EnergyBucket],
    ) -> Result<SimulationResult, SimError> {
        let mut simulator = Self::new(config)?;
        let mut traces = Vec::with_capacity(buckets.len());
        for bucket in buckets {
            traces.push(simulator.step(bucket)?);
        }
        Ok(SimulationResult {
            final_soc_kwh: simulator.battery.soc_kwh(),
            totals: simulator.totals,
            traces,
        })
    }

    /// Returns a reference to the battery (for bound/budget queries).
    pub fn battery(&self) -> &Battery {
        &self.battery
    }

    /// Returns the totals accumulated so far.
    pub fn totals(&self) -> &RunningTotals {
        &self.totals
    }
}

fn check_energy(
    timestamp: NaiveDateTime,
    field: &'static str,
    value: f64,
) -> Result<(), SimError> {
    if !value.is_finite() || value < 0.0 {
        return Err(SimError::InvalidEnergy {
            timestamp,
            field,
            value,
        });
    }
    Ok(())
}
