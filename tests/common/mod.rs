//! Shared test fixtures for integration tests.

use bess_sim::config::{BatteryConfig, SimulationConfig};
use bess_sim::sim::bucket::EnergyBucket;
use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Default configuration (5 kWh, 2.5 kW, 95% efficiency, 10–90% SoC band,
/// zero reaction time for exact arithmetic in tests).
pub fn default_config() -> SimulationConfig {
    let mut config = SimulationConfig::default();
    config.battery.charge_reaction_s = 0.0;
    config.battery.discharge_reaction_s = 0.0;
    config
}

/// Ideal-buffer configuration: lossless, instant, effectively unlimited
/// power (a large sentinel), full 0–100% SoC band.
pub fn ideal_config() -> SimulationConfig {
    SimulationConfig {
        battery: BatteryConfig {
            capacity_kwh: 10.0,
            max_power_kw: 1.0e9,
            charge_efficiency: 1.0,
            discharge_efficiency: 1.0,
            soc_min_pct: 0.0,
            soc_max_pct: 100.0,
            charge_reaction_s: 0.0,
            discharge_reaction_s: 0.0,
        },
        ..SimulationConfig::default()
    }
}

/// Near-zero capacity: the battery cannot hold anything, so grid flows must
/// equal the baseline. Also makes the SoC band degenerate (narrower than the
/// dwell tolerance), so every trace counts as both full and empty.
pub fn no_battery_config() -> SimulationConfig {
    SimulationConfig {
        battery: BatteryConfig {
            capacity_kwh: 1.0e-9,
            max_power_kw: 2.5,
            charge_efficiency: 0.95,
            discharge_efficiency: 0.95,
            soc_min_pct: 0.0,
            soc_max_pct: 50.0,
            charge_reaction_s: 0.0,
            discharge_reaction_s: 0.0,
        },
        ..SimulationConfig::default()
    }
}

/// Base timestamp used by the bucket builders.
pub fn base_timestamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("valid test timestamp")
}

/// Builds consecutive quarter-hour buckets starting at [`base_timestamp`].
pub fn buckets(values: &[(f64, f64)]) -> Vec<EnergyBucket> {
    buckets_from(base_timestamp(), values)
}

/// Builds consecutive quarter-hour buckets starting at `start`.
pub fn buckets_from(start: NaiveDateTime, values: &[(f64, f64)]) -> Vec<EnergyBucket> {
    values
        .iter()
        .enumerate()
        .map(|(i, &(import_kwh, export_kwh))| EnergyBucket {
            timestamp: start + Duration::minutes(15 * i as i64),
            import_kwh,
            export_kwh,
        })
        .collect()
}

/// A day-ish alternating profile: morning demand, midday surplus, evening
/// demand, with a few buckets carrying both flows.
pub fn mixed_profile() -> Vec<(f64, f64)> {
    let mut profile = Vec::new();
    for i in 0..32 {
        profile.push((0.2 + 0.01 * i as f64, 0.0));
    }
    for i in 0..32 {
        profile.push((0.05, 0.6 + 0.02 * i as f64));
    }
    for _ in 0..8 {
        profile.push((0.3, 0.3));
    }
    for i in 0..24 {
        profile.push((0.8 - 0.01 * i as f64, 0.0));
    }
    profile
}
