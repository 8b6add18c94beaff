//! Quarter-hour energy buckets and meter-row aggregation.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;

/// Duration of one bucket in hours.
pub const BUCKET_HOURS: f64 = 0.25;

/// Duration of one bucket in seconds.
pub const BUCKET_SECONDS: f64 = 900.0;

/// One raw meter reading: energy drawn from and fed into the grid during
/// some quarter-hour interval. Several rows may share a timestamp (e.g. one
/// row per register); the aggregator sums them.
#[derive(Debug, Clone)]
pub struct MeterRow {
    pub timestamp: NaiveDateTime,
    pub import_kwh: f64,
    pub export_kwh: f64,
}

/// Pre-battery import/export energy for one quarter-hour interval.
///
/// Produced by [`aggregate_quarter_hours`]; the simulator requires the
/// sequence to be strictly increasing in `timestamp` with non-negative,
/// finite energies.
#[derive(Debug, Clone)]
pub struct EnergyBucket {
    pub timestamp: NaiveDateTime,
    pub import_kwh: f64,
    pub export_kwh: f64,
}

/// Groups raw meter rows by timestamp into quarter-hour buckets, summing
/// import and export energy separately.
///
/// The result is sorted by timestamp and contains one bucket per distinct
/// timestamp. Values are passed through unchanged; malformed energies are
/// rejected later by the simulator, not coerced here.
pub fn aggregate_quarter_hours(rows: &[MeterRow]) -> Vec<EnergyBucket> {
    let mut by_timestamp: BTreeMap<NaiveDateTime, (f64, f64)> = BTreeMap::new();
    for row in rows {
        let entry = by_timestamp.entry(row.timestamp).or_insert((0.0, 0.0));
        entry.0 += row.import_kwh;
        entry.1 += row.export_kwh;
    }

    by_timestamp
        .into_iter()
        .map(|(timestamp, (import_kwh, export_kwh))| EnergyBucket {
            timestamp,
            import_kwh,
            export_kwh,
        })
        .collect()
}
