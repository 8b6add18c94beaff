//! Monetary savings: energy deltas priced by the import/export tariff.

use std::collections::BTreeMap;

use chrono::Datelike;

use crate::config::TariffConfig;
use crate::sim::types::{BatteryTrace, RunningTotals};

/// Net savings for one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySavings {
    pub year: i32,
    /// Calendar month, 1-12.
    pub month: u32,
    pub savings_eur: f64,
}

impl MonthlySavings {
    /// Month label in `YYYY-MM` form.
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

/// Net monetary savings of running the battery, over a set of totals.
///
/// Import avoided is valued at the import price; export given up (energy
/// diverted into the battery instead of the grid) is valued at the export
/// price, so the second term is usually negative.
pub fn total_savings_eur(totals: &RunningTotals, tariff: &TariffConfig) -> f64 {
    (totals.baseline_import_kwh - totals.grid_import_kwh) * tariff.import_price_eur_per_kwh
        + (totals.grid_export_kwh - totals.baseline_export_kwh) * tariff.export_price_eur_per_kwh
}

/// Partitions the trace by calendar month and prices each partition with
/// the identical savings formula.
///
/// The result is ordered chronologically; months with no buckets are
/// omitted, never emitted as zero.
pub fn monthly_savings(traces: &[BatteryTrace], tariff: &TariffConfig) -> Vec<MonthlySavings> {
    let mut by_month: BTreeMap<(i32, u32), RunningTotals> = BTreeMap::new();
    for trace in traces {
        let key = (trace.timestamp.year(), trace.timestamp.month());
        by_month.entry(key).or_default().record(trace);
    }

    by_month
        .into_iter()
        .map(|((year, month), totals)| MonthlySavings {
            year,
            month,
            savings_eur: total_savings_eur(&totals, tariff),
        })
        .collect()
}
