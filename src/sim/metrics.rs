//! Post-hoc summary metrics computed from the dispatch trace.

use std::fmt;

use crate::config::SimulationConfig;
use crate::sim::battery::SOC_EPSILON;
use crate::sim::bucket::BUCKET_HOURS;
use crate::sim::engine::SimulationResult;
use crate::sim::finance::total_savings_eur;

/// Aggregate results of a complete simulation run.
///
/// Computed post-hoc from the trace and the running totals to keep the
/// per-bucket data and the reported metrics consistent.
#[derive(Debug, Clone)]
pub struct SummaryReport {
    /// Total energy charged into the battery (kWh).
    pub charged_kwh: f64,
    /// Total grid import with the battery (kWh).
    pub grid_import_kwh: f64,
    /// Total grid import without the battery (kWh).
    pub baseline_import_kwh: f64,
    /// Total grid export with the battery (kWh).
    pub grid_export_kwh: f64,
    /// Total grid export without the battery (kWh).
    pub baseline_export_kwh: f64,
    /// State of charge after the last bucket (kWh).
    pub final_soc_kwh: f64,
    /// Time spent at the SoC ceiling (hours).
    pub full_hours: f64,
    /// Time spent at the SoC floor (hours).
    pub empty_hours: f64,
    /// Total simulated time (hours).
    pub total_hours: f64,
    /// Share of time at the ceiling (percent).
    pub full_pct: f64,
    /// Share of time at the floor (percent).
    pub empty_pct: f64,
    /// Net monetary savings over the whole run.
    pub total_savings_eur: f64,
}

impl SummaryReport {
    /// Computes the summary for a finished run.
    pub fn from_result(result: &SimulationResult, config: &SimulationConfig) -> Self {
        let bat = &config.battery;
        let soc_min_kwh = bat.soc_min_pct / 100.0 * bat.capacity_kwh;
        let soc_max_kwh = bat.soc_max_pct / 100.0 * bat.capacity_kwh;

        let mut full_count = 0_usize;
        let mut empty_count = 0_usize;
        for trace in &result.traces {
            // Full and empty overlap only for a degenerate SoC band.
            if trace.soc_kwh >= soc_max_kwh - SOC_EPSILON {
                full_count += 1;
            }
            if trace.soc_kwh <= soc_min_kwh + SOC_EPSILON {
                empty_count += 1;
            }
        }

        let full_hours = full_count as f64 * BUCKET_HOURS;
        let empty_hours = empty_count as f64 * BUCKET_HOURS;
        let total_hours = result.traces.len() as f64 * BUCKET_HOURS;
        let (full_pct, empty_pct) = if total_hours > 0.0 {
            (
                100.0 * full_hours / total_hours,
                100.0 * empty_hours / total_hours,
            )
        } else {
            (0.0, 0.0)
        };

        let totals = &result.totals;
        Self {
            charged_kwh: totals.charged_kwh,
            grid_import_kwh: totals.grid_import_kwh,
            baseline_import_kwh: totals.baseline_import_kwh,
            grid_export_kwh: totals.grid_export_kwh,
            baseline_export_kwh: totals.baseline_export_kwh,
            final_soc_kwh: result.final_soc_kwh,
            full_hours,
            empty_hours,
            total_hours,
            full_pct,
            empty_pct,
            total_savings_eur: total_savings_eur(totals, &config.tariff),
        }
    }
}

impl fmt::Display for SummaryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Simulation Summary ---")?;
        writeln!(f, "Energy charged into battery:  {:.2} kWh", self.charged_kwh)?;
        writeln!(
            f,
            "Grid import:                  {:.2} kWh (baseline {:.2} kWh)",
            self.grid_import_kwh, self.baseline_import_kwh
        )?;
        writeln!(
            f,
            "Grid export:                  {:.2} kWh (baseline {:.2} kWh)",
            self.grid_export_kwh, self.baseline_export_kwh
        )?;
        writeln!(f, "Final state of charge:        {:.2} kWh", self.final_soc_kwh)?;
        writeln!(
            f,
            "Battery full:                 {:.2} h ({:.1}% of {:.2} h)",
            self.full_hours, self.full_pct, self.total_hours
        )?;
        writeln!(
            f,
            "Battery empty:                {:.2} h ({:.1}% of {:.2} h)",
            self.empty_hours, self.empty_pct, self.total_hours
        )?;
        write!(f, "Total savings:                {:.2} EUR", self.total_savings_eur)
    }
}
