//! Per-bucket trace records and running fold totals.

use chrono::NaiveDateTime;

/// Complete record of the battery's action for one quarter-hour bucket.
///
/// `import_kwh`/`export_kwh` are the pre-battery meter readings;
/// `grid_import_kwh`/`grid_export_kwh` are the residual grid flows after the
/// battery's action. `soc_kwh` is the state of charge at the end of the
/// bucket and stays within the configured SoC band (up to a small floating
/// tolerance).
#[derive(Debug, Clone)]
pub struct BatteryTrace {
    /// Bucket timestamp.
    pub timestamp: NaiveDateTime,
    /// Pre-battery grid import for this bucket (kWh).
    pub import_kwh: f64,
    /// Pre-battery grid export for this bucket (kWh).
    pub export_kwh: f64,
    /// Energy stored into the battery this bucket, after losses (kWh, >= 0).
    pub charged_kwh: f64,
    /// Energy delivered to the load this bucket, after losses (kWh, >= 0).
    pub discharged_kwh: f64,
    /// Residual grid import after battery discharge (kWh, >= 0).
    pub grid_import_kwh: f64,
    /// Residual grid export after battery charging (kWh, >= 0).
    pub grid_export_kwh: f64,
    /// State of charge at the end of this bucket (kWh).
    pub soc_kwh: f64,
}

/// Cumulative energy totals threaded through the sequential dispatch pass.
///
/// All fields are monotonically non-decreasing sums over the traces recorded
/// so far. The baseline fields sum the raw bucket values, i.e. the grid
/// flows that would have occurred with no battery present.
#[derive(Debug, Clone, Default)]
pub struct RunningTotals {
    /// Total energy charged into the battery (kWh).
    pub charged_kwh: f64,
    /// Total grid import with the battery (kWh).
    pub grid_import_kwh: f64,
    /// Total grid export with the battery (kWh).
    pub grid_export_kwh: f64,
    /// Total grid import without the battery (kWh).
    pub baseline_import_kwh: f64,
    /// Total grid export without the battery (kWh).
    pub baseline_export_kwh: f64,
}

impl RunningTotals {
    /// Accumulates one trace into the totals.
    pub fn record(&mut self, trace: &BatteryTrace) {
        self.charged_kwh += trace.charged_kwh;
        self.grid_import_kwh += trace.grid_import_kwh;
        self.grid_export_kwh += trace.grid_export_kwh;
        self.baseline_import_kwh += trace.import_kwh;
        self.baseline_export_kwh += trace.export_kwh;
    }
}
