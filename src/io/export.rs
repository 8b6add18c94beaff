//! CSV export for the dispatch trace and the monthly savings table.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sim::finance::MonthlySavings;
use crate::sim::types::BatteryTrace;

/// Column header for the per-bucket trace export.
const TRACE_HEADER: &str = "timestamp,import_kwh,export_kwh,charged_kwh,\
                            discharged_kwh,grid_import_kwh,grid_export_kwh,soc_kwh";

/// Column header for the monthly savings export.
const MONTHLY_HEADER: &str = "month,savings_eur";

/// Timestamp layout used in exported files.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Exports the dispatch trace to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_trace_csv(traces: &[BatteryTrace], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_trace_csv(traces, io::BufWriter::new(file))
}

/// Writes the dispatch trace as CSV to any writer.
///
/// One row per bucket; deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_trace_csv(traces: &[BatteryTrace], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(TRACE_HEADER.split(',').map(str::trim))?;
    for t in traces {
        wtr.write_record(&[
            t.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            format!("{:.4}", t.import_kwh),
            format!("{:.4}", t.export_kwh),
            format!("{:.4}", t.charged_kwh),
            format!("{:.4}", t.discharged_kwh),
            format!("{:.4}", t.grid_import_kwh),
            format!("{:.4}", t.grid_export_kwh),
            format!("{:.4}", t.soc_kwh),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Exports the monthly savings table to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_monthly_csv(monthly: &[MonthlySavings], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_monthly_csv(monthly, io::BufWriter::new(file))
}

/// Writes the monthly savings table as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_monthly_csv(monthly: &[MonthlySavings], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(MONTHLY_HEADER.split(','))?;
    for m in monthly {
        wtr.write_record(&[m.label(), format!("{:.2}", m.savings_eur)])?;
    }

    wtr.flush()?;
    Ok(())
}
