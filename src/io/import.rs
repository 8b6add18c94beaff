//! CSV reader for normalized quarter-hour meter rows.
//!
//! Expects `timestamp,import_kwh,export_kwh` columns (any order, headers
//! matched case-insensitively). Locale normalization of exotic delimiters or
//! decimal commas belongs to an upstream ingestion step, not here. Values
//! are passed through as parsed; range validation happens in the simulator.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::sim::bucket::MeterRow;

/// Accepted timestamp layouts, tried in order.
const TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Meter-row import error with line context.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("cannot read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column \"{0}\"")]
    MissingColumn(&'static str),

    #[error("line {line}: cannot parse timestamp \"{value}\"")]
    Timestamp { line: u64, value: String },

    #[error("line {line}: cannot parse {field} \"{value}\"")]
    Number {
        line: u64,
        field: &'static str,
        value: String,
    },
}

/// Reads meter rows from a CSV file.
///
/// # Errors
///
/// Returns an `ImportError` if the file cannot be opened or parsed.
pub fn read_meter_rows_from_path(path: &Path) -> Result<Vec<MeterRow>, ImportError> {
    let file = File::open(path)?;
    read_meter_rows(file)
}

/// Reads meter rows from any reader.
///
/// # Errors
///
/// Returns an `ImportError` on malformed CSV, a missing column, or an
/// unparseable timestamp or number. Nothing is coerced to zero.
pub fn read_meter_rows(reader: impl Read) -> Result<Vec<MeterRow>, ImportError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let headers = rdr.headers()?.clone();
    let column = |name: &'static str| -> Result<usize, ImportError> {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
            .ok_or(ImportError::MissingColumn(name))
    };
    let ts_idx = column("timestamp")?;
    let import_idx = column("import_kwh")?;
    let export_idx = column("export_kwh")?;

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        let ts_raw = record.get(ts_idx).unwrap_or_default();
        let timestamp = parse_timestamp(ts_raw).ok_or_else(|| ImportError::Timestamp {
            line,
            value: ts_raw.to_string(),
        })?;

        let parse_energy = |idx: usize, field: &'static str| -> Result<f64, ImportError> {
            let raw = record.get(idx).unwrap_or_default();
            raw.parse::<f64>().map_err(|_| ImportError::Number {
                line,
                field,
                value: raw.to_string(),
            })
        };

        rows.push(MeterRow {
            timestamp,
            import_kwh: parse_energy(import_idx, "import_kwh")?,
            export_kwh: parse_energy(export_idx, "export_kwh")?,
        });
    }

    Ok(rows)
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}
