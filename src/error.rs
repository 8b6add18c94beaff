//! Simulation error taxonomy: configuration errors and data errors.

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised by the dispatch simulator.
///
/// Configuration errors are raised before any step executes; data errors
/// abort the run at the offending bucket. The simulator never coerces
/// malformed values or recovers mid-run.
#[derive(Debug, Error)]
pub enum SimError {
    /// Invalid simulation configuration (see [`ConfigError`]).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A bucket carried a non-finite or negative energy value.
    #[error("data error at {timestamp}: {field} is {value}, expected a finite value >= 0")]
    InvalidEnergy {
        timestamp: NaiveDateTime,
        field: &'static str,
        value: f64,
    },

    /// Bucket timestamps must be strictly increasing; duplicates are
    /// rejected too.
    #[error(
        "data error at {timestamp}: timestamps must be strictly increasing \
         (previous bucket was {previous})"
    )]
    OutOfOrder {
        timestamp: NaiveDateTime,
        previous: NaiveDateTime,
    },
}
