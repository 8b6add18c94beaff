//! Home battery dispatch simulator for quarter-hour meter data.

pub mod config;
pub mod error;
/// CSV import/export of meter rows and simulation results.
pub mod io;
/// Dispatch simulator, metrics, and financial aggregation modules.
pub mod sim;
