/// Home battery dispatch model.
pub mod battery;
/// Quarter-hour bucket aggregation of raw meter rows.
pub mod bucket;
pub mod engine;
/// Monetary savings aggregation, total and per calendar month.
pub mod finance;
pub mod metrics;
pub mod types;
