/// CSV export of trace and monthly tables.
pub mod export;
/// CSV import of normalized meter rows.
pub mod import;
