//! Integration tests for financial aggregation and the export pipeline.

mod common;

use bess_sim::io::export::{write_monthly_csv, write_trace_csv};
use bess_sim::io::import::read_meter_rows;
use bess_sim::sim::bucket::aggregate_quarter_hours;
use bess_sim::sim::engine::Simulator;
use bess_sim::sim::finance::{monthly_savings, total_savings_eur};
use bess_sim::sim::metrics::SummaryReport;
use chrono::NaiveDate;

#[test]
fn monthly_partition_sums_to_total_across_month_boundary() {
    let config = common::default_config();
    // Start late on January 31st so the profile spills into February.
    let start = NaiveDate::from_ymd_opt(2024, 1, 31)
        .and_then(|d| d.and_hms_opt(18, 0, 0))
        .expect("valid timestamp");
    let buckets = common::buckets_from(start, &common::mixed_profile());
    let result = Simulator::run(&config, &buckets).expect("valid run");

    let monthly = monthly_savings(&result.traces, &config.tariff);
    assert_eq!(monthly.len(), 2);
    assert_eq!(monthly[0].label(), "2024-01");
    assert_eq!(monthly[1].label(), "2024-02");

    let total = total_savings_eur(&result.totals, &config.tariff);
    let monthly_sum: f64 = monthly.iter().map(|m| m.savings_eur).sum();
    assert!(
        (total - monthly_sum).abs() < 1e-9,
        "total {total} != monthly sum {monthly_sum}"
    );
}

#[test]
fn summary_savings_matches_finance_module() {
    let config = common::default_config();
    let buckets = common::buckets(&common::mixed_profile());
    let result = Simulator::run(&config, &buckets).expect("valid run");

    let report = SummaryReport::from_result(&result, &config);
    let direct = total_savings_eur(&result.totals, &config.tariff);
    assert_eq!(report.total_savings_eur, direct);
}

#[test]
fn battery_never_worsens_import_or_export_totals() {
    let config = common::default_config();
    let buckets = common::buckets(&common::mixed_profile());
    let result = Simulator::run(&config, &buckets).expect("valid run");

    // The battery can only reduce import and reduce export, never add flow.
    assert!(result.totals.grid_import_kwh <= result.totals.baseline_import_kwh + 1e-9);
    assert!(result.totals.grid_export_kwh <= result.totals.baseline_export_kwh + 1e-9);
}

#[test]
fn csv_rows_to_summary_pipeline() {
    let csv = "timestamp,import_kwh,export_kwh\n\
               2024-06-01 00:00,0.30,0.00\n\
               2024-06-01 00:00,0.10,0.00\n\
               2024-06-01 00:15,0.00,0.80\n\
               2024-06-01 00:30,0.20,0.10\n";
    let rows = read_meter_rows(csv.as_bytes()).expect("valid csv");
    let buckets = aggregate_quarter_hours(&rows);
    assert_eq!(buckets.len(), 3);
    // Duplicate-timestamp rows are summed before simulation.
    assert!((buckets[0].import_kwh - 0.4).abs() < 1e-12);

    let config = common::default_config();
    let result = Simulator::run(&config, &buckets).expect("valid run");
    assert_eq!(result.traces.len(), 3);

    let report = SummaryReport::from_result(&result, &config);
    assert!((report.total_hours - 0.75).abs() < 1e-12);
    assert!((report.baseline_import_kwh - 0.6).abs() < 1e-12);
    assert!((report.baseline_export_kwh - 0.9).abs() < 1e-12);
}

#[test]
fn exported_tables_line_up_with_the_run() {
    let config = common::default_config();
    let start = NaiveDate::from_ymd_opt(2024, 1, 31)
        .and_then(|d| d.and_hms_opt(23, 0, 0))
        .expect("valid timestamp");
    let buckets = common::buckets_from(start, &[(0.5, 0.0); 8]);
    let result = Simulator::run(&config, &buckets).expect("valid run");

    let mut trace_csv = Vec::new();
    write_trace_csv(&result.traces, &mut trace_csv).expect("trace export");
    let trace_text = String::from_utf8(trace_csv).expect("utf-8 csv");
    // 1 header + 8 rows
    assert_eq!(trace_text.lines().count(), 9);
    assert!(trace_text.contains("2024-01-31 23:00"));
    assert!(trace_text.contains("2024-02-01 00:45"));

    let monthly = monthly_savings(&result.traces, &config.tariff);
    let mut monthly_csv = Vec::new();
    write_monthly_csv(&monthly, &mut monthly_csv).expect("monthly export");
    let monthly_text = String::from_utf8(monthly_csv).expect("utf-8 csv");
    let lines: Vec<&str> = monthly_text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("2024-01,"));
    assert!(lines[2].starts_with("2024-02,"));
}
