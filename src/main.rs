//! Home battery simulator entry point — CLI wiring around the dispatch pass.

use std::path::Path;
use std::process;

use bess_sim::config::SimulationConfig;
use bess_sim::io::export::{export_monthly_csv, export_trace_csv};
use bess_sim::io::import::read_meter_rows_from_path;
use bess_sim::sim::bucket::aggregate_quarter_hours;
use bess_sim::sim::engine::Simulator;
use bess_sim::sim::finance::monthly_savings;
use bess_sim::sim::metrics::SummaryReport;

/// Parsed CLI arguments.
struct CliArgs {
    input_path: Option<String>,
    config_path: Option<String>,
    trace_out: Option<String>,
    monthly_out: Option<String>,
}

fn print_help() {
    eprintln!("bess-sim — home battery dispatch simulator for quarter-hour meter data");
    eprintln!();
    eprintln!("Usage: bess-sim --input <path> [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --input <path>        Meter-row CSV (timestamp,import_kwh,export_kwh)");
    eprintln!("  --config <path>       Load battery/tariff parameters from TOML file");
    eprintln!("  --trace-out <path>    Export the per-bucket trace table to CSV");
    eprintln!("  --monthly-out <path>  Export the monthly savings table to CSV");
    eprintln!("  --help                Show this help message");
    eprintln!();
    eprintln!("Without --config, the built-in defaults are used (5 kWh, 2.5 kW, 95%).");
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        input_path: None,
        config_path: None,
        trace_out: None,
        monthly_out: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--input" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --input requires a path argument");
                    process::exit(1);
                }
                cli.input_path = Some(args[i].clone());
            }
            "--config" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --config requires a path argument");
                    process::exit(1);
                }
                cli.config_path = Some(args[i].clone());
            }
            "--trace-out" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --trace-out requires a path argument");
                    process::exit(1);
                }
                cli.trace_out = Some(args[i].clone());
            }
            "--monthly-out" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --monthly-out requires a path argument");
                    process::exit(1);
                }
                cli.monthly_out = Some(args[i].clone());
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

fn main() {
    let cli = parse_args();

    let Some(ref input_path) = cli.input_path else {
        eprintln!("error: --input is required");
        print_help();
        process::exit(1);
    };

    // Load config: --config file or built-in defaults
    let config = if let Some(ref path) = cli.config_path {
        match SimulationConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        SimulationConfig::default()
    };

    // Validate up front so every problem is reported, not just the first
    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    // Read and aggregate meter rows
    let rows = match read_meter_rows_from_path(Path::new(input_path)) {
        Ok(rows) => rows,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };
    let buckets = aggregate_quarter_hours(&rows);

    // Run the dispatch pass
    let result = match Simulator::run(&config, &buckets) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    // Print summary and monthly table
    let report = SummaryReport::from_result(&result, &config);
    println!("{report}");

    let monthly = monthly_savings(&result.traces, &config.tariff);
    if !monthly.is_empty() {
        println!("\n--- Monthly Savings ---");
        for m in &monthly {
            println!("{}  {:>8.2} EUR", m.label(), m.savings_eur);
        }
    }

    // Export CSVs if requested
    if let Some(ref path) = cli.trace_out {
        if let Err(e) = export_trace_csv(&result.traces, Path::new(path)) {
            eprintln!("error: failed to write trace CSV: {e}");
            process::exit(1);
        }
        eprintln!("Trace written to {path}");
    }
    if let Some(ref path) = cli.monthly_out {
        if let Err(e) = export_monthly_csv(&monthly, Path::new(path)) {
            eprintln!("error: failed to write monthly CSV: {e}");
            process::exit(1);
        }
        eprintln!("Monthly savings written to {path}");
    }
}
