//! Crecida flash-flood early-warning CLI
//!
//! Runs a single monitoring cycle against a basin catalogue and a station
//! feed (plus an optional radar grid), and reports the resulting alerts.

use chrono::Utc;
use clap::{Parser, ValueEnum};
use crecida::alert::History;
use crecida::basin::BasinCatalogue;
use crecida::pipeline::run_cycle;
use crecida::radar::RadarGrid;
use crecida::{csv as crecida_csv, snapshot::Snapshot};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "crecida")]
#[command(version = "0.1.0")]
#[command(about = "Flash-flood early-warning hydrology pipeline", long_about = None)]
struct Cli {
    /// Path to the basin catalogue JSON file
    #[arg(short, long, value_name = "FILE")]
    basins: PathBuf,

    /// Path to a station observations CSV file
    #[arg(short, long, value_name = "FILE")]
    stations: PathBuf,

    /// Path to a radar grid JSON file. Ignored unless AEMET_API_KEY is set
    /// in the environment (radar activation, §6).
    #[arg(long, value_name = "FILE")]
    radar: Option<PathBuf>,

    /// Output file path (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable text report
    Text,
    /// JSON snapshot
    Json,
    /// CSV tables (requires --output as a base path)
    Csv,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    println!("Loading basin catalogue...");
    let basins_json = std::fs::read_to_string(&cli.basins)
        .map_err(|e| format!("failed to read basin catalogue: {e}"))?;
    let catalogue = BasinCatalogue::from_json(&basins_json)
        .map_err(|e| format!("failed to parse basin catalogue: {e}"))?;
    println!("  Loaded {} basins", catalogue.basins.len());

    println!("Loading station observations...");
    let stations = crecida_csv::parse_stations_csv(&cli.stations)
        .map_err(|e| format!("failed to parse station feed: {e}"))?;
    println!("  Loaded {} stations", stations.len());

    let radar = if std::env::var("AEMET_API_KEY").is_ok() {
        match &cli.radar {
            Some(path) => {
                println!("Loading radar grid...");
                let radar_json = std::fs::read_to_string(path)
                    .map_err(|e| format!("failed to read radar grid: {e}"))?;
                let grid: RadarGrid = serde_json::from_str(&radar_json)
                    .map_err(|e| format!("failed to parse radar grid: {e}"))?;
                println!("  Loaded {} radar pixels", grid.pixels.len());
                Some(grid)
            }
            None => {
                log::info!("AEMET_API_KEY is set but no --radar file was given; running gauge-only");
                None
            }
        }
    } else {
        log::info!("AEMET_API_KEY is unset; radar disabled, running gauge-only");
        None
    };

    println!("\nRunning cycle...");
    let mut history = History::new();
    let snapshot = run_cycle(&catalogue, &stations, radar.as_ref(), &mut history, Utc::now());

    println!("  {} basins modeled, {} failed", snapshot.basin_results.len(), snapshot.failures.len());
    for failure in &snapshot.failures {
        println!("  ! basin {}: {}", failure.basin_id, failure.message);
    }

    println!("\n{}", "=".repeat(80));
    println!("CYCLE RESULTS");
    println!("{}\n", "=".repeat(80));

    match cli.format {
        OutputFormat::Text => {
            let report = format_text_report(&snapshot);
            emit(&cli.output, &report)?;
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&snapshot)?;
            emit(&cli.output, &json)?;
        }
        OutputFormat::Csv => match &cli.output {
            Some(base_path) => {
                let results_path = base_path.with_extension("basins.csv");
                crecida_csv::write_basin_results_csv(&results_path, &snapshot.basin_results)?;
                let alerts_path = base_path.with_extension("alerts.csv");
                crecida_csv::write_alerts_csv(&alerts_path, &history.active())?;
                println!("Results written to {} and {}", results_path.display(), alerts_path.display());
            }
            None => println!("CSV output requires --output to specify a base filename"),
        },
    }

    if !snapshot.active_alerts.is_empty() {
        println!("\n{}", "=".repeat(80));
        println!("ACTIVE ALERTS");
        println!("{}\n", "=".repeat(80));
        for alert in &snapshot.active_alerts {
            println!("[{:?}] basin {}: {:.2} m^3/s", alert.level, alert.basin_id, alert.peak_cms);
        }
    } else {
        println!("\n✓ No active alerts");
    }

    Ok(())
}

fn emit(output: &Option<PathBuf>, contents: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        std::fs::write(path, contents)?;
        println!("Results written to {}", path.display());
    } else {
        println!("{}", contents);
    }
    Ok(())
}

fn format_text_report(snapshot: &Snapshot) -> String {
    let mut report = String::new();
    report.push_str("BASIN RESULTS\n");
    report.push_str(&format!("{:-<90}\n", ""));
    report.push_str(&format!(
        "{:<12} {:<14} {:<16} {:<14} {:<14}\n",
        "Basin ID", "Peak (m^3/s)", "Time-to-peak (h)", "Precip (mm)", "Intensity (mm/h)"
    ));
    report.push_str(&format!("{:-<90}\n", ""));

    for result in &snapshot.basin_results {
        report.push_str(&format!(
            "{:<12} {:>14.2} {:>16.2} {:>14.2} {:>14.2}\n",
            result.basin_id,
            result.peak_cms,
            result.time_to_peak_hours,
            result.rainfall.mean_precip_mm,
            result.rainfall.max_intensity_mm_h,
        ));
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crecida::alert::{Alert, Level};
    use crecida::estimator::BasinRainfall;
    use crecida::hydrology::{BasinMethod, BasinResult};
    use chrono::TimeZone;

    #[test]
    fn text_report_lists_every_basin() {
        let snapshot = Snapshot {
            generated_at: Utc.with_ymd_and_hms(2026, 7, 28, 12, 0, 0).unwrap(),
            stations: Default::default(),
            radar: None,
            basin_results: vec![BasinResult {
                basin_id: "b1".into(),
                method: BasinMethod::SemiDistributed,
                dt_hours: 0.25,
                rainfall: BasinRainfall { mean_precip_mm: 10.0, max_intensity_mm_h: 5.0, per_subcatchment: vec![] },
                subcatchments: vec![],
                outlet_hydrograph_cms: vec![],
                peak_cms: 42.0,
                time_to_peak_hours: 3.0,
            }],
            active_alerts: vec![Alert {
                basin_id: "b1".into(),
                level: Level::Yellow,
                message: "basin b1 at Yellow: peak 42.00 m^3/s".into(),
                peak_cms: 42.0,
                precipitation: 10.0,
                intensity: 5.0,
                timestamp: Utc.with_ymd_and_hms(2026, 7, 28, 12, 0, 0).unwrap(),
            }],
            failures: vec![],
        };
        let report = format_text_report(&snapshot);
        assert!(report.contains("b1"));
        assert!(report.contains("42.00"));
    }
}
