//! CLI binary for NMEA Kinematics
//!
//! Reads one or more NMEA logs, prints the statistics table and a preview of the
//! enriched records, and optionally exports them.

use anyhow::Result;
use clap::{Arg, Command};
use glob::glob;
use nmea_kinematics::{
    analyze_indexed_sources, display_offset, export_analysis, format_record_row,
    read_nmea_file, Analysis, AnalysisOptions, ExportOptions, RECORD_COLUMNS,
};
use std::path::{Path, PathBuf};

const SUPPORTED_EXTENSIONS: [&str; 3] = ["txt", "log", "nmea"];

const GIT_SHA: &str = match option_env!("VERGEN_GIT_SHA") {
    Some(sha) => sha,
    None => "unknown",
};

fn build_command() -> Command {
    Command::new("NMEA Kinematics")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Analyze NMEA $GPRMC logs: distance, time, speed, acceleration and sprints.")
        .arg(
            Arg::new("files")
                .help("NMEA log files to analyze (.txt, .log, .nmea extensions, case-insensitive, supports globbing). Files are combined in the order given")
                .required(true)
                .num_args(1..)
                .index(1),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable debug output and detailed parsing information")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("sort")
                .long("sort")
                .help("Sort fixes by timestamp before computing deltas (default: keep input order)")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("csv")
                .long("csv")
                .help("Export enriched records and statistics to CSV files (.records.csv, .stats.csv)")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Export statistics to a JSON file (.stats.json)")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("gpx")
                .long("gpx")
                .help("Export the track to a GPX XML file (.gps.gpx)")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .help("Directory for exported files (default: same as the first input file)")
                .value_name("DIR"),
        )
        .arg(
            Arg::new("utc-offset")
                .long("utc-offset")
                .help("Offset from UTC in hours for displayed and exported timestamps")
                .value_name("HOURS")
                .allow_negative_numbers(true)
                .value_parser(clap::value_parser!(f64))
                .default_value("0"),
        )
        .arg(
            Arg::new("preview")
                .long("preview")
                .help("Number of enriched records to print")
                .value_name("N")
                .value_parser(clap::value_parser!(usize))
                .default_value("5"),
        )
}

/// Expand glob patterns and keep existing files with a supported extension
fn collect_input_paths(patterns: &[&String]) -> Vec<PathBuf> {
    let mut valid_paths = Vec::new();

    for pattern in patterns {
        let paths: Vec<PathBuf> = if pattern.contains('*') || pattern.contains('?') {
            match glob(pattern) {
                Ok(glob_iter) => match glob_iter.collect::<Result<Vec<_>, _>>() {
                    Ok(paths) => {
                        log::debug!("Glob pattern '{pattern}' matched {} files", paths.len());
                        paths
                    }
                    Err(e) => {
                        eprintln!("Error expanding glob pattern '{pattern}': {e}");
                        continue;
                    }
                },
                Err(e) => {
                    eprintln!("Invalid glob pattern '{pattern}': {e}");
                    continue;
                }
            }
        } else {
            vec![Path::new(pattern.as_str()).to_path_buf()]
        };

        for path in paths {
            if !path.exists() {
                eprintln!("Warning: File does not exist: {path:?}");
                continue;
            }

            let valid_extension = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
                .unwrap_or(false);

            if !valid_extension {
                let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("none");
                eprintln!("Warning: Skipping file with unsupported extension '{ext}': {path:?}");
                continue;
            }

            log::debug!("Added valid file: {path:?}");
            valid_paths.push(path);
        }
    }

    valid_paths
}

fn display_statistics(analysis: &Analysis) {
    println!("Key Performance Indicators");
    for (metric, value) in analysis.report.rows() {
        let rendered = value.map_or_else(|| "N/A".to_string(), |v| v.to_string());
        println!("  {:<26} {}", metric.label(), rendered);
    }
}

fn display_preview(analysis: &Analysis, rows: usize, utc_offset_hours: f64) -> Result<()> {
    if rows == 0 {
        return Ok(());
    }
    let offset = display_offset(utc_offset_hours)?;

    println!();
    println!("Raw Data Preview");
    println!("  {}", RECORD_COLUMNS.join(","));
    for record in analysis.records.iter().take(rows) {
        println!("  {}", format_record_row(record, &offset).join(","));
    }
    Ok(())
}

fn main() -> Result<()> {
    let matches = build_command().get_matches();

    let debug = matches.get_flag("debug");
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if debug { "debug" } else { "warn" }),
    )
    .init();
    log::debug!("nmea_kinematics {} ({})", env!("CARGO_PKG_VERSION"), GIT_SHA);

    let file_patterns: Vec<&String> = matches
        .get_many::<String>("files")
        .map(|values| values.collect())
        .unwrap_or_default();
    let utc_offset_hours = matches.get_one::<f64>("utc-offset").copied().unwrap_or(0.0);
    let preview_rows = matches.get_one::<usize>("preview").copied().unwrap_or(5);

    let analysis_options = AnalysisOptions {
        sort_by_timestamp: matches.get_flag("sort"),
        ..AnalysisOptions::default()
    };
    let export_options = ExportOptions {
        csv: matches.get_flag("csv"),
        json: matches.get_flag("json"),
        gpx: matches.get_flag("gpx"),
        output_dir: matches.get_one::<String>("output-dir").cloned(),
        utc_offset_hours,
    };

    let valid_paths = collect_input_paths(&file_patterns);
    if valid_paths.is_empty() {
        eprintln!("Error: No valid files found to process.");
        eprintln!("Supported extensions: .TXT, .LOG, .NMEA (case-insensitive)");
        eprintln!("Input patterns were: {file_patterns:?}");
        std::process::exit(1);
    }

    let mut sources = Vec::with_capacity(valid_paths.len());
    for (index, path) in valid_paths.iter().enumerate() {
        match read_nmea_file(path) {
            Ok(text) => sources.push((index, text)),
            Err(e) => {
                eprintln!("Error reading {}: {e:#}", path.display());
                eprintln!("Continuing with next file...");
            }
        }
    }

    let analysis = analyze_indexed_sources(&sources, &analysis_options);
    if !analysis.warnings.is_empty() {
        eprintln!(
            "Warning: {} malformed $GPRMC sentences were skipped",
            analysis.warnings.len()
        );
    }

    if !analysis.has_data() {
        eprintln!("Error: No valid GPS data found in input files");
        std::process::exit(1);
    }

    display_statistics(&analysis);
    display_preview(&analysis, preview_rows, utc_offset_hours)?;

    // Exports are named after the first file that was actually read
    let first_read = sources
        .first()
        .map(|&(index, _)| valid_paths[index].as_path())
        .unwrap_or(valid_paths[0].as_path());
    let report = export_analysis(&analysis, first_read, &export_options)?;
    for path in [
        report.records_csv_path,
        report.stats_csv_path,
        report.stats_json_path,
        report.gpx_path,
    ]
    .into_iter()
    .flatten()
    {
        println!("Exported: {}", path.display());
    }

    Ok(())
}
