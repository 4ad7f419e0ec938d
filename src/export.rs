//! Export functionality for analyzed NMEA data
//!
//! Writers that hand the enriched records and the statistics report to
//! external consumers: CSV tables, a JSON report and a GPX track. The display
//! timezone is passed in through [`ExportOptions`]; timestamps themselves stay
//! timezone-free.

use crate::types::*;
use crate::Result;
use anyhow::{anyhow, Context};
use chrono::{FixedOffset, NaiveDateTime, TimeZone, Utc};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Namespace of the `speed`/`course` track point extensions in GPX output
pub const GPX_EXTENSION_NAMESPACE: &str = "https://github.com/nerdCopter/nmea_kinematics/gpx/1";

/// Export options for controlling output formats
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub csv: bool,
    pub json: bool,
    pub gpx: bool,
    pub output_dir: Option<String>,
    /// Offset from UTC, in hours, used to render timestamps in CSV output
    pub utc_offset_hours: f64,
}

/// Paths of the files an export writes
#[derive(Debug, Clone, PartialEq)]
pub struct ExportPaths {
    pub records_csv: PathBuf,
    pub stats_csv: PathBuf,
    pub stats_json: PathBuf,
    pub gpx: PathBuf,
}

/// Files actually written by [`export_analysis`]
#[derive(Debug, Clone, Default)]
pub struct ExportReport {
    pub records_csv_path: Option<PathBuf>,
    pub stats_csv_path: Option<PathBuf>,
    pub stats_json_path: Option<PathBuf>,
    pub gpx_path: Option<PathBuf>,
}

/// Compute output paths next to `input_path`, or under `output_dir` when set
pub fn compute_export_paths(input_path: &Path, export_options: &ExportOptions) -> ExportPaths {
    let base_name = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("nmea");

    let output_dir = match export_options.output_dir {
        Some(ref dir) => PathBuf::from(dir),
        None => input_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    };

    ExportPaths {
        records_csv: output_dir.join(format!("{base_name}.records.csv")),
        stats_csv: output_dir.join(format!("{base_name}.stats.csv")),
        stats_json: output_dir.join(format!("{base_name}.stats.json")),
        gpx: output_dir.join(format!("{base_name}.gps.gpx")),
    }
}

/// Build the display offset from a whole or fractional hour count
pub fn display_offset(utc_offset_hours: f64) -> Result<FixedOffset> {
    let seconds = (utc_offset_hours * 3600.0).round();
    if !seconds.is_finite() || seconds.abs() >= 86_400.0 {
        return Err(anyhow!("UTC offset out of range: {} hours", utc_offset_hours));
    }
    FixedOffset::east_opt(seconds as i32)
        .ok_or_else(|| anyhow!("UTC offset out of range: {} hours", utc_offset_hours))
}

/// Render a timestamp, taken as UTC, in `offset`; undefined renders empty
pub fn format_timestamp(timestamp: Option<NaiveDateTime>, offset: &FixedOffset) -> String {
    match timestamp {
        Some(ts) => Utc
            .from_utc_datetime(&ts)
            .with_timezone(offset)
            .format("%Y-%m-%dT%H:%M:%S%.3f%:z")
            .to_string(),
        None => String::new(),
    }
}

/// Render an optional metric; undefined renders empty
pub fn format_value(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Column names of the enriched record table
pub const RECORD_COLUMNS: [&str; 9] = [
    "timestamp",
    "latitude",
    "longitude",
    "speed_kmh",
    "course_deg",
    "time_delta_s",
    "speed_delta_kmh",
    "acceleration_ms2",
    "distance_m",
];

/// Render one record as a row matching [`RECORD_COLUMNS`]
pub fn format_record_row(record: &EnrichedRecord, offset: &FixedOffset) -> [String; 9] {
    [
        format_timestamp(record.timestamp, offset),
        record.fix.latitude.to_string(),
        record.fix.longitude.to_string(),
        record.fix.speed.to_string(),
        record.fix.course.to_string(),
        format_value(record.time_delta()),
        format_value(record.speed_delta()),
        format_value(record.acceleration()),
        format_value(record.distance()),
    ]
}

/// Write the enriched records as CSV
#[cfg(feature = "csv")]
pub fn export_records_to_csv(
    records: &[EnrichedRecord],
    output_path: &Path,
    offset: &FixedOffset,
) -> Result<()> {
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("Failed to create records CSV file: {output_path:?}"))?;

    writer.write_record(RECORD_COLUMNS)?;
    for record in records {
        writer.write_record(format_record_row(record, offset))?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to flush records CSV file: {output_path:?}"))?;
    Ok(())
}

/// Write the statistics report as a two-column `Metric,Value` CSV table
#[cfg(feature = "csv")]
pub fn export_statistics_to_csv(report: &StatisticsReport, output_path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("Failed to create statistics CSV file: {output_path:?}"))?;

    writer.write_record(["Metric", "Value"])?;
    for (metric, value) in report.rows() {
        writer.write_record([metric.label().to_string(), format_value(value)])?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to flush statistics CSV file: {output_path:?}"))?;
    Ok(())
}

/// Write the statistics report as a JSON object keyed by metric key
///
/// Unavailable metrics are written as `null`.
#[cfg(feature = "json")]
pub fn export_statistics_to_json(report: &StatisticsReport, output_path: &Path) -> Result<()> {
    let mut object = serde_json::Map::new();
    for (metric, value) in report.rows() {
        let json_value = match metric {
            Metric::SprintCount => serde_json::Value::from(report.sprint_count),
            _ => value
                .and_then(serde_json::Number::from_f64)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
        };
        object.insert(metric.key().to_string(), json_value);
    }

    let file = File::create(output_path)
        .with_context(|| format!("Failed to create statistics JSON file: {output_path:?}"))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &serde_json::Value::Object(object))?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Write the record positions as a GPX track
///
/// Records without a timestamp are written without `<time>`. Nothing is
/// written for an empty sequence.
pub fn export_to_gpx(records: &[EnrichedRecord], output_path: &Path) -> Result<()> {
    if records.is_empty() {
        return Ok(());
    }

    let file = File::create(output_path)
        .with_context(|| format!("Failed to create GPX file: {output_path:?}"))?;
    let mut gpx = BufWriter::new(file);

    writeln!(gpx, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        gpx,
        r#"<gpx creator="nmea_kinematics" version="1.1" xmlns="http://www.topografix.com/GPX/1/1" xmlns:nk="{GPX_EXTENSION_NAMESPACE}">"#
    )?;
    writeln!(gpx, "<trk><name>NMEA track</name><trkseg>")?;

    for record in records {
        let speed_ms = record.fix.speed / 3.6;
        match record.timestamp {
            Some(ts) => writeln!(
                gpx,
                r#"  <trkpt lat="{:.7}" lon="{:.7}"><time>{}Z</time><extensions><nk:speed>{:.3}</nk:speed><nk:course>{:.1}</nk:course></extensions></trkpt>"#,
                record.fix.latitude,
                record.fix.longitude,
                ts.format("%Y-%m-%dT%H:%M:%S%.3f"),
                speed_ms,
                record.fix.course
            )?,
            None => writeln!(
                gpx,
                r#"  <trkpt lat="{:.7}" lon="{:.7}"><extensions><nk:speed>{:.3}</nk:speed><nk:course>{:.1}</nk:course></extensions></trkpt>"#,
                record.fix.latitude, record.fix.longitude, speed_ms, record.fix.course
            )?,
        }
    }

    writeln!(gpx, "</trkseg></trk>")?;
    writeln!(gpx, "</gpx>")?;
    gpx.flush()
        .with_context(|| format!("Failed to flush GPX file: {output_path:?}"))?;
    Ok(())
}

/// Export an analysis in every format enabled in `export_options`
///
/// File names derive from `input_path`; the output directory is created when missing.
pub fn export_analysis(
    analysis: &Analysis,
    input_path: &Path,
    export_options: &ExportOptions,
) -> Result<ExportReport> {
    let mut report = ExportReport::default();
    if !(export_options.csv || export_options.json || export_options.gpx) {
        return Ok(report);
    }

    let paths = compute_export_paths(input_path, export_options);
    if let Some(dir) = paths.records_csv.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory: {dir:?}"))?;
            log::debug!("Created output directory: {dir:?}");
        }
    }

    if export_options.csv {
        #[cfg(feature = "csv")]
        {
            let offset = display_offset(export_options.utc_offset_hours)?;
            export_records_to_csv(&analysis.records, &paths.records_csv, &offset)?;
            export_statistics_to_csv(&analysis.report, &paths.stats_csv)?;
            log::info!("Exported records to: {}", paths.records_csv.display());
            report.records_csv_path = Some(paths.records_csv.clone());
            report.stats_csv_path = Some(paths.stats_csv.clone());
        }
        #[cfg(not(feature = "csv"))]
        return Err(crate::error::NmeaError::Export(
            "CSV export requires the `csv` feature".to_string(),
        )
        .into());
    }

    if export_options.json {
        #[cfg(feature = "json")]
        {
            export_statistics_to_json(&analysis.report, &paths.stats_json)?;
            log::info!("Exported statistics to: {}", paths.stats_json.display());
            report.stats_json_path = Some(paths.stats_json.clone());
        }
        #[cfg(not(feature = "json"))]
        return Err(crate::error::NmeaError::Export(
            "JSON export requires the `json` feature".to_string(),
        )
        .into());
    }

    if export_options.gpx && analysis.has_data() {
        export_to_gpx(&analysis.records, &paths.gpx)?;
        log::info!("Exported GPS track to: {}", paths.gpx.display());
        report.gpx_path = Some(paths.gpx);
    }

    Ok(report)
}
