//! End-to-end tests of the parse → assemble → derive → aggregate pipeline
//!
//! Covers:
//! - Malformed and ignorable lines inside otherwise valid logs
//! - Multi-source concatenation order and the opt-in timestamp sort
//! - Derived fields relative to the immediate predecessor
//! - Statistics, sprint counting and the empty-input report

use approx::assert_abs_diff_eq;
use nmea_kinematics::*;
use std::fs;
use tempfile::TempDir;

/// Build an RMC sentence at the equator, `lon_minutes` east of Greenwich
fn rmc(time: &str, lon_minutes: f64, knots: f64) -> String {
    format!(
        "$GPRMC,{time},A,0000.0000,N,{:03}{:07.4},E,{knots},90.0,150624,,,A*00",
        (lon_minutes / 60.0) as u32,
        lon_minutes % 60.0
    )
}

fn kmh_to_knots(kmh: f64) -> f64 {
    kmh / 1.852
}

#[test]
fn test_malformed_line_warns_and_next_line_parses() {
    let log = format!("$GPRMC,bad\n{}\n", rmc("120000.000", 0.0, 1.0));
    let analysis = analyze_sources(&[log], &AnalysisOptions::default());

    assert_eq!(analysis.records.len(), 1, "Valid line after bad one should parse");
    assert_eq!(analysis.warnings.len(), 1);
    let warning = &analysis.warnings[0];
    assert_eq!(warning.line, "$GPRMC,bad");
    assert_eq!(warning.line_number, 1);
    assert_eq!(warning.reason, SkipReason::InsufficientFields { found: 2 });
    assert!(warning.to_string().contains("$GPRMC,bad"));
}

#[test]
fn test_out_of_range_line_warns_and_is_not_a_fix() {
    let log = format!(
        "{}\n$GPRMC,120001,A,0000.0000,N,18131.000,E,1.0,90.0,150624,,,A*00\n{}\n",
        rmc("120000", 0.0, 1.0),
        rmc("120002", 0.0, 1.0)
    );
    let analysis = analyze_sources(&[log], &AnalysisOptions::default());

    assert_eq!(analysis.records.len(), 2, "Out-of-range line must not become a fix");
    assert_eq!(analysis.warnings.len(), 1);
    let warning = &analysis.warnings[0];
    assert_eq!(warning.line_number, 2);
    assert!(matches!(
        warning.reason,
        SkipReason::OutOfRange {
            field: "longitude",
            ..
        }
    ));
    assert_abs_diff_eq!(analysis.records[1].time_delta().unwrap(), 2.0);
}

#[test]
fn test_indexed_sources_keep_caller_numbering() {
    let sources = [
        (0, rmc("120000", 0.0, 1.0)),
        (2, format!("$GPRMC,bad\n{}\n", rmc("120001", 0.0, 1.0))),
    ];
    let analysis = analyze_indexed_sources(&sources, &AnalysisOptions::default());

    assert_eq!(analysis.records.len(), 2);
    assert_eq!(analysis.warnings.len(), 1);
    assert_eq!(analysis.warnings[0].source_index, 2);
    assert!(analysis.warnings[0].to_string().contains("of source 3"));
}

#[test]
fn test_non_rmc_lines_are_silently_ignored() {
    let log = format!(
        "$GPGGA,120000,0000.0000,N,00000.0000,E,1,08,0.9,545.4,M\n\
         garbage text\n\
         \n\
         {}\n",
        rmc("120000", 0.0, 0.0)
    );
    let analysis = analyze_sources(&[log], &AnalysisOptions::default());
    assert_eq!(analysis.records.len(), 1);
    assert!(analysis.warnings.is_empty(), "Non-RMC lines must not warn");
}

#[test]
fn test_record_count_and_first_record_not_applicable() {
    let log = [
        rmc("120000", 0.0, 5.0),
        rmc("120001", 0.01, 6.0),
        rmc("120002", 0.02, 7.0),
        rmc("120003", 0.03, 8.0),
    ]
    .join("\n");
    let analysis = analyze_sources(&[log], &AnalysisOptions::default());

    assert_eq!(analysis.records.len(), 4);
    assert_eq!(analysis.records[0].derived, Derived::NotApplicable);
    for record in &analysis.records[1..] {
        assert_abs_diff_eq!(record.time_delta().unwrap(), 1.0);
        assert_abs_diff_eq!(record.speed_delta().unwrap(), 1.852, epsilon = 1e-9);
        // 0.01 arc-minutes of longitude at the equator
        assert_abs_diff_eq!(record.distance().unwrap(), 18.53, epsilon = 0.01);
    }
}

#[test]
fn test_sources_concatenate_in_given_order() {
    let first = [rmc("120010", 0.0, 1.0), rmc("120020", 0.0, 2.0)].join("\n");
    let second = rmc("120000", 0.0, 3.0);

    let analysis = analyze_sources(&[first.clone(), second.clone()], &AnalysisOptions::default());
    let speeds: Vec<f64> = analysis
        .records
        .iter()
        .map(|r| (r.fix.speed / 1.852).round())
        .collect();
    assert_eq!(speeds, vec![1.0, 2.0, 3.0]);
    // Unsorted input keeps its order, so the last delta goes backwards in time
    assert_abs_diff_eq!(analysis.records[2].time_delta().unwrap(), -20.0);

    let sorted = analyze_sources(
        &[first, second],
        &AnalysisOptions {
            sort_by_timestamp: true,
            ..AnalysisOptions::default()
        },
    );
    let sorted_speeds: Vec<f64> = sorted
        .records
        .iter()
        .map(|r| (r.fix.speed / 1.852).round())
        .collect();
    assert_eq!(sorted_speeds, vec![3.0, 1.0, 2.0]);
    assert!(sorted.records[1..]
        .iter()
        .all(|r| r.time_delta().unwrap() > 0.0));
}

#[test]
fn test_zero_time_delta_yields_undefined_acceleration() {
    let log = [rmc("120000", 0.0, 1.0), rmc("120000", 0.0, 2.0)].join("\n");
    let analysis = analyze_sources(&[log], &AnalysisOptions::default());

    let second = &analysis.records[1];
    assert_eq!(second.time_delta(), Some(0.0));
    assert!(second.acceleration().is_none());
    assert!(analysis.report.max_acceleration.is_none());
    assert!(analysis.report.min_acceleration.is_none());
}

#[test]
fn test_unparseable_date_gives_undefined_timestamp_not_a_skip() {
    let log = [
        rmc("120000", 0.0, 1.0),
        rmc("120001", 0.0, 2.0).replace("150624", "991399"),
        rmc("120002", 0.0, 3.0),
    ]
    .join("\n");
    let analysis = analyze_sources(&[log], &AnalysisOptions::default());

    assert_eq!(analysis.records.len(), 3);
    assert!(analysis.warnings.is_empty());
    assert!(analysis.records[1].timestamp.is_none());
    assert!(analysis.records[1].time_delta().is_none());
    assert!(analysis.records[2].time_delta().is_none());
    // Neighbouring undefined deltas are excluded from total time
    assert_abs_diff_eq!(analysis.report.total_time_hours.unwrap(), 0.0);
}

#[test]
fn test_statistics_and_sprint_count() {
    let speeds_kmh = [10.0, 16.0, 17.0, 10.0, 20.0];
    let log = speeds_kmh
        .iter()
        .enumerate()
        .map(|(i, &kmh)| rmc(&format!("1200{:02}", i * 10), i as f64, kmh_to_knots(kmh)))
        .collect::<Vec<_>>()
        .join("\n");
    let analysis = analyze_sources(&[log], &AnalysisOptions::default());
    let report = &analysis.report;

    assert_eq!(report.sprint_count, 2);
    assert_abs_diff_eq!(report.average_speed_kmh.unwrap(), 14.6, epsilon = 1e-9);
    assert_abs_diff_eq!(report.max_speed_kmh.unwrap(), 20.0, epsilon = 1e-9);
    assert_abs_diff_eq!(report.total_time_hours.unwrap(), 40.0 / 3600.0, epsilon = 1e-12);
    // Four steps of one arc-minute of longitude at the equator
    assert_abs_diff_eq!(
        report.total_distance_km.unwrap(),
        4.0 * 111.194_926_6 / 60.0,
        epsilon = 1e-4
    );
    // Largest change: +10 km/h over 10 s; smallest: -7 km/h over 10 s
    assert_abs_diff_eq!(
        report.max_acceleration.unwrap(),
        10_000.0 / 36_000.0,
        epsilon = 1e-9
    );
    assert_abs_diff_eq!(
        report.min_acceleration.unwrap(),
        -7_000.0 / 36_000.0,
        epsilon = 1e-9
    );
}

#[test]
fn test_empty_input_reports_no_data_without_failing() {
    let analysis = analyze_sources(&["no nmea here\n$GPRMC,bad"], &AnalysisOptions::default());

    assert!(!analysis.has_data());
    assert_eq!(analysis.warnings.len(), 1);
    for (metric, value) in analysis.report.rows() {
        if metric == Metric::SprintCount {
            assert_eq!(value, Some(0.0));
        } else {
            assert!(value.is_none(), "{} should be unavailable", metric.key());
        }
    }

    let none: [&str; 0] = [];
    let empty = analyze_sources(&none, &AnalysisOptions::default());
    assert_eq!(empty.report, StatisticsReport::default());
}

#[test]
fn test_analyze_files_reads_in_order_and_strict_rejects_empty() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let first = temp_dir.path().join("a.log");
    let second = temp_dir.path().join("b.log");
    let empty = temp_dir.path().join("empty.log");
    fs::write(&first, rmc("120000", 0.0, 1.0)).expect("write");
    fs::write(&second, format!("{}\r\n", rmc("120005", 0.0, 2.0))).expect("write");
    fs::write(&empty, "$GPGSA,A,3\n").expect("write");

    let analysis = analyze_nmea_files(&[&first, &second], &AnalysisOptions::default())
        .expect("Files should analyze");
    assert_eq!(analysis.records.len(), 2);
    assert_abs_diff_eq!(analysis.records[1].time_delta().unwrap(), 5.0);

    let err = analyze_nmea_files_strict(&[&empty], &AnalysisOptions::default())
        .expect_err("No fixes should be an error in strict mode");
    assert!(err.to_string().contains("No valid GPS data"));

    let missing = temp_dir.path().join("missing.log");
    assert!(analyze_nmea_files(&[&missing], &AnalysisOptions::default()).is_err());
}

#[test]
fn test_invalid_utf8_is_rejected() {
    let err = decode_nmea_bytes(&[b'$', 0xff, 0xfe]).expect_err("invalid UTF-8");
    assert!(matches!(err, NmeaError::Utf8(_)));
}
