//! Summary statistics over an enriched record sequence
//!
//! Undefined values are excluded from every reducer; an empty sequence yields a
//! report with every metric unavailable and no sprints.

use crate::types::{EnrichedRecord, StatisticsReport};

/// Speed a record must strictly exceed to be part of a sprint, in km/h
pub const SPRINT_THRESHOLD_KMH: f64 = 15.1;

/// Reduce an enriched sequence into a [`StatisticsReport`]
pub fn compute_statistics(
    records: &[EnrichedRecord],
    sprint_threshold_kmh: f64,
) -> StatisticsReport {
    if records.is_empty() {
        return StatisticsReport::default();
    }

    let total_distance_m: f64 = records.iter().filter_map(EnrichedRecord::distance).sum();
    let total_time_s: f64 = records.iter().filter_map(EnrichedRecord::time_delta).sum();
    let speeds: Vec<f64> = records.iter().map(|r| r.fix.speed).collect();

    StatisticsReport {
        total_distance_km: Some(total_distance_m / 1000.0),
        total_time_hours: Some(total_time_s / 3600.0),
        average_speed_kmh: mean(&speeds),
        max_speed_kmh: max_of(speeds.iter().copied()),
        max_acceleration: max_of(records.iter().filter_map(EnrichedRecord::acceleration)),
        min_acceleration: min_of(records.iter().filter_map(EnrichedRecord::acceleration)),
        sprint_count: count_sprints(&speeds, sprint_threshold_kmh),
    }
}

/// Count maximal runs of speeds strictly above `threshold`
///
/// Each rising edge across the threshold starts one run; a first sample above
/// the threshold counts as a start.
pub fn count_sprints(speeds: &[f64], threshold: f64) -> usize {
    let above = speeds.iter().map(|&speed| speed > threshold);
    let previous = std::iter::once(false).chain(above.clone());

    above
        .zip(previous)
        .filter(|&(is_above, was_above)| is_above && !was_above)
        .count()
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

fn max_of(values: impl Iterator<Item = f64>) -> Option<f64> {
    values.reduce(f64::max)
}

fn min_of(values: impl Iterator<Item = f64>) -> Option<f64> {
    values.reduce(f64::min)
}
