#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Metric keys of a statistics report, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    TotalDistanceKm,
    TotalTimeHours,
    AverageSpeedKmh,
    MaxSpeedKmh,
    MaxAcceleration,
    MinAcceleration,
    SprintCount,
}

impl Metric {
    pub const ALL: [Metric; 7] = [
        Metric::TotalDistanceKm,
        Metric::TotalTimeHours,
        Metric::AverageSpeedKmh,
        Metric::MaxSpeedKmh,
        Metric::MaxAcceleration,
        Metric::MinAcceleration,
        Metric::SprintCount,
    ];

    /// Machine-readable key
    pub fn key(self) -> &'static str {
        match self {
            Metric::TotalDistanceKm => "total_distance_km",
            Metric::TotalTimeHours => "total_time_hours",
            Metric::AverageSpeedKmh => "average_speed_kmh",
            Metric::MaxSpeedKmh => "max_speed_kmh",
            Metric::MaxAcceleration => "max_acceleration",
            Metric::MinAcceleration => "min_acceleration",
            Metric::SprintCount => "sprint_count",
        }
    }

    /// Human-readable label for tables
    pub fn label(self) -> &'static str {
        match self {
            Metric::TotalDistanceKm => "Total Distance (km)",
            Metric::TotalTimeHours => "Total Time (hours)",
            Metric::AverageSpeedKmh => "Average Speed (km/h)",
            Metric::MaxSpeedKmh => "Max Speed (km/h)",
            Metric::MaxAcceleration => "Max Acceleration (m/s²)",
            Metric::MinAcceleration => "Min Acceleration (m/s²)",
            Metric::SprintCount => "Number of Sprints",
        }
    }
}

/// Summary metrics of an enriched record sequence
///
/// `None` marks a metric that is not available, e.g. every metric of an empty
/// sequence except the sprint count.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StatisticsReport {
    pub total_distance_km: Option<f64>,
    pub total_time_hours: Option<f64>,
    pub average_speed_kmh: Option<f64>,
    pub max_speed_kmh: Option<f64>,
    pub max_acceleration: Option<f64>,
    pub min_acceleration: Option<f64>,
    pub sprint_count: usize,
}

impl StatisticsReport {
    pub fn get(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::TotalDistanceKm => self.total_distance_km,
            Metric::TotalTimeHours => self.total_time_hours,
            Metric::AverageSpeedKmh => self.average_speed_kmh,
            Metric::MaxSpeedKmh => self.max_speed_kmh,
            Metric::MaxAcceleration => self.max_acceleration,
            Metric::MinAcceleration => self.min_acceleration,
            Metric::SprintCount => Some(self.sprint_count as f64),
        }
    }

    /// `(metric, value)` pairs in display order
    pub fn rows(&self) -> impl Iterator<Item = (Metric, Option<f64>)> + '_ {
        Metric::ALL.iter().map(move |&metric| (metric, self.get(metric)))
    }
}
