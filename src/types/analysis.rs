use crate::error::LineWarning;
use crate::statistics::SPRINT_THRESHOLD_KMH;
use crate::types::{EnrichedRecord, StatisticsReport};

/// Options controlling the analysis pipeline
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// Stable-sort the assembled fixes by timestamp before deriving kinematics.
    /// Off by default: inputs are assumed pre-sorted and chronologically contiguous.
    pub sort_by_timestamp: bool,
    pub sprint_threshold_kmh: f64,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            sort_by_timestamp: false,
            sprint_threshold_kmh: SPRINT_THRESHOLD_KMH,
        }
    }
}

/// Result of running the full pipeline over one or more inputs
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    pub records: Vec<EnrichedRecord>,
    pub report: StatisticsReport,
    /// Malformed RMC sentences, in input order
    pub warnings: Vec<LineWarning>,
}

impl Analysis {
    /// False when no valid fix was produced from any input
    pub fn has_data(&self) -> bool {
        !self.records.is_empty()
    }
}
