use crate::types::GpsFix;
use chrono::NaiveDateTime;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Deltas of a record relative to its immediate predecessor
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Deltas {
    /// Seconds since the previous timestamp; `None` when either timestamp is undefined
    pub time_delta: Option<f64>,
    /// km/h
    pub speed_delta: f64,
    /// m/s²; `None` when the time delta is undefined or zero
    pub acceleration: Option<f64>,
    /// Great-circle distance in meters
    pub distance: f64,
}

/// Derived fields of an enriched record
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Derived {
    /// First record of the sequence, there is no predecessor
    NotApplicable,
    Computed(Deltas),
}

/// A fix plus its resolved timestamp and deltas
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnrichedRecord {
    pub fix: GpsFix,
    /// `None` when date and time did not form a valid instant
    pub timestamp: Option<NaiveDateTime>,
    pub derived: Derived,
}

impl EnrichedRecord {
    pub fn deltas(&self) -> Option<&Deltas> {
        match &self.derived {
            Derived::Computed(deltas) => Some(deltas),
            Derived::NotApplicable => None,
        }
    }

    pub fn time_delta(&self) -> Option<f64> {
        self.deltas().and_then(|d| d.time_delta)
    }

    pub fn speed_delta(&self) -> Option<f64> {
        self.deltas().map(|d| d.speed_delta)
    }

    pub fn acceleration(&self) -> Option<f64> {
        self.deltas().and_then(|d| d.acceleration)
    }

    pub fn distance(&self) -> Option<f64> {
        self.deltas().map(|d| d.distance)
    }
}
