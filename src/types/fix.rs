use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One decoded position/velocity sample from a `$GPRMC` sentence
///
/// The time and date tokens are kept as they appeared in the sentence; they are
/// only resolved into a timestamp by the assembler, where a bad token yields an
/// undefined timestamp rather than a skipped line.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GpsFix {
    /// Raw `HHMMSS.sss` token
    pub time: String,
    /// Raw `DDMMYY` token
    pub date: String,
    /// Decimal degrees, negative south of the equator
    pub latitude: f64,
    /// Decimal degrees, negative west of Greenwich
    pub longitude: f64,
    /// Ground speed in km/h
    pub speed: f64,
    /// Course over ground in degrees
    pub course: f64,
}

impl GpsFix {
    /// Time of day, if the time token is a valid `HHMMSS[.sss]` time
    pub fn clock_time(&self) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(&self.time, "%H%M%S%.f").ok()
    }

    /// Fractional seconds since midnight
    pub fn time_of_day(&self) -> Option<f64> {
        let time = self.clock_time()?;
        Some(time.num_seconds_from_midnight() as f64 + time.nanosecond() as f64 / 1e9)
    }

    /// Calendar date, if the date token is a valid `DDMMYY` date
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%d%m%y").ok()
    }
}

/// A fix with its date and time resolved into one instant
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimedFix {
    pub fix: GpsFix,
    /// `None` when the date and time tokens do not form a valid instant
    pub timestamp: Option<NaiveDateTime>,
}

/// Hemisphere flag attached to a coordinate magnitude
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    /// Anything other than `S`/`W`/`E` is treated as `N`, keeping the magnitude positive.
    pub fn from_flag(flag: &str) -> Self {
        match flag {
            "S" => Hemisphere::South,
            "W" => Hemisphere::West,
            "E" => Hemisphere::East,
            _ => Hemisphere::North,
        }
    }

    pub fn sign(self) -> f64 {
        match self {
            Hemisphere::South | Hemisphere::West => -1.0,
            Hemisphere::North | Hemisphere::East => 1.0,
        }
    }
}
