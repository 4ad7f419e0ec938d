//! `$GPRMC` sentence parsing
//!
//! Turns one raw text line into a [`GpsFix`] or a [`SkipReason`]. Lines that do
//! not carry the RMC tag are not candidates at all and produce no outcome.

use crate::conversion::{
    decode_degrees_minutes, knots_to_kmh, parse_number, LATITUDE_DEGREE_DIGITS,
    LONGITUDE_DEGREE_DIGITS,
};
use crate::error::{LineWarning, SkipReason};
use crate::types::{GpsFix, Hemisphere};

/// Sentence tag of the recommended-minimum navigation sentence
pub const RMC_TAG: &str = "$GPRMC";

/// Minimum comma-separated field count of a usable RMC sentence
pub const MIN_RMC_FIELDS: usize = 10;

// Field positions after splitting on commas, the tag being field 0
const FIELD_TIME: usize = 1;
const FIELD_LATITUDE: usize = 3;
const FIELD_LAT_HEMISPHERE: usize = 4;
const FIELD_LONGITUDE: usize = 5;
const FIELD_LON_HEMISPHERE: usize = 6;
const FIELD_SPEED_KNOTS: usize = 7;
const FIELD_COURSE: usize = 8;
const FIELD_DATE: usize = 9;

/// Outcome of one RMC candidate line
pub type ParseOutcome = std::result::Result<GpsFix, LineWarning>;

/// Parse a single line
///
/// Returns `None` when the line does not start with [`RMC_TAG`].
pub fn parse_sentence(line: &str) -> Option<Result<GpsFix, SkipReason>> {
    if !line.starts_with(RMC_TAG) {
        return None;
    }
    Some(parse_rmc_fields(line.trim()))
}

fn parse_rmc_fields(sentence: &str) -> Result<GpsFix, SkipReason> {
    let fields: Vec<&str> = sentence.split(',').collect();
    if fields.len() < MIN_RMC_FIELDS {
        return Err(SkipReason::InsufficientFields {
            found: fields.len(),
        });
    }

    let latitude = decode_degrees_minutes(
        fields[FIELD_LATITUDE],
        LATITUDE_DEGREE_DIGITS,
        Hemisphere::from_flag(fields[FIELD_LAT_HEMISPHERE]),
        "latitude",
    )?;
    let longitude = decode_degrees_minutes(
        fields[FIELD_LONGITUDE],
        LONGITUDE_DEGREE_DIGITS,
        Hemisphere::from_flag(fields[FIELD_LON_HEMISPHERE]),
        "longitude",
    )?;
    let speed = knots_to_kmh(parse_number(
        "speed",
        or_zero(fields[FIELD_SPEED_KNOTS]),
    )?);
    let course = parse_number("course", or_zero(fields[FIELD_COURSE]))?;

    check_range("latitude", latitude, -90.0..=90.0)?;
    check_range("longitude", longitude, -180.0..=180.0)?;
    check_range("speed", speed, 0.0..=f64::MAX)?;
    check_range("course", course, 0.0..=360.0)?;

    Ok(GpsFix {
        time: fields[FIELD_TIME].to_string(),
        date: fields[FIELD_DATE].to_string(),
        latitude,
        longitude,
        speed,
        course,
    })
}

fn or_zero(field: &str) -> &str {
    if field.is_empty() {
        "0.0"
    } else {
        field
    }
}

fn check_range(
    field: &'static str,
    value: f64,
    bounds: std::ops::RangeInclusive<f64>,
) -> Result<(), SkipReason> {
    if bounds.contains(&value) {
        Ok(())
    } else {
        Err(SkipReason::OutOfRange { field, value })
    }
}

/// Lazily parse every line of one decoded input source
///
/// Yields one outcome per RMC candidate line, in line order; other lines are
/// skipped without an outcome. `source_index` tags the warnings.
pub fn parse_lines(source_index: usize, text: &str) -> impl Iterator<Item = ParseOutcome> + '_ {
    text.lines().enumerate().filter_map(move |(index, line)| {
        parse_sentence(line).map(|outcome| {
            outcome.map_err(|reason| LineWarning {
                source_index,
                line_number: index + 1,
                line: line.trim().to_string(),
                reason,
            })
        })
    })
}
