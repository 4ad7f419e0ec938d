//! Unit conversion utilities for NMEA decoding and kinematics
//!
//! Contains the degree/minute coordinate codec and the speed and acceleration
//! conversions shared by the parser and the kinematic deriver.

use crate::error::SkipReason;
use crate::types::Hemisphere;

/// Kilometers per hour in one knot
pub const KMH_PER_KNOT: f64 = 1.852;

/// Width of the integer-degrees prefix of an NMEA latitude (`DDMM.mmmm`)
pub const LATITUDE_DEGREE_DIGITS: usize = 2;

/// Width of the integer-degrees prefix of an NMEA longitude (`DDDMM.mmmm`)
pub const LONGITUDE_DEGREE_DIGITS: usize = 3;

/// Convert ground speed from knots to km/h
pub fn knots_to_kmh(knots: f64) -> f64 {
    knots * KMH_PER_KNOT
}

/// Convert a speed change in km/h over `seconds` to m/s²
///
/// Returns `None` for a zero or non-finite interval, where the rate is undefined.
pub fn kmh_delta_to_acceleration(speed_delta_kmh: f64, seconds: f64) -> Option<f64> {
    if seconds == 0.0 || !seconds.is_finite() {
        return None;
    }
    let acceleration = (speed_delta_kmh * 1000.0) / (seconds * 3600.0);
    acceleration.is_finite().then_some(acceleration)
}

/// Decode an NMEA `D..DMM.mmmm` magnitude into signed decimal degrees
///
/// `degree_digits` is the width of the integer-degrees prefix (2 for latitude,
/// 3 for longitude). `field` names the coordinate in the skip reason.
pub fn decode_degrees_minutes(
    magnitude: &str,
    degree_digits: usize,
    hemisphere: Hemisphere,
    field: &'static str,
) -> Result<f64, SkipReason> {
    let (degrees_str, minutes_str) = match (
        magnitude.get(..degree_digits),
        magnitude.get(degree_digits..),
    ) {
        (Some(degrees), Some(minutes)) => (degrees, minutes),
        _ => {
            return Err(SkipReason::InvalidCoordinate {
                field,
                value: magnitude.to_string(),
            })
        }
    };

    let degrees = parse_number(field, degrees_str)?;
    let minutes = parse_number(field, minutes_str)?;

    Ok((degrees + minutes / 60.0) * hemisphere.sign())
}

/// Encode signed decimal degrees as an NMEA magnitude plus hemisphere flag
///
/// Inverse of [`decode_degrees_minutes`]: `is_latitude` selects the 2-digit
/// degree prefix and `N`/`S` flags, otherwise 3 digits and `E`/`W`.
pub fn encode_degrees_minutes(decimal_degrees: f64, is_latitude: bool) -> (String, &'static str) {
    let magnitude = decimal_degrees.abs();
    let degrees = magnitude.trunc();
    let minutes = (magnitude - degrees) * 60.0;

    let flag = match (is_latitude, decimal_degrees < 0.0) {
        (true, false) => "N",
        (true, true) => "S",
        (false, false) => "E",
        (false, true) => "W",
    };
    let width = if is_latitude {
        LATITUDE_DEGREE_DIGITS
    } else {
        LONGITUDE_DEGREE_DIGITS
    };

    (
        format!("{:0width$}{:07.4}", degrees as u32, minutes, width = width),
        flag,
    )
}

/// Parse a numeric NMEA field, naming the field in the failure
pub fn parse_number(field: &'static str, value: &str) -> Result<f64, SkipReason> {
    value
        .parse::<f64>()
        .map_err(|source| SkipReason::InvalidNumber {
            field,
            value: value.to_string(),
            source,
        })
}
