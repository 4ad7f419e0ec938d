//! Per-step kinematics between consecutive fixes
//!
//! Each record is compared only with its immediate predecessor in sequence
//! order; the first record has no predecessor and gets [`Derived::NotApplicable`].

use crate::conversion::kmh_delta_to_acceleration;
use crate::types::{Deltas, Derived, EnrichedRecord, TimedFix};

/// Mean Earth radius used by the haversine formula, in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in meters between two points in decimal degrees
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let d_lat = lat2_rad - lat1_rad;
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).max(0.0).sqrt());

    EARTH_RADIUS_KM * c * 1000.0
}

/// Deltas of `current` relative to `previous`
pub fn step_deltas(previous: &TimedFix, current: &TimedFix) -> Deltas {
    let time_delta = match (previous.timestamp, current.timestamp) {
        (Some(prev), Some(cur)) => {
            let delta = cur - prev;
            Some(
                delta
                    .num_nanoseconds()
                    .map(|ns| ns as f64 / 1e9)
                    .unwrap_or_else(|| delta.num_milliseconds() as f64 / 1e3),
            )
        }
        _ => None,
    };
    let speed_delta = current.fix.speed - previous.fix.speed;
    let acceleration = time_delta.and_then(|dt| kmh_delta_to_acceleration(speed_delta, dt));
    let distance = haversine_distance(
        previous.fix.latitude,
        previous.fix.longitude,
        current.fix.latitude,
        current.fix.longitude,
    );

    Deltas {
        time_delta,
        speed_delta,
        acceleration,
        distance,
    }
}

/// Enrich an ordered fix sequence; the output has exactly one record per fix
pub fn derive_records(fixes: &[TimedFix]) -> Vec<EnrichedRecord> {
    let predecessors = std::iter::once(None).chain(fixes.iter().map(Some));

    fixes
        .iter()
        .zip(predecessors)
        .map(|(current, previous)| EnrichedRecord {
            fix: current.fix.clone(),
            timestamp: current.timestamp,
            derived: match previous {
                Some(previous) => Derived::Computed(step_deltas(previous, current)),
                None => Derived::NotApplicable,
            },
        })
        .collect()
}
