use super::types::{CandidateSet, Coordinate, Wedge};
use crate::constants::FULL_TURN_DEG;

/// Direction of `p` seen from `center`, in degrees `[0, 360)`.
///
/// Screen convention: y grows downwards, so "up" on the map is 90 deg.
#[inline]
pub fn point_angle(center: Coordinate, p: &Coordinate) -> f64 {
    let dy = (center.y as i64 - p.y as i64) as f64;
    let dx = (p.x as i64 - center.x as i64) as f64;
    normalize_deg(dy.atan2(dx).to_degrees())
}

/// Wrap any finite angle into `[0, 360)`
#[inline]
pub fn normalize_deg(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(FULL_TURN_DEG);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= FULL_TURN_DEG { 0.0 } else { wrapped }
}

/// Predicate form of the wedge test, for lazy pipelines
pub fn in_wedge(center: Coordinate, wedge: Wedge) -> impl Fn(&Coordinate) -> bool {
    move |p| wedge.contains_angle(point_angle(center, p))
}

/// Keep the points whose direction from `center` falls inside `wedge`.
pub fn filter_by_angle(mut points: CandidateSet, center: Coordinate, wedge: Wedge) -> CandidateSet {
    points.retain(in_wedge(center, wedge));
    points
}
