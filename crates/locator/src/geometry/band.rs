use super::types::{CandidateSet, Coordinate};

/// Drop points closer to `center` than `min_distance`.
///
/// A point exactly on the ring is kept. `min_distance <= 0` keeps everything.
pub fn filter_min_distance(
    mut points: CandidateSet,
    center: Coordinate,
    min_distance: f64,
) -> CandidateSet {
    if min_distance <= 0.0 {
        return points;
    }
    let min_sq = min_distance * min_distance;
    points.retain(|p| p.distance_sq(&center) as f64 >= min_sq);
    points
}
