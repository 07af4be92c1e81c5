use super::types::{CandidateSet, MAP_EXTENT};

/// Keep only the points on the map, `0 <= x, y <= 4096`.
pub fn clip_to_map(mut points: CandidateSet) -> CandidateSet {
    points.retain(|p| MAP_EXTENT.contains(p));
    points
}
