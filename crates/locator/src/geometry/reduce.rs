use log::debug;
use std::collections::HashSet;

use super::angle::in_wedge;
use super::disc::disc_points_within;
use super::types::{CandidateSet, Coordinate, Wedge};

/// Intersect `existing` with the wedge of the disc of `radius` around `center`.
///
/// The result is always a subset of `existing` and keeps its order. The fresh
/// region is only enumerated over the bounding extent of `existing`, points
/// outside it could never survive the intersection anyway.
pub fn reduce_by_wedge(
    mut existing: CandidateSet,
    center: Coordinate,
    radius: u32,
    wedge: Wedge,
) -> CandidateSet {
    let Some(window) = existing.bounding_extent() else {
        return existing;
    };

    let region: HashSet<Coordinate> = disc_points_within(center, radius, &window)
        .filter(in_wedge(center, wedge))
        .collect();
    debug!(
        "reduce: center {} r={} wedge {} -> {} region points",
        center,
        radius,
        wedge,
        region.len()
    );

    let before = existing.len();
    existing.retain(|p| region.contains(p));
    debug!("reduce: {} -> {} candidates", before, existing.len());
    existing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::angle::filter_by_angle;
    use crate::geometry::disc::generate_disc;

    fn seed() -> CandidateSet {
        let c = Coordinate::new(1000, 1000);
        filter_by_angle(generate_disc(c, 500), c, Wedge::new(0.0, 45.0))
    }

    #[test]
    fn test_reduce_empty_stays_empty() {
        let out = reduce_by_wedge(
            CandidateSet::new(),
            Coordinate::new(5, 5),
            100,
            Wedge::new(0.0, 90.0),
        );
        assert!(out.is_empty());
    }

    #[test]
    fn test_reduce_is_subset() {
        let existing = seed();
        let out = reduce_by_wedge(
            existing.clone(),
            Coordinate::new(1100, 1100),
            400,
            Wedge::new(22.5, 67.5),
        );
        assert!(out.is_subset_of(&existing));
        assert!(!out.is_empty());
        assert!(out.len() < existing.len());
    }

    #[test]
    fn test_reduce_matches_plain_intersection() {
        let existing = seed();
        let center = Coordinate::new(1300, 1200);
        let wedge = Wedge::new(112.5, 157.5);

        let fresh = filter_by_angle(generate_disc(center, 500), center, wedge).to_hash_set();
        let expected: Vec<Coordinate> = existing
            .iter()
            .copied()
            .filter(|p| fresh.contains(p))
            .collect();

        let out = reduce_by_wedge(existing, center, 500, wedge);
        assert_eq!(out.as_slice(), expected.as_slice());
    }

    #[test]
    fn test_reduce_disjoint_region_is_empty() {
        // opposite quadrant from the same center; the center itself has angle 0
        let out = reduce_by_wedge(
            seed(),
            Coordinate::new(1000, 1000),
            500,
            Wedge::new(180.0, 270.0),
        );
        assert!(out.is_empty());
    }

    #[test]
    fn test_reduce_twice_same_clue_is_stable() {
        let center = Coordinate::new(1100, 1100);
        let wedge = Wedge::new(22.5, 67.5);
        let once = reduce_by_wedge(seed(), center, 400, wedge);
        let twice = reduce_by_wedge(once.clone(), center, 400, wedge);
        assert_eq!(once, twice);
    }
}
