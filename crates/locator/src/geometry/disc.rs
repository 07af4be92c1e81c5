use itertools::Itertools;

use super::types::{CandidateSet, Coordinate, Extent};

/// Lazily walks every lattice point of the disc that also lies in `window`.
///
/// Row-major order: y outer, x inner.
pub fn disc_points_within(
    center: Coordinate,
    radius: u32,
    window: &Extent,
) -> impl Iterator<Item = Coordinate> + use<> {
    let r_sq = (radius as i64) * (radius as i64);
    Extent::around(center, radius)
        .intersect(window)
        .into_iter()
        .flat_map(|e| (e.min_y..=e.max_y).cartesian_product(e.min_x..=e.max_x))
        .map(|(y, x)| Coordinate::new(x, y))
        .filter(move |p| p.distance_sq(&center) <= r_sq)
}

/// Every integer point with `(x-cx)^2 + (y-cy)^2 <= r^2`, interior included.
pub fn generate_disc(center: Coordinate, radius: u32) -> CandidateSet {
    let window = Extent::around(center, radius);
    CandidateSet::from_unique(disc_points_within(center, radius, &window).collect())
}
