use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::constants::{FULL_TURN_DEG, MAP_MAX, MAP_MIN};

/// Integer grid cell on the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance, exact for the whole map range
    #[inline]
    pub fn distance_sq(&self, other: &Coordinate) -> i64 {
        let dx = self.x as i64 - other.x as i64;
        let dy = self.y as i64 - other.y as i64;
        dx * dx + dy * dy
    }

    #[inline]
    pub fn distance(&self, other: &Coordinate) -> f64 {
        (self.distance_sq(other) as f64).sqrt()
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Axis-aligned rectangle, inclusive on all four edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extent {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

/// The whole map, `[0, 4096]` on each axis
pub const MAP_EXTENT: Extent = Extent {
    min_x: MAP_MIN,
    min_y: MAP_MIN,
    max_x: MAP_MAX,
    max_y: MAP_MAX,
};

impl Extent {
    pub const fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Square of half-width `radius` around `center`
    pub fn around(center: Coordinate, radius: u32) -> Self {
        let r = i32::try_from(radius).unwrap_or(i32::MAX);
        Self::new(
            center.x.saturating_sub(r),
            center.y.saturating_sub(r),
            center.x.saturating_add(r),
            center.y.saturating_add(r),
        )
    }

    #[inline]
    pub fn contains(&self, p: &Coordinate) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    /// Overlap of two extents, `None` when they are disjoint
    pub fn intersect(&self, other: &Extent) -> Option<Extent> {
        let e = Extent::new(
            self.min_x.max(other.min_x),
            self.min_y.max(other.min_y),
            self.max_x.min(other.max_x),
            self.max_y.min(other.max_y),
        );
        (e.min_x <= e.max_x && e.min_y <= e.max_y).then_some(e)
    }

    pub fn width(&self) -> u32 {
        (self.max_x as i64 - self.min_x as i64 + 1).max(0) as u32
    }

    pub fn height(&self) -> u32 {
        (self.max_y as i64 - self.min_y as i64 + 1).max(0) as u32
    }
}

/// Angular sector seen from a center, in degrees `[0, 360)`.
///
/// `min_deg >= max_deg` means the sector runs through the 0/360 seam.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wedge {
    pub min_deg: f64,
    pub max_deg: f64,
}

impl Wedge {
    pub const fn new(min_deg: f64, max_deg: f64) -> Self {
        Self { min_deg, max_deg }
    }

    pub fn crosses_seam(&self) -> bool {
        self.min_deg >= self.max_deg
    }

    /// Both edges are inclusive.
    #[inline]
    pub fn contains_angle(&self, angle_deg: f64) -> bool {
        if self.crosses_seam() {
            angle_deg >= self.min_deg || angle_deg <= self.max_deg
        } else {
            angle_deg >= self.min_deg && angle_deg <= self.max_deg
        }
    }

    /// Angular width, seam-aware
    pub fn span_deg(&self) -> f64 {
        if self.crosses_seam() {
            FULL_TURN_DEG - self.min_deg + self.max_deg
        } else {
            self.max_deg - self.min_deg
        }
    }
}

impl fmt::Display for Wedge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.1}°, {:.1}°]", self.min_deg, self.max_deg)
    }
}

/// Unique coordinates still consistent with the clues.
///
/// Keeps the order the points were produced in so repeated renders of the
/// same computation are stable. Membership is what matters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSet {
    points: Vec<Coordinate>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Caller guarantees `points` has no duplicates.
    pub(crate) fn from_unique(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Coordinate> {
        self.points.iter()
    }

    pub fn as_slice(&self) -> &[Coordinate] {
        &self.points
    }

    /// Linear scan; build a `HashSet` via [`CandidateSet::to_hash_set`] for bulk lookups
    pub fn contains(&self, p: &Coordinate) -> bool {
        self.points.contains(p)
    }

    pub fn to_hash_set(&self) -> HashSet<Coordinate> {
        self.points.iter().copied().collect()
    }

    /// Order-preserving in-place filter
    pub fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&Coordinate) -> bool,
    {
        self.points.retain(keep);
    }

    pub fn is_subset_of(&self, other: &CandidateSet) -> bool {
        let other = other.to_hash_set();
        self.points.iter().all(|p| other.contains(p))
    }

    /// Smallest extent holding every point, `None` for an empty set
    pub fn bounding_extent(&self) -> Option<Extent> {
        let first = self.points.first()?;
        let init = Extent::new(first.x, first.y, first.x, first.y);
        Some(self.points.iter().fold(init, |e, p| {
            Extent::new(
                e.min_x.min(p.x),
                e.min_y.min(p.y),
                e.max_x.max(p.x),
                e.max_y.max(p.y),
            )
        }))
    }

    /// Mean position, rounded to the nearest cell
    pub fn centroid(&self) -> Option<Coordinate> {
        if self.points.is_empty() {
            return None;
        }
        let n = self.points.len() as f64;
        let (sx, sy) = self
            .points
            .iter()
            .fold((0.0_f64, 0.0_f64), |(sx, sy), p| (sx + p.x as f64, sy + p.y as f64));
        Some(Coordinate::new((sx / n).round() as i32, (sy / n).round() as i32))
    }
}

impl FromIterator<Coordinate> for CandidateSet {
    /// Drops repeated coordinates, first occurrence wins.
    fn from_iter<I: IntoIterator<Item = Coordinate>>(iter: I) -> Self {
        let mut seen = HashSet::new();
        let points = iter.into_iter().filter(|p| seen.insert(*p)).collect();
        Self { points }
    }
}

impl IntoIterator for CandidateSet {
    type Item = Coordinate;
    type IntoIter = std::vec::IntoIter<Coordinate>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

impl<'a> IntoIterator for &'a CandidateSet {
    type Item = &'a Coordinate;
    type IntoIter = std::slice::Iter<'a, Coordinate>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_iter_drops_duplicates_keeps_order() {
        let set: CandidateSet = [(3, 3), (1, 1), (3, 3), (2, 2), (1, 1)]
            .into_iter()
            .map(Coordinate::from)
            .collect();
        assert_eq!(
            set.as_slice(),
            &[
                Coordinate::new(3, 3),
                Coordinate::new(1, 1),
                Coordinate::new(2, 2)
            ]
        );
    }

    #[test]
    fn test_wedge_contains_angle_inclusive_edges() {
        let w = Wedge::new(0.0, 45.0);
        assert!(w.contains_angle(0.0));
        assert!(w.contains_angle(45.0));
        assert!(!w.contains_angle(45.5));
        assert!(!w.crosses_seam());
    }

    #[test]
    fn test_wedge_across_seam() {
        let w = Wedge::new(350.0, 10.0);
        assert!(w.crosses_seam());
        assert!(w.contains_angle(0.0));
        assert!(w.contains_angle(355.0));
        assert!(w.contains_angle(10.0));
        assert!(!w.contains_angle(180.0));
        assert_eq!(w.span_deg(), 20.0);
    }

    #[test]
    fn test_extent_intersect() {
        let a = Extent::new(0, 0, 10, 10);
        let b = Extent::new(5, -5, 20, 7);
        assert_eq!(a.intersect(&b), Some(Extent::new(5, 0, 10, 7)));
        assert_eq!(a.intersect(&Extent::new(11, 0, 12, 3)), None);
        assert_eq!(Extent::new(5, 0, 10, 7).width(), 6);
    }

    #[test]
    fn test_bounding_extent_and_centroid() {
        let set: CandidateSet = [(1, 5), (3, 1), (2, 3)]
            .into_iter()
            .map(Coordinate::from)
            .collect();
        assert_eq!(set.bounding_extent(), Some(Extent::new(1, 1, 3, 5)));
        assert_eq!(set.centroid(), Some(Coordinate::new(2, 3)));

        let empty = CandidateSet::new();
        assert_eq!(empty.bounding_extent(), None);
        assert_eq!(empty.centroid(), None);
    }

    #[test]
    fn test_map_extent_is_inclusive() {
        assert!(MAP_EXTENT.contains(&Coordinate::new(4096, 4096)));
        assert!(MAP_EXTENT.contains(&Coordinate::new(0, 0)));
        assert!(!MAP_EXTENT.contains(&Coordinate::new(-1, 0)));
        assert!(!MAP_EXTENT.contains(&Coordinate::new(0, 4097)));
    }
}
