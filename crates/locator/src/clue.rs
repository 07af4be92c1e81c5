use serde::Serialize;
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{Display, EnumCount as EnumCountMacro, EnumIter, EnumString, IntoStaticStr};

use crate::constants::{
    DIRECTION_OFFSETS_DEG, DISTANCE_BREAKPOINTS, FACING_BASE_DEG, FULL_TURN_DEG, WEDGE_WIDTH_DEG,
};
use crate::error::{LocatorError, Result};
use crate::geometry::{Coordinate, Wedge, normalize_deg};

/// Which lookup table a bucket index refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum BucketKind {
    Direction,
    Distance,
}

/// Where the target lies relative to the way the player is facing
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    EnumString,
    EnumCountMacro,
    IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum DirectionBucket {
    #[strum(to_string = "straight ahead", serialize = "ahead")]
    StraightAhead = 0,
    #[strum(to_string = "ahead to the right", serialize = "ahead right")]
    AheadRight = 1,
    #[strum(to_string = "right", serialize = "to the right")]
    Right = 2,
    #[strum(to_string = "back to the right", serialize = "back right")]
    BackRight = 3,
    #[strum(to_string = "backwards", serialize = "back", serialize = "behind")]
    Backwards = 4,
    #[strum(to_string = "back to the left", serialize = "back left")]
    BackLeft = 5,
    #[strum(to_string = "to the left", serialize = "left")]
    Left = 6,
    #[strum(to_string = "ahead to the left", serialize = "ahead left")]
    AheadLeft = 7,
}

impl DirectionBucket {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Result<Self> {
        Self::iter().nth(index).ok_or(LocatorError::InvalidBucket {
            kind: BucketKind::Direction,
            index: i64::try_from(index).unwrap_or(i64::MAX),
        })
    }

    /// Accepts the phrase (any case) or the table index
    pub fn parse(label: &str) -> Result<Self> {
        parse_bucket(label, BucketKind::Direction, Self::from_index)
    }

    /// Offset from the facing angle [deg]
    pub fn offset_deg(self) -> f64 {
        DIRECTION_OFFSETS_DEG[self.index()]
    }
}

/// How far away the target is, nearest first
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    EnumString,
    EnumCountMacro,
    IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum DistanceBucket {
    #[strum(to_string = "a stone's throw away", serialize = "stone's throw")]
    StonesThrow = 0,
    #[strum(to_string = "very close")]
    VeryClose = 1,
    #[strum(to_string = "pretty close by", serialize = "pretty close")]
    PrettyClose = 2,
    #[strum(to_string = "fairly close by", serialize = "fairly close")]
    FairlyClose = 3,
    #[strum(to_string = "some distance away", serialize = "some distance")]
    SomeDistance = 4,
    #[strum(to_string = "quite some distance away", serialize = "quite some distance")]
    QuiteSomeDistance = 5,
    #[strum(to_string = "rather a long distance away", serialize = "rather far")]
    RatherLongDistance = 6,
    #[strum(to_string = "pretty far away", serialize = "pretty far")]
    PrettyFar = 7,
    #[strum(to_string = "far away", serialize = "far")]
    Far = 8,
    #[strum(to_string = "very far away", serialize = "very far")]
    VeryFar = 9,
}

impl DistanceBucket {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Result<Self> {
        Self::iter().nth(index).ok_or(LocatorError::InvalidBucket {
            kind: BucketKind::Distance,
            index: i64::try_from(index).unwrap_or(i64::MAX),
        })
    }

    pub fn parse(label: &str) -> Result<Self> {
        parse_bucket(label, BucketKind::Distance, Self::from_index)
    }

    /// Outer edge of the band (inclusive)
    pub fn max_radius(self) -> u32 {
        DISTANCE_BREAKPOINTS[self.index()]
    }

    /// Outer edge of the next nearer band, 0 for the nearest bucket
    pub fn min_radius(self) -> u32 {
        self.index()
            .checked_sub(1)
            .map_or(0, |i| DISTANCE_BREAKPOINTS[i])
    }
}

fn parse_bucket<T, F>(label: &str, kind: BucketKind, from_index: F) -> Result<T>
where
    T: std::str::FromStr,
    F: Fn(usize) -> Result<T>,
{
    let label = label.trim();
    if let Ok(index) = label.parse::<usize>() {
        return from_index(index);
    }
    label.parse::<T>().map_err(|_| LocatorError::UnknownBucket {
        kind,
        label: label.to_string(),
    })
}

/// Outer radius for a distance bucket index.
///
/// Negative indices mean "nothing nearer" and resolve to 0, which is how the
/// inner edge of the nearest band is looked up.
pub fn resolve_distance(index: i32) -> Result<u32> {
    if index < 0 {
        return Ok(0);
    }
    DISTANCE_BREAKPOINTS
        .get(index as usize)
        .copied()
        .ok_or(LocatorError::InvalidBucket {
            kind: BucketKind::Distance,
            index: index as i64,
        })
}

/// 45 deg wedge centered on the direction the bucket points to.
///
/// Facing 0 looks up the map. The lower edge is wrapped into `[0, 360)`, the
/// upper one into `[0, 360]`; a wedge over the seam comes out with
/// `min > max`.
pub fn resolve_direction(bucket: DirectionBucket, facing_deg: f64) -> Wedge {
    let raw = normalize_deg(FACING_BASE_DEG + facing_deg + bucket.offset_deg());
    let half = WEDGE_WIDTH_DEG / 2.0;

    let mut min_deg = raw - half;
    let mut max_deg = raw + half;
    if min_deg < 0.0 {
        min_deg += FULL_TURN_DEG;
    }
    if max_deg > FULL_TURN_DEG {
        max_deg -= FULL_TURN_DEG;
    }
    Wedge::new(min_deg, max_deg)
}

/// Index-based variant of [`resolve_direction`]
pub fn resolve_direction_index(index: usize, facing_deg: f64) -> Result<Wedge> {
    Ok(resolve_direction(DirectionBucket::from_index(index)?, facing_deg))
}

/// One round of input: where the player stood, which way they looked and
/// what the hint said.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clue {
    pub center: Coordinate,
    pub direction: DirectionBucket,
    pub distance: DistanceBucket,
    pub facing_deg: f64,
}

impl Clue {
    pub fn new(
        center: Coordinate,
        direction: DirectionBucket,
        distance: DistanceBucket,
        facing_deg: f64,
    ) -> Self {
        Self {
            center,
            direction,
            distance,
            facing_deg,
        }
    }

    /// Build from raw table indices, as a form-style front end would submit them
    pub fn from_indices(
        center: Coordinate,
        direction_index: usize,
        distance_index: usize,
        facing_deg: f64,
    ) -> Result<Self> {
        Ok(Self::new(
            center,
            DirectionBucket::from_index(direction_index)?,
            DistanceBucket::from_index(distance_index)?,
            facing_deg,
        ))
    }

    pub fn resolve(&self) -> ClueRegion {
        ClueRegion {
            center: self.center,
            min_radius: self.distance.min_radius(),
            max_radius: self.distance.max_radius(),
            wedge: resolve_direction(self.direction, self.facing_deg),
        }
    }
}

/// Numeric form of a clue: an annulus sector around `center`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClueRegion {
    pub center: Coordinate,
    pub min_radius: u32,
    pub max_radius: u32,
    pub wedge: Wedge,
}

impl ClueRegion {
    pub fn new(center: Coordinate, min_radius: u32, max_radius: u32, wedge: Wedge) -> Self {
        Self {
            center,
            min_radius,
            max_radius,
            wedge,
        }
    }
}

/// Phrases in table order, for listing in front ends
pub fn direction_labels() -> Vec<&'static str> {
    DirectionBucket::iter().map(<&'static str>::from).collect()
}

pub fn distance_labels() -> Vec<&'static str> {
    DistanceBucket::iter().map(<&'static str>::from).collect()
}

const _: () = assert!(DirectionBucket::COUNT == DIRECTION_OFFSETS_DEG.len());
const _: () = assert!(DistanceBucket::COUNT == DISTANCE_BREAKPOINTS.len());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_distance_table() {
        assert_eq!(resolve_distance(0).unwrap(), 3);
        assert_eq!(resolve_distance(-1).unwrap(), 0);
        assert_eq!(resolve_distance(9).unwrap(), 4096);
        assert!(matches!(
            resolve_distance(10),
            Err(LocatorError::InvalidBucket {
                kind: BucketKind::Distance,
                index: 10
            })
        ));
    }

    #[test]
    fn test_distance_bucket_band_edges() {
        assert_eq!(DistanceBucket::StonesThrow.min_radius(), 0);
        assert_eq!(DistanceBucket::StonesThrow.max_radius(), 3);
        assert_eq!(DistanceBucket::FairlyClose.min_radius(), 9);
        assert_eq!(DistanceBucket::FairlyClose.max_radius(), 19);
        assert_eq!(DistanceBucket::VeryFar.min_radius(), 1999);
        assert_eq!(DistanceBucket::VeryFar.max_radius(), 4096);
        for b in DistanceBucket::iter() {
            assert!(b.min_radius() < b.max_radius());
        }
    }

    #[test]
    fn test_resolve_direction_backwards_crosses_seam() {
        let w = resolve_direction(DirectionBucket::Backwards, 90.0);
        assert_eq!(w, Wedge::new(337.5, 22.5));
        assert!(w.crosses_seam());
    }

    #[test]
    fn test_resolve_direction_straight_ahead_facing_north() {
        let w = resolve_direction(DirectionBucket::StraightAhead, 0.0);
        assert_eq!(w, Wedge::new(67.5, 112.5));
    }

    #[test]
    fn test_resolve_direction_right_and_left() {
        // facing 0: right is screen-east, left is screen-west
        assert_eq!(
            resolve_direction(DirectionBucket::Right, 0.0),
            Wedge::new(337.5, 22.5)
        );
        assert_eq!(
            resolve_direction(DirectionBucket::Left, 0.0),
            Wedge::new(157.5, 202.5)
        );
    }

    #[test]
    fn test_every_wedge_is_45_degrees() {
        for b in DirectionBucket::iter() {
            for facing in [0.0, 12.5, 90.0, 180.0, 271.0, 359.9] {
                let w = resolve_direction(b, facing);
                assert!((w.span_deg() - 45.0).abs() < 1e-9, "{b} {facing} {w}");
                assert!(w.min_deg >= 0.0 && w.min_deg < 360.0);
                assert!(w.max_deg >= 0.0 && w.max_deg <= 360.0);
            }
        }
    }

    #[test]
    fn test_resolve_direction_index_out_of_range() {
        assert!(resolve_direction_index(4, 90.0).is_ok());
        assert!(matches!(
            resolve_direction_index(8, 0.0),
            Err(LocatorError::InvalidBucket {
                kind: BucketKind::Direction,
                index: 8
            })
        ));
    }

    #[test]
    fn test_huge_index_is_reported_without_wrapping() {
        let err = DistanceBucket::from_index(usize::MAX).unwrap_err();
        assert!(matches!(
            err,
            LocatorError::InvalidBucket {
                kind: BucketKind::Distance,
                index,
            } if index > 0
        ));
        let expected = i64::try_from(usize::MAX).unwrap_or(i64::MAX).to_string();
        let msg = DirectionBucket::from_index(usize::MAX).unwrap_err().to_string();
        assert!(msg.contains(&expected), "{msg}");
    }

    #[test]
    fn test_parse_bucket_labels() {
        assert_eq!(
            DirectionBucket::parse("To The Left").unwrap(),
            DirectionBucket::Left
        );
        assert_eq!(
            DirectionBucket::parse("behind").unwrap(),
            DirectionBucket::Backwards
        );
        assert_eq!(DirectionBucket::parse(" 2 ").unwrap(), DirectionBucket::Right);
        assert_eq!(
            DistanceBucket::parse("fairly close by").unwrap(),
            DistanceBucket::FairlyClose
        );
        assert_eq!(DistanceBucket::parse("9").unwrap(), DistanceBucket::VeryFar);
        assert!(matches!(
            DistanceBucket::parse("next door"),
            Err(LocatorError::UnknownBucket { .. })
        ));
        assert!(matches!(
            DistanceBucket::parse("10"),
            Err(LocatorError::InvalidBucket { .. })
        ));
    }

    #[test]
    fn test_labels_follow_table_order() {
        assert_eq!(direction_labels()[0], "straight ahead");
        assert_eq!(direction_labels()[7], "ahead to the left");
        assert_eq!(distance_labels()[0], "a stone's throw away");
        assert_eq!(distance_labels().len(), 10);
    }

    #[test]
    fn test_clue_resolve() {
        let clue = Clue::from_indices(Coordinate::new(500, 600), 4, 3, 90.0).unwrap();
        let region = clue.resolve();
        assert_eq!(region.center, Coordinate::new(500, 600));
        assert_eq!(region.min_radius, 9);
        assert_eq!(region.max_radius, 19);
        assert_eq!(region.wedge, Wedge::new(337.5, 22.5));
    }
}
