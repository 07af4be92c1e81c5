//! Hunt files and input checks shared by the front ends.
//!
//! A hunt file lists the clues of one search in the order they were heard:
//!
//! ```toml
//! [[clue]]
//! x = 1000
//! y = 1000
//! facing = 90.0
//! direction = "backwards"
//! distance = "fairly close by"
//! ```
//!
//! `direction` and `distance` take either the phrase or the table index.

use serde::Deserialize;
use std::{fmt, path::Path};

use crate::clue::{Clue, DirectionBucket, DistanceBucket};
use crate::constants::{FULL_TURN_DEG, MAP_MAX, MAP_MIN};
use crate::error::{LocatorError, Result};
use crate::geometry::Coordinate;

/// Bucket given as phrase or index
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum BucketRef {
    Index(usize),
    Label(String),
}

impl fmt::Display for BucketRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BucketRef::Index(i) => write!(f, "{}", i),
            BucketRef::Label(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClueEntry {
    pub x: i64,
    pub y: i64,
    pub facing: f64,
    pub direction: BucketRef,
    pub distance: BucketRef,
}

impl ClueEntry {
    pub fn to_clue(&self) -> Result<Clue> {
        let center = checked_center(self.x, self.y)?;
        let facing = checked_facing(self.facing)?;
        let direction = match &self.direction {
            BucketRef::Index(i) => DirectionBucket::from_index(*i)?,
            BucketRef::Label(s) => DirectionBucket::parse(s)?,
        };
        let distance = match &self.distance {
            BucketRef::Index(i) => DistanceBucket::from_index(*i)?,
            BucketRef::Label(s) => DistanceBucket::parse(s)?,
        };
        Ok(Clue::new(center, direction, distance, facing))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HuntFile {
    #[serde(default, rename = "clue")]
    pub clues: Vec<ClueEntry>,
}

impl HuntFile {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| LocatorError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Every entry converted; the first bad one aborts with its position
    pub fn to_clues(&self) -> Result<Vec<Clue>> {
        self.clues
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                entry.to_clue().map_err(|e| {
                    LocatorError::MalformedInput(format!("clue #{}: {}", i + 1, e))
                })
            })
            .collect()
    }
}

/// Player position, must lie on the map
pub fn checked_center(x: i64, y: i64) -> Result<Coordinate> {
    let range = MAP_MIN as i64..=MAP_MAX as i64;
    if !range.contains(&x) || !range.contains(&y) {
        return Err(LocatorError::MalformedInput(format!(
            "coordinate ({}, {}) is outside the map [{}, {}]",
            x, y, MAP_MIN, MAP_MAX
        )));
    }
    Ok(Coordinate::new(x as i32, y as i32))
}

/// Facing in degrees. 360 and above count as 0, like a compass that went
/// full circle; negative or non-finite values are rejected.
pub fn checked_facing(deg: f64) -> Result<f64> {
    if !deg.is_finite() || deg < 0.0 {
        return Err(LocatorError::MalformedInput(format!(
            "facing must be a non-negative number of degrees, got {}",
            deg
        )));
    }
    Ok(if deg >= FULL_TURN_DEG { 0.0 } else { deg })
}
