use log::{debug, info, warn};

use crate::clue::{Clue, ClueRegion};
use crate::error::Result;
use crate::geometry::{
    CandidateSet, Coordinate, MAP_EXTENT, clip_to_map, disc_points_within, filter_min_distance,
    in_wedge, reduce_by_wedge,
};

/// Where a session is in its clue sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No candidates computed yet (fresh, or after reset)
    Empty,
    /// One clue applied
    Seeded,
    /// Two or more clues applied
    Narrowed,
}

/// Candidates together with the clues that produced them
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub candidates: CandidateSet,
    pub regions: Vec<ClueRegion>,
}

impl Snapshot {
    pub fn state(&self) -> SessionState {
        if self.regions.len() > 1 {
            SessionState::Narrowed
        } else {
            SessionState::Seeded
        }
    }
}

/// Interactive narrowing session with one level of undo.
///
/// `current() == None` means nothing has been computed; `Some(empty)` means
/// the clues contradict each other.
#[derive(Debug, Clone, Default)]
pub struct Session {
    current: Option<Snapshot>,
    previous: Option<Snapshot>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.current
            .as_ref()
            .map_or(SessionState::Empty, Snapshot::state)
    }

    pub fn current(&self) -> Option<&CandidateSet> {
        self.current.as_ref().map(|s| &s.candidates)
    }

    pub fn previous(&self) -> Option<&CandidateSet> {
        self.previous.as_ref().map(|s| &s.candidates)
    }

    /// Clues behind the current candidates, oldest first
    pub fn regions(&self) -> &[ClueRegion] {
        self.current
            .as_ref()
            .map(|s| s.regions.as_slice())
            .unwrap_or(&[])
    }

    pub fn submit_clue(&mut self, clue: &Clue) -> &CandidateSet {
        debug!(
            "clue at {}: {} / {} facing {:.1}",
            clue.center, clue.direction, clue.distance, clue.facing_deg
        );
        self.submit_region(clue.resolve())
    }

    /// Form-style entry point. Bad indices leave the session untouched.
    pub fn submit_indices(
        &mut self,
        center: Coordinate,
        direction_index: usize,
        distance_index: usize,
        facing_deg: f64,
    ) -> Result<&CandidateSet> {
        let clue = Clue::from_indices(center, direction_index, distance_index, facing_deg)?;
        Ok(self.submit_clue(&clue))
    }

    /// Apply an already-resolved clue region.
    pub fn submit_region(&mut self, region: ClueRegion) -> &CandidateSet {
        let next = match self.current.take() {
            None => {
                // a fresh seed starts a new history
                self.previous = None;
                Snapshot {
                    candidates: seed_candidates(&region),
                    regions: vec![region],
                }
            }
            Some(prev) => {
                let candidates = narrow_candidates(prev.candidates.clone(), &region);
                let mut regions = prev.regions.clone();
                regions.push(region);
                self.previous = Some(prev);
                Snapshot {
                    candidates,
                    regions,
                }
            }
        };

        let round = next.regions.len();
        if next.candidates.is_empty() {
            warn!("clue {}: no location matches all clues", round);
        } else {
            info!("clue {}: {} candidates", round, next.candidates.len());
        }
        &self.current.insert(next).candidates
    }

    /// Back to Empty; whatever was current becomes the undo buffer.
    pub fn reset(&mut self) -> Option<&CandidateSet> {
        if let Some(cur) = self.current.take() {
            self.previous = Some(cur);
        }
        info!("session reset");
        None
    }

    /// Restore the previous candidates, or reset when there are none.
    pub fn undo(&mut self) -> Option<&CandidateSet> {
        match self.previous.take() {
            Some(prev) => {
                info!(
                    "undo: back to {} candidates after {} clue(s)",
                    prev.candidates.len(),
                    prev.regions.len()
                );
                self.current = Some(prev);
                self.current()
            }
            None => self.reset(),
        }
    }
}

/// First clue: disc, wedge, inner ring cut, map bounds
pub fn seed_candidates(region: &ClueRegion) -> CandidateSet {
    // Points off the map are clipped below anyway, so skip enumerating them.
    let wedge = CandidateSet::from_unique(
        disc_points_within(region.center, region.max_radius, &MAP_EXTENT)
            .filter(in_wedge(region.center, region.wedge))
            .collect(),
    );
    debug!("seed: {} points in wedge", wedge.len());
    let band = filter_min_distance(wedge, region.center, region.min_radius as f64);
    clip_to_map(band)
}

/// Later clues: intersect, inner ring cut, map bounds
pub fn narrow_candidates(existing: CandidateSet, region: &ClueRegion) -> CandidateSet {
    let reduced = reduce_by_wedge(existing, region.center, region.max_radius, region.wedge);
    let band = filter_min_distance(reduced, region.center, region.min_radius as f64);
    clip_to_map(band)
}
