pub mod angle;
pub mod band;
pub mod bounds;
pub mod disc;
pub mod reduce;
pub mod types;

pub use angle::{filter_by_angle, in_wedge, normalize_deg, point_angle};
pub use band::filter_min_distance;
pub use bounds::clip_to_map;
pub use disc::{disc_points_within, generate_disc};
pub use reduce::reduce_by_wedge;
pub use types::{CandidateSet, Coordinate, Extent, MAP_EXTENT, Wedge};
