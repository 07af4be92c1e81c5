pub mod clue;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod geometry;
pub mod hunt;
pub mod render;
pub mod session;

pub use clue::{
    BucketKind, Clue, ClueRegion, DirectionBucket, DistanceBucket, resolve_direction,
    resolve_distance,
};
pub use config::Config;
pub use constants::{DISTANCE_BREAKPOINTS, MAP_MAX, MAP_MIN};
pub use error::{LocatorError, Result};
pub use export::{
    Summary, export_candidates_csv, export_summary_json, save_session, timestamped_stem,
};
pub use geometry::{
    CandidateSet, Coordinate, Extent, MAP_EXTENT, Wedge, clip_to_map, filter_by_angle,
    filter_min_distance, generate_disc, reduce_by_wedge,
};
pub use hunt::HuntFile;
pub use render::{Renderer, export_png, render_session};
pub use session::{Session, SessionState};
