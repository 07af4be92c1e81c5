/// Map extent (inclusive on both ends, in map units)
pub const MAP_MIN: i32 = 0;
pub const MAP_MAX: i32 = 4096;

/// Upper edge of each distance bucket, nearest first
pub const DISTANCE_BREAKPOINTS: [u32; 10] = [3, 5, 9, 19, 49, 199, 499, 999, 1999, 4096];

/// Offset from the facing angle for each direction bucket [deg]
/// straight ahead, ahead right, right, back right, backwards, back left, left, ahead left
pub const DIRECTION_OFFSETS_DEG: [f64; 8] = [0.0, -45.0, -90.0, -135.0, 180.0, 135.0, 90.0, 45.0];

/// Facing 0 means "north", which is 90 deg in screen-angle terms (450 = 360 + 90)
pub const FACING_BASE_DEG: f64 = 450.0;

/// Full width of a direction wedge [deg]
pub const WEDGE_WIDTH_DEG: f64 = 45.0;

pub const FULL_TURN_DEG: f64 = 360.0;

/// Environment variable overriding `output.dir`
pub const ENV_OUTPUT_DIR: &str = "LOCATOR_OUTPUT_DIR";

/// Header written to candidate CSV files
pub const CSV_HEADER: [&str; 2] = ["x", "y"];
