//! Building constants for the lift workspace.
//!
//! Single source of truth for the reference building and fixed capacities.

use static_assertions::const_assert;

/// Floor number. Signed so that out-of-range input (e.g. `-1`) is representable
/// and can be rejected instead of wrapping.
pub type Floor = i32;

/// Lowest floor of the reference building (basement).
pub const MIN_FLOOR: Floor = 0;

/// Ground-level entry floor of the reference building.
pub const LOBBY_FLOOR: Floor = 1;

/// Highest floor of the reference building (roof).
pub const MAX_FLOOR: Floor = 12;

/// Maximum number of floors a configured building may span.
///
/// Bounds the fixed-capacity pending request set.
pub const MAX_FLOORS: usize = 64;

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "config/lift.toml";

const_assert!(MIN_FLOOR <= LOBBY_FLOOR);
const_assert!(LOBBY_FLOOR <= MAX_FLOOR);
const_assert!(((MAX_FLOOR - MIN_FLOOR + 1) as usize) <= MAX_FLOORS);
