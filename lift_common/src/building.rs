//! Floor range of the served building and the labels shown for floors.

use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, Validate};
use crate::consts::{Floor, LOBBY_FLOOR, MAX_FLOOR, MAX_FLOORS, MIN_FLOOR};

/// Served floor range.
///
/// # TOML Example
///
/// ```toml
/// [building]
/// min_floor = 0
/// lobby_floor = 1
/// max_floor = 12
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Building {
    /// Lowest served floor, labelled "Basement".
    pub min_floor: Floor,
    /// Entry floor, labelled "Lobby*". The car starts here.
    pub lobby_floor: Floor,
    /// Highest served floor, labelled "Roof".
    pub max_floor: Floor,
}

impl Default for Building {
    fn default() -> Self {
        Self {
            min_floor: MIN_FLOOR,
            lobby_floor: LOBBY_FLOOR,
            max_floor: MAX_FLOOR,
        }
    }
}

impl Building {
    /// Build and validate a floor range.
    pub fn new(min_floor: Floor, lobby_floor: Floor, max_floor: Floor) -> Result<Self, ConfigError> {
        let building = Self {
            min_floor,
            lobby_floor,
            max_floor,
        };
        building.validate()?;
        Ok(building)
    }

    /// Whether `floor` is a served floor.
    #[inline]
    pub const fn contains(&self, floor: Floor) -> bool {
        floor >= self.min_floor && floor <= self.max_floor
    }

    /// Number of served floors.
    #[inline]
    pub const fn floor_count(&self) -> usize {
        (self.max_floor as i64 - self.min_floor as i64 + 1) as usize
    }

    /// Display label for a floor: special names for basement, lobby and roof,
    /// the decimal number otherwise.
    pub fn label(&self, floor: Floor) -> String {
        if floor == self.min_floor {
            "Basement".to_string()
        } else if floor == self.lobby_floor {
            "Lobby*".to_string()
        } else if floor == self.max_floor {
            "Roof".to_string()
        } else {
            floor.to_string()
        }
    }
}

impl Validate for Building {
    /// Validate the floor range.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if:
    /// - `lobby_floor` lies outside `[min_floor, max_floor]`
    /// - the range spans more than [`MAX_FLOORS`] floors
    fn validate(&self) -> Result<(), ConfigError> {
        if self.min_floor > self.lobby_floor || self.lobby_floor > self.max_floor {
            return Err(ConfigError::ValidationError(format!(
                "building floors must satisfy min_floor <= lobby_floor <= max_floor (got {} / {} / {})",
                self.min_floor, self.lobby_floor, self.max_floor
            )));
        }
        if self.floor_count() > MAX_FLOORS {
            return Err(ConfigError::ValidationError(format!(
                "building spans {} floors, at most {MAX_FLOORS} supported",
                self.floor_count()
            )));
        }
        Ok(())
    }
}
