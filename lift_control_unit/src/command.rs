//! Keypad and console command parsing.

use lift_common::building::Building;
use lift_common::consts::Floor;

/// A routed user command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Floor(Floor),
    OpenDoor,
    CloseDoor,
    Bell,
    EmergencyStop,
    /// Not a command; reported back to the user.
    Unknown(String),
}

impl Command {
    /// Parse one line of input. Case-insensitive, surrounding blanks ignored.
    ///
    /// `B`, `L` and `R` are the basement, lobby and roof shortcuts.
    pub fn parse(input: &str, building: &Building) -> Self {
        let trimmed = input.trim();
        match trimmed.to_ascii_uppercase().as_str() {
            "Q" | "QUIT" | "EXIT" => Self::Quit,
            "B" => Self::Floor(building.min_floor),
            "L" => Self::Floor(building.lobby_floor),
            "R" => Self::Floor(building.max_floor),
            "OPEN" => Self::OpenDoor,
            "CLOSE" => Self::CloseDoor,
            "BELL" => Self::Bell,
            "STOP" => Self::EmergencyStop,
            other => match other.parse::<Floor>() {
                Ok(floor) => Self::Floor(floor),
                Err(_) => Self::Unknown(trimmed.to_string()),
            },
        }
    }
}
