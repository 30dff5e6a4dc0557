//! Recoverable controller errors.
//!
//! Every variant is local: the controller reports it and leaves its state
//! unchanged. None of them terminates the process.

use std::fmt;

use thiserror::Error;

use crate::config::ConfigError;
use crate::consts::Floor;
use crate::state::{DoorState, Motion, RunMode};

/// Door operation that was attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorAction {
    Open,
    Close,
}

impl fmt::Display for DoorAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Open => "opened",
            Self::Close => "closed",
        })
    }
}

/// Error returned by controller operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ElevatorError {
    /// Requested floor lies outside the served range.
    #[error("Invalid floor number {floor}! Basement is floor {min}, roof is {max}")]
    InvalidFloor { floor: Floor, min: Floor, max: Floor },

    /// Pending set is full. Only reachable with a building that was never
    /// validated against `MAX_FLOORS`.
    #[error("Request queue full ({capacity} floors), floor {floor} not queued")]
    QueueFull { floor: Floor, capacity: usize },

    /// Floor is already queued, or the car is standing on it.
    #[error("Floor {floor} already requested or the car is already on that floor")]
    DuplicateRequest { floor: Floor },

    /// Door interlock precondition not met.
    #[error("Door cannot be {action} at this time (door {door}, {motion}, mode {run_mode})")]
    DoorBlocked {
        action: DoorAction,
        door: DoorState,
        motion: Motion,
        run_mode: RunMode,
    },

    /// Unrecognized emergency menu choice or release answer.
    #[error("Invalid emergency input: {input:?}")]
    InvalidMenuInput { input: String },

    /// Emergency event not valid in the current run mode.
    #[error("Emergency transition rejected: {reason}")]
    TransitionRejected { reason: &'static str },

    /// Car built for a floor range that fails validation.
    #[error("Invalid building: {0}")]
    InvalidBuilding(#[from] ConfigError),
}
