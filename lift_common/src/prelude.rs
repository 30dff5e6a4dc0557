//! Prelude module for common re-exports.
//!
//! ```rust
//! use lift_common::prelude::*;
//! ```

// ─── Building ───────────────────────────────────────────────────────
pub use crate::building::Building;
pub use crate::consts::{Floor, LOBBY_FLOOR, MAX_FLOOR, MAX_FLOORS, MIN_FLOOR};

// ─── State ──────────────────────────────────────────────────────────
pub use crate::state::{DoorState, Motion, RunMode};

// ─── Errors ─────────────────────────────────────────────────────────
pub use crate::error::{DoorAction, ElevatorError};

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, LogLevel, SharedConfig, Validate};

// ─── Collaborators ──────────────────────────────────────────────────
pub use crate::io::{DisplaySink, InputSource, RecordingDisplay, ScriptedInput};
