//! Lift Common Library
//!
//! Shared building model, state enums, error taxonomy, configuration loading
//! and collaborator traits for the lift workspace crates.
//!
//! # Module Structure
//!
//! - [`consts`] - Reference building and capacity constants
//! - [`building`] - Floor range and floor labels
//! - [`state`] - Motion, door and run-mode enums
//! - [`error`] - Recoverable controller errors
//! - [`config`] - Configuration loading traits and types
//! - [`io`] - Input source and display sink contracts
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use lift_common::prelude::*;
//!
//! let building = Building::default();
//! assert_eq!(building.label(LOBBY_FLOOR), "Lobby*");
//! ```

pub mod building;
pub mod config;
pub mod consts;
pub mod error;
pub mod io;
pub mod prelude;
pub mod state;
