//! Journal of what the controller did, in order.
//!
//! Core operations never sleep or print. They append [`Event`]s which the
//! driver drains, renders as console messages and maps to simulated delays.

use lift_common::building::Building;
use lift_common::consts::Floor;
use lift_common::state::{Motion, RunMode};

use crate::emergency::EmergencyCause;

/// Phrasing context of a door movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorContext {
    Normal,
    Emergency,
    Overload,
}

impl DoorContext {
    const fn prefix(&self) -> &'static str {
        match self {
            Self::Normal => "",
            Self::Emergency => "EMERGENCY: ",
            Self::Overload => "OVERLOAD: ",
        }
    }
}

/// One observable step of the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    RequestAccepted { floor: Floor },
    Idle,
    DispatchSuspended(RunMode),
    Departing { toward: Floor, motion: Motion },
    Moved { floor: Floor, motion: Motion },
    Arrived { floor: Floor },
    DoorOpening(DoorContext),
    DoorOpened(DoorContext),
    DoorClosing(DoorContext),
    DoorClosed(DoorContext),
    DoorAlreadyOpen,
    DoorAlreadyClosed,
    DoorLocked,
    DoorUnlocked,
    Bell,
    EmergencyStopPressed,
    EmergencyMenuClosed,
    ModeEntered { cause: EmergencyCause, mode: RunMode },
    Parking { floor: Floor },
    AwaitingRelease(RunMode),
    ReleaseDeclined(RunMode),
    Released(RunMode),
}

impl Event {
    /// Console message for this event.
    pub fn describe(&self, building: &Building) -> String {
        match self {
            Self::RequestAccepted { floor } => format!(
                "Floor {} pressed and added to floor request queue!",
                building.label(*floor)
            ),
            Self::Idle => "No floor requests in queue".to_string(),
            Self::DispatchSuspended(mode) => format!("Dispatch suspended ({mode})"),
            Self::Departing { toward, motion } => {
                let verb = if *motion == Motion::MovingDown { "down" } else { "up" };
                format!("Moving {verb} toward floor {}", building.label(*toward))
            }
            Self::Moved { floor, motion } => {
                format!("Passing floor {} ({})", building.label(*floor), motion.label())
            }
            Self::Arrived { floor } => format!(
                "Arrived at floor {} ({})",
                building.label(*floor),
                Motion::Stopped.label()
            ),
            Self::DoorOpening(ctx) => format!("{}Door is opening...", ctx.prefix()),
            Self::DoorOpened(ctx) => match ctx {
                DoorContext::Normal => "Door is open. Please Exit Now.".to_string(),
                DoorContext::Emergency => "EMERGENCY: Door is open. Please evacuate.".to_string(),
                DoorContext::Overload => {
                    "OVERLOAD: Door is open. Please remove excess weight.".to_string()
                }
            },
            Self::DoorClosing(ctx) => format!("{}Door is closing...", ctx.prefix()),
            Self::DoorClosed(ctx) => format!("{}Door is closed.", ctx.prefix()),
            Self::DoorAlreadyOpen => "Door is already open.".to_string(),
            Self::DoorAlreadyClosed => "Door is already closed.".to_string(),
            Self::DoorLocked => "Doors are Locked!".to_string(),
            Self::DoorUnlocked => "Doors are Unlocked!".to_string(),
            Self::Bell => "***Ring!***".to_string(),
            Self::EmergencyStopPressed => "**EMERGENCY STOP BUTTON PRESSED**".to_string(),
            Self::EmergencyMenuClosed => "Emergency menu closed, car remains stopped.".to_string(),
            Self::ModeEntered { cause, .. } => format!("***{} Mode***", cause.title()),
            Self::Parking { floor } => {
                format!("*** Sending Elevator to {} ***", building.label(*floor))
            }
            Self::AwaitingRelease(mode) => format!("Waiting for {mode} mode to be ended..."),
            Self::ReleaseDeclined(mode) => match mode {
                RunMode::Overload => "Please remove excess weight before proceeding!".to_string(),
                _ => format!("Waiting for {mode} mode to be ended..."),
            },
            Self::Released(_) => "Resuming Normal Operations...".to_string(),
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
