//! State enums for the elevator car.
//!
//! Labels match what the car's status panel prints, so they double as the
//! golden strings in status tests.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::Floor;

/// Car motion status.
///
/// Safety logic reads this to decide valid door operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Motion {
    /// Standing at a floor, waiting for the next instruction.
    #[default]
    Stopped,
    /// Travelling towards higher floors.
    MovingUp,
    /// Travelling towards lower floors.
    MovingDown,
}

impl Motion {
    /// Status panel label.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Stopped => "[X]STOPPED[X]",
            Self::MovingUp => "[^]UP[^]",
            Self::MovingDown => "[V]DOWN[V]",
        }
    }

    /// Motion heading from `from` towards `to`; `Stopped` when equal.
    pub const fn toward(from: Floor, to: Floor) -> Self {
        if to > from {
            Self::MovingUp
        } else if to < from {
            Self::MovingDown
        } else {
            Self::Stopped
        }
    }
}

impl fmt::Display for Motion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Door status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DoorState {
    /// Doors are open.
    Open,
    /// Doors are closed.
    #[default]
    Closed,
    /// Doors are locked (e.g. fire safety protocol).
    Locked,
}

impl DoorState {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Closed => "CLOSED",
            Self::Locked => "LOCKED",
        }
    }
}

impl fmt::Display for DoorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Car run mode.
///
/// `On` is normal service. `EStop` is the emergency menu; the remaining
/// emergency modes are entered from it and released back to `On`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RunMode {
    /// Powered, normal dispatch.
    #[default]
    On,
    /// Powered down. Reserved for power control, no transition leads here.
    Off,
    /// Weight limit exceeded. Door held open, car refuses to move.
    Overload,
    /// Emergency stop pressed, menu asks what is wrong.
    EStop,
    /// Fire protocol. Door locked until an operator releases the car.
    FireSafety,
    /// Rescue crew access. Reserved, the menu's rescue entry exits directly.
    FireRescue,
    /// Earthquake protocol. Car parked at the lowest floor.
    Earthquake,
    /// Hurricane protocol. Car parked at the highest floor.
    Hurricane,
}

impl RunMode {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::On => "ON",
            Self::Off => "OFF",
            Self::Overload => "OVERLOAD",
            Self::EStop => "ESTOP",
            Self::FireSafety => "FIRE_SAFETY",
            Self::FireRescue => "FIRE_RESCUE",
            Self::Earthquake => "EARTHQUAKE",
            Self::Hurricane => "HURRICANE",
        }
    }

    /// Modes in which the door may be locked.
    #[inline]
    pub const fn allows_locked_door(&self) -> bool {
        matches!(
            self,
            Self::EStop | Self::FireSafety | Self::Earthquake | Self::Hurricane
        )
    }

    /// Modes that wait for an operator release before returning to `On`.
    #[inline]
    pub const fn awaits_release(&self) -> bool {
        matches!(
            self,
            Self::FireSafety | Self::Earthquake | Self::Hurricane | Self::Overload
        )
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
