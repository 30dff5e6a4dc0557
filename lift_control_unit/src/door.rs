//! Door/motion interlock.
//!
//! Transitions are gated jointly by motion and run mode:
//!
//! | Action            | Precondition                         | Effect                          |
//! |-------------------|--------------------------------------|---------------------------------|
//! | open              | Closed, Stopped, `On`                | Open, auto-close after dwell    |
//! | open (emergency)  | Locked, Stopped, `EStop`             | Open, auto-close after dwell    |
//! | open (overload)   | Stopped, `Overload`                  | Open, held open                 |
//! | close             | Open, Stopped                        | Closed (phrasing by run mode)   |
//! | anything else     |                                      | `DoorBlocked`, no change        |
//!
//! The dwell is simulated time: the interlock emits the open and close events
//! back to back and the driver spaces them out.

use lift_common::error::{DoorAction, ElevatorError};
use lift_common::state::{DoorState, Motion, RunMode};

use crate::event::{DoorContext, Event};

/// Result of an accepted door command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorOutcome {
    /// Door opened and closed again after the dwell.
    Cycled(DoorContext),
    /// Door opened and stays open (overload).
    HeldOpen,
    /// Door closed.
    Closed(DoorContext),
    /// Door was already in the requested state.
    Unchanged,
}

/// Door state holder enforcing the interlock table.
#[derive(Debug, Clone, Default)]
pub struct DoorInterlock {
    state: DoorState,
}

impl DoorInterlock {
    pub const fn new() -> Self {
        Self {
            state: DoorState::Closed,
        }
    }

    #[inline]
    pub const fn state(&self) -> DoorState {
        self.state
    }

    /// Whether the car may travel. An open door pins the car.
    #[inline]
    pub const fn permits_motion(&self) -> bool {
        !matches!(self.state, DoorState::Open)
    }

    /// Open the door if motion and run mode allow it.
    pub fn open(
        &mut self,
        motion: Motion,
        run_mode: RunMode,
        events: &mut Vec<Event>,
    ) -> Result<DoorOutcome, ElevatorError> {
        if self.state == DoorState::Open {
            events.push(Event::DoorAlreadyOpen);
            return Ok(DoorOutcome::Unchanged);
        }

        let stopped = motion == Motion::Stopped;
        let context = match (self.state, run_mode) {
            (DoorState::Closed, RunMode::On) if stopped => DoorContext::Normal,
            (DoorState::Locked, RunMode::EStop) if stopped => DoorContext::Emergency,
            (_, RunMode::Overload) if stopped => DoorContext::Overload,
            _ => return Err(self.blocked(DoorAction::Open, motion, run_mode)),
        };

        events.push(Event::DoorOpening(context));
        self.state = DoorState::Open;
        events.push(Event::DoorOpened(context));

        if context == DoorContext::Overload {
            return Ok(DoorOutcome::HeldOpen);
        }

        events.push(Event::DoorClosing(context));
        self.state = DoorState::Closed;
        events.push(Event::DoorClosed(context));
        Ok(DoorOutcome::Cycled(context))
    }

    /// Close an open door while the car is stopped.
    pub fn close(
        &mut self,
        motion: Motion,
        run_mode: RunMode,
        events: &mut Vec<Event>,
    ) -> Result<DoorOutcome, ElevatorError> {
        if self.state == DoorState::Closed {
            events.push(Event::DoorAlreadyClosed);
            return Ok(DoorOutcome::Unchanged);
        }
        if self.state != DoorState::Open || motion != Motion::Stopped {
            return Err(self.blocked(DoorAction::Close, motion, run_mode));
        }

        let context = if run_mode == RunMode::On {
            DoorContext::Normal
        } else {
            DoorContext::Emergency
        };
        events.push(Event::DoorClosing(context));
        self.state = DoorState::Closed;
        events.push(Event::DoorClosed(context));
        Ok(DoorOutcome::Closed(context))
    }

    /// Open a locked door for evacuation without the auto-close.
    ///
    /// Only valid from the emergency menu with the car stopped; the caller
    /// locks the door again once the protocol takes over.
    pub fn evacuate(
        &mut self,
        motion: Motion,
        run_mode: RunMode,
        events: &mut Vec<Event>,
    ) -> Result<(), ElevatorError> {
        if self.state != DoorState::Locked
            || motion != Motion::Stopped
            || run_mode != RunMode::EStop
        {
            return Err(self.blocked(DoorAction::Open, motion, run_mode));
        }
        events.push(Event::DoorOpening(DoorContext::Emergency));
        self.state = DoorState::Open;
        events.push(Event::DoorOpened(DoorContext::Emergency));
        Ok(())
    }

    /// Lock the door in place (emergency protocols).
    pub fn lock(&mut self, events: &mut Vec<Event>) {
        if self.state != DoorState::Locked {
            self.state = DoorState::Locked;
            events.push(Event::DoorLocked);
        }
    }

    /// Release a locked door back to closed. No-op otherwise.
    pub fn unlock(&mut self, events: &mut Vec<Event>) {
        if self.state == DoorState::Locked {
            self.state = DoorState::Closed;
            events.push(Event::DoorUnlocked);
        }
    }

    fn blocked(&self, action: DoorAction, motion: Motion, run_mode: RunMode) -> ElevatorError {
        ElevatorError::DoorBlocked {
            action,
            door: self.state,
            motion,
            run_mode,
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
