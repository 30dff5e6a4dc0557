//! Emergency protocols run by the controller.
//!
//! Entry, per-mode procedure and release. The menu and the release question
//! return to the caller; [`Elevator::prompt`] tells the driver which answer
//! is expected next.

use lift_common::consts::Floor;
use lift_common::error::ElevatorError;
use lift_common::state::{DoorState, Motion, RunMode};
use tracing::{info, warn};

use super::Elevator;
use crate::emergency::{parse_release_answer, EmergencyCause, EmergencyEvent};
use crate::event::Event;

impl Elevator {
    /// Emergency stop button: stop, lock the door and open the menu.
    ///
    /// Pressing it again from `EStop` re-opens the menu. Rejected while a
    /// protocol is running.
    pub fn press_emergency_stop(&mut self) -> Result<RunMode, ElevatorError> {
        let mode = self
            .emergency
            .handle_event(EmergencyEvent::StopPressed)
            .into_result()?;
        self.motion = Motion::Stopped;
        self.door.lock(&mut self.events);
        self.events.push(Event::EmergencyStopPressed);
        info!(floor = self.current_floor, "emergency stop pressed");
        Ok(mode)
    }

    /// Answer the emergency menu.
    ///
    /// Unrecognized input closes the menu and leaves the car in `EStop`.
    pub fn choose_emergency(&mut self, input: &str) -> Result<RunMode, ElevatorError> {
        match EmergencyCause::parse_menu(input) {
            Some(cause) => self.enter_protocol(cause),
            None => {
                self.emergency
                    .handle_event(EmergencyEvent::Cancel)
                    .into_result()?;
                self.events.push(Event::EmergencyMenuClosed);
                Err(ElevatorError::InvalidMenuInput {
                    input: input.trim().to_string(),
                })
            }
        }
    }

    /// Press the stop button and pick `cause` from the menu.
    pub fn trigger_emergency_stop(
        &mut self,
        cause: EmergencyCause,
    ) -> Result<RunMode, ElevatorError> {
        self.press_emergency_stop()?;
        self.enter_protocol(cause)
    }

    /// Operator release. `false` keeps the mode and reports the wait.
    pub fn confirm(&mut self, released: bool) -> Result<RunMode, ElevatorError> {
        let Some(mode) = self.emergency.awaiting_release() else {
            return Err(ElevatorError::TransitionRejected {
                reason: "no emergency mode awaits release",
            });
        };
        if !released {
            self.events.push(Event::ReleaseDeclined(mode));
            return Ok(mode);
        }

        if self.door.state() == DoorState::Open {
            self.door.close(Motion::Stopped, mode, &mut self.events)?;
        }
        let next = self
            .emergency
            .handle_event(EmergencyEvent::Release)
            .into_result()?;
        self.door.unlock(&mut self.events);
        self.events.push(Event::Released(mode));
        info!(%mode, floor = self.current_floor, "emergency mode released");
        Ok(next)
    }

    /// Parse a typed or keypad release answer and apply it.
    pub fn answer_release(&mut self, input: &str) -> Result<RunMode, ElevatorError> {
        if self.emergency.awaiting_release().is_none() {
            return Err(ElevatorError::TransitionRejected {
                reason: "no emergency mode awaits release",
            });
        }
        let released = parse_release_answer(input)?;
        self.confirm(released)
    }

    fn enter_protocol(&mut self, cause: EmergencyCause) -> Result<RunMode, ElevatorError> {
        let from = self.run_mode();
        let mode = self
            .emergency
            .handle_event(EmergencyEvent::Select(cause))
            .into_result()?;
        self.events.push(Event::ModeEntered { cause, mode });
        info!(?cause, %mode, floor = self.current_floor, "emergency protocol entered");

        match cause {
            EmergencyCause::Fire => self.evacuate_and_lock(from),
            EmergencyCause::Earthquake => {
                let basement = self.building.min_floor;
                self.evacuate_and_lock(from);
                self.park_at(basement);
            }
            EmergencyCause::Hurricane => {
                let roof = self.building.max_floor;
                self.evacuate_and_lock(from);
                self.park_at(roof);
            }
            EmergencyCause::Overload => {
                if let Err(err) = self.door.open(Motion::Stopped, mode, &mut self.events) {
                    warn!(%err, "door not opened for overload");
                }
            }
            EmergencyCause::Rescue => {
                self.door.unlock(&mut self.events);
                self.events.push(Event::Released(from));
                info!(floor = self.current_floor, "rescue crew released the car");
            }
        }

        if mode.awaits_release() {
            self.events.push(Event::AwaitingRelease(mode));
        }
        Ok(mode)
    }

    /// Open the locked door for evacuation, then lock it again.
    fn evacuate_and_lock(&mut self, from: RunMode) {
        if let Err(err) = self.door.evacuate(Motion::Stopped, from, &mut self.events) {
            warn!(%err, "door not opened for evacuation");
        }
        self.door.lock(&mut self.events);
    }

    /// Drive the car to `floor` ignoring the normal queue.
    ///
    /// The queue is replaced by a single stop at `floor`; nothing is queued
    /// when the car is already there.
    fn park_at(&mut self, floor: Floor) {
        self.events.push(Event::Parking { floor });
        if self.current_floor == floor {
            self.queue.clear();
            return;
        }

        self.queue.force_single(floor);
        while self.current_floor != floor {
            let reached = self.step_toward(floor);
            if reached != floor {
                self.events.push(Event::Moved {
                    floor: reached,
                    motion: self.motion,
                });
            }
        }
        self.queue.service(floor);
        self.queue.clear_primary();
        self.motion = Motion::Stopped;
        self.events.push(Event::Arrived { floor });
        info!(floor, "car parked");
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
