//! Elevator controller: the single state object the driver talks to.
//!
//! Composes the request queue, the door interlock and the emergency machine.
//! Every operation runs to completion, appends what happened to the event
//! journal and never blocks; the driver drains the journal and simulates the
//! time it represents.

mod procedures;

use std::mem;

use lift_common::building::Building;
use lift_common::config::Validate;
use lift_common::consts::Floor;
use lift_common::error::ElevatorError;
use lift_common::state::{DoorState, Motion, RunMode};
use tracing::{debug, warn};

use crate::dispatch::{Commitment, RequestQueue};
use crate::door::{DoorInterlock, DoorOutcome};
use crate::emergency::EmergencyStateMachine;
use crate::event::Event;
use crate::status::StatusReport;

/// What one `advance()` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Nothing to do; car stopped with no committed leg.
    Idle,
    /// Requests pending but an emergency mode holds the car.
    Suspended(RunMode),
    /// Car moved one floor without stopping.
    Moved(Floor),
    /// Car stopped at a floor and serviced it.
    Serviced(Floor),
}

/// Answer the controller is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    /// Emergency menu open; feed [`Elevator::choose_emergency`].
    EmergencyMenu,
    /// Mode holds until [`Elevator::confirm`].
    Release(RunMode),
}

/// Elevator car controller.
#[derive(Debug, Clone)]
pub struct Elevator {
    building: Building,
    current_floor: Floor,
    motion: Motion,
    door: DoorInterlock,
    queue: RequestQueue,
    emergency: EmergencyStateMachine,
    events: Vec<Event>,
}

impl Elevator {
    /// Car at the lobby, stopped, door closed, normal service, empty queue.
    ///
    /// The building is validated first; a range wider than the pending set
    /// can hold is refused.
    pub fn new(building: Building) -> Result<Self, ElevatorError> {
        building.validate()?;
        Ok(Self {
            current_floor: building.lobby_floor,
            building,
            motion: Motion::Stopped,
            door: DoorInterlock::new(),
            queue: RequestQueue::new(),
            emergency: EmergencyStateMachine::new(),
            events: Vec::new(),
        })
    }

    /// Car parked at `floor` instead of the lobby.
    pub fn starting_at(building: Building, floor: Floor) -> Result<Self, ElevatorError> {
        if !building.contains(floor) {
            return Err(ElevatorError::InvalidFloor {
                floor,
                min: building.min_floor,
                max: building.max_floor,
            });
        }
        let mut elevator = Self::new(building)?;
        elevator.current_floor = floor;
        Ok(elevator)
    }

    // ─── Accessors ──────────────────────────────────────────────────

    #[inline]
    pub const fn building(&self) -> &Building {
        &self.building
    }

    #[inline]
    pub const fn current_floor(&self) -> Floor {
        self.current_floor
    }

    #[inline]
    pub const fn motion(&self) -> Motion {
        self.motion
    }

    #[inline]
    pub const fn door(&self) -> DoorState {
        self.door.state()
    }

    #[inline]
    pub const fn run_mode(&self) -> RunMode {
        self.emergency.mode()
    }

    #[inline]
    pub const fn primary_destination(&self) -> Option<Floor> {
        self.queue.primary_destination()
    }

    /// Queued floors in arrival order.
    #[inline]
    pub fn pending_requests(&self) -> &[Floor] {
        self.queue.pending()
    }

    /// Next floor the car would stop at, without moving it.
    pub fn next_stop_on_the_way(&self) -> Option<Floor> {
        self.queue.next_stop_on_the_way(self.current_floor, self.motion)
    }

    /// Answer the controller is waiting for, if any.
    pub const fn prompt(&self) -> Option<Prompt> {
        if self.emergency.menu_open() {
            Some(Prompt::EmergencyMenu)
        } else {
            match self.emergency.awaiting_release() {
                Some(mode) => Some(Prompt::Release(mode)),
                None => None,
            }
        }
    }

    /// Read-only status projection.
    pub fn status(&self) -> StatusReport {
        StatusReport::of(self)
    }

    /// Drain the event journal.
    pub fn take_events(&mut self) -> Vec<Event> {
        mem::take(&mut self.events)
    }

    // ─── Requests and dispatch ──────────────────────────────────────

    /// Queue a floor stop.
    pub fn submit_floor_request(&mut self, floor: Floor) -> Result<Commitment, ElevatorError> {
        let commitment = self
            .queue
            .submit(floor, self.current_floor, self.motion, &self.building)?;
        self.events.push(Event::RequestAccepted { floor });
        Ok(commitment)
    }

    /// One scheduling tick: move one floor or service the current one.
    pub fn advance(&mut self) -> Tick {
        if self.queue.is_empty() {
            self.go_idle();
            return Tick::Idle;
        }
        if !self.emergency.dispatch_enabled() {
            let mode = self.run_mode();
            self.events.push(Event::DispatchSuspended(mode));
            return Tick::Suspended(mode);
        }

        let Some(target) = self.next_stop_on_the_way() else {
            // Stops remain but none is reachable on the current heading.
            self.go_idle();
            self.queue
                .reassign_primary_destination(self.current_floor, Motion::Stopped);
            return Tick::Idle;
        };

        if target == self.current_floor {
            self.service_arrival();
            return Tick::Serviced(self.current_floor);
        }
        if !self.door.permits_motion() {
            let mode = self.run_mode();
            self.events.push(Event::DispatchSuspended(mode));
            return Tick::Suspended(mode);
        }

        let floor = self.step_toward(target);
        if self.queue.contains(floor) {
            self.service_arrival();
            Tick::Serviced(floor)
        } else {
            self.events.push(Event::Moved {
                floor,
                motion: self.motion,
            });
            Tick::Moved(floor)
        }
    }

    fn go_idle(&mut self) {
        self.motion = Motion::Stopped;
        self.queue.clear_primary();
        self.events.push(Event::Idle);
    }

    /// Move exactly one floor toward `target`. Returns the new floor.
    fn step_toward(&mut self, target: Floor) -> Floor {
        let heading = Motion::toward(self.current_floor, target);
        if heading != self.motion {
            self.events.push(Event::Departing {
                toward: target,
                motion: heading,
            });
        }
        self.motion = heading;
        self.current_floor += if heading == Motion::MovingUp { 1 } else { -1 };
        debug!(floor = self.current_floor, target, motion = %heading, "moved one floor");
        self.current_floor
    }

    /// Stop at the current floor, cycle the door and pick the next leg.
    fn service_arrival(&mut self) {
        let floor = self.current_floor;
        self.queue.service(floor);
        self.motion = Motion::Stopped;
        self.events.push(Event::Arrived { floor });

        let mode = self.run_mode();
        if let Err(err) = self.door.open(Motion::Stopped, mode, &mut self.events) {
            warn!(%err, floor, "door not cycled on arrival");
        }

        if self.queue.primary_destination() == Some(floor) || self.queue.is_empty() {
            self.queue.clear_primary();
        }
        self.queue.reassign_primary_destination(floor, Motion::Stopped);
        debug!(floor, primary = ?self.queue.primary_destination(), "floor serviced");
    }

    // ─── Door and bell ──────────────────────────────────────────────

    /// Open the door (auto-closes after the dwell unless overloaded).
    pub fn open_door(&mut self) -> Result<DoorOutcome, ElevatorError> {
        let (motion, mode) = (self.motion, self.run_mode());
        self.door.open(motion, mode, &mut self.events)
    }

    pub fn close_door(&mut self) -> Result<DoorOutcome, ElevatorError> {
        let (motion, mode) = (self.motion, self.run_mode());
        self.door.close(motion, mode, &mut self.events)
    }

    pub fn ring_bell(&mut self) {
        self.events.push(Event::Bell);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
