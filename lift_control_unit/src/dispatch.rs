//! Request queue and direction-biased dispatcher.
//!
//! Pending stops are a plain set of floors. The next stop is never stored:
//! it is computed on demand by [`RequestQueue::next_stop_on_the_way`] from the
//! current floor, the motion, and the committed primary destination.
//!
//! Policy is elevator-scan: while a leg is committed the car keeps its
//! heading, stops at queued floors it passes, and never reverses for a nearer
//! request behind it. A leg is only ever extended further along its heading.

use heapless::Vec;
use lift_common::building::Building;
use lift_common::consts::{Floor, MAX_FLOORS};
use lift_common::error::ElevatorError;
use lift_common::state::Motion;
use tracing::debug;

/// Effect of an accepted request on the committed leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commitment {
    /// No leg was committed; the request became the leg target.
    Committed,
    /// Request lies further along the heading; the leg now ends there.
    Extended { previous: Floor },
    /// Request is an intermediate stop (or against the heading).
    Unchanged,
}

/// Pending floor stops plus the committed primary destination.
#[derive(Debug, Clone, Default)]
pub struct RequestQueue {
    /// Queued floors in arrival order, each at most once.
    pending: Vec<Floor, MAX_FLOORS>,
    /// Target of the current travel leg.
    primary: Option<Floor>,
}

impl RequestQueue {
    pub const fn new() -> Self {
        Self {
            pending: Vec::new(),
            primary: None,
        }
    }

    /// Queued floors in arrival order.
    #[inline]
    pub fn pending(&self) -> &[Floor] {
        &self.pending
    }

    #[inline]
    pub const fn primary_destination(&self) -> Option<Floor> {
        self.primary
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[inline]
    pub fn contains(&self, floor: Floor) -> bool {
        self.pending.contains(&floor)
    }

    /// Queue a floor stop and apply the commitment rule.
    ///
    /// Leaves the queue untouched on error.
    pub fn submit(
        &mut self,
        floor: Floor,
        current_floor: Floor,
        motion: Motion,
        building: &Building,
    ) -> Result<Commitment, ElevatorError> {
        if !building.contains(floor) {
            return Err(ElevatorError::InvalidFloor {
                floor,
                min: building.min_floor,
                max: building.max_floor,
            });
        }
        if floor == current_floor || self.contains(floor) {
            return Err(ElevatorError::DuplicateRequest { floor });
        }

        let no_active_leg = self.primary.is_none() || self.pending.is_empty();

        if self.pending.push(floor).is_err() {
            return Err(ElevatorError::QueueFull {
                floor,
                capacity: MAX_FLOORS,
            });
        }

        let commitment = match (no_active_leg, motion, self.primary) {
            (true, ..) => {
                self.primary = Some(floor);
                Commitment::Committed
            }
            (false, Motion::MovingUp, Some(target)) if floor > current_floor && floor > target => {
                self.primary = Some(floor);
                Commitment::Extended { previous: target }
            }
            (false, Motion::MovingDown, Some(target))
                if floor < current_floor && floor < target =>
            {
                self.primary = Some(floor);
                Commitment::Extended { previous: target }
            }
            _ => Commitment::Unchanged,
        };

        debug!(floor, ?commitment, primary = ?self.primary, "floor request queued");
        Ok(commitment)
    }

    /// Nearest queued floor along the effective heading, else the committed
    /// destination (if it is not the current floor).
    ///
    /// When stopped with a committed leg, the heading is inferred from the
    /// side of the destination.
    pub fn next_stop_on_the_way(&self, current_floor: Floor, motion: Motion) -> Option<Floor> {
        let heading = match (motion, self.primary) {
            (Motion::Stopped, Some(target)) => Motion::toward(current_floor, target),
            _ => motion,
        };

        let nearest = match heading {
            Motion::MovingUp => self.pending.iter().copied().filter(|&f| f > current_floor).min(),
            Motion::MovingDown => self.pending.iter().copied().filter(|&f| f < current_floor).max(),
            Motion::Stopped => None,
        };

        nearest.or(self.primary.filter(|&target| target != current_floor))
    }

    /// Remove a serviced floor. Returns whether it was queued.
    pub fn service(&mut self, floor: Floor) -> bool {
        let before = self.pending.len();
        self.pending.retain(|&f| f != floor);
        self.pending.len() != before
    }

    /// Drop the committed leg.
    #[inline]
    pub fn clear_primary(&mut self) {
        self.primary = None;
    }

    /// Drop every pending stop and the committed leg.
    pub fn clear(&mut self) {
        self.pending.clear();
        self.primary = None;
    }

    /// Replace the queue with a single synthetic stop committed as the leg.
    pub fn force_single(&mut self, floor: Floor) {
        self.clear();
        // Capacity is at least one.
        let _ = self.pending.push(floor);
        self.primary = Some(floor);
    }

    /// Commit a new leg when none is committed and stops remain.
    ///
    /// - `MovingUp`: the farthest queued floor above `current_floor`.
    /// - `MovingDown`: the farthest queued floor below `current_floor`.
    /// - `Stopped`: the queued floor farthest from `current_floor`; equal
    ///   distances resolve to the lowest floor number.
    ///
    /// A heading with nothing queued ahead falls back to the `Stopped` rule.
    pub fn reassign_primary_destination(
        &mut self,
        current_floor: Floor,
        motion: Motion,
    ) -> Option<Floor> {
        if self.primary.is_some() || self.pending.is_empty() {
            return self.primary;
        }

        let ahead = match motion {
            Motion::MovingUp => self.pending.iter().copied().filter(|&f| f > current_floor).max(),
            Motion::MovingDown => self.pending.iter().copied().filter(|&f| f < current_floor).min(),
            Motion::Stopped => None,
        };

        self.primary = ahead.or_else(|| farthest_from(&self.pending, current_floor));
        debug!(current_floor, ?motion, primary = ?self.primary, "primary destination reassigned");
        self.primary
    }
}

/// Queued floor with the greatest distance from `origin`, lowest floor on ties.
fn farthest_from(floors: &[Floor], origin: Floor) -> Option<Floor> {
    floors.iter().copied().reduce(|best, f| {
        let (d_best, d_f) = (best.abs_diff(origin), f.abs_diff(origin));
        if d_f > d_best || (d_f == d_best && f < best) { f } else { best }
    })
}

// ─── Tests ──────────────────────────────────────────────────────────
