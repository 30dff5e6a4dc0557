//! Read-only status projection of the controller.

use std::fmt;

use lift_common::state::RunMode;
use serde::Serialize;

use crate::elevator::Elevator;

/// Idle marker shown instead of a next stop.
pub const IDLE_LABEL: &str = "*Idle*";
/// Shown when no final destination is known.
pub const NONE_LABEL: &str = "None";

/// Status snapshot, all fields already rendered as panel labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub floor: String,
    pub motion: String,
    pub next_stop: String,
    pub final_destination: String,
    pub door: String,
    /// Run mode label, only outside normal service.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

impl StatusReport {
    pub fn of(elevator: &Elevator) -> Self {
        let building = elevator.building();
        let current = elevator.current_floor();
        let queue_empty = elevator.pending_requests().is_empty();
        let next = elevator
            .next_stop_on_the_way()
            .filter(|&f| !queue_empty && f != current);

        let next_stop = next.map_or_else(|| IDLE_LABEL.to_string(), |f| building.label(f));
        let final_destination = match (elevator.primary_destination(), next) {
            (Some(target), _) => building.label(target),
            (None, _) if queue_empty => NONE_LABEL.to_string(),
            (None, Some(f)) => building.label(f),
            (None, None) => NONE_LABEL.to_string(),
        };
        let mode = elevator.run_mode();

        Self {
            floor: building.label(current),
            motion: elevator.motion().label().to_string(),
            next_stop,
            final_destination,
            door: elevator.door().label().to_string(),
            mode: (mode != RunMode::On).then(|| mode.label().to_string()),
        }
    }

    /// The two lines pushed to the car's display panel.
    pub fn display_lines(&self) -> (String, String) {
        (
            format!("Floor: {}", self.floor),
            format!("Dir: {} | Door: {}", self.motion, self.door),
        )
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "======== Elevator Status =========")?;
        writeln!(f, "Floor: {}", self.floor)?;
        writeln!(f, "Moving: {} | Next Stop: {}", self.motion, self.next_stop)?;
        writeln!(f, "Final Destination: {}", self.final_destination)?;
        writeln!(f, "Doors: {}", self.door)?;
        if let Some(mode) = &self.mode {
            writeln!(f, "Mode: {mode}")?;
        }
        write!(f, "==================================")
    }
}
