mod driver;
mod emergency;
mod properties;

use lift_common::building::Building;
use lift_control_unit::elevator::{Elevator, Tick};

/// Reference building (basement 0, lobby 1, roof 12), car at the lobby.
pub fn lift() -> Elevator {
    Elevator::new(Building::default()).unwrap()
}

pub fn lift_at(floor: i32) -> Elevator {
    Elevator::starting_at(Building::default(), floor).unwrap()
}

/// Advance until the car reports idle, returning every tick. Bounded.
pub fn run_until_idle(elevator: &mut Elevator) -> Vec<Tick> {
    let mut ticks = Vec::new();
    for _ in 0..200 {
        let tick = elevator.advance();
        ticks.push(tick);
        if tick == Tick::Idle {
            return ticks;
        }
    }
    panic!("elevator never went idle: {ticks:?}");
}
