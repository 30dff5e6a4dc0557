//! Queue and interlock properties checked over sweeps of floors and request
//! sequences.

use lift_common::building::Building;
use lift_common::error::ElevatorError;
use lift_common::state::{DoorState, Motion, RunMode};
use lift_control_unit::elevator::{Elevator, Tick};
use lift_control_unit::emergency::EmergencyCause;

use super::{lift, lift_at, run_until_idle};

/// Deterministic pseudo-random floor sequence in the reference building.
fn floor_sequence(seed: u32, len: usize) -> Vec<i32> {
    let mut x = seed.max(1);
    (0..len)
        .map(|_| {
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            (x % 13) as i32
        })
        .collect()
}

fn assert_invariants(e: &Elevator) {
    let b = e.building();
    assert!(b.contains(e.current_floor()), "floor {} out of range", e.current_floor());
    if e.door() == DoorState::Open {
        assert_eq!(e.motion(), Motion::Stopped, "door open while moving");
    }
    if e.door() == DoorState::Locked {
        assert!(e.run_mode().allows_locked_door(), "door locked in {}", e.run_mode());
    }
    if let Some(target) = e.primary_destination() {
        assert!(
            e.pending_requests().contains(&target) || target == e.current_floor(),
            "primary {target} not queued"
        );
    }
    let mut seen = e.pending_requests().to_vec();
    seen.sort_unstable();
    seen.dedup();
    assert_eq!(seen.len(), e.pending_requests().len(), "duplicate queued floor");
}

#[test]
fn out_of_range_requests_change_nothing() {
    let mut e = lift();
    e.submit_floor_request(6).unwrap();
    e.advance();
    let before = (e.pending_requests().to_vec(), e.primary_destination());

    for floor in [-100, -1, 13, 14, 64, i32::MAX, i32::MIN] {
        assert!(matches!(
            e.submit_floor_request(floor),
            Err(ElevatorError::InvalidFloor { .. })
        ));
        assert_eq!((e.pending_requests().to_vec(), e.primary_destination()), before);
    }
}

#[test]
fn duplicate_and_current_floor_requests_change_nothing() {
    let mut e = lift_at(4);
    e.submit_floor_request(9).unwrap();
    e.submit_floor_request(2).unwrap();
    let before = (e.pending_requests().to_vec(), e.primary_destination());

    for floor in [4, 9, 2] {
        assert_eq!(
            e.submit_floor_request(floor),
            Err(ElevatorError::DuplicateRequest { floor })
        );
        assert_eq!((e.pending_requests().to_vec(), e.primary_destination()), before);
    }
}

#[test]
fn advance_on_empty_queue_always_stops() {
    for start in [0, 1, 6, 12] {
        let mut e = lift_at(start);
        assert_eq!(e.advance(), Tick::Idle);
        assert_eq!(e.motion(), Motion::Stopped);
        assert_eq!(e.primary_destination(), None);
    }

    // After a completed trip as well.
    let mut e = lift();
    e.submit_floor_request(3).unwrap();
    run_until_idle(&mut e);
    for _ in 0..3 {
        assert_eq!(e.advance(), Tick::Idle);
        assert_eq!(e.motion(), Motion::Stopped);
        assert_eq!(e.primary_destination(), None);
    }
}

#[test]
fn primary_never_decreases_while_moving_up() {
    for seed in 1..40 {
        let mut e = lift_at(0);
        e.submit_floor_request(6).unwrap();
        e.advance();
        assert_eq!(e.motion(), Motion::MovingUp);

        for floor in floor_sequence(seed, 12) {
            let before = e.primary_destination();
            let _ = e.submit_floor_request(floor);
            if let (Some(before), Some(after)) = (before, e.primary_destination()) {
                assert!(after >= before, "seed {seed}: {before} -> {after}");
            }
        }
    }
}

#[test]
fn invariants_hold_through_random_traffic() {
    for seed in 1..60 {
        let mut e = lift();
        let requests = floor_sequence(seed, 30);
        for (i, floor) in requests.into_iter().enumerate() {
            let _ = e.submit_floor_request(floor);
            assert_invariants(&e);
            if i % 2 == 0 {
                e.advance();
                assert_invariants(&e);
            }
        }
        run_until_idle(&mut e);
        assert_invariants(&e);
        assert!(e.pending_requests().is_empty(), "seed {seed} left requests queued");
    }
}

#[test]
fn every_queued_floor_is_eventually_serviced() {
    let mut e = lift();
    for floor in [12, 0, 7, 3, 9] {
        e.submit_floor_request(floor).unwrap();
    }
    let ticks = run_until_idle(&mut e);
    let mut serviced: Vec<_> = ticks
        .iter()
        .filter_map(|t| match t {
            Tick::Serviced(f) => Some(*f),
            _ => None,
        })
        .collect();
    // First leg goes up (12 was first), then down to the basement.
    assert_eq!(serviced, vec![3, 7, 9, 12, 0]);
    serviced.sort_unstable();
    assert_eq!(serviced, vec![0, 3, 7, 9, 12]);
}

#[test]
fn stopped_tie_break_prefers_lowest_floor() {
    let mut e = lift_at(6);
    e.submit_floor_request(7).unwrap();
    // Queued while the leg to 7 is committed; equally far from 7.
    e.submit_floor_request(9).unwrap();
    e.submit_floor_request(5).unwrap();
    e.advance();
    assert_eq!(e.current_floor(), 7);
    assert_eq!(e.primary_destination(), Some(5));
}

#[test]
fn door_never_open_while_moving_under_commands() {
    let mut e = lift();
    for floor in [8, 2, 11] {
        e.submit_floor_request(floor).unwrap();
    }
    for _ in 0..40 {
        if e.motion() != Motion::Stopped {
            assert!(e.open_door().is_err());
        } else {
            let _ = e.open_door();
        }
        assert_invariants(&e);
        e.advance();
        assert_invariants(&e);
    }
}

#[test]
fn requests_during_emergency_wait_for_release() {
    let mut e = lift_at(5);
    e.trigger_emergency_stop(EmergencyCause::Fire).unwrap();
    e.submit_floor_request(8).unwrap();
    for _ in 0..3 {
        assert_eq!(e.advance(), Tick::Suspended(RunMode::FireSafety));
        assert_eq!(e.current_floor(), 5);
        assert_invariants(&e);
    }
    e.confirm(true).unwrap();
    assert_eq!(e.advance(), Tick::Moved(6));
}

#[test]
fn custom_building_labels_and_bounds() {
    let b = Building::new(-2, 0, 5).unwrap();
    let mut e = Elevator::new(b).unwrap();
    assert_eq!(e.current_floor(), 0);
    assert_eq!(e.status().floor, "Lobby*");
    assert!(e.submit_floor_request(-2).is_ok());
    assert!(e.submit_floor_request(6).is_err());
    run_until_idle(&mut e);
    assert_eq!(e.status().floor, "Basement");
}
