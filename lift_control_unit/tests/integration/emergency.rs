//! Emergency protocols driven through the menu and release answers.

use lift_common::error::ElevatorError;
use lift_common::state::{DoorState, Motion, RunMode};
use lift_control_unit::elevator::{Prompt, Tick};
use lift_control_unit::emergency::EmergencyCause;
use lift_control_unit::event::Event;

use super::{lift, lift_at};

#[test]
fn stop_button_mid_travel_halts_the_car() {
    let mut e = lift();
    e.submit_floor_request(9).unwrap();
    e.advance();
    e.advance();
    assert_eq!(e.motion(), Motion::MovingUp);

    assert_eq!(e.press_emergency_stop(), Ok(RunMode::EStop));
    assert_eq!(e.motion(), Motion::Stopped);
    assert_eq!(e.door(), DoorState::Locked);
    assert_eq!(e.current_floor(), 3);
    assert_eq!(e.advance(), Tick::Suspended(RunMode::EStop));
    assert_eq!(e.current_floor(), 3);
}

#[test]
fn menu_choices_by_number_and_name() {
    for (input, mode) in [
        ("1", RunMode::FireSafety),
        ("earthquake", RunMode::Earthquake),
        ("3", RunMode::Overload),
        ("HURRICANE", RunMode::Hurricane),
        ("5", RunMode::On),
        ("quit", RunMode::On),
    ] {
        let mut e = lift_at(6);
        e.press_emergency_stop().unwrap();
        assert_eq!(e.choose_emergency(input), Ok(mode), "input {input:?}");
        assert_eq!(e.run_mode(), mode);
    }
}

#[test]
fn cancelled_menu_keeps_car_in_estop_until_rescue() {
    let mut e = lift_at(6);
    e.submit_floor_request(2).unwrap();
    e.press_emergency_stop().unwrap();
    assert!(matches!(
        e.choose_emergency("x"),
        Err(ElevatorError::InvalidMenuInput { .. })
    ));
    assert_eq!(e.prompt(), None);
    assert_eq!(e.run_mode(), RunMode::EStop);
    assert_eq!(e.advance(), Tick::Suspended(RunMode::EStop));

    // An emergency door cycle leaves the door closed, not locked.
    assert!(e.open_door().is_ok());
    assert_eq!(e.door(), DoorState::Closed);

    e.press_emergency_stop().unwrap();
    assert_eq!(e.prompt(), Some(Prompt::EmergencyMenu));
    assert_eq!(e.choose_emergency("rescue"), Ok(RunMode::On));
    // Queue survived the e-stop.
    assert_eq!(e.pending_requests(), &[2]);
    assert_eq!(e.advance(), Tick::Moved(5));
}

#[test]
fn hurricane_drives_to_roof_floor_by_floor() {
    let mut e = lift_at(9);
    e.submit_floor_request(2).unwrap();
    e.trigger_emergency_stop(EmergencyCause::Hurricane).unwrap();
    let events = e.take_events();

    let moved: Vec<_> = events
        .iter()
        .filter_map(|ev| match ev {
            Event::Moved { floor, .. } => Some(*floor),
            _ => None,
        })
        .collect();
    assert_eq!(moved, vec![10, 11]);
    assert!(events.contains(&Event::Parking { floor: 12 }));
    assert!(events.contains(&Event::Arrived { floor: 12 }));
    assert_eq!(events.last(), Some(&Event::AwaitingRelease(RunMode::Hurricane)));

    assert_eq!(e.current_floor(), 12);
    assert_eq!(e.door(), DoorState::Locked);
    assert!(e.pending_requests().is_empty());
}

#[test]
fn fire_and_overload_keep_the_queue() {
    for cause in [EmergencyCause::Fire, EmergencyCause::Overload] {
        let mut e = lift_at(4);
        e.submit_floor_request(10).unwrap();
        e.submit_floor_request(1).unwrap();
        e.trigger_emergency_stop(cause).unwrap();
        assert_eq!(e.pending_requests(), &[10, 1], "{cause:?}");
        e.answer_release("y").unwrap();
        assert_eq!(e.pending_requests(), &[10, 1], "{cause:?}");
    }
}

#[test]
fn release_answers_reprompt_until_affirmative() {
    let mut e = lift_at(4);
    e.trigger_emergency_stop(EmergencyCause::Fire).unwrap();
    e.take_events();

    assert_eq!(e.answer_release("no"), Ok(RunMode::FireSafety));
    assert!(matches!(
        e.answer_release("perhaps"),
        Err(ElevatorError::InvalidMenuInput { .. })
    ));
    assert_eq!(e.answer_release("CLOSE"), Ok(RunMode::FireSafety));
    assert_eq!(e.prompt(), Some(Prompt::Release(RunMode::FireSafety)));
    assert_eq!(e.door(), DoorState::Locked);

    assert_eq!(e.answer_release("OPEN"), Ok(RunMode::On));
    let events = e.take_events();
    assert_eq!(
        &events[events.len() - 2..],
        &[Event::DoorUnlocked, Event::Released(RunMode::FireSafety)]
    );
}

#[test]
fn door_commands_rejected_while_protocol_runs() {
    let mut e = lift_at(4);
    e.trigger_emergency_stop(EmergencyCause::Earthquake).unwrap();
    assert!(matches!(
        e.open_door(),
        Err(ElevatorError::DoorBlocked { .. })
    ));
    assert!(matches!(
        e.close_door(),
        Err(ElevatorError::DoorBlocked { .. })
    ));
    assert_eq!(e.door(), DoorState::Locked);
}

#[test]
fn overload_door_can_be_closed_by_hand_then_released() {
    let mut e = lift_at(4);
    e.trigger_emergency_stop(EmergencyCause::Overload).unwrap();
    assert!(e.close_door().is_ok());
    assert_eq!(e.door(), DoorState::Closed);
    assert_eq!(e.answer_release("yes"), Ok(RunMode::On));
    assert_eq!(e.door(), DoorState::Closed);
}
