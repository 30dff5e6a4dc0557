//! Whole driver runs over keypad scripts.

use std::fs;
use std::path::Path;
use std::time::Duration;

use lift_common::building::Building;
use lift_common::io::{RecordingDisplay, ScriptedInput};
use lift_common::state::{DoorState, RunMode};
use lift_common::config::ConfigLoader;
use lift_control_unit::config::{LiftConfig, TimingConfig};
use lift_control_unit::driver::{Driver, DriverOptions, NoPacer, StopReason};
use lift_control_unit::elevator::Elevator;

type TestDriver = Driver<ScriptedInput, RecordingDisplay, Vec<u8>, NoPacer>;

fn scripted(script: &str) -> TestDriver {
    Driver::new(
        Elevator::new(Building::default()).unwrap(),
        ScriptedInput::from_script(script),
        RecordingDisplay::new(),
        Vec::new(),
        NoPacer::default(),
        TimingConfig::default(),
        DriverOptions {
            max_ticks: Some(500),
            stop_when_input_exhausted: true,
            status_json: false,
        },
    )
}

fn output(driver: TestDriver) -> String {
    String::from_utf8(driver.into_output()).unwrap()
}

#[test]
fn roof_shortcut_and_bell() {
    let mut d = scripted("R\nBELL\n");
    assert_eq!(d.run().unwrap(), StopReason::InputExhausted);
    assert_eq!(d.elevator().current_floor(), 12);
    assert_eq!(d.display().last().unwrap().0, "Floor: Roof");

    let text = output(d);
    assert!(text.contains("Floor Roof pressed and added to floor request queue!"));
    assert!(text.contains("***Ring!***"));
    assert!(text.contains("Arrived at floor Roof ([X]STOPPED[X])"));
}

#[test]
fn emergency_menu_and_release_from_script() {
    let script = "\
5
STOP
# earthquake
2

no
yes
";
    let mut d = scripted(script);
    assert_eq!(d.run().unwrap(), StopReason::InputExhausted);

    let e = d.elevator();
    assert_eq!(e.current_floor(), 0);
    assert_eq!(e.run_mode(), RunMode::On);
    assert_eq!(e.door(), DoorState::Closed);
    assert!(e.pending_requests().is_empty());

    let text = output(d);
    assert!(text.contains("**EMERGENCY STOP BUTTON PRESSED**"));
    assert!(text.contains("!!!!!!!!!! EMERGENCY MENU !!!!!!!!!!"));
    assert!(text.contains("***Earthquake Mode***"));
    assert!(text.contains("*** Sending Elevator to Basement ***"));
    assert!(text.contains("End Earthquake Mode? [Y] or [N]?"));
    assert!(text.contains("Waiting for EARTHQUAKE mode to be ended..."));
    assert!(text.contains("Resuming Normal Operations..."));
    assert!(text.contains("Mode: EARTHQUAKE"));
}

#[test]
fn invalid_menu_answer_is_reported() {
    let mut d = scripted("STOP\nbanana\nSTOP\n5\n");
    assert_eq!(d.run().unwrap(), StopReason::InputExhausted);
    assert_eq!(d.elevator().run_mode(), RunMode::On);
    let text = output(d);
    assert!(text.contains("Invalid emergency input: \"banana\""));
    assert!(text.contains("Emergency menu closed, car remains stopped."));
}

#[test]
fn script_ending_inside_a_prompt_stops_the_run() {
    let mut d = scripted("STOP\n1\n");
    assert_eq!(d.run().unwrap(), StopReason::InputExhausted);
    assert_eq!(d.elevator().run_mode(), RunMode::FireSafety);
}

#[test]
fn overload_keeps_door_open_across_polls() {
    let mut d = scripted("STOP\n3\n\n\nn\ny\n");
    assert_eq!(d.run().unwrap(), StopReason::InputExhausted);
    let frames = d.display().frames();
    assert!(
        frames
            .iter()
            .any(|(_, line2)| line2 == "Dir: [X]STOPPED[X] | Door: OPEN")
    );
    assert_eq!(d.elevator().door(), DoorState::Closed);
    let text = output(d);
    assert!(text.contains("OVERLOAD: Door is open. Please remove excess weight."));
    assert!(text.contains("Please remove excess weight before proceeding!"));
}

#[test]
fn script_ending_in_cancelled_menu_stops_the_run() {
    let mut d = scripted("5\nSTOP\nbanana\n");
    assert_eq!(d.run().unwrap(), StopReason::InputExhausted);
    assert_eq!(d.stats().ticks, 3);
    assert_eq!(d.stats().rejected, 1);

    let e = d.elevator();
    assert_eq!(e.run_mode(), RunMode::EStop);
    assert_eq!(e.pending_requests(), &[5]);
    assert_eq!(e.current_floor(), 2);
    assert_eq!(e.prompt(), None);
}

#[test]
fn simulated_time_follows_timing_config() {
    let mut fast = TimingConfig::default();
    fast.tick_ms = 10;
    fast.travel_ms = 1;
    fast.arrival_ms = 0;
    fast.door_dwell_ms = 0;
    let mut d = Driver::new(
        Elevator::new(Building::default()).unwrap(),
        ScriptedInput::new(["3"]),
        RecordingDisplay::new(),
        Vec::new(),
        NoPacer::default(),
        fast,
        DriverOptions {
            max_ticks: None,
            stop_when_input_exhausted: true,
            status_json: false,
        },
    );
    d.run().unwrap();
    // Three ticks: two paused, the last stops. One floor passed.
    assert_eq!(d.stats().ticks, 3);
    assert_eq!(d.pacer().simulated, Duration::from_millis(2 * 10 + 1));
}

#[test]
fn shipped_config_and_script_run_to_the_lobby() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..");
    let config = LiftConfig::load_or_default(&root.join("config/lift.toml")).unwrap();
    assert_eq!(config.shared.service_name, "lift-car-01");
    let script = fs::read_to_string(root.join("config/scripts/earthquake.txt")).unwrap();

    let mut d = Driver::new(
        Elevator::new(config.building).unwrap(),
        ScriptedInput::from_script(&script),
        RecordingDisplay::new(),
        Vec::new(),
        NoPacer::default(),
        config.timing,
        DriverOptions {
            max_ticks: Some(500),
            stop_when_input_exhausted: true,
            status_json: true,
        },
    );
    assert_eq!(d.run().unwrap(), StopReason::InputExhausted);
    assert_eq!(d.elevator().current_floor(), 1);
    assert_eq!(d.elevator().run_mode(), RunMode::On);
    assert_eq!(d.stats().rejected, 0);

    let text = output(d);
    assert!(text.contains("*** Sending Elevator to Basement ***"));
    assert!(text.contains("\"mode\":\"EARTHQUAKE\""));
}

#[test]
fn config_written_to_disk_drives_the_building() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lift.toml");
    fs::write(
        &path,
        r#"
[shared]
service_name = "tower-b"

[building]
min_floor = -1
lobby_floor = 0
max_floor = 3

[timing]
tick_ms = 5
"#,
    )
    .unwrap();

    let config = LiftConfig::load_or_default(&path).unwrap();
    assert_eq!(config.timing.tick(), Duration::from_millis(5));
    assert_eq!(LiftConfig::from_toml_str(&config.to_toml_string().unwrap()).unwrap(), config);

    let mut d = Driver::new(
        Elevator::new(config.building).unwrap(),
        ScriptedInput::new(["B", "4"]),
        RecordingDisplay::new(),
        Vec::new(),
        NoPacer::default(),
        config.timing,
        DriverOptions {
            max_ticks: Some(50),
            stop_when_input_exhausted: true,
            status_json: false,
        },
    );
    assert_eq!(d.run().unwrap(), StopReason::InputExhausted);
    assert_eq!(d.elevator().current_floor(), -1);
    assert_eq!(d.stats().rejected, 1);
    assert!(output(d).contains("Invalid floor number 4! Basement is floor -1, roof is 3"));
}

#[test]
fn invalid_config_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lift.toml");
    fs::write(&path, "[shared]\nservice_name = \"x\"\n[building]\nmin_floor = 5\nmax_floor = 2\n").unwrap();
    assert!(LiftConfig::load_or_default(&path).is_err());
}
