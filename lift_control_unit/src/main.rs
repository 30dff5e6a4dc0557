//! # Lift
//!
//! Console simulation of a passenger elevator car.
//!
//! Loads the car configuration, then drives the controller from stdin (or a
//! keypad script with `--script`) until `QUIT`, Ctrl-C, the end of the script
//! or `--max-ticks`.

use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;
use lift_common::config::{LogLevel, SharedConfig};
use lift_common::io::{DisplaySink, InputSource, ScriptedInput};
use lift_control_unit::config::LiftConfig;
use lift_control_unit::console::{ConsoleDisplay, StdinInput};
use lift_control_unit::driver::{Driver, DriverOptions, NoPacer, Pacer, ThreadPacer};
use lift_control_unit::elevator::Elevator;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Lift: passenger elevator simulator
#[derive(Parser, Debug)]
#[command(name = "lift")]
#[command(version)]
#[command(about = "Passenger elevator simulator: dispatch, door interlock, emergency modes")]
struct Args {
    /// Path to the car configuration TOML.
    #[arg(default_value = "config/lift.toml")]
    config: PathBuf,

    /// Replay keypad input from a file instead of reading stdin.
    #[arg(long, value_name = "FILE")]
    script: Option<PathBuf>,

    /// Skip simulated delays.
    #[arg(long)]
    fast: bool,

    /// Stop after N ticks.
    #[arg(long, value_name = "N")]
    max_ticks: Option<u64>,

    /// Print the status as one JSON line per tick.
    #[arg(long)]
    status_json: bool,

    /// Cut display lines to the 16 columns of the LCD panel.
    #[arg(long)]
    lcd: bool,

    /// Enable verbose logging (DEBUG level).
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format.
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();

    let config = match LiftConfig::load_or_default(&args.config) {
        Ok(config) => config,
        Err(e) => {
            setup_tracing(&args, &SharedConfig::default());
            error!("FATAL: {e}");
            process::exit(1);
        }
    };
    setup_tracing(&args, &config.shared);

    info!(
        "Lift v{} starting ({})",
        env!("CARGO_PKG_VERSION"),
        config.shared.service_name
    );

    if let Err(e) = run(&args, config) {
        error!("FATAL: {e}");
        process::exit(1);
    }

    info!("Lift shutdown complete");
}

fn run(args: &Args, config: LiftConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!(
        "Building: floors {}..={}, lobby {}",
        config.building.min_floor, config.building.max_floor, config.building.lobby_floor
    );

    let input: Box<dyn InputSource> = match &args.script {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            info!("Replaying keypad script {}", path.display());
            Box::new(ScriptedInput::from_script(&text))
        }
        None => Box::new(StdinInput::spawn()?),
    };
    let display: Box<dyn DisplaySink> = if args.lcd {
        Box::new(ConsoleDisplay::lcd(std::io::stdout()))
    } else {
        Box::new(ConsoleDisplay::new(std::io::stdout()))
    };
    let pacer: Box<dyn Pacer> = if args.fast {
        Box::new(NoPacer::default())
    } else {
        Box::new(ThreadPacer)
    };

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        r.store(false, Ordering::SeqCst);
    })?;

    let options = DriverOptions {
        max_ticks: args.max_ticks,
        stop_when_input_exhausted: args.script.is_some(),
        status_json: args.status_json,
    };
    let mut driver = Driver::new(
        Elevator::new(config.building)?,
        input,
        display,
        std::io::stdout(),
        pacer,
        config.timing,
        options,
    )
    .with_running_flag(running);

    let reason = driver.run()?;
    let stats = driver.stats();
    if stats.rejected > 0 {
        warn!("{} command(s) rejected", stats.rejected);
    }
    info!(?reason, ticks = stats.ticks, commands = stats.commands, "Simulation ended");
    Ok(())
}

fn setup_tracing(args: &Args, shared: &SharedConfig) {
    let level = if args.verbose {
        LogLevel::Debug
    } else {
        shared.log_level
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_directive()));

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }
}
