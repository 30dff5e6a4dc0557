//! Driver loop: ticks the controller, renders what happened, routes input.
//!
//! One tick is `advance()`, the journal rendered with a pause per event, the
//! status block and display update, then one input poll. While the controller
//! waits for a menu or release answer the loop polls for that answer instead.

use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use lift_common::error::ElevatorError;
use lift_common::io::{DisplaySink, InputSource};
use lift_common::state::RunMode;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::command::Command;
use crate::config::TimingConfig;
use crate::elevator::{Elevator, Prompt};
use crate::emergency::{release_question, MENU_LINES};
use crate::event::Event;

// ─── Simulated Time ─────────────────────────────────────────────────

/// Applies simulated delays.
pub trait Pacer {
    fn pause(&mut self, duration: Duration);
}

impl<T: Pacer + ?Sized> Pacer for Box<T> {
    fn pause(&mut self, duration: Duration) {
        (**self).pause(duration)
    }
}

/// Real wall-clock pauses.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn pause(&mut self, duration: Duration) {
        if !duration.is_zero() {
            thread::sleep(duration);
        }
    }
}

/// No pauses; only adds up the simulated time.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacer {
    pub simulated: Duration,
}

impl Pacer for NoPacer {
    fn pause(&mut self, duration: Duration) {
        self.simulated += duration;
    }
}

/// Delay an event stands for.
pub fn event_pause(event: &Event, timing: &TimingConfig) -> Duration {
    let ms = match event {
        Event::Moved { .. } => timing.travel_ms,
        Event::Arrived { .. } => timing.arrival_ms,
        Event::DoorOpening(_) | Event::DoorOpened(_) | Event::DoorClosing(_) => {
            timing.door_dwell_ms
        }
        Event::Bell => timing.bell_ms,
        Event::Released(_) => timing.release_ms,
        _ => 0,
    };
    Duration::from_millis(ms)
}

// ─── Error Type ─────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("console output failed: {0}")]
    Io(#[from] io::Error),
    #[error("status encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

// ─── Driver ─────────────────────────────────────────────────────────

/// Loop options.
#[derive(Debug, Clone, Copy, Default)]
pub struct DriverOptions {
    /// Stop after this many ticks.
    pub max_ticks: Option<u64>,
    /// Stop once the input can never yield again and the car is idle.
    pub stop_when_input_exhausted: bool,
    /// Also print the status as one JSON line per tick.
    pub status_json: bool,
}

/// Why the loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Quit,
    Shutdown,
    InputExhausted,
    MaxTicks,
}

/// Loop counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriverStats {
    pub ticks: u64,
    pub commands: u64,
    pub rejected: u64,
}

/// Drives an [`Elevator`] from an input source.
pub struct Driver<I, D, W, P = ThreadPacer> {
    elevator: Elevator,
    input: I,
    display: D,
    out: W,
    pacer: P,
    timing: TimingConfig,
    options: DriverOptions,
    running: Arc<AtomicBool>,
    stats: DriverStats,
    prompt_shown: bool,
}

impl<I, D, W, P> Driver<I, D, W, P>
where
    I: InputSource,
    D: DisplaySink,
    W: Write,
    P: Pacer,
{
    pub fn new(
        elevator: Elevator,
        input: I,
        display: D,
        out: W,
        pacer: P,
        timing: TimingConfig,
        options: DriverOptions,
    ) -> Self {
        Self {
            elevator,
            input,
            display,
            out,
            pacer,
            timing,
            options,
            running: Arc::new(AtomicBool::new(true)),
            stats: DriverStats::default(),
            prompt_shown: false,
        }
    }

    /// Share a flag that ends the loop when cleared (Ctrl-C).
    pub fn with_running_flag(mut self, running: Arc<AtomicBool>) -> Self {
        self.running = running;
        self
    }

    pub fn elevator(&self) -> &Elevator {
        &self.elevator
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn pacer(&self) -> &P {
        &self.pacer
    }

    pub fn stats(&self) -> DriverStats {
        self.stats
    }

    /// Console output written so far.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Run until quit, shutdown, input exhaustion or the tick limit.
    pub fn run(&mut self) -> Result<StopReason, DriverError> {
        self.render_status()?;
        loop {
            if !self.running.load(Ordering::SeqCst) {
                info!("shutdown requested");
                return Ok(StopReason::Shutdown);
            }
            if self
                .options
                .max_ticks
                .is_some_and(|max| self.stats.ticks >= max)
            {
                return Ok(StopReason::MaxTicks);
            }

            let stop = match self.elevator.prompt() {
                Some(prompt) => self.answer_prompt(prompt)?,
                None => self.tick()?,
            };
            if let Some(reason) = stop {
                debug!(?reason, stats = ?self.stats, "driver stopped");
                return Ok(reason);
            }
        }
    }

    /// One scheduling tick.
    pub fn tick(&mut self) -> Result<Option<StopReason>, DriverError> {
        self.stats.ticks += 1;
        self.elevator.advance();
        self.flush_events()?;
        self.render_status()?;

        match self.input.next_input() {
            Some(line) => {
                if let Some(reason) = self.route(&line)? {
                    return Ok(Some(reason));
                }
            }
            None if self.finished_script() => return Ok(Some(StopReason::InputExhausted)),
            None => {}
        }

        self.pacer.pause(self.timing.tick());
        Ok(None)
    }

    /// Input ran dry and no further tick can change the car: idle, or held
    /// by an emergency mode that only new input could release.
    fn finished_script(&self) -> bool {
        self.options.stop_when_input_exhausted
            && self.input.is_exhausted()
            && self.elevator.prompt().is_none()
            && (self.elevator.pending_requests().is_empty()
                || self.elevator.run_mode() != RunMode::On)
    }

    /// Poll for a menu or release answer.
    fn answer_prompt(&mut self, prompt: Prompt) -> Result<Option<StopReason>, DriverError> {
        if !self.prompt_shown {
            self.render_prompt(prompt)?;
            self.prompt_shown = true;
        }

        let Some(line) = self.input.next_input() else {
            if self.options.stop_when_input_exhausted && self.input.is_exhausted() {
                warn!(?prompt, "input ended while waiting for an answer");
                return Ok(Some(StopReason::InputExhausted));
            }
            self.pacer.pause(self.timing.input_poll());
            return Ok(None);
        };

        self.stats.commands += 1;
        writeln!(self.out, "EMERGENCY KEYPAD INPUT ====== > {}", line.trim())?;
        let result = match prompt {
            Prompt::EmergencyMenu => self.elevator.choose_emergency(&line),
            Prompt::Release(_) => self.elevator.answer_release(&line),
        };
        self.flush_events()?;
        if let Err(err) = result {
            self.report(&err)?;
        }
        self.prompt_shown = false;
        self.render_status()?;
        Ok(None)
    }

    fn render_prompt(&mut self, prompt: Prompt) -> Result<(), DriverError> {
        match prompt {
            Prompt::EmergencyMenu => {
                for line in MENU_LINES {
                    writeln!(self.out, "{line}")?;
                }
                writeln!(self.out, "Enter your choice: ")?;
            }
            Prompt::Release(mode) => {
                writeln!(self.out, "{}", release_question(mode))?;
            }
        }
        Ok(())
    }

    /// Route one line of normal input.
    fn route(&mut self, line: &str) -> Result<Option<StopReason>, DriverError> {
        self.stats.commands += 1;
        let command = Command::parse(line, self.elevator.building());
        debug!(?command, "input");

        let result = match command {
            Command::Quit => {
                writeln!(self.out, "Exiting elevator simulation.")?;
                return Ok(Some(StopReason::Quit));
            }
            Command::Floor(floor) => self.elevator.submit_floor_request(floor).map(drop),
            Command::OpenDoor => self.elevator.open_door().map(drop),
            Command::CloseDoor => self.elevator.close_door().map(drop),
            Command::Bell => {
                self.elevator.ring_bell();
                Ok(())
            }
            Command::EmergencyStop => self.elevator.press_emergency_stop().map(drop),
            Command::Unknown(text) => {
                writeln!(self.out, "Unknown command: {text}")?;
                warn!(input = %text, "unknown command");
                self.stats.rejected += 1;
                Ok(())
            }
        };

        self.flush_events()?;
        if let Err(err) = result {
            self.report(&err)?;
        }
        Ok(None)
    }

    fn report(&mut self, err: &ElevatorError) -> Result<(), DriverError> {
        self.stats.rejected += 1;
        warn!(%err, "operation rejected");
        writeln!(self.out, "{err}")?;
        Ok(())
    }

    /// Print the journal, pausing for each event.
    fn flush_events(&mut self) -> Result<(), DriverError> {
        for event in self.elevator.take_events() {
            writeln!(self.out, "{}", event.describe(self.elevator.building()))?;
            self.pacer.pause(event_pause(&event, &self.timing));
        }
        Ok(())
    }

    fn render_status(&mut self) -> Result<(), DriverError> {
        let status = self.elevator.status();
        writeln!(self.out, "{status}")?;
        if self.options.status_json {
            writeln!(self.out, "{}", serde_json::to_string(&status)?)?;
        }
        let (line1, line2) = status.display_lines();
        self.display.update_display(&line1, &line2);
        Ok(())
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
