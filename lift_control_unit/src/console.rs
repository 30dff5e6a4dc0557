//! Terminal collaborators: non-blocking stdin and a console stand-in for the
//! car's 16x2 LCD panel.

use std::io::{self, BufRead, Write};
use std::thread;

use crossbeam_channel::{unbounded, Receiver, TryRecvError};
use lift_common::io::{DisplaySink, InputSource};
use tracing::{debug, warn};

/// Character columns of the LCD panel.
pub const LCD_COLUMNS: usize = 16;

/// Stdin lines delivered through a reader thread, so polling never blocks.
///
/// Lines are trimmed and upper-cased like keypad input.
pub struct StdinInput {
    rx: Receiver<String>,
    closed: bool,
}

impl StdinInput {
    /// Spawn the reader thread.
    pub fn spawn() -> io::Result<Self> {
        let (tx, rx) = unbounded::<String>();
        thread::Builder::new()
            .name("stdin-reader".to_string())
            .spawn(move || {
                for line in io::stdin().lock().lines() {
                    match line {
                        Ok(line) => {
                            if tx.send(line).is_err() {
                                break;
                            }
                        }
                        Err(e) => {
                            warn!("stdin read failed: {e}");
                            break;
                        }
                    }
                }
                debug!("stdin closed");
            })?;
        Ok(Self::from_receiver(rx))
    }

    fn from_receiver(rx: Receiver<String>) -> Self {
        Self { rx, closed: false }
    }
}

impl InputSource for StdinInput {
    fn next_input(&mut self) -> Option<String> {
        match self.rx.try_recv() {
            Ok(line) => Some(normalize(&line)),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.closed = true;
                None
            }
        }
    }

    fn is_exhausted(&self) -> bool {
        self.closed
    }
}

fn normalize(line: &str) -> String {
    line.trim().to_ascii_uppercase()
}

/// Prints each display update as an "[LCD Display]" block.
pub struct ConsoleDisplay<W: Write> {
    out: W,
    columns: Option<usize>,
}

impl<W: Write> ConsoleDisplay<W> {
    /// Full-width lines.
    pub fn new(out: W) -> Self {
        Self { out, columns: None }
    }

    /// Lines cut to the LCD panel width.
    pub fn lcd(out: W) -> Self {
        Self {
            out,
            columns: Some(LCD_COLUMNS),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn fit(&self, line: &str) -> String {
        match self.columns {
            Some(width) => format!("{:<width$}", line.chars().take(width).collect::<String>()),
            None => line.to_string(),
        }
    }
}

impl<W: Write> DisplaySink for ConsoleDisplay<W> {
    fn update_display(&mut self, line1: &str, line2: &str) {
        let block = format!(
            "[LCD Display]\nLine 1: {}\nLine 2: {}\n-------------------------\n",
            self.fit(line1),
            self.fit(line2)
        );
        if let Err(e) = self.out.write_all(block.as_bytes()) {
            debug!("display write failed: {e}");
        }
    }
}
