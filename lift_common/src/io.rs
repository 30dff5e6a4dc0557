//! Collaborator contracts consumed by the driver loop.
//!
//! The elevator core never reads input or writes to a display itself. The
//! driver polls an [`InputSource`] and pushes the two-line projection to a
//! [`DisplaySink`].

use std::collections::VecDeque;

/// Source of user text input (terminal, keypad, script).
///
/// Polling is non-blocking: `None` means nothing is available right now.
pub trait InputSource {
    /// Next line of input, if one is available.
    fn next_input(&mut self) -> Option<String>;

    /// Whether the source can never yield input again.
    ///
    /// Interactive sources never run dry. Default: false.
    fn is_exhausted(&self) -> bool {
        false
    }
}

/// Two-line status display (LCD panel or console stand-in).
///
/// Fire-and-forget: the driver never observes a result.
pub trait DisplaySink {
    fn update_display(&mut self, line1: &str, line2: &str);
}

impl<T: InputSource + ?Sized> InputSource for Box<T> {
    fn next_input(&mut self) -> Option<String> {
        (**self).next_input()
    }

    fn is_exhausted(&self) -> bool {
        (**self).is_exhausted()
    }
}

impl<T: DisplaySink + ?Sized> DisplaySink for Box<T> {
    fn update_display(&mut self, line1: &str, line2: &str) {
        (**self).update_display(line1, line2)
    }
}

/// Input replayed from a fixed list of lines.
///
/// Blank lines model a poll that found nothing: they yield `None` once.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a script file body: one command per line, `#` starts a comment.
    pub fn from_script(text: &str) -> Self {
        Self::new(
            text.lines()
                .map(|line| line.split('#').next().unwrap_or_default().trim().to_string()),
        )
    }
}

impl InputSource for ScriptedInput {
    fn next_input(&mut self) -> Option<String> {
        let line = self.lines.pop_front()?;
        if line.is_empty() { None } else { Some(line) }
    }

    fn is_exhausted(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Display that keeps every frame it was sent.
#[derive(Debug, Clone, Default)]
pub struct RecordingDisplay {
    frames: Vec<(String, String)>,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[(String, String)] {
        &self.frames
    }

    pub fn last(&self) -> Option<&(String, String)> {
        self.frames.last()
    }
}

impl DisplaySink for RecordingDisplay {
    fn update_display(&mut self, line1: &str, line2: &str) {
        self.frames.push((line1.to_string(), line2.to_string()));
    }
}
