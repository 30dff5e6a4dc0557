//! Emergency run-mode state machine.
//!
//! `On` ↔ `EStop` (menu) → one of `FireSafety`, `Earthquake`, `Overload`,
//! `Hurricane` → back to `On` on operator release.
//!
//! The menu and the release question are suspend points: the machine records
//! which answer it waits for and the controller feeds it one at a time.

use lift_common::error::ElevatorError;
use lift_common::state::RunMode;

/// Menu text shown while the emergency menu is open.
pub const MENU_LINES: [&str; 6] = [
    "!!!!!!!!!! EMERGENCY MENU !!!!!!!!!!",
    "[1] - Fire",
    "[2] - Earthquake",
    "[3] - Overload",
    "[4] - Hurricane",
    "[5] - Fire Rescue Mode (Exit)",
];

/// Reason selected from the emergency menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmergencyCause {
    Fire,
    Earthquake,
    Overload,
    Hurricane,
    /// Rescue crew on site; leaves the emergency immediately.
    Rescue,
}

impl EmergencyCause {
    /// Parse a menu answer: `1`-`5` or the cause name, case-insensitive.
    pub fn parse_menu(input: &str) -> Option<Self> {
        match input.trim().to_ascii_uppercase().as_str() {
            "1" | "FIRE" => Some(Self::Fire),
            "2" | "EARTHQUAKE" => Some(Self::Earthquake),
            "3" | "OVERLOAD" => Some(Self::Overload),
            "4" | "HURRICANE" => Some(Self::Hurricane),
            "5" | "QUIT" | "RESCUE" => Some(Self::Rescue),
            _ => None,
        }
    }

    /// Banner title printed when the protocol starts.
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Fire => "Fire Emergency",
            Self::Earthquake => "Earthquake",
            Self::Overload => "Weight Overload",
            Self::Hurricane => "Hurricane",
            Self::Rescue => "Fire Rescue",
        }
    }

    /// Run mode the protocol holds. Rescue returns straight to `On`.
    pub const fn run_mode(&self) -> RunMode {
        match self {
            Self::Fire => RunMode::FireSafety,
            Self::Earthquake => RunMode::Earthquake,
            Self::Overload => RunMode::Overload,
            Self::Hurricane => RunMode::Hurricane,
            Self::Rescue => RunMode::On,
        }
    }
}

/// Parse an operator release answer.
///
/// `yes`/`y` and the keypad `OPEN` key confirm; `no`/`n` and `CLOSE` decline.
pub fn parse_release_answer(input: &str) -> Result<bool, ElevatorError> {
    match input.trim().to_ascii_uppercase().as_str() {
        "YES" | "Y" | "OPEN" => Ok(true),
        "NO" | "N" | "CLOSE" => Ok(false),
        _ => Err(ElevatorError::InvalidMenuInput {
            input: input.trim().to_string(),
        }),
    }
}

/// Question the release prompt asks for a mode.
pub fn release_question(mode: RunMode) -> &'static str {
    match mode {
        RunMode::FireSafety => "End Fire Safety Mode? [Y] or [N]?",
        RunMode::Earthquake => "End Earthquake Mode? [Y] or [N]?",
        RunMode::Hurricane => "End Hurricane Mode? [Y] or [N]?",
        RunMode::Overload => "Is Excess Weight Removed? [Y] or [N]?",
        _ => "End Emergency Mode? [Y] or [N]?",
    }
}

/// Events that drive the emergency machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmergencyEvent {
    /// Emergency stop button.
    StopPressed,
    /// Menu answer.
    Select(EmergencyCause),
    /// Unrecognized menu answer; closes the menu.
    Cancel,
    /// Operator confirmed the mode may end.
    Release,
}

/// Result of an emergency transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmergencyTransition {
    Ok(RunMode),
    Rejected(&'static str),
}

impl EmergencyTransition {
    /// Map a rejection onto the controller error.
    pub fn into_result(self) -> Result<RunMode, ElevatorError> {
        match self {
            Self::Ok(mode) => Ok(mode),
            Self::Rejected(reason) => Err(ElevatorError::TransitionRejected { reason }),
        }
    }
}

/// Run-mode state machine.
#[derive(Debug, Clone, Default)]
pub struct EmergencyStateMachine {
    mode: RunMode,
    menu_open: bool,
}

impl EmergencyStateMachine {
    pub const fn new() -> Self {
        Self {
            mode: RunMode::On,
            menu_open: false,
        }
    }

    #[inline]
    pub const fn mode(&self) -> RunMode {
        self.mode
    }

    /// Whether the menu waits for an answer.
    #[inline]
    pub const fn menu_open(&self) -> bool {
        self.menu_open
    }

    /// Mode waiting for operator release, if any.
    #[inline]
    pub const fn awaiting_release(&self) -> Option<RunMode> {
        if self.mode.awaits_release() {
            Some(self.mode)
        } else {
            None
        }
    }

    /// Whether normal dispatch runs.
    #[inline]
    pub const fn dispatch_enabled(&self) -> bool {
        matches!(self.mode, RunMode::On)
    }

    /// Handle an emergency event.
    pub fn handle_event(&mut self, event: EmergencyEvent) -> EmergencyTransition {
        use EmergencyEvent as E;
        use RunMode as M;

        let (next, menu) = match (self.mode, event) {
            // Stop button opens the menu, again if it was dismissed.
            (M::On | M::EStop, E::StopPressed) => (M::EStop, true),

            // Menu answers
            (M::EStop, E::Select(cause)) if self.menu_open => (cause.run_mode(), false),
            (M::EStop, E::Cancel) if self.menu_open => (M::EStop, false),
            (M::EStop, E::Select(_) | E::Cancel) => {
                return EmergencyTransition::Rejected("emergency menu is not open");
            }

            // Operator release
            (mode, E::Release) if mode.awaits_release() => (M::On, false),

            (M::On, _) => return EmergencyTransition::Rejected("no emergency in progress"),
            (_, E::StopPressed) => {
                return EmergencyTransition::Rejected("emergency protocol already running");
            }
            _ => return EmergencyTransition::Rejected("invalid emergency transition"),
        };

        self.mode = next;
        self.menu_open = menu;
        EmergencyTransition::Ok(next)
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
