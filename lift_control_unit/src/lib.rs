//! # Lift Control Unit Library
//!
//! Decision logic of a single passenger elevator car plus the driver loop
//! that runs it against a terminal, a keypad script or a test harness.
//!
//! ## Core
//!
//! 1. **Dispatch** ([`dispatch`]): pending stops, direction-biased next stop,
//!    primary destination per travel leg
//! 2. **Door interlock** ([`door`]): open/close gated by motion and run mode
//! 3. **Emergency machine** ([`emergency`]): e-stop menu, protocols, release
//!
//! [`elevator::Elevator`] composes the three and records every step in an
//! [`event::Event`] journal. The core never sleeps: simulated time is applied
//! by the [`driver`] through a [`driver::Pacer`].

pub mod command;
pub mod config;
pub mod console;
pub mod dispatch;
pub mod door;
pub mod driver;
pub mod elevator;
pub mod emergency;
pub mod event;
pub mod status;
