//! Timer engine for the Fomodoro timer.
//!
//! This module contains the non-presentational core:
//! - `timer`: the focus/break state machine
//! - `ticker`: the one-second tick source that drives it
//! - `error`: engine error types

mod error;
pub mod ticker;
pub mod timer;

pub use error::EngineError;
pub use ticker::{Ticker, TICK_PERIOD};
pub use timer::{IntervalTimerEngine, TimerEvent};
