//! CLI module for the Fomodoro timer.
//!
//! This module provides the command-line interface:
//! - `commands`: Command definitions using clap derive
//! - `display`: Output formatting and the terminal session renderer

pub mod commands;
pub mod display;

pub use commands::{Cli, Commands, RunArgs};
pub use display::{Display, JsonEvent, TerminalRenderer};
