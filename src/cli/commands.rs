//! Command definitions for the Fomodoro CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::sound::PhaseSounds;
use crate::types::{Preset, TimerConfig};

// ============================================================================
// CLI Structure
// ============================================================================

/// Fomodoro - a focus/break interval timer for the terminal
#[derive(Parser, Debug)]
#[command(
    name = "fomodoro",
    version,
    about = "Focus/break interval timer for the terminal",
    long_about = "Counts down a focus session, then a break, and plays a sound when each one ends.\n\
                  The timer pauses at every phase boundary until you resume it.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run an interactive timer session
    Run(RunArgs),

    /// List the duration presets
    Presets,

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Run Command Arguments
// ============================================================================

/// Arguments for the run command
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Focus duration in minutes (1-180)
    #[arg(
        short,
        long,
        default_value = "25",
        value_parser = clap::value_parser!(u32).range(1..=180)
    )]
    pub focus: u32,

    /// Break duration in minutes (1-60)
    #[arg(
        short,
        long = "break",
        default_value = "5",
        value_parser = clap::value_parser!(u32).range(1..=60)
    )]
    pub break_minutes: u32,

    /// Use a preset instead of --focus/--break (25/5, 50/10 or 75/15)
    #[arg(short, long)]
    pub preset: Option<Preset>,

    /// Sound file played when a focus session ends
    #[arg(long, value_name = "PATH")]
    pub focus_sound: Option<PathBuf>,

    /// Sound file played when a break ends
    #[arg(long, value_name = "PATH")]
    pub break_sound: Option<PathBuf>,

    /// Disable notification sounds
    #[arg(long)]
    pub no_sound: bool,

    /// Start counting immediately
    #[arg(short, long)]
    pub start: bool,

    /// Print every update as a JSON line
    #[arg(long)]
    pub json: bool,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            focus: 25,
            break_minutes: 5,
            preset: None,
            focus_sound: None,
            break_sound: None,
            no_sound: false,
            start: false,
            json: false,
        }
    }
}

impl RunArgs {
    /// Returns the configuration selected by the arguments. A preset wins
    /// over explicit durations.
    pub fn timer_config(&self) -> TimerConfig {
        match self.preset {
            Some(preset) => preset.config(),
            None => TimerConfig {
                focus_minutes: self.focus,
                break_minutes: self.break_minutes,
            },
        }
    }

    /// Returns the phase sounds selected by the arguments.
    pub fn phase_sounds(&self) -> PhaseSounds {
        PhaseSounds::from_paths(self.focus_sound.clone(), self.break_sound.clone())
    }
}

// ============================================================================
// Tests
// ============================================================================
