//! Fomodoro Timer Library
//!
//! This library provides the core functionality for the Fomodoro CLI.
//! It includes:
//! - The focus/break interval timer engine and its tick source
//! - Type definitions for configuration, presets and state
//! - The presentation model (countdown text, progress, arc geometry)
//! - Sound playback for phase completion
//! - The interactive session tying them together
//! - CLI command parsing and display utilities

pub mod cli;
pub mod engine;
pub mod session;
pub mod sound;
pub mod types;
pub mod view;

// Re-export commonly used types for convenience
pub use engine::{EngineError, IntervalTimerEngine, Ticker, TimerEvent};
pub use types::{Preset, TimerConfig, TimerPhase, TimerState, PRESETS};

// Re-export sound types
pub use sound::{
    announce_phase_completed, MockSoundPlayer, PhaseSounds, RodioSoundPlayer, SoundError,
    SoundPlayer, SoundSource,
};

// Re-export session types
pub use session::{Session, SessionCommand, SessionRenderer};
pub use view::TimerView;
