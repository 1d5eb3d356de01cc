//! Core data types for the Fomodoro timer.
//!
//! This module defines the data structures used for:
//! - The two timer phases (focus and break)
//! - Timer configuration with validation
//! - Duration presets offered by the settings panel
//! - The countdown state owned by the engine

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Seconds in one minute.
pub const SECONDS_PER_MINUTE: u32 = 60;

// ============================================================================
// TimerPhase
// ============================================================================

/// The current mode of the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerPhase {
    /// Counting down a focus session
    #[default]
    Focus,
    /// Counting down a break
    Break,
}

impl TimerPhase {
    /// Returns the string representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerPhase::Focus => "focus",
            TimerPhase::Break => "break",
        }
    }

    /// Returns the phase that follows this one.
    pub fn next(&self) -> Self {
        match self {
            TimerPhase::Focus => TimerPhase::Break,
            TimerPhase::Break => TimerPhase::Focus,
        }
    }
}

impl fmt::Display for TimerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// TimerConfig
// ============================================================================

/// Durations of the two phases, in minutes.
///
/// A config is replaced wholesale when the user picks new durations; it is
/// never edited in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimerConfig {
    /// Focus duration in minutes
    pub focus_minutes: u32,
    /// Break duration in minutes
    pub break_minutes: u32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            focus_minutes: 25,
            break_minutes: 5,
        }
    }
}

impl TimerConfig {
    /// Creates a configuration, rejecting durations the engine cannot count.
    pub fn new(focus_minutes: u32, break_minutes: u32) -> Result<Self, String> {
        let config = Self {
            focus_minutes,
            break_minutes,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Both durations must be positive and their length in seconds must fit
    /// in a `u32`.
    pub fn validate(&self) -> Result<(), String> {
        validate_minutes("focus", self.focus_minutes)?;
        validate_minutes("break", self.break_minutes)?;
        Ok(())
    }

    /// Returns the full length of `phase` in seconds.
    pub fn phase_duration_seconds(&self, phase: TimerPhase) -> u32 {
        let minutes = match phase {
            TimerPhase::Focus => self.focus_minutes,
            TimerPhase::Break => self.break_minutes,
        };
        minutes.saturating_mul(SECONDS_PER_MINUTE)
    }
}

fn validate_minutes(label: &str, minutes: u32) -> Result<(), String> {
    if minutes == 0 {
        return Err(format!("{label} duration must be at least 1 minute"));
    }
    if minutes.checked_mul(SECONDS_PER_MINUTE).is_none() {
        return Err(format!("{label} duration of {minutes} minutes is too long"));
    }
    Ok(())
}

// ============================================================================
// Preset
// ============================================================================

/// A focus/break pair offered by the settings panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Preset {
    /// Focus duration in minutes
    pub focus_minutes: u32,
    /// Break duration in minutes
    pub break_minutes: u32,
}

/// The fixed presets, in the order they are offered.
pub const PRESETS: [Preset; 3] = [
    Preset::new(25, 5),
    Preset::new(50, 10),
    Preset::new(75, 15),
];

impl Preset {
    /// Creates a preset.
    pub const fn new(focus_minutes: u32, break_minutes: u32) -> Self {
        Self {
            focus_minutes,
            break_minutes,
        }
    }

    /// Returns the preset at a 1-based menu position.
    pub fn by_number(number: usize) -> Option<Self> {
        number
            .checked_sub(1)
            .and_then(|index| PRESETS.get(index))
            .copied()
    }

    /// Returns the configuration this preset selects.
    pub fn config(&self) -> TimerConfig {
        TimerConfig {
            focus_minutes: self.focus_minutes,
            break_minutes: self.break_minutes,
        }
    }

    /// Returns true if `config` uses exactly this preset's durations.
    pub fn is_active(&self, config: &TimerConfig) -> bool {
        self.focus_minutes == config.focus_minutes && self.break_minutes == config.break_minutes
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.focus_minutes, self.break_minutes)
    }
}

impl FromStr for Preset {
    type Err = String;

    /// Parses `"25/5"` or `"25:5"` and accepts only the known presets.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (focus, rest) = s
            .split_once(['/', ':'])
            .ok_or_else(|| format!("expected FOCUS/BREAK, got '{s}'"))?;
        let focus_minutes: u32 = focus
            .trim()
            .parse()
            .map_err(|_| format!("invalid focus minutes '{focus}'"))?;
        let break_minutes: u32 = rest
            .trim()
            .parse()
            .map_err(|_| format!("invalid break minutes '{rest}'"))?;

        let preset = Preset::new(focus_minutes, break_minutes);
        if PRESETS.contains(&preset) {
            Ok(preset)
        } else {
            let known: Vec<String> = PRESETS.iter().map(ToString::to_string).collect();
            Err(format!(
                "unknown preset '{s}' (available: {})",
                known.join(", ")
            ))
        }
    }
}

// ============================================================================
// TimerState
// ============================================================================

/// The countdown state owned by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimerState {
    /// Current phase of the timer
    pub phase: TimerPhase,
    /// Remaining seconds in the current phase
    pub remaining_seconds: u32,
    /// Whether the countdown is advancing
    pub running: bool,
}

impl TimerState {
    /// Creates the initial state: paused at the start of a focus session.
    pub fn new(config: &TimerConfig) -> Self {
        Self {
            phase: TimerPhase::Focus,
            remaining_seconds: config.phase_duration_seconds(TimerPhase::Focus),
            running: false,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
