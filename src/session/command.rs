//! Interactive commands typed during a session.
//!
//! One command per line. The mapping mirrors the widget's controls: the
//! play/pause button, the reset button, the preset buttons of the settings
//! panel, and the settings toggle itself.

use std::str::FromStr;

use crate::types::{Preset, PRESETS};

/// A command entered on the session's input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    /// Start or pause the countdown
    Toggle,
    /// Rewind the current phase and pause
    Reset,
    /// Switch to a preset
    Preset(Preset),
    /// Show the presets and the active durations
    Settings,
    /// Show the key help
    Help,
    /// End the session
    Quit,
}

impl FromStr for SessionCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        // A bare space is the toggle key, so only strip line endings first.
        let line = line.trim_end_matches(['\r', '\n']);
        if line == " " {
            return Ok(Self::Toggle);
        }

        let command = match line.trim().to_lowercase().as_str() {
            "" | "p" | "space" | "toggle" => Self::Toggle,
            "r" | "reset" => Self::Reset,
            "s" | "settings" => Self::Settings,
            "h" | "?" | "help" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            other => {
                if let Ok(number) = other.parse::<usize>() {
                    return Preset::by_number(number).map(Self::Preset).ok_or_else(|| {
                        format!("no preset {number} (choose 1-{})", PRESETS.len())
                    });
                }
                if let Ok(preset) = other.parse::<Preset>() {
                    return Ok(Self::Preset(preset));
                }
                return Err(format!("unknown command '{}' (type h for help)", line.trim()));
            }
        };
        Ok(command)
    }
}
