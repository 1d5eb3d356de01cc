//! Display utilities for the Fomodoro CLI.
//!
//! This module provides formatted output for:
//! - The live timer line (or JSON lines with `--json`)
//! - Phase completion messages
//! - The settings panel and key help
//! - Error messages

use std::io::{self, IsTerminal, Write};

use colored::Colorize;
use serde::Serialize;

use crate::session::SessionRenderer;
use crate::types::{TimerConfig, TimerPhase, PRESETS};
use crate::view::{accent_rgb, TimerView};

/// Number of cells in the progress bar.
const BAR_WIDTH: usize = 20;

const PLAY_ICON: &str = "▶";
const PAUSE_ICON: &str = "⏸";

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Formats the one-line timer display.
    ///
    /// The icon is the action the toggle key performs: play while paused,
    /// pause while running.
    pub fn format_line(view: &TimerView) -> String {
        let icon = if view.running { PAUSE_ICON } else { PLAY_ICON };
        format!(
            "{} {}  {:<12} {}  {}",
            icon,
            view.clock,
            view.subtitle,
            Self::progress_bar(view.progress),
            view.heading
        )
    }

    /// Formats the timer line in the accent colour of the current phase.
    pub fn format_colored_line(view: &TimerView) -> String {
        let (r, g, b) = accent_rgb(view.phase);
        Self::format_line(view).truecolor(r, g, b).to_string()
    }

    /// Renders a progress fraction as a fixed-width bar.
    pub fn progress_bar(fraction: f64) -> String {
        let fraction = fraction.clamp(0.0, 1.0);
        // Bounded by BAR_WIDTH after the clamp.
        let filled = (fraction * BAR_WIDTH as f64).round() as usize;
        format!("[{}{}]", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
    }

    /// Formats the settings panel with the active preset marked.
    pub fn format_settings(config: &TimerConfig) -> String {
        let mut out = String::from("Choose your Fomodoro style\n");
        for (index, preset) in PRESETS.iter().enumerate() {
            let marker = if preset.is_active(config) { "*" } else { " " };
            out.push_str(&format!("  {} {}) {}\n", marker, index + 1, preset));
        }
        out.push_str(&format!(
            "  current: {} min focus / {} min break",
            config.focus_minutes, config.break_minutes
        ));
        out
    }

    /// Returns the key help text.
    pub fn help_text() -> &'static str {
        "Commands (press Enter after each):\n\
         \x20 p, space, Enter  start / pause\n\
         \x20 r                reset the current phase\n\
         \x20 1, 2, 3          choose a preset\n\
         \x20 s                show settings\n\
         \x20 h, ?             this help\n\
         \x20 q                quit"
    }

    /// Returns the message for a finished phase.
    pub fn phase_completed_message(phase: TimerPhase) -> &'static str {
        match phase {
            TimerPhase::Focus => "Focus session complete. Press p to start your break.",
            TimerPhase::Break => "Break is over. Press p to start focusing.",
        }
    }

    /// Shows the preset list.
    pub fn show_presets() {
        println!("Presets (focus/break minutes):");
        for (index, preset) in PRESETS.iter().enumerate() {
            println!("  {}) {}", index + 1, preset);
        }
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("Error: {}", message);
    }
}

/// Non-frame records in `--json` output, tagged by `event`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum JsonEvent {
    /// A phase ran out; `phase` is the one that ended.
    PhaseCompleted { phase: TimerPhase },
}

// ============================================================================
// TerminalRenderer
// ============================================================================

/// Session renderer writing to stdout.
///
/// On a terminal the timer line is redrawn in place, coloured with the
/// phase accent, and the window title follows the countdown. Otherwise
/// every frame is printed on its own line.
pub struct TerminalRenderer {
    json: bool,
    interactive: bool,
}

impl TerminalRenderer {
    /// Creates a renderer. `json` switches frames to JSON lines.
    pub fn new(json: bool) -> Self {
        Self {
            json,
            interactive: !json && io::stdout().is_terminal(),
        }
    }

    /// Ends the in-place line before printing a full line.
    fn break_line(&self) {
        if self.interactive {
            println!();
        }
    }

    fn write_frame(&self, view: &TimerView) -> io::Result<()> {
        let mut stdout = io::stdout().lock();

        if self.json {
            let line = serde_json::to_string(view).map_err(io::Error::other)?;
            writeln!(stdout, "{line}")?;
        } else if self.interactive {
            // OSC 0 sets the window title; 2K clears the current line.
            write!(stdout, "\x1b]0;{}\x07\r\x1b[2K", view.window_title)?;
            write!(stdout, "{}", Display::format_colored_line(view))?;
        } else {
            writeln!(stdout, "{}", Display::format_line(view))?;
        }

        stdout.flush()
    }

    fn write_event(&self, event: &JsonEvent) -> io::Result<()> {
        let line = serde_json::to_string(event).map_err(io::Error::other)?;
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{line}")?;
        stdout.flush()
    }
}

impl SessionRenderer for TerminalRenderer {
    fn frame(&mut self, view: &TimerView) {
        if let Err(e) = self.write_frame(view) {
            tracing::warn!("Failed to draw timer: {}", e);
        }
    }

    fn phase_completed(&mut self, phase: TimerPhase) {
        if self.json {
            if let Err(e) = self.write_event(&JsonEvent::PhaseCompleted { phase }) {
                tracing::warn!("Failed to write event: {}", e);
            }
            return;
        }
        self.break_line();
        println!("{}", Display::phase_completed_message(phase));
    }

    fn settings(&mut self, config: &TimerConfig) {
        if self.json {
            return;
        }
        self.break_line();
        println!("{}", Display::format_settings(config));
    }

    fn help(&mut self) {
        if self.json {
            return;
        }
        self.break_line();
        println!("{}", Display::help_text());
    }

    fn error(&mut self, message: &str) {
        self.break_line();
        Display::show_error(message);
    }
}

// ============================================================================
// Tests
// ============================================================================
