//! Presentation model of the timer.
//!
//! Turns the engine state into the values a display renders: the `MM:SS`
//! countdown, the phase labels, the progress fraction and the geometry of
//! the half-circle progress arc. Everything here is pure so the display can
//! be tested without a terminal.

use std::f64::consts::PI;

use serde::Serialize;

use crate::engine::IntervalTimerEngine;
use crate::types::{TimerPhase, PRESETS};

/// Application name shown in the heading and the window title.
pub const APP_NAME: &str = "Fomodoro";

/// Radius of the progress arc.
pub const ARC_RADIUS: f64 = 100.0;

/// Formats seconds as `MM:SS`. Minutes are not capped at two digits.
pub fn format_clock(total_seconds: u32) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Returns the heading for `phase`.
pub fn heading(phase: TimerPhase) -> &'static str {
    match phase {
        TimerPhase::Focus => APP_NAME,
        TimerPhase::Break => "Break Time",
    }
}

/// Returns the line shown under the countdown for `phase`.
pub fn subtitle(phase: TimerPhase) -> &'static str {
    match phase {
        TimerPhase::Focus => "Just Focus",
        TimerPhase::Break => "Take a Break",
    }
}

/// Returns the accent colour of `phase` as a hex string.
pub fn accent_color(phase: TimerPhase) -> &'static str {
    match phase {
        TimerPhase::Focus => "#FF6900",
        TimerPhase::Break => "#4CAF50",
    }
}

/// Returns the accent colour of `phase` as RGB channels.
pub fn accent_rgb(phase: TimerPhase) -> (u8, u8, u8) {
    match phase {
        TimerPhase::Focus => (0xFF, 0x69, 0x00),
        TimerPhase::Break => (0x4C, 0xAF, 0x50),
    }
}

/// Returns the window title for a countdown value.
pub fn window_title(remaining_seconds: u32) -> String {
    format!("{} | {}", format_clock(remaining_seconds), APP_NAME)
}

// ============================================================================
// ProgressArc
// ============================================================================

/// Stroke dash values for a half-circle progress arc.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressArc {
    /// Length of the visible arc (half the circumference)
    pub dash_array: f64,
    /// How much of the arc is hidden
    pub dash_offset: f64,
}

impl ProgressArc {
    /// Computes the arc for a progress fraction. The fraction is clamped to
    /// `0.0..=1.0`.
    pub fn from_fraction(fraction: f64) -> Self {
        let dash_array = 2.0 * PI * ARC_RADIUS / 2.0;
        let fraction = fraction.clamp(0.0, 1.0);
        Self {
            dash_array,
            dash_offset: (1.0 - fraction) * dash_array,
        }
    }
}

// ============================================================================
// TimerView
// ============================================================================

/// Everything a display needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimerView {
    pub phase: TimerPhase,
    pub running: bool,
    pub remaining_seconds: u32,
    pub clock: String,
    pub heading: &'static str,
    pub subtitle: &'static str,
    pub window_title: String,
    pub accent_color: &'static str,
    /// Remaining fraction of the phase, 1.0 at its start
    pub progress: f64,
    pub arc: ProgressArc,
    pub focus_minutes: u32,
    pub break_minutes: u32,
    /// 1-based menu number of the preset matching the config, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_preset: Option<usize>,
}

impl TimerView {
    /// Builds the view of the engine's current state.
    pub fn from_engine(engine: &IntervalTimerEngine) -> Self {
        let state = engine.state();
        let config = engine.config();
        let progress = engine.progress();

        Self {
            phase: state.phase,
            running: state.running,
            remaining_seconds: state.remaining_seconds,
            clock: format_clock(state.remaining_seconds),
            heading: heading(state.phase),
            subtitle: subtitle(state.phase),
            window_title: window_title(state.remaining_seconds),
            accent_color: accent_color(state.phase),
            progress,
            arc: ProgressArc::from_fraction(progress),
            focus_minutes: config.focus_minutes,
            break_minutes: config.break_minutes,
            active_preset: PRESETS
                .iter()
                .position(|preset| preset.is_active(config))
                .map(|index| index + 1),
        }
    }
}
