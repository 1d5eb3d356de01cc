//! Interval timer engine.
//!
//! This module provides the focus/break state machine:
//! - Start, pause and toggle of the countdown
//! - Reset to the full length of the current phase
//! - Reconfiguration of the phase durations
//! - One-second ticks with phase flips and an auto-pause at every boundary
//!
//! The engine performs no scheduling of its own. A tick source calls
//! [`IntervalTimerEngine::tick`] once per elapsed second while the engine is
//! running, and the caller reacts to the returned [`TimerEvent`].

use tracing::{debug, info};

use super::error::EngineError;
use crate::types::{TimerConfig, TimerPhase, TimerState};

// ============================================================================
// TimerEvent
// ============================================================================

/// Events produced by a tick, for sound playback and other side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// The given phase ran down to zero; the engine has moved to the next
    /// phase and paused.
    PhaseCompleted(TimerPhase),
}

// ============================================================================
// IntervalTimerEngine
// ============================================================================

/// Owns the countdown state and the phase transitions.
#[derive(Debug, Clone)]
pub struct IntervalTimerEngine {
    /// Current countdown state
    state: TimerState,
    /// Durations in effect
    config: TimerConfig,
}

impl IntervalTimerEngine {
    /// Creates an engine paused at the start of a focus session.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidConfig` if a duration is zero or too long.
    pub fn new(config: TimerConfig) -> Result<Self, EngineError> {
        config.validate().map_err(EngineError::InvalidConfig)?;

        Ok(Self {
            state: TimerState::new(&config),
            config,
        })
    }

    /// Starts the countdown. Starting a running timer is a no-op.
    pub fn start(&mut self) {
        if !self.state.running {
            debug!(phase = %self.state.phase, remaining = self.state.remaining_seconds, "timer started");
        }
        self.state.running = true;
    }

    /// Pauses the countdown. Pausing a paused timer is a no-op.
    pub fn pause(&mut self) {
        if self.state.running {
            debug!(phase = %self.state.phase, remaining = self.state.remaining_seconds, "timer paused");
        }
        self.state.running = false;
    }

    /// Flips between running and paused. Returns the new running flag.
    pub fn toggle_running(&mut self) -> bool {
        if self.state.running {
            self.pause();
        } else {
            self.start();
        }
        self.state.running
    }

    /// Pauses and rewinds the countdown to the full length of the current
    /// phase. The phase itself is kept.
    pub fn reset(&mut self) {
        self.state.running = false;
        self.state.remaining_seconds = self.config.phase_duration_seconds(self.state.phase);
        debug!(phase = %self.state.phase, remaining = self.state.remaining_seconds, "timer reset");
    }

    /// Replaces the phase durations.
    ///
    /// While paused in the focus phase the display follows the new focus
    /// length right away. In any other state the countdown in progress keeps
    /// its value until the next reset or phase flip.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidConfig` and leaves the engine untouched if
    /// a duration is zero or too long.
    pub fn reconfigure(&mut self, config: TimerConfig) -> Result<(), EngineError> {
        config.validate().map_err(EngineError::InvalidConfig)?;

        self.config = config;
        if !self.state.running && self.state.phase == TimerPhase::Focus {
            self.state.remaining_seconds = config.phase_duration_seconds(TimerPhase::Focus);
        }

        info!(
            focus_minutes = config.focus_minutes,
            break_minutes = config.break_minutes,
            "timer reconfigured"
        );
        Ok(())
    }

    /// Advances the countdown by one second.
    ///
    /// The second that brings the countdown to zero completes the phase: the
    /// engine flips to the other phase, loads its full duration, pauses and
    /// returns `TimerEvent::PhaseCompleted` with the phase that ended.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidState` if the timer is paused. The state
    /// is not changed.
    pub fn tick(&mut self) -> Result<Option<TimerEvent>, EngineError> {
        if !self.state.running {
            return Err(EngineError::InvalidState(
                "tick received while the timer is paused".to_string(),
            ));
        }

        if self.state.remaining_seconds > 0 {
            self.state.remaining_seconds -= 1;
            if self.state.remaining_seconds > 0 {
                return Ok(None);
            }
        }

        Ok(Some(self.complete_phase()))
    }

    /// Flips to the next phase and pauses at its full duration.
    fn complete_phase(&mut self) -> TimerEvent {
        let completed = self.state.phase;
        let next = completed.next();

        self.state.phase = next;
        self.state.remaining_seconds = self.config.phase_duration_seconds(next);
        self.state.running = false;

        info!(completed = %completed, next = %next, "phase completed");
        TimerEvent::PhaseCompleted(completed)
    }

    /// Returns the current countdown state.
    pub fn state(&self) -> &TimerState {
        &self.state
    }

    /// Returns the durations in effect.
    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    /// Returns the current phase.
    pub fn phase(&self) -> TimerPhase {
        self.state.phase
    }

    /// Returns the seconds left in the current phase.
    pub fn remaining_seconds(&self) -> u32 {
        self.state.remaining_seconds
    }

    /// Returns true if the countdown is advancing.
    pub fn is_running(&self) -> bool {
        self.state.running
    }

    /// Returns the full length of the current phase in seconds.
    pub fn phase_duration_seconds(&self) -> u32 {
        self.config.phase_duration_seconds(self.state.phase)
    }

    /// Returns the fraction of the current phase still remaining, from 1.0
    /// at the start of a phase down towards 0.0.
    pub fn progress(&self) -> f64 {
        let total = self.phase_duration_seconds();
        if total == 0 {
            return 0.0;
        }
        (f64::from(self.state.remaining_seconds) / f64::from(total)).clamp(0.0, 1.0)
    }

    /// Returns a mutable reference to the timer state (for testing).
    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut TimerState {
        &mut self.state
    }
}

impl Default for IntervalTimerEngine {
    fn default() -> Self {
        let config = TimerConfig::default();
        Self {
            state: TimerState::new(&config),
            config,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn create_engine(focus_minutes: u32, break_minutes: u32) -> IntervalTimerEngine {
        IntervalTimerEngine::new(TimerConfig::new(focus_minutes, break_minutes).unwrap()).unwrap()
    }

    /// Ticks `count` times, restarting after every phase boundary, and
    /// returns the events in order.
    fn tick_through(engine: &mut IntervalTimerEngine, count: u32) -> Vec<TimerEvent> {
        let mut events = Vec::new();
        for _ in 0..count {
            engine.start();
            if let Some(event) = engine.tick().unwrap() {
                events.push(event);
            }
        }
        events
    }

    // ------------------------------------------------------------------------
    // Construction Tests
    // ------------------------------------------------------------------------

    mod construction_tests {
        use super::*;

        #[test]
        fn test_new_engine() {
            let engine = create_engine(25, 5);
            let state = engine.state();

            assert_eq!(state.phase, TimerPhase::Focus);
            assert_eq!(state.remaining_seconds, 1500);
            assert!(!state.running);
            assert_eq!(engine.config(), &TimerConfig::new(25, 5).unwrap());
        }

        #[test]
        fn test_new_rejects_invalid_config() {
            let config = TimerConfig {
                focus_minutes: 0,
                break_minutes: 5,
            };
            let err = IntervalTimerEngine::new(config).unwrap_err();
            assert!(err.is_config_error());
        }

        #[test]
        fn test_default_engine() {
            let engine = IntervalTimerEngine::default();
            assert_eq!(engine.remaining_seconds(), 1500);
            assert_eq!(engine.phase(), TimerPhase::Focus);
        }
    }

    // ------------------------------------------------------------------------
    // Start / Pause Tests
    // ------------------------------------------------------------------------

    mod running_tests {
        use super::*;

        #[test]
        fn test_start_sets_only_running() {
            let mut engine = create_engine(25, 5);
            engine.start();

            assert!(engine.is_running());
            assert_eq!(engine.phase(), TimerPhase::Focus);
            assert_eq!(engine.remaining_seconds(), 1500);
        }

        #[test]
        fn test_start_twice_is_noop() {
            let mut engine = create_engine(25, 5);
            engine.start();
            let once = *engine.state();
            engine.start();
            assert_eq!(*engine.state(), once);
        }

        #[test]
        fn test_pause_twice_is_same_as_once() {
            let mut engine = create_engine(25, 5);
            engine.start();
            tick_through(&mut engine, 10);

            engine.pause();
            let once = *engine.state();
            engine.pause();
            assert_eq!(*engine.state(), once);
            assert!(!engine.is_running());
            assert_eq!(engine.remaining_seconds(), 1490);
        }

        #[test]
        fn test_pause_keeps_phase() {
            let mut engine = create_engine(1, 1);
            tick_through(&mut engine, 60);
            assert_eq!(engine.phase(), TimerPhase::Break);

            engine.start();
            engine.tick().unwrap();
            engine.pause();
            assert_eq!(engine.phase(), TimerPhase::Break);
            assert_eq!(engine.remaining_seconds(), 59);
        }

        #[test]
        fn test_toggle_running() {
            let mut engine = create_engine(25, 5);
            assert!(engine.toggle_running());
            assert!(engine.is_running());
            assert!(!engine.toggle_running());
            assert!(!engine.is_running());
            assert_eq!(engine.remaining_seconds(), 1500);
        }
    }

    // ------------------------------------------------------------------------
    // Tick Tests
    // ------------------------------------------------------------------------

    mod tick_tests {
        use super::*;

        #[test]
        fn test_tick_decrements() {
            let mut engine = create_engine(25, 5);
            engine.start();

            assert_eq!(engine.tick().unwrap(), None);
            assert_eq!(engine.remaining_seconds(), 1499);
            assert!(engine.is_running());
        }

        #[test]
        fn test_tick_while_paused_is_rejected() {
            let mut engine = create_engine(25, 5);
            let before = *engine.state();

            let err = engine.tick().unwrap_err();
            assert!(matches!(err, EngineError::InvalidState(_)));
            assert_eq!(*engine.state(), before);
        }

        #[test]
        fn test_focus_completes_after_full_duration() {
            let mut engine = create_engine(25, 5);
            engine.start();

            let mut events = Vec::new();
            for _ in 0..1500 {
                if let Some(event) = engine.tick().unwrap() {
                    events.push(event);
                }
            }

            assert_eq!(events, vec![TimerEvent::PhaseCompleted(TimerPhase::Focus)]);
            assert_eq!(engine.phase(), TimerPhase::Break);
            assert_eq!(engine.remaining_seconds(), 300);
            assert!(!engine.is_running());
        }

        #[test]
        fn test_no_event_one_second_before_boundary() {
            let mut engine = create_engine(1, 1);
            engine.start();
            for _ in 0..59 {
                assert_eq!(engine.tick().unwrap(), None);
            }
            assert_eq!(engine.remaining_seconds(), 1);
            assert_eq!(engine.phase(), TimerPhase::Focus);
            assert!(engine.is_running());
        }

        #[test]
        fn test_auto_pause_at_boundary_rejects_next_tick() {
            let mut engine = create_engine(1, 1);
            tick_through(&mut engine, 60);

            assert!(!engine.is_running());
            assert!(engine.tick().is_err());
            assert_eq!(engine.remaining_seconds(), 60);
        }

        #[test]
        fn test_break_completes_back_to_focus() {
            let mut engine = create_engine(2, 1);
            let events = tick_through(&mut engine, 120 + 60);

            assert_eq!(
                events,
                vec![
                    TimerEvent::PhaseCompleted(TimerPhase::Focus),
                    TimerEvent::PhaseCompleted(TimerPhase::Break),
                ]
            );
            assert_eq!(engine.phase(), TimerPhase::Focus);
            assert_eq!(engine.remaining_seconds(), 120);
            assert!(!engine.is_running());
        }

        #[test]
        fn test_tick_at_zero_completes_phase() {
            let mut engine = create_engine(25, 5);
            engine.start();
            engine.state_mut().remaining_seconds = 0;

            let event = engine.tick().unwrap();
            assert_eq!(event, Some(TimerEvent::PhaseCompleted(TimerPhase::Focus)));
            assert_eq!(engine.phase(), TimerPhase::Break);
            assert_eq!(engine.remaining_seconds(), 300);
        }

        #[test]
        fn test_remaining_follows_modular_countdown() {
            let (focus, brk) = (120u32, 60u32);
            let cycle = focus + brk;
            let mut engine = create_engine(2, 1);

            for n in 1..=3 * cycle {
                engine.start();
                engine.tick().unwrap();

                let offset = n % cycle;
                let (phase, remaining) = if offset < focus {
                    (TimerPhase::Focus, focus - offset)
                } else {
                    (TimerPhase::Break, brk - (offset - focus))
                };

                assert_eq!(engine.phase(), phase, "phase after {n} ticks");
                assert_eq!(engine.remaining_seconds(), remaining, "remaining after {n} ticks");
            }
        }
    }

    // ------------------------------------------------------------------------
    // Reset Tests
    // ------------------------------------------------------------------------

    mod reset_tests {
        use super::*;

        #[test]
        fn test_reset_in_focus() {
            let mut engine = create_engine(25, 5);
            engine.start();
            tick_through(&mut engine, 100);

            engine.reset();
            assert_eq!(engine.remaining_seconds(), 1500);
            assert_eq!(engine.phase(), TimerPhase::Focus);
            assert!(!engine.is_running());
        }

        #[test]
        fn test_reset_in_break_keeps_break() {
            let mut engine = create_engine(1, 5);
            tick_through(&mut engine, 60 + 30);
            assert_eq!(engine.phase(), TimerPhase::Break);
            assert!(engine.is_running());

            engine.reset();
            assert_eq!(engine.phase(), TimerPhase::Break);
            assert_eq!(engine.remaining_seconds(), 300);
            assert!(!engine.is_running());
        }

        #[test]
        fn test_reset_uses_latest_config() {
            let mut engine = create_engine(25, 5);
            engine.start();
            engine
                .reconfigure(TimerConfig::new(50, 10).unwrap())
                .unwrap();
            assert_eq!(engine.remaining_seconds(), 1500);

            engine.reset();
            assert_eq!(engine.remaining_seconds(), 3000);
        }
    }

    // ------------------------------------------------------------------------
    // Reconfigure Tests
    // ------------------------------------------------------------------------

    mod reconfigure_tests {
        use super::*;

        #[test]
        fn test_reconfigure_idle_focus_updates_remaining() {
            let mut engine = create_engine(25, 5);
            engine.reconfigure(TimerConfig::new(1, 1).unwrap()).unwrap();

            assert_eq!(engine.remaining_seconds(), 60);
            assert_eq!(engine.config().focus_minutes, 1);
            assert!(!engine.is_running());
        }

        #[test]
        fn test_reconfigure_paused_mid_focus_updates_remaining() {
            let mut engine = create_engine(25, 5);
            tick_through(&mut engine, 10);
            engine.pause();

            engine
                .reconfigure(TimerConfig::new(50, 10).unwrap())
                .unwrap();
            assert_eq!(engine.remaining_seconds(), 3000);
        }

        #[test]
        fn test_reconfigure_running_keeps_countdown() {
            let mut engine = create_engine(25, 5);
            tick_through(&mut engine, 10);

            engine
                .reconfigure(TimerConfig::new(50, 10).unwrap())
                .unwrap();
            assert_eq!(engine.remaining_seconds(), 1490);
            assert!(engine.is_running());
            assert_eq!(engine.config().focus_minutes, 50);
        }

        #[test]
        fn test_reconfigure_idle_break_keeps_countdown() {
            let mut engine = create_engine(1, 5);
            tick_through(&mut engine, 60);
            assert_eq!(engine.phase(), TimerPhase::Break);

            engine.reconfigure(TimerConfig::new(1, 1).unwrap()).unwrap();
            assert_eq!(engine.remaining_seconds(), 300);

            // The new break length applies from the next phase flip.
            tick_through(&mut engine, 300 + 60);
            assert_eq!(engine.phase(), TimerPhase::Break);
            assert_eq!(engine.remaining_seconds(), 60);
        }

        #[test]
        fn test_reconfigure_rejects_invalid_and_keeps_state() {
            let mut engine = create_engine(25, 5);
            let before = *engine.state();

            let err = engine
                .reconfigure(TimerConfig {
                    focus_minutes: 25,
                    break_minutes: 0,
                })
                .unwrap_err();

            assert!(matches!(err, EngineError::InvalidConfig(_)));
            assert_eq!(*engine.state(), before);
            assert_eq!(engine.config(), &TimerConfig::new(25, 5).unwrap());
        }
    }

    // ------------------------------------------------------------------------
    // Progress Tests
    // ------------------------------------------------------------------------

    mod progress_tests {
        use super::*;

        #[test]
        fn test_progress_full_at_start() {
            let engine = create_engine(25, 5);
            assert_eq!(engine.progress(), 1.0);
            assert_eq!(engine.phase_duration_seconds(), 1500);
        }

        #[test]
        fn test_progress_halfway() {
            let mut engine = create_engine(1, 1);
            tick_through(&mut engine, 30);
            assert!((engine.progress() - 0.5).abs() < f64::EPSILON);
        }

        #[test]
        fn test_progress_after_shrinking_config_is_clamped() {
            let mut engine = create_engine(25, 5);
            tick_through(&mut engine, 1);
            engine.reconfigure(TimerConfig::new(1, 1).unwrap()).unwrap();

            // 1499 seconds left of what is now a 60 second phase.
            assert_eq!(engine.progress(), 1.0);
        }
    }
}
