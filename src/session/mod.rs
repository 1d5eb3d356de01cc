//! Interactive timer session.
//!
//! A session owns one engine and connects it to its collaborators:
//! - the tick source, polled only while the engine is running
//! - the phase sounds, played when a phase completes
//! - a [`SessionRenderer`] that draws every state change
//! - a line-based command input
//!
//! Everything runs on the caller's task; the session spawns nothing.

pub mod command;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info, warn};

use crate::engine::{IntervalTimerEngine, Ticker, TimerEvent};
use crate::sound::{announce_phase_completed, PhaseSounds, SoundPlayer};
use crate::types::{TimerConfig, TimerPhase};
use crate::view::TimerView;

pub use command::SessionCommand;

/// Receives everything a session wants shown.
pub trait SessionRenderer {
    /// Draws the current state.
    fn frame(&mut self, view: &TimerView);

    /// Reports that `phase` ran out.
    fn phase_completed(&mut self, phase: TimerPhase);

    /// Shows the presets and the durations in effect.
    fn settings(&mut self, config: &TimerConfig);

    /// Shows the command help.
    fn help(&mut self);

    /// Reports a rejected command or operation.
    fn error(&mut self, message: &str);
}

/// Whether the session continues after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Continue,
    Quit,
}

/// One engine with its sounds.
pub struct Session<P> {
    engine: IntervalTimerEngine,
    sounds: PhaseSounds,
    player: Option<P>,
}

impl<P: SoundPlayer> Session<P> {
    /// Creates a session. `player` is `None` when sound is off or no audio
    /// device is available.
    pub fn new(engine: IntervalTimerEngine, sounds: PhaseSounds, player: Option<P>) -> Self {
        Self {
            engine,
            sounds,
            player,
        }
    }

    /// Returns the engine.
    pub fn engine(&self) -> &IntervalTimerEngine {
        &self.engine
    }

    /// Returns the engine for direct control before the session runs.
    pub fn engine_mut(&mut self) -> &mut IntervalTimerEngine {
        &mut self.engine
    }

    /// Applies one command and redraws.
    pub fn handle_command<R>(&mut self, command: SessionCommand, renderer: &mut R) -> CommandOutcome
    where
        R: SessionRenderer + ?Sized,
    {
        debug!(?command, "session command");

        match command {
            SessionCommand::Toggle => {
                self.engine.toggle_running();
            }
            SessionCommand::Reset => self.engine.reset(),
            SessionCommand::Preset(preset) => {
                if let Err(e) = self.engine.reconfigure(preset.config()) {
                    renderer.error(&e.to_string());
                    return CommandOutcome::Continue;
                }
                renderer.settings(self.engine.config());
            }
            SessionCommand::Settings => {
                renderer.settings(self.engine.config());
                return CommandOutcome::Continue;
            }
            SessionCommand::Help => {
                renderer.help();
                return CommandOutcome::Continue;
            }
            SessionCommand::Quit => return CommandOutcome::Quit,
        }

        renderer.frame(&TimerView::from_engine(&self.engine));
        CommandOutcome::Continue
    }

    /// Advances the engine by one second, plays the phase sound on
    /// completion and redraws.
    pub fn handle_tick<R>(&mut self, renderer: &mut R) -> Option<TimerEvent>
    where
        R: SessionRenderer + ?Sized,
    {
        let event = match self.engine.tick() {
            Ok(event) => event,
            Err(e) => {
                warn!("Tick ignored: {}", e);
                return None;
            }
        };

        if let Some(TimerEvent::PhaseCompleted(phase)) = event {
            if let Some(player) = &self.player {
                announce_phase_completed(player, &self.sounds, phase);
            }
            renderer.phase_completed(phase);
        }

        renderer.frame(&TimerView::from_engine(&self.engine));
        event
    }

    /// Runs the session until `q`, Ctrl-C, or the end of input.
    ///
    /// When the input ends while the timer is running, the session keeps
    /// counting until the current phase completes, since nothing could
    /// resume it afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if reading the input fails.
    pub async fn run<I, R>(&mut self, input: I, renderer: &mut R) -> Result<()>
    where
        I: AsyncBufRead + Unpin,
        R: SessionRenderer + ?Sized,
    {
        let mut lines = input.lines();
        let mut input_open = true;
        let mut ticker = Ticker::new();

        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        renderer.frame(&TimerView::from_engine(&self.engine));
        if self.engine.is_running() {
            ticker.arm();
        }

        loop {
            tokio::select! {
                _ = ticker.tick(), if self.engine.is_running() => {
                    self.handle_tick(renderer);
                    if !input_open && !self.engine.is_running() {
                        info!("input closed and timer paused, ending session");
                        break;
                    }
                }
                line = lines.next_line(), if input_open => {
                    let Some(line) = line.context("Failed to read command input")? else {
                        debug!("command input closed");
                        input_open = false;
                        if !self.engine.is_running() {
                            break;
                        }
                        continue;
                    };

                    match line.parse::<SessionCommand>() {
                        Ok(command) => {
                            let was_running = self.engine.is_running();
                            if self.handle_command(command, renderer) == CommandOutcome::Quit {
                                break;
                            }
                            if !was_running && self.engine.is_running() {
                                ticker.arm();
                            }
                        }
                        Err(message) => renderer.error(&message),
                    }
                }
                _ = &mut ctrl_c => {
                    info!("interrupted, ending session");
                    break;
                }
            }
        }

        Ok(())
    }
}
