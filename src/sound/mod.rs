//! Sound playback for phase completion.
//!
//! This module provides the notification sink of the timer:
//!
//! - A distinct sound for the end of each phase
//! - User-supplied audio files with a generated-tone fallback
//! - Non-blocking playback through rodio
//! - Graceful degradation when audio is unavailable
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │   PhaseSounds    │ ← phase → SoundSource
//! └────────┬─────────┘
//!          │ announce_phase_completed()
//!          ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │   SoundPlayer    │────▶│   Audio file     │
//! │                  │     ├──────────────────┤
//! │                  │────▶│  Generated tone  │
//! └──────────────────┘     │  (fallback)      │
//!                          └──────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use fomodoro::sound::{announce_phase_completed, PhaseSounds, RodioSoundPlayer};
//! use fomodoro::types::TimerPhase;
//!
//! let player = RodioSoundPlayer::new().expect("audio init");
//! let sounds = PhaseSounds::from_paths(Some("focus-end.mp3".into()), None);
//!
//! // Never fails: playback errors are logged.
//! announce_phase_completed(&player, &sounds, TimerPhase::Focus);
//! ```

mod error;
mod player;
mod source;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use tracing::{debug, warn};

pub use error::SoundError;
pub use player::{try_create_player, RodioSoundPlayer};
pub use source::{default_tone, PhaseSounds, SoundSource, SUPPORTED_EXTENSIONS};

use crate::types::TimerPhase;

/// Trait for sound playback implementations.
///
/// This trait abstracts the sound playback functionality, allowing for
/// different implementations (e.g., rodio-based, mock for testing).
pub trait SoundPlayer {
    /// Plays a sound from the given source.
    ///
    /// This method should be non-blocking; the sound plays in the background.
    ///
    /// # Errors
    ///
    /// Returns an error if playback fails.
    fn play(&self, source: &SoundSource) -> Result<(), SoundError>;
}

impl<T: SoundPlayer + ?Sized> SoundPlayer for &T {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        (**self).play(source)
    }
}

impl<T: SoundPlayer + ?Sized> SoundPlayer for Box<T> {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        (**self).play(source)
    }
}

impl SoundPlayer for RodioSoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        RodioSoundPlayer::play(self, source)
    }
}

/// Plays the sound for the end of `completed`.
///
/// A file that cannot be opened or decoded is replaced by the phase's
/// built-in tone. Any remaining failure is logged and swallowed; the timer
/// never stops because of audio.
pub fn announce_phase_completed<P>(player: &P, sounds: &PhaseSounds, completed: TimerPhase)
where
    P: SoundPlayer + ?Sized,
{
    let source = sounds.for_completed(completed);
    debug!(phase = %completed, sound = source.name(), "announcing phase completion");

    let result = match player.play(source) {
        Err(e) if e.should_fallback_to_tone() && source.is_file() => {
            warn!(
                "Failed to play '{}': {}, falling back to the built-in tone",
                source.name(),
                e
            );
            player.play(&default_tone(completed))
        }
        other => other,
    };

    if let Err(e) = result {
        warn!("Phase sound not played: {} ({})", e, e.suggestion());
    }
}

/// Mock sound player for testing.
#[derive(Debug, Default)]
pub struct MockSoundPlayer {
    play_calls: Mutex<Vec<SoundSource>>,
    should_fail: AtomicBool,
    missing_files: AtomicBool,
}

impl MockSoundPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every `play` call fail with a playback error.
    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    /// Makes file sources fail as if the file did not exist.
    pub fn set_missing_files(&self, missing: bool) {
        self.missing_files.store(missing, Ordering::SeqCst);
    }

    #[must_use]
    pub fn play_count(&self) -> usize {
        self.lock_calls().len()
    }

    #[must_use]
    pub fn get_play_calls(&self) -> Vec<SoundSource> {
        self.lock_calls().clone()
    }

    pub fn clear_calls(&self) {
        self.lock_calls().clear();
    }

    fn lock_calls(&self) -> std::sync::MutexGuard<'_, Vec<SoundSource>> {
        self.play_calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SoundPlayer for MockSoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(SoundError::PlaybackError("Mock failure".to_string()));
        }
        if source.is_file() && self.missing_files.load(Ordering::SeqCst) {
            return Err(SoundError::FileNotFound(source.name().to_string()));
        }
        self.lock_calls().push(source.clone());
        Ok(())
    }
}
