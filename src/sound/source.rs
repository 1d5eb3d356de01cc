//! Sound sources and the phase-to-sound mapping.
//!
//! A phase-completion sound is either an audio file chosen by the user or a
//! generated tone. Each phase has its own sound so the user can tell a
//! finished focus session from a finished break by ear.

use std::path::{Path, PathBuf};
use std::time::Duration;

use super::error::SoundError;
use crate::types::TimerPhase;

/// Supported audio file extensions.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["mp3", "wav", "flac", "ogg"];

/// Length of the generated tones.
const TONE_DURATION: Duration = Duration::from_millis(600);

/// Tone played when a focus session ends.
const FOCUS_END_TONE_HZ: u32 = 880;

/// Tone played when a break ends.
const BREAK_END_TONE_HZ: u32 = 660;

/// Represents the source of a sound to be played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundSource {
    /// An audio file on disk.
    File {
        /// Display name (the file stem).
        name: String,
        /// Path to the audio file.
        path: PathBuf,
    },
    /// A sine tone generated at playback time.
    Tone {
        /// Display name.
        name: String,
        /// Frequency in hertz.
        frequency_hz: u32,
        /// How long the tone lasts.
        duration: Duration,
    },
}

impl SoundSource {
    /// Creates a file source without checking the path.
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::File { name, path }
    }

    /// Creates a file source, checking that the file exists and has a
    /// supported extension.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::FileNotFound` for a missing file and
    /// `SoundError::DecodeError` for an unsupported extension.
    pub fn file_checked(path: impl Into<PathBuf>) -> Result<Self, SoundError> {
        let path = path.into();
        if !path.is_file() {
            return Err(SoundError::FileNotFound(path.display().to_string()));
        }
        if !has_supported_extension(&path) {
            return Err(SoundError::DecodeError(format!(
                "{}: unsupported format (expected one of {})",
                path.display(),
                SUPPORTED_EXTENSIONS.join(", ")
            )));
        }
        Ok(Self::file(path))
    }

    /// Creates a tone source.
    #[must_use]
    pub fn tone(name: impl Into<String>, frequency_hz: u32, duration: Duration) -> Self {
        Self::Tone {
            name: name.into(),
            frequency_hz,
            duration,
        }
    }

    /// Returns the name of the sound source.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::File { name, .. } | Self::Tone { name, .. } => name,
        }
    }

    /// Returns true if this is a file source.
    #[must_use]
    pub fn is_file(&self) -> bool {
        matches!(self, Self::File { .. })
    }

    /// Returns true if this is a generated tone.
    #[must_use]
    pub fn is_tone(&self) -> bool {
        matches!(self, Self::Tone { .. })
    }

    /// Returns the file path if this is a file source.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File { path, .. } => Some(path),
            Self::Tone { .. } => None,
        }
    }
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
}

/// Returns the built-in tone for the end of `phase`.
#[must_use]
pub fn default_tone(phase: TimerPhase) -> SoundSource {
    match phase {
        TimerPhase::Focus => SoundSource::tone("focus-end", FOCUS_END_TONE_HZ, TONE_DURATION),
        TimerPhase::Break => SoundSource::tone("break-end", BREAK_END_TONE_HZ, TONE_DURATION),
    }
}

// ============================================================================
// PhaseSounds
// ============================================================================

/// The sound assigned to the end of each phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseSounds {
    /// Played when a focus session ends
    pub focus_end: SoundSource,
    /// Played when a break ends
    pub break_end: SoundSource,
}

impl Default for PhaseSounds {
    fn default() -> Self {
        Self {
            focus_end: default_tone(TimerPhase::Focus),
            break_end: default_tone(TimerPhase::Break),
        }
    }
}

impl PhaseSounds {
    /// Builds the mapping from optional user-supplied files, using the
    /// built-in tones where no file is given.
    #[must_use]
    pub fn from_paths(focus_end: Option<PathBuf>, break_end: Option<PathBuf>) -> Self {
        Self {
            focus_end: focus_end
                .map(SoundSource::file)
                .unwrap_or_else(|| default_tone(TimerPhase::Focus)),
            break_end: break_end
                .map(SoundSource::file)
                .unwrap_or_else(|| default_tone(TimerPhase::Break)),
        }
    }

    /// Returns the sound for the end of `phase`.
    #[must_use]
    pub fn for_completed(&self, phase: TimerPhase) -> &SoundSource {
        match phase {
            TimerPhase::Focus => &self.focus_end,
            TimerPhase::Break => &self.break_end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod sound_source_tests {
        use super::*;

        #[test]
        fn test_file_uses_stem_as_name() {
            let source = SoundSource::file("/sounds/chime.mp3");
            assert!(source.is_file());
            assert_eq!(source.name(), "chime");
            assert_eq!(source.path(), Some(Path::new("/sounds/chime.mp3")));
        }

        #[test]
        fn test_tone() {
            let source = SoundSource::tone("beep", 440, Duration::from_millis(100));
            assert!(source.is_tone());
            assert!(!source.is_file());
            assert_eq!(source.name(), "beep");
            assert_eq!(source.path(), None);
        }

        #[test]
        fn test_file_checked_missing() {
            let result = SoundSource::file_checked("/nonexistent/path/focus.mp3");
            match result {
                Err(SoundError::FileNotFound(msg)) => assert!(msg.contains("focus.mp3")),
                other => panic!("Expected FileNotFound, got {other:?}"),
            }
        }

        #[test]
        fn test_file_checked_existing() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("break.WAV");
            std::fs::write(&path, b"RIFF").unwrap();

            let source = SoundSource::file_checked(&path).unwrap();
            assert_eq!(source.name(), "break");
        }

        #[test]
        fn test_file_checked_unsupported_extension() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("notes.txt");
            std::fs::write(&path, b"hello").unwrap();

            let err = SoundSource::file_checked(&path).unwrap_err();
            assert!(matches!(err, SoundError::DecodeError(_)));
        }
    }

    mod phase_sounds_tests {
        use super::*;

        #[test]
        fn test_default_tones_differ_per_phase() {
            let sounds = PhaseSounds::default();
            assert!(sounds.focus_end.is_tone());
            assert!(sounds.break_end.is_tone());
            assert_ne!(sounds.focus_end, sounds.break_end);
        }

        #[test]
        fn test_for_completed() {
            let sounds = PhaseSounds::from_paths(Some("/a/focus.mp3".into()), None);
            assert_eq!(sounds.for_completed(TimerPhase::Focus).name(), "focus");
            assert_eq!(
                sounds.for_completed(TimerPhase::Break),
                &default_tone(TimerPhase::Break)
            );
        }
    }
}
