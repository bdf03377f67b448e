//! # vocab-trainer
//!
//! A headless vocabulary flashcard trainer: it shuffles a word list, speaks
//! each word aloud through a pluggable speech output, and lets a learner
//! reveal, advance and retreat through the deck while picking a voice.
//!
//! ## Features
//!
//! - **Session state machine**: shuffled deck, cursor, reveal state and an
//!   endless loop of reshuffled passes
//! - **Voice selection**: French-first filtering with a selection that
//!   survives repeated voice-list announcements
//! - **UI agnostic**: rendering goes through [`SessionObserver`], audio
//!   through [`SpeechOutput`]
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! vocab-trainer = "2026.10"
//! ```
//!
//! ```ignore
//! use vocab_trainer::trainer::{Trainer, TrainerConfig, words};
//!
//! let mut trainer = Trainer::new(Some(my_speech), my_view, TrainerConfig::default());
//! trainer.voices_changed(&platform_voices);
//! trainer.words_loaded(words::load_words("data/vocabulary.txt".as_ref()));
//! trainer.next();
//! ```

pub mod trainer;

use serde::{Deserialize, Serialize};

use trainer::voices::VoiceDescriptor;

/// A single request to speak a piece of text.
///
/// Utterances are fire-and-forget: the trainer never waits for playback and
/// always cancels the previous utterance before issuing a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    /// Text to speak
    pub text: String,
    /// BCP 47 language tag the text is written in (e.g. `"fr-FR"`)
    pub language: String,
    /// Speaking rate, where 1.0 is the platform's normal speed
    pub rate: f32,
    /// Voice to use. `None` lets the platform pick its default voice.
    pub voice: Option<VoiceDescriptor>,
}

/// Narrow interface to the host's speech synthesizer.
///
/// Implementations must not block on playback. A host without any speech
/// capability is represented by passing `None` where a `SpeechOutput` is
/// expected.
pub trait SpeechOutput {
    /// Stop the utterance currently playing, if any.
    fn cancel(&mut self);

    /// Start speaking the given utterance.
    fn speak(&mut self, utterance: &Utterance) -> Result<(), Box<dyn std::error::Error>>;
}

impl<T: SpeechOutput + ?Sized> SpeechOutput for Box<T> {
    fn cancel(&mut self) {
        (**self).cancel()
    }

    fn speak(&mut self, utterance: &Utterance) -> Result<(), Box<dyn std::error::Error>> {
        (**self).speak(utterance)
    }
}

/// Notifications emitted by the trainer for whatever surface renders it.
///
/// Every method has an empty default so observers only implement what they
/// display.
pub trait SessionObserver {
    /// The word display changed. `revealed` is true only when `text` is the
    /// current word itself rather than a placeholder.
    fn word_changed(&mut self, _text: &str, _revealed: bool) {}

    /// The status line changed.
    fn status_changed(&mut self, _status: &str) {}

    /// A full pass finished. `words` is the deck in its new (reshuffled) order.
    fn deck_completed(&mut self, _words: &[String]) {}

    /// The completed-deck list should no longer be shown.
    fn list_hidden(&mut self) {}

    /// The learner controls were enabled or disabled as a group.
    fn controls_enabled(&mut self, _enabled: bool) {}

    /// The voice picker contents changed. An empty `voices` list means only
    /// the platform default is available and the picker should be disabled.
    fn voices_changed(&mut self, _voices: &[VoiceDescriptor], _selected: Option<&str>) {}
}

impl<T: SessionObserver + ?Sized> SessionObserver for Box<T> {
    fn word_changed(&mut self, text: &str, revealed: bool) {
        (**self).word_changed(text, revealed)
    }

    fn status_changed(&mut self, status: &str) {
        (**self).status_changed(status)
    }

    fn deck_completed(&mut self, words: &[String]) {
        (**self).deck_completed(words)
    }

    fn list_hidden(&mut self) {
        (**self).list_hidden()
    }

    fn controls_enabled(&mut self, enabled: bool) {
        (**self).controls_enabled(enabled)
    }

    fn voices_changed(&mut self, voices: &[VoiceDescriptor], selected: Option<&str>) {
        (**self).voices_changed(voices, selected)
    }
}

/// An observer that ignores every notification.
impl SessionObserver for () {}
