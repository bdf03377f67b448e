use crate::{SessionObserver, SpeechOutput, Utterance};

use super::config::TrainerConfig;
use super::deck::Deck;
use super::voices::VoiceCatalog;

#[derive(thiserror::Error, Debug)]
pub enum TrainerError {
    #[error("Vocabulary list is empty.")]
    EmptyDeck,
    #[error("No current word (cursor {index:?}, {len} words in deck).")]
    OutOfRange { index: Option<usize>, len: usize },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    WordSource(String),
    #[error("Failed to parse voice list: {0}")]
    VoiceParse(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Where the learner is in the deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No word list has been loaded yet.
    Uninitialized,
    /// A word is current. `cursor` is always a valid deck index.
    Active { cursor: usize, revealed: bool },
    /// A pass just finished; the deck is already reshuffled and the next
    /// advance resumes at its first word.
    Completed,
}

/// Drives a learner through a shuffled deck, one word at a time.
///
/// Speaking, revealing and navigating are the only mutating operations.
/// Every change is reported to the observer; speech goes to the optional
/// speech output (`None` when the host cannot speak, in which case the
/// session still navigates silently).
pub struct SessionController<S, O> {
    config: TrainerConfig,
    speech: Option<S>,
    observer: O,
    deck: Option<Deck>,
    phase: Phase,
    last_spoken: Option<String>,
}

impl<S: SpeechOutput, O: SessionObserver> SessionController<S, O> {
    pub fn new(speech: Option<S>, observer: O, config: TrainerConfig) -> Self {
        if speech.is_none() {
            log::warn!("No speech output available, words will not be spoken");
        }

        Self {
            config,
            speech,
            observer,
            deck: None,
            phase: Phase::Uninitialized,
            last_spoken: None,
        }
    }

    /// Load and shuffle `words`, then present and speak the first word.
    pub fn initialize(
        &mut self,
        words: &[String],
        voices: &VoiceCatalog,
    ) -> Result<(), TrainerError> {
        self.load(words)?;
        self.start(voices);
        Ok(())
    }

    /// Load and shuffle `words` without presenting anything.
    ///
    /// The session becomes `Active(0, hidden)`; call [`start`](Self::start)
    /// once speaking may begin.
    pub fn load(&mut self, words: &[String]) -> Result<(), TrainerError> {
        let deck = Deck::new(words, self.config.shuffle_seed)?;
        log::info!("Deck loaded with {} words", deck.len());

        self.deck = Some(deck);
        self.phase = Phase::Active {
            cursor: 0,
            revealed: false,
        };
        self.last_spoken = None;
        Ok(())
    }

    /// Present the current word: hide it, report progress and speak it.
    pub fn start(&mut self, voices: &VoiceCatalog) {
        if let Phase::Active { cursor, .. } = self.phase {
            self.move_to(cursor, voices);
        }
    }

    pub fn current_word(&self) -> Result<&str, TrainerError> {
        let len = self.len();
        match (self.phase, self.deck.as_ref()) {
            (Phase::Active { cursor, .. }, Some(deck)) => deck
                .get(cursor)
                .ok_or(TrainerError::OutOfRange { index: Some(cursor), len }),
            _ => Err(TrainerError::OutOfRange { index: None, len }),
        }
    }

    /// Speak a word, cancelling whatever is currently being spoken.
    ///
    /// With no `word`, replays the last spoken word, or the current word if
    /// nothing has been spoken yet. `rate` defaults to the configured rate.
    /// Does nothing when there is no word to speak.
    pub fn speak(&mut self, word: Option<&str>, rate: Option<f32>, voices: &VoiceCatalog) {
        let word = match word {
            Some(word) => word.to_string(),
            None => match self.last_spoken.clone() {
                Some(last) => last,
                None => match self.current_word() {
                    Ok(current) => current.to_string(),
                    Err(_) => return,
                },
            },
        };
        if word.is_empty() {
            return;
        }

        let Some(speech) = self.speech.as_mut() else {
            self.observer
                .status_changed(&self.config.speech_unsupported_status);
            return;
        };

        speech.cancel();
        let utterance = Utterance {
            text: word.clone(),
            language: self.config.language.clone(),
            rate: rate.unwrap_or(self.config.rate),
            voice: voices.selected().cloned(),
        };
        log::debug!(
            "Speaking {:?} (voice: {})",
            utterance.text,
            voices.selected_id().unwrap_or("platform default")
        );

        self.last_spoken = Some(word);
        if let Err(e) = speech.speak(&utterance) {
            log::warn!("Speech output failed: {e}");
            self.observer.status_changed(&format!("Speech failed: {e}"));
        }
    }

    /// Show the current word. Has no effect once revealed or outside a pass.
    pub fn reveal(&mut self) {
        let Phase::Active {
            cursor,
            revealed: false,
        } = self.phase
        else {
            return;
        };
        let Some(word) = self.deck.as_ref().and_then(|deck| deck.get(cursor)) else {
            return;
        };

        self.observer.word_changed(word, true);
        self.phase = Phase::Active {
            cursor,
            revealed: true,
        };
    }

    /// Move to the next word.
    ///
    /// On the last word this completes the pass instead: the deck is
    /// reshuffled, shown to the observer, and the session pauses in
    /// [`Phase::Completed`] until the next advance.
    pub fn advance(&mut self, voices: &VoiceCatalog) {
        let len = self.len();
        match self.phase {
            Phase::Uninitialized => {}
            Phase::Completed => {
                log::info!("Restarting with a new shuffle");
                self.observer.list_hidden();
                self.observer.status_changed(&self.config.restarting_status);
                self.move_to(0, voices);
            }
            Phase::Active { cursor, .. } if cursor + 1 < len => {
                self.move_to(cursor + 1, voices);
            }
            Phase::Active { .. } => self.complete(),
        }
    }

    /// Move to the previous word. Has no effect on the first word.
    ///
    /// From [`Phase::Completed`] this leaves the completion display and lands
    /// on the last word without reshuffling again.
    pub fn retreat(&mut self, voices: &VoiceCatalog) {
        let len = self.len();
        match self.phase {
            Phase::Uninitialized | Phase::Active { cursor: 0, .. } => {}
            Phase::Active { cursor, .. } => self.move_to(cursor - 1, voices),
            Phase::Completed => {
                self.observer.list_hidden();
                self.move_to(len - 1, voices);
            }
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Index of the current word, `None` before loading and while completed.
    pub fn cursor(&self) -> Option<usize> {
        match self.phase {
            Phase::Active { cursor, .. } => Some(cursor),
            _ => None,
        }
    }

    pub fn is_revealed(&self) -> bool {
        matches!(self.phase, Phase::Active { revealed: true, .. })
    }

    pub fn deck(&self) -> &[String] {
        self.deck.as_ref().map(Deck::words).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.deck.as_ref().map_or(0, Deck::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn last_spoken(&self) -> Option<&str> {
        self.last_spoken.as_deref()
    }

    /// Progress as `"position/total"`, 1-based.
    pub fn progress(&self) -> Option<String> {
        self.cursor()
            .map(|cursor| format!("{}/{}", cursor + 1, self.len()))
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn speech(&self) -> Option<&S> {
        self.speech.as_ref()
    }

    fn move_to(&mut self, cursor: usize, voices: &VoiceCatalog) {
        log::debug!("Moving to word {} of {}", cursor + 1, self.len());
        self.phase = Phase::Active {
            cursor,
            revealed: false,
        };
        self.present_current(voices);
    }

    fn present_current(&mut self, voices: &VoiceCatalog) {
        self.observer
            .word_changed(&self.config.listen_placeholder, false);
        if let Some(progress) = self.progress() {
            self.observer.status_changed(&progress);
        }

        let word = match self.current_word() {
            Ok(word) => word.to_string(),
            Err(e) => {
                log::warn!("{e}");
                return;
            }
        };
        self.speak(Some(&word), None, voices);
    }

    fn complete(&mut self) {
        let Some(deck) = self.deck.as_mut() else {
            return;
        };

        deck.reshuffle();
        log::info!("Deck completed, reshuffled {} words", deck.len());
        self.observer.deck_completed(deck.words());
        self.phase = Phase::Completed;
        self.observer
            .word_changed(&self.config.completed_placeholder, false);
        self.observer.status_changed(&self.config.completed_status);
    }
}
