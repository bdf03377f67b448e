//! Flashcard session core.
//!
//! This module holds the pieces a trainer front end drives: the shuffled
//! [`deck`], the [`voices`] catalog, the [`session`] state machine and the
//! [`app`] bootstrap that ties them to word-list and voice-list events.
//!
//! # Session Lifecycle
//!
//! ```text
//! Uninitialized --initialize--> Active(0, hidden)
//! Active(i)     --advance-----> Active(i + 1, hidden)     (not the last word)
//! Active(last)  --advance-----> Completed                 (deck reshuffled)
//! Completed     --advance-----> Active(0, hidden)
//! Active(i)     --retreat-----> Active(max(i - 1, 0), hidden)
//! Active(i)     --reveal------> Active(i, revealed)
//! ```
//!
//! There is no terminal state: every completed pass starts another one.
//!
//! # Voice Selection
//!
//! | Priority | Rule |
//! |---|---|
//! | 1 | The previously selected voice, if still announced |
//! | 2 | `Amélie` with language tag `fr-CA` |
//! | 3 | Any voice whose name contains `french` (any case) |
//! | 4 | The first candidate |
//!
//! Candidates are the voices whose language tag starts with `fr`, or every
//! voice when none does.
//!
//! # Examples
//!
//! ```rust
//! use vocab_trainer::trainer::{SessionController, TrainerConfigBuilder, VoiceCatalog};
//! use vocab_trainer::{SpeechOutput, Utterance};
//!
//! struct Silent;
//!
//! impl SpeechOutput for Silent {
//!     fn cancel(&mut self) {}
//!     fn speak(&mut self, _: &Utterance) -> Result<(), Box<dyn std::error::Error>> {
//!         Ok(())
//!     }
//! }
//!
//! let config = TrainerConfigBuilder::default().shuffle_seed(7).build()?;
//! let catalog = VoiceCatalog::new(config.voices.clone());
//! let mut session = SessionController::new(Some(Silent), (), config);
//!
//! let words = vec!["chat".to_string(), "chien".to_string(), "oiseau".to_string()];
//! session.initialize(&words, &catalog)?;
//! session.reveal();
//! session.advance(&catalog);
//! assert_eq!(session.cursor(), Some(1));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod app;
pub mod config;
pub mod deck;
pub mod session;
pub mod voices;
pub mod words;

pub use app::Trainer;
pub use config::{TrainerConfig, TrainerConfigBuilder, VoicePreferences, VoicePreferencesBuilder};
pub use session::{Phase, SessionController, TrainerError};
pub use voices::{VoiceCatalog, VoiceDescriptor};
