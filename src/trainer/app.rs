use std::path::Path;

use crate::{SessionObserver, SpeechOutput};

use super::config::TrainerConfig;
use super::session::{SessionController, TrainerError};
use super::voices::{VoiceCatalog, VoiceDescriptor};
use super::words;

/// Event-driven front of the trainer.
///
/// Owns the session and the voice catalog and reacts to the three external
/// events of a running trainer: the word list arriving, the platform
/// announcing its voices, and learner actions. Speaking starts only once the
/// words are loaded and at least one voice has been resolved, whichever
/// happens last, and never more than once. The learner controls stay
/// disabled until then.
pub struct Trainer<S, O> {
    session: SessionController<S, O>,
    catalog: VoiceCatalog,
    platform_voices: Vec<VoiceDescriptor>,
    words_ready: bool,
    started: bool,
    controls_enabled: bool,
}

impl<S: SpeechOutput, O: SessionObserver> Trainer<S, O> {
    /// Create a trainer with every learner control disabled.
    pub fn new(speech: Option<S>, observer: O, config: TrainerConfig) -> Self {
        let catalog = VoiceCatalog::new(config.voices.clone());
        let mut trainer = Self {
            session: SessionController::new(speech, observer, config),
            catalog,
            platform_voices: Vec::new(),
            words_ready: false,
            started: false,
            controls_enabled: false,
        };
        trainer.session.observer_mut().controls_enabled(false);
        trainer
    }

    /// Handle the outcome of loading the word list.
    ///
    /// A failure is reported as a status message with the word display left
    /// at the failure placeholder and the controls disabled.
    pub fn words_loaded(&mut self, result: Result<Vec<String>, TrainerError>) {
        let loaded = result.and_then(|words| self.session.load(&words));
        if let Err(e) = loaded {
            self.fail(&e);
            return;
        }

        self.words_ready = true;
        self.started = false;
        self.set_controls(false);
        let count = self.sync_voices();

        if count > 0 {
            self.begin();
        } else {
            let status = self.session.config().loading_voices_status.clone();
            self.session.observer_mut().status_changed(&status);
        }
    }

    /// Load the word list from a file and handle the outcome.
    pub fn load_words_from(&mut self, path: &Path) {
        self.words_loaded(words::load_words(path));
    }

    /// Handle the platform announcing its (possibly unchanged) voice list.
    ///
    /// May be called any number of times. Starts the session if the words
    /// were waiting for a voice.
    pub fn voices_changed(&mut self, voices: &[VoiceDescriptor]) {
        self.platform_voices = voices.to_vec();
        let count = self.sync_voices();

        if !self.started && self.words_ready && count > 0 {
            self.begin();
        }
    }

    /// The learner picked a voice (`None` for the platform default).
    pub fn select_voice(&mut self, id: Option<&str>) {
        self.catalog.set_selection(id);
    }

    /// Speak the last spoken word again.
    pub fn repeat(&mut self) {
        if self.controls_enabled {
            self.session.speak(None, None, &self.catalog);
        }
    }

    pub fn reveal(&mut self) {
        if self.controls_enabled {
            self.session.reveal();
        }
    }

    pub fn next(&mut self) {
        if self.controls_enabled {
            self.session.advance(&self.catalog);
        }
    }

    pub fn previous(&mut self) {
        if self.controls_enabled {
            self.session.retreat(&self.catalog);
        }
    }

    pub fn session(&self) -> &SessionController<S, O> {
        &self.session
    }

    pub fn catalog(&self) -> &VoiceCatalog {
        &self.catalog
    }

    pub fn observer(&self) -> &O {
        self.session.observer()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn controls_enabled(&self) -> bool {
        self.controls_enabled
    }

    fn begin(&mut self) {
        self.started = true;
        self.set_controls(true);
        log::info!(
            "Session started with {} words, voice: {}",
            self.session.len(),
            self.catalog.selected_id().unwrap_or("platform default")
        );
        self.session.start(&self.catalog);
    }

    fn sync_voices(&mut self) -> usize {
        let count = self.catalog.refresh(&self.platform_voices);
        self.session
            .observer_mut()
            .voices_changed(self.catalog.voices(), self.catalog.selected_id());
        count
    }

    fn set_controls(&mut self, enabled: bool) {
        if self.controls_enabled != enabled {
            self.controls_enabled = enabled;
            self.session.observer_mut().controls_enabled(enabled);
        }
    }

    fn fail(&mut self, e: &TrainerError) {
        log::warn!("Unable to load words: {e}");
        self.words_ready = false;
        self.set_controls(false);

        let placeholder = self.session.config().failed_placeholder.clone();
        let observer = self.session.observer_mut();
        observer.status_changed(&e.to_string());
        observer.word_changed(&placeholder, false);
    }
}

#[cfg(test)]
mod tests {
    use super::Trainer;
    use crate::trainer::session::tests::{Event, RecordingObserver, RecordingSpeech};
    use crate::trainer::{Phase, TrainerConfigBuilder, TrainerError, VoiceDescriptor};

    type TestTrainer = Trainer<RecordingSpeech, RecordingObserver>;

    fn trainer() -> TestTrainer {
        let config = TrainerConfigBuilder::default().shuffle_seed(5).build().unwrap();
        Trainer::new(
            Some(RecordingSpeech::default()),
            RecordingObserver::default(),
            config,
        )
    }

    fn words() -> Vec<String> {
        ["chat", "chien", "oiseau"].iter().map(|s| s.to_string()).collect()
    }

    fn french_voices() -> Vec<VoiceDescriptor> {
        vec![
            VoiceDescriptor::new("Samantha", "en-US").with_uri("a"),
            VoiceDescriptor::new("Amélie", "fr-CA").with_uri("b"),
        ]
    }

    fn spoken(trainer: &TestTrainer) -> Vec<String> {
        trainer.session().speech().unwrap().spoken()
    }

    #[test]
    fn controls_start_disabled() {
        let t = trainer();
        assert!(!t.controls_enabled());
        assert_eq!(t.observer().events, vec![Event::Controls(false)]);
    }

    #[test]
    fn actions_are_ignored_while_disabled() {
        let mut t = trainer();
        t.next();
        t.previous();
        t.reveal();
        t.repeat();

        assert_eq!(t.session().phase(), Phase::Uninitialized);
        assert!(spoken(&t).is_empty());
    }

    #[test]
    fn words_then_voices_starts_once() {
        let mut t = trainer();
        t.words_loaded(Ok(words()));

        assert!(!t.controls_enabled());
        assert!(!t.is_started());
        assert!(spoken(&t).is_empty());
        assert_eq!(t.observer().last_status(), Some("Loading voices..."));

        t.voices_changed(&french_voices());
        assert!(t.is_started());
        assert!(t.controls_enabled());
        assert_eq!(spoken(&t).len(), 1);

        t.voices_changed(&french_voices());
        t.voices_changed(&french_voices());
        assert_eq!(spoken(&t).len(), 1);
        assert_eq!(t.catalog().selected_id(), Some("b"));
    }

    #[test]
    fn voices_then_words_starts_once() {
        let mut t = trainer();
        t.voices_changed(&french_voices());
        assert!(!t.is_started());
        assert!(spoken(&t).is_empty());

        t.words_loaded(Ok(words()));
        assert!(t.is_started());
        assert_eq!(spoken(&t).len(), 1);

        let utterance = t.session().speech().unwrap().utterances()[0].clone();
        assert_eq!(utterance.voice.map(|v| v.name), Some("Amélie".to_string()));
        assert_eq!(utterance.language, "fr-FR");
        assert_eq!(utterance.rate, 0.45);
    }

    #[test]
    fn nothing_is_spoken_before_a_voice_resolves() {
        let mut t = trainer();
        t.words_loaded(Ok(words()));
        t.next();
        t.repeat();
        t.previous();
        t.reveal();

        assert!(!t.is_started());
        assert!(spoken(&t).is_empty());
        assert_eq!(t.session().phase(), Phase::Active { cursor: 0, revealed: false });

        t.voices_changed(&french_voices());
        let first = t.session().current_word().unwrap().to_string();
        assert_eq!(spoken(&t), vec![first]);
    }

    #[test]
    fn word_revealed_before_start_can_be_revealed_after() {
        let mut t = trainer();
        t.voices_changed(&[]);
        t.words_loaded(Ok(words()));
        t.session.reveal();
        assert!(t.session().is_revealed());

        t.voices_changed(&french_voices());
        assert_eq!(t.observer().last_word(), Some(("Écoutez...", false)));
        assert!(!t.session().is_revealed());

        t.reveal();
        let word = t.session().current_word().unwrap().to_string();
        assert_eq!(t.observer().last_word(), Some((word.as_str(), true)));
    }

    #[test]
    fn reload_without_voices_disables_controls_until_voices_return() {
        let mut t = trainer();
        t.voices_changed(&french_voices());
        t.words_loaded(Ok(words()));
        assert!(t.controls_enabled());

        t.voices_changed(&[]);
        t.words_loaded(Ok(words()));
        assert!(!t.controls_enabled());
        assert!(!t.is_started());

        t.voices_changed(&french_voices());
        assert!(t.is_started());
        assert!(t.controls_enabled());
        assert_eq!(spoken(&t).len(), 2);
    }

    #[test]
    fn empty_voice_announcement_does_not_start() {
        let mut t = trainer();
        t.words_loaded(Ok(words()));
        t.voices_changed(&[]);

        assert!(!t.is_started());
        assert!(spoken(&t).is_empty());
        assert_eq!(
            t.observer().events.last(),
            Some(&Event::Voices(vec![], None))
        );
    }

    #[test]
    fn voice_list_is_published_on_every_refresh() {
        let mut t = trainer();
        t.voices_changed(&french_voices());

        assert_eq!(
            t.observer().events.last(),
            Some(&Event::Voices(vec!["b".to_string()], Some("b".to_string())))
        );
    }

    #[test]
    fn load_failure_leaves_placeholder_and_disabled_controls() {
        let mut t = trainer();
        t.voices_changed(&french_voices());
        t.words_loaded(Err(TrainerError::WordSource(
            "Failed to load vocabulary list.".to_string(),
        )));

        assert!(!t.controls_enabled());
        assert!(!t.is_started());
        assert_eq!(t.observer().last_status(), Some("Failed to load vocabulary list."));
        assert_eq!(t.observer().last_word(), Some(("--", false)));

        t.voices_changed(&french_voices());
        assert!(!t.is_started());
        assert!(spoken(&t).is_empty());
    }

    #[test]
    fn empty_word_list_is_reported() {
        let mut t = trainer();
        t.words_loaded(Ok(vec![]));

        assert!(!t.controls_enabled());
        assert_eq!(t.observer().last_status(), Some("Vocabulary list is empty."));
        assert_eq!(t.observer().last_word(), Some(("--", false)));
    }

    #[test]
    fn load_words_from_missing_file_fails_softly() {
        let dir = tempfile::tempdir().unwrap();
        let mut t = trainer();
        t.load_words_from(&dir.path().join("vocabulary.txt"));

        assert!(!t.controls_enabled());
        assert!(t
            .observer()
            .last_status()
            .is_some_and(|s| s.starts_with("Failed to load vocabulary list")));
    }

    #[test]
    fn learner_voice_pick_is_used_and_survives_refresh() {
        let mut t = trainer();
        let voices = vec![
            VoiceDescriptor::new("Amélie", "fr-CA").with_uri("b"),
            VoiceDescriptor::new("Thomas", "fr-FR").with_uri("c"),
        ];
        t.voices_changed(&voices);
        t.words_loaded(Ok(words()));

        t.select_voice(Some("c"));
        t.voices_changed(&voices);
        t.repeat();

        let last = t.session().speech().unwrap().utterances().last().cloned().cloned().unwrap();
        assert_eq!(last.voice.map(|v| v.name), Some("Thomas".to_string()));
    }

    #[test]
    fn full_pass_through_trainer() {
        let mut t = trainer();
        t.voices_changed(&french_voices());
        t.words_loaded(Ok(words()));

        t.reveal();
        assert!(t.session().is_revealed());
        for _ in 0..3 {
            t.next();
        }
        assert_eq!(t.session().phase(), Phase::Completed);
        assert_eq!(t.observer().completions(), 1);

        t.next();
        assert_eq!(t.session().phase(), Phase::Active { cursor: 0, revealed: false });
        t.previous();
        assert_eq!(t.session().cursor(), Some(0));
        assert_eq!(spoken(&t).len(), 4);
    }
}
