use std::path::Path;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use super::session::TrainerError;

/// Rules used to pick a default voice from the platform's voice list.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(default)]
#[serde(default)]
pub struct VoicePreferences {
    /// Language tag prefix (case-insensitive) a voice must start with to be a candidate.
    #[builder(setter(into))]
    pub language_prefix: String,
    /// Exact name of the preferred voice.
    #[builder(setter(into))]
    pub preferred_name: String,
    /// Exact language tag the preferred voice must carry.
    #[builder(setter(into))]
    pub preferred_language: String,
    /// Case-insensitive substring of a voice name that marks a good fallback.
    #[builder(setter(into))]
    pub name_hint: String,
}

impl Default for VoicePreferences {
    fn default() -> Self {
        Self {
            language_prefix: "fr".to_string(),
            preferred_name: "Amélie".to_string(),
            preferred_language: "fr-CA".to_string(),
            name_hint: "french".to_string(),
        }
    }
}

/// Behaviour and wording of a trainer session.
///
/// Every field has a default, so a builder only needs the fields it changes:
///
/// ```rust
/// use vocab_trainer::trainer::TrainerConfigBuilder;
///
/// let config = TrainerConfigBuilder::default().rate(0.8).build()?;
/// assert_eq!(config.language, "fr-FR");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
#[builder(default)]
#[serde(default)]
pub struct TrainerConfig {
    /// Language tag attached to every utterance.
    #[builder(setter(into))]
    pub language: String,
    /// Default speaking rate. Range: 0.1–10.0, platform normal is 1.0.
    pub rate: f32,
    /// Shown in place of the word while the learner listens.
    #[builder(setter(into))]
    pub listen_placeholder: String,
    /// Shown when a full pass has been completed.
    #[builder(setter(into))]
    pub completed_placeholder: String,
    /// Shown when the word list could not be loaded.
    #[builder(setter(into))]
    pub failed_placeholder: String,
    #[builder(setter(into))]
    pub completed_status: String,
    /// Status shown when a new pass begins after a completed one.
    #[builder(setter(into))]
    pub restarting_status: String,
    #[builder(setter(into))]
    pub loading_voices_status: String,
    #[builder(setter(into))]
    pub speech_unsupported_status: String,
    /// Seed for deck shuffling. `None` seeds from OS entropy.
    #[builder(setter(strip_option))]
    pub shuffle_seed: Option<u64>,
    pub voices: VoicePreferences,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            language: "fr-FR".to_string(),
            rate: 0.45,
            listen_placeholder: "Écoutez...".to_string(),
            completed_placeholder: "🎉".to_string(),
            failed_placeholder: "--".to_string(),
            completed_status: "Liste terminée. Cliquez 'Mot suivant' pour recommencer."
                .to_string(),
            restarting_status: "Restarting with a new shuffle.".to_string(),
            loading_voices_status: "Loading voices...".to_string(),
            speech_unsupported_status: "Speech not supported on this host.".to_string(),
            shuffle_seed: None,
            voices: VoicePreferences::default(),
        }
    }
}

impl TrainerConfig {
    /// Load a configuration from a JSON file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self, TrainerError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| TrainerError::Config(format!("Failed to parse {}: {e}", path.display())))?;

        if config.rate <= 0.0 {
            return Err(TrainerError::Config(format!(
                "rate must be positive, got {}",
                config.rate
            )));
        }

        log::info!("Loaded trainer config from {}", path.display());
        Ok(config)
    }
}

impl From<TrainerConfigBuilderError> for TrainerError {
    fn from(e: TrainerConfigBuilderError) -> Self {
        TrainerError::Config(e.to_string())
    }
}

impl From<VoicePreferencesBuilderError> for TrainerError {
    fn from(e: VoicePreferencesBuilderError) -> Self {
        TrainerError::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{TrainerConfig, TrainerConfigBuilder, VoicePreferencesBuilder};
    use crate::trainer::TrainerError;
    use std::io::Write;

    #[test]
    fn builder_keeps_defaults_for_unset_fields() {
        let config = TrainerConfigBuilder::default()
            .rate(0.8)
            .shuffle_seed(3)
            .build()
            .unwrap();

        assert_eq!(config.rate, 0.8);
        assert_eq!(config.shuffle_seed, Some(3));
        assert_eq!(config.language, "fr-FR");
        assert_eq!(config.listen_placeholder, "Écoutez...");
        assert_eq!(config.restarting_status, "Restarting with a new shuffle.");
        assert_eq!(config.voices.preferred_name, "Amélie");
    }

    #[test]
    fn voice_preferences_builder_overrides_only_named_fields() {
        let prefs = VoicePreferencesBuilder::default()
            .language_prefix("de")
            .name_hint("german")
            .build()
            .unwrap();

        assert_eq!(prefs.language_prefix, "de");
        assert_eq!(prefs.name_hint, "german");
        assert_eq!(prefs.preferred_language, "fr-CA");
    }

    #[test]
    fn loads_partial_json_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"rate": 0.6, "voices": {{"language_prefix": "es"}}}}"#).unwrap();

        let config = TrainerConfig::load(file.path()).unwrap();
        assert_eq!(config.rate, 0.6);
        assert_eq!(config.voices.language_prefix, "es");
        assert_eq!(config.voices.preferred_name, "Amélie");
        assert_eq!(config.completed_placeholder, "🎉");
    }

    #[test]
    fn rejects_non_positive_rate() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"rate": 0.0}}"#).unwrap();

        let err = TrainerConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, TrainerError::Config(_)));
    }

    #[test]
    fn rejects_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        assert!(matches!(
            TrainerConfig::load(file.path()),
            Err(TrainerError::Config(_))
        ));
    }
}
