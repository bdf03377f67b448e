use std::path::Path;

use serde::{Deserialize, Serialize};

use super::config::VoicePreferences;
use super::session::TrainerError;

/// A synthesis voice as announced by the host platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceDescriptor {
    /// Display name (e.g. `"Amélie"`). Not guaranteed unique across platforms.
    pub name: String,
    /// BCP 47 language tag, possibly empty when the platform does not report one.
    #[serde(default, alias = "lang")]
    pub language: String,
    /// Platform URI, when the platform provides one.
    #[serde(default, alias = "voiceURI", skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

impl VoiceDescriptor {
    pub fn new(name: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            language: language.into(),
            uri: None,
        }
    }

    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Stable identifier: the URI when present, otherwise the display name.
    pub fn id(&self) -> &str {
        match self.uri.as_deref() {
            Some(uri) if !uri.is_empty() => uri,
            _ => &self.name,
        }
    }

    /// Human-readable label for a voice picker, e.g. `"Amélie (fr-CA)"`.
    pub fn label(&self) -> String {
        let language = if self.language.is_empty() {
            "unknown"
        } else {
            &self.language
        };
        format!("{} ({language})", self.name)
    }
}

/// The voices usable for speaking and the one currently selected.
///
/// The platform may announce its voice list any number of times; every
/// announcement goes through [`VoiceCatalog::refresh`], which keeps the
/// previous selection whenever that voice is still present.
pub struct VoiceCatalog {
    prefs: VoicePreferences,
    voices: Vec<VoiceDescriptor>,
    selected: Option<String>,
}

impl Default for VoiceCatalog {
    fn default() -> Self {
        Self::new(VoicePreferences::default())
    }
}

impl VoiceCatalog {
    pub fn new(prefs: VoicePreferences) -> Self {
        Self {
            prefs,
            voices: Vec::new(),
            selected: None,
        }
    }

    /// Rebuild the candidate list from the platform's voices and re-resolve
    /// the selection.
    ///
    /// Returns the number of candidates; 0 means the platform default voice
    /// will be used.
    pub fn refresh(&mut self, raw: &[VoiceDescriptor]) -> usize {
        self.voices = self.candidates(raw);

        let chosen = self.choose().map(|voice| voice.id().to_string());
        match chosen {
            Some(id) => {
                if self.selected.as_deref() != Some(id.as_str()) {
                    log::info!("Selected voice '{id}'");
                }
                self.selected = Some(id);
            }
            None => {
                if self.selected.is_some() {
                    log::info!("No voices available, using platform default");
                }
                self.selected = None;
            }
        }

        log::debug!("Voice catalog refreshed: {} candidates", self.voices.len());
        self.voices.len()
    }

    /// Override the selection with a voice picked by the learner.
    ///
    /// An identifier that is not among the current candidates clears the
    /// selection, falling back to the platform default.
    pub fn set_selection(&mut self, id: Option<&str>) {
        self.selected = id
            .and_then(|id| self.voices.iter().find(|voice| voice.id() == id))
            .map(|voice| voice.id().to_string());

        match self.selected.as_deref() {
            Some(id) => log::debug!("Voice selection set to '{id}'"),
            None => log::debug!("Voice selection cleared"),
        }
    }

    pub fn voices(&self) -> &[VoiceDescriptor] {
        &self.voices
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// The selected voice, or `None` for the platform default.
    pub fn selected(&self) -> Option<&VoiceDescriptor> {
        let id = self.selected.as_deref()?;
        self.voices.iter().find(|voice| voice.id() == id)
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }

    /// Voices in the preferred language, or all of them when there are none.
    fn candidates(&self, raw: &[VoiceDescriptor]) -> Vec<VoiceDescriptor> {
        let prefix = self.prefs.language_prefix.to_lowercase();
        let preferred: Vec<VoiceDescriptor> = raw
            .iter()
            .filter(|voice| voice.language.to_lowercase().starts_with(&prefix))
            .cloned()
            .collect();

        if preferred.is_empty() {
            raw.to_vec()
        } else {
            preferred
        }
    }

    fn choose(&self) -> Option<&VoiceDescriptor> {
        if let Some(current) = self.selected.as_deref() {
            if let Some(voice) = self.voices.iter().find(|voice| voice.id() == current) {
                return Some(voice);
            }
        }

        let hint = self.prefs.name_hint.to_lowercase();
        self.voices
            .iter()
            .find(|voice| {
                voice.name == self.prefs.preferred_name
                    && voice.language == self.prefs.preferred_language
            })
            .or_else(|| {
                self.voices
                    .iter()
                    .find(|voice| voice.name.to_lowercase().contains(&hint))
            })
            .or_else(|| self.voices.first())
    }
}

/// Load a list of voice descriptors from a JSON array.
///
/// Accepts both this crate's field names and the Web Speech API ones
/// (`lang`, `voiceURI`).
pub fn load_voices(path: &Path) -> Result<Vec<VoiceDescriptor>, TrainerError> {
    let content = std::fs::read_to_string(path)?;
    let voices: Vec<VoiceDescriptor> = serde_json::from_str(&content)
        .map_err(|e| TrainerError::VoiceParse(format!("{}: {e}", path.display())))?;

    log::info!("Loaded {} voices from {}", voices.len(), path.display());
    Ok(voices)
}
