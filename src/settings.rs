//! Configuration for the AI translation front end
//!
//! Loaded once by the caller and passed explicitly to [`crate::prompt`];
//! nothing in the transcoding core reads it.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default OpenAI model
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
/// Default Gemini model
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
/// Default target language
pub const DEFAULT_TRANSLATE_TO: &str = "English";
/// Keys shorter than this are treated as not configured
pub const MIN_API_KEY_LEN: usize = 10;

/// Hosted model provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// OpenAI chat completions
    #[default]
    OpenAI,
    /// Google Gemini
    Gemini,
}

/// Settings for translating converted text with a hosted model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorSettings {
    /// Provider requests are sent to
    pub provider: Provider,
    /// OpenAI API key
    pub openai_api_key: Option<String>,
    /// Gemini API key
    pub gemini_api_key: Option<String>,
    /// OpenAI model name
    pub openai_model: String,
    /// Gemini model name
    pub gemini_model: String,
    /// Extra context appended to every prompt
    pub custom_context: Option<String>,
    /// Language to translate into
    pub translate_to: String,
    /// Source language, auto-detected when absent
    pub translate_from: Option<String>,
}

impl Default for TranslatorSettings {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            openai_api_key: None,
            gemini_api_key: None,
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            custom_context: None,
            translate_to: DEFAULT_TRANSLATE_TO.to_string(),
            translate_from: None,
        }
    }
}

impl TranslatorSettings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Settings(e.to_string()))
    }

    /// Read settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| Error::Settings(format!("{}: {}", path.display(), e)))?;
        let settings = Self::from_json(&json)?;
        log::debug!("loaded translator settings from {}", path.display());
        Ok(settings)
    }

    /// Serialize settings as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Settings(e.to_string()))
    }

    /// Model name for the selected provider, falling back to its default when blank
    pub fn model(&self) -> &str {
        let (model, default) = match self.provider {
            Provider::OpenAI => (&self.openai_model, DEFAULT_OPENAI_MODEL),
            Provider::Gemini => (&self.gemini_model, DEFAULT_GEMINI_MODEL),
        };
        if model.trim().is_empty() { default } else { model }
    }

    /// API key for the selected provider, if one is configured
    ///
    /// A key counts as configured once it holds at least [`MIN_API_KEY_LEN`]
    /// characters after trimming.
    pub fn api_key(&self) -> Option<&str> {
        let key = match self.provider {
            Provider::OpenAI => self.openai_api_key.as_deref(),
            Provider::Gemini => self.gemini_api_key.as_deref(),
        };
        key.filter(|key| key.trim().chars().count() >= MIN_API_KEY_LEN)
    }

    /// Target language, falling back to the default when blank
    pub fn target_language(&self) -> &str {
        if self.translate_to.trim().is_empty() {
            DEFAULT_TRANSLATE_TO
        } else {
            &self.translate_to
        }
    }
}
