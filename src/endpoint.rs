//! Mapping from logical API operations to request URLs.

use crate::options::Configuration;

/// Logical operations exposed by the remote API.
///
/// Only [`Api::Chat`], [`Api::Speech`], [`Api::Whisper`], [`Api::Images`] and
/// [`Api::Models`] have request builders; the others are reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Api {
    Chat,
    Speech,
    Whisper,
    Images,
    Models,
    Embeddings,
    FineTuning,
    Files,
    Moderations,
    Assistants,
    Threads,
}

impl Api {
    pub const ALL: [Api; 11] = [
        Api::Chat,
        Api::Speech,
        Api::Whisper,
        Api::Images,
        Api::Models,
        Api::Embeddings,
        Api::FineTuning,
        Api::Files,
        Api::Moderations,
        Api::Assistants,
        Api::Threads,
    ];

    /// Path segment below the versioned prefix.
    pub fn path(&self) -> &'static str {
        match self {
            Api::Chat => "chat/completions",
            Api::Speech => "audio/speech",
            Api::Whisper => "audio/transcriptions",
            Api::Images => "images/generations",
            Api::Models => "models",
            Api::Embeddings => "embeddings",
            Api::FineTuning => "fine_tuning/jobs",
            Api::Files => "files",
            Api::Moderations => "moderations",
            Api::Assistants => "assistants",
            Api::Threads => "threads",
        }
    }

    /// Fully-qualified URL: `{base_url}/{api_version}/{path}`.
    ///
    /// # Example
    /// ```
    /// use simple_chatgpt::endpoint::Api;
    /// use simple_chatgpt::options::Configuration;
    ///
    /// let config = Configuration::new("sk-test");
    /// assert_eq!(Api::Chat.url(&config), "https://api.openai.com/v1/chat/completions");
    /// ```
    pub fn url(&self, config: &Configuration) -> String {
        format!("{}/{}/{}", config.base_url(), config.api_version(), self.path())
    }

    pub fn is_implemented(&self) -> bool {
        matches!(
            self,
            Api::Chat | Api::Speech | Api::Whisper | Api::Images | Api::Models
        )
    }
}
