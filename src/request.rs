//! Per-operation request parameters and their wire bodies.
//!
//! Each request type carries the defaults of its operation; `with_*` methods
//! override them. JSON bodies are produced with `serde_json`, so quotes and
//! control characters in user text are escaped. Non-finite numbers have no
//! JSON form and are sent as `null`.

use std::collections::BTreeMap;

use bytes::Bytes;
use serde_json::json;

use crate::http::FormData;
use crate::model::{ChatModel, ImageModel, ImageSize, TtsModel, Voice, WhisperAudioType, WhisperModel};

/// Filename sent with every audio upload.
pub const WHISPER_FILENAME: &str = "whisper.mp3";

/// Form field holding the uploaded audio.
pub const WHISPER_FILE_FIELD: &str = "file";

/// Parameters of a chat completion.
///
/// # Example
/// ```rust
/// use simple_chatgpt::model::ChatModel;
/// use simple_chatgpt::request::ChatRequest;
///
/// let request = ChatRequest::new("Hello!")
///     .with_model(ChatModel::Gpt4o)
///     .with_temperature(0.2);
/// assert_eq!(request.role, "user");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub model: ChatModel,
    pub role: String,
    /// Sampling temperature, not range-checked locally. `NaN` is sent as `null`.
    pub temperature: f64,
    pub content: String,
}

impl ChatRequest {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            model: ChatModel::default(),
            role: "user".to_string(),
            temperature: 0.7,
            content: content.into(),
        }
    }

    pub fn with_model(mut self, model: impl Into<ChatModel>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub(crate) fn body(&self) -> String {
        json!({
            "model": self.model.value(),
            "messages": [{"role": self.role, "content": self.content}],
            "temperature": self.temperature,
        })
        .to_string()
    }
}

impl From<&str> for ChatRequest {
    fn from(content: &str) -> Self {
        Self::new(content)
    }
}

impl From<String> for ChatRequest {
    fn from(content: String) -> Self {
        Self::new(content)
    }
}

/// Parameters of a text-to-speech request.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechRequest {
    pub model: TtsModel,
    pub voice: Voice,
    /// Playback speed; `NaN` is sent as `null`
    pub speed: f64,
    pub input: String,
}

impl SpeechRequest {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            model: TtsModel::default(),
            voice: Voice::default(),
            speed: 1.0,
            input: input.into(),
        }
    }

    pub fn with_model(mut self, model: TtsModel) -> Self {
        self.model = model;
        self
    }

    pub fn with_voice(mut self, voice: Voice) -> Self {
        self.voice = voice;
        self
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    pub(crate) fn body(&self) -> String {
        json!({
            "model": self.model.value(),
            "input": self.input,
            "voice": self.voice.value(),
            "speed": self.speed,
        })
        .to_string()
    }
}

impl From<&str> for SpeechRequest {
    fn from(input: &str) -> Self {
        Self::new(input)
    }
}

impl From<String> for SpeechRequest {
    fn from(input: String) -> Self {
        Self::new(input)
    }
}

/// Audio to transcribe.
#[derive(Debug, Clone, PartialEq)]
pub struct WhisperRequest {
    pub model: WhisperModel,
    pub audio_type: WhisperAudioType,
    pub data: Bytes,
}

impl WhisperRequest {
    pub fn new(audio_type: WhisperAudioType, data: impl Into<Bytes>) -> Self {
        Self {
            model: WhisperModel::default(),
            audio_type,
            data: data.into(),
        }
    }

    pub fn with_model(mut self, model: WhisperModel) -> Self {
        self.model = model;
        self
    }

    pub(crate) fn form_data(&self) -> FormData {
        FormData {
            name: WHISPER_FILE_FIELD.to_string(),
            filename: WHISPER_FILENAME.to_string(),
            content_type: self.audio_type.content_type().to_string(),
            data: self.data.clone(),
        }
    }

    pub(crate) fn parameters(&self) -> BTreeMap<String, String> {
        BTreeMap::from([("model".to_string(), self.model.value().to_string())])
    }
}

/// Parameters of an image generation.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRequest {
    pub model: ImageModel,
    pub prompt: String,
    /// Number of images; the remote service accepts 1 to 10
    pub n: u32,
    pub size: ImageSize,
}

impl ImageRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            model: ImageModel::default(),
            prompt: prompt.into(),
            n: 1,
            size: ImageSize::default(),
        }
    }

    pub fn with_model(mut self, model: ImageModel) -> Self {
        self.model = model;
        self
    }

    pub fn with_count(mut self, n: u32) -> Self {
        self.n = n;
        self
    }

    pub fn with_size(mut self, size: ImageSize) -> Self {
        self.size = size;
        self
    }

    pub(crate) fn body(&self) -> String {
        json!({
            "model": self.model.value(),
            "prompt": self.prompt,
            "n": self.n,
            "size": self.size.value(),
        })
        .to_string()
    }
}

impl From<&str> for ImageRequest {
    fn from(prompt: &str) -> Self {
        Self::new(prompt)
    }
}

impl From<String> for ImageRequest {
    fn from(prompt: String) -> Self {
        Self::new(prompt)
    }
}
