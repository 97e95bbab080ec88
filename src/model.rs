//! Model, voice, size and audio-type selectors with their canonical wire strings.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Returned by `FromStr` when a string names no variant of a closed selector.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Declares a closed selector enum with `value()`, `ALL`, `Display` and `FromStr`.
macro_rules! selector {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident => $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[doc = concat!("`", $value, "`")]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Canonical string understood by the remote service.
            pub fn value(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.value())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $name::ALL
                    .iter()
                    .copied()
                    .find(|variant| variant.value() == s)
                    .ok_or_else(|| UnknownVariant {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

selector! {
    /// Text-to-speech model.
    TtsModel, "tts model" {
        #[default]
        V1 => "tts-1",
        V1Hd => "tts-1-hd",
    }
}

selector! {
    /// Voice used for speech synthesis.
    Voice, "voice" {
        #[default]
        Alloy => "alloy",
        Echo => "echo",
        Fable => "fable",
        Onyx => "onyx",
        Nova => "nova",
        Shimmer => "shimmer",
    }
}

selector! {
    /// Speech-to-text model.
    WhisperModel, "whisper model" {
        #[default]
        V1 => "whisper-1",
    }
}

selector! {
    /// Image generation model.
    ImageModel, "image model" {
        #[default]
        V2 => "dall-e-2",
        V3 => "dall-e-3",
    }
}

selector! {
    /// Size of generated images.
    ImageSize, "image size" {
        #[default]
        S256x256 => "256x256",
        S512x512 => "512x512",
        S1024x1024 => "1024x1024",
        S1024x1792 => "1024x1792",
        S1792x1024 => "1792x1024",
    }
}

/// Container type of uploaded audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WhisperAudioType {
    Flac,
    #[default]
    Mp3,
    Mp4,
    Mpeg,
    Mpga,
    M4a,
    Ogg,
    Wav,
    Webm,
}

impl WhisperAudioType {
    pub const ALL: &'static [WhisperAudioType] = &[
        WhisperAudioType::Flac,
        WhisperAudioType::Mp3,
        WhisperAudioType::Mp4,
        WhisperAudioType::Mpeg,
        WhisperAudioType::Mpga,
        WhisperAudioType::M4a,
        WhisperAudioType::Ogg,
        WhisperAudioType::Wav,
        WhisperAudioType::Webm,
    ];

    /// MIME type sent with the file part.
    pub fn content_type(&self) -> &'static str {
        match self {
            WhisperAudioType::Flac => "audio/flac",
            WhisperAudioType::Mp3 | WhisperAudioType::Mpeg | WhisperAudioType::Mpga => {
                "audio/mpeg"
            }
            WhisperAudioType::Mp4 => "audio/mp4",
            WhisperAudioType::M4a => "audio/x-m4a",
            WhisperAudioType::Ogg => "audio/ogg",
            WhisperAudioType::Wav => "audio/wav",
            WhisperAudioType::Webm => "audio/webm",
        }
    }

    /// File extension, e.g. `mp3`.
    pub fn extension(&self) -> &'static str {
        match self {
            WhisperAudioType::Flac => "flac",
            WhisperAudioType::Mp3 => "mp3",
            WhisperAudioType::Mp4 => "mp4",
            WhisperAudioType::Mpeg => "mpeg",
            WhisperAudioType::Mpga => "mpga",
            WhisperAudioType::M4a => "m4a",
            WhisperAudioType::Ogg => "ogg",
            WhisperAudioType::Wav => "wav",
            WhisperAudioType::Webm => "webm",
        }
    }
}

impl FromStr for WhisperAudioType {
    type Err = UnknownVariant;

    /// Parses a file extension, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ext = s.to_ascii_lowercase();
        WhisperAudioType::ALL
            .iter()
            .copied()
            .find(|kind| kind.extension() == ext)
            .ok_or_else(|| UnknownVariant {
                kind: "audio type",
                value: s.to_string(),
            })
    }
}

/// Chat completion model.
///
/// `Custom` carries any model name not listed here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ChatModel {
    /// `gpt-3.5-turbo-0125`
    #[default]
    Gpt35Turbo,
    /// `gpt-4-0125-preview`
    Gpt4,
    /// `gpt-4o`
    Gpt4o,
    /// `gpt-4o-mini`
    Gpt4oMini,
    Custom(String),
}

impl ChatModel {
    pub const LISTED: &'static [ChatModel] = &[
        ChatModel::Gpt35Turbo,
        ChatModel::Gpt4,
        ChatModel::Gpt4o,
        ChatModel::Gpt4oMini,
    ];

    pub fn value(&self) -> &str {
        match self {
            ChatModel::Gpt35Turbo => "gpt-3.5-turbo-0125",
            ChatModel::Gpt4 => "gpt-4-0125-preview",
            ChatModel::Gpt4o => "gpt-4o",
            ChatModel::Gpt4oMini => "gpt-4o-mini",
            ChatModel::Custom(name) => name,
        }
    }
}

impl fmt::Display for ChatModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl FromStr for ChatModel {
    type Err = std::convert::Infallible;

    /// Unlisted names become [`ChatModel::Custom`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ChatModel::LISTED
            .iter()
            .find(|model| model.value() == s)
            .cloned()
            .unwrap_or_else(|| ChatModel::Custom(s.to_string())))
    }
}

impl From<&str> for ChatModel {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(model) => model,
            Err(never) => match never {},
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_values() {
        assert_eq!(ChatModel::default().value(), "gpt-3.5-turbo-0125");
        assert_eq!(TtsModel::default().value(), "tts-1");
        assert_eq!(TtsModel::V1Hd.value(), "tts-1-hd");
        assert_eq!(Voice::default().value(), "alloy");
        assert_eq!(WhisperModel::default().value(), "whisper-1");
        assert_eq!(ImageModel::default().value(), "dall-e-2");
        assert_eq!(ImageSize::default().value(), "256x256");
        assert_eq!(ImageSize::S1792x1024.to_string(), "1792x1024");
    }

    #[test]
    fn test_chat_model_custom() {
        let model = ChatModel::from("gpt-5-preview");
        assert_eq!(model, ChatModel::Custom("gpt-5-preview".to_string()));
        assert_eq!(model.value(), "gpt-5-preview");
        assert_eq!(ChatModel::from("gpt-4o"), ChatModel::Gpt4o);
    }

    #[test]
    fn test_selector_from_str() {
        assert_eq!("shimmer".parse::<Voice>(), Ok(Voice::Shimmer));
        assert_eq!("512x512".parse::<ImageSize>(), Ok(ImageSize::S512x512));
        let err = "whisper-2".parse::<WhisperModel>().unwrap_err();
        assert_eq!(err.to_string(), "unknown whisper model: whisper-2");
    }

    #[test]
    fn test_audio_type() {
        assert_eq!(WhisperAudioType::Mp3.content_type(), "audio/mpeg");
        assert_eq!(WhisperAudioType::Wav.content_type(), "audio/wav");
        assert_eq!(WhisperAudioType::M4a.content_type(), "audio/x-m4a");
        assert_eq!("FLAC".parse::<WhisperAudioType>(), Ok(WhisperAudioType::Flac));
        assert!("aiff".parse::<WhisperAudioType>().is_err());
    }
}
