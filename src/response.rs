//! Normalization of raw response bodies into operation results.
//!
//! Parsing is lenient: a body that is not the expected JSON, or that lacks the
//! expected field, yields `Ok(None)`. Only chat and image bodies carrying an
//! `error` object are turned into a [`RemoteServiceError`].

use bytes::Bytes;
use serde_json::Value;

use crate::client::RemoteServiceError;

/// Parse the body as a top-level JSON object.
fn json_object(data: &[u8]) -> Option<Value> {
    serde_json::from_slice::<Value>(data)
        .ok()
        .filter(Value::is_object)
}

fn check_remote_error(object: &Value) -> Result<(), RemoteServiceError> {
    match object.get("error") {
        Some(Value::Object(error)) => Err(RemoteServiceError::new(error.clone())),
        _ => Ok(()),
    }
}

/// `choices[0].message.content` of a chat completion.
pub fn chat_content(data: &[u8]) -> Result<Option<String>, RemoteServiceError> {
    let Some(object) = json_object(data) else {
        return Ok(None);
    };
    check_remote_error(&object)?;

    Ok(object
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(str::to_string))
}

/// Speech bodies are returned untouched; an empty body maps to `None`.
pub fn speech_audio(data: Bytes) -> Option<Bytes> {
    Some(data).filter(|data| !data.is_empty())
}

/// `text` of a transcription. Error objects are not inspected.
pub fn whisper_text(data: &[u8]) -> Option<String> {
    json_object(data)?
        .get("text")
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// `data` array of an image generation.
pub fn image_data(data: &[u8]) -> Result<Option<Vec<Value>>, RemoteServiceError> {
    let Some(mut object) = json_object(data) else {
        return Ok(None);
    };
    check_remote_error(&object)?;

    match object.get_mut("data").map(Value::take) {
        Some(Value::Array(items)) => Ok(Some(items)),
        _ => Ok(None),
    }
}

/// The whole models payload, verbatim. Unparseable bodies map to `None`.
pub fn models_payload(data: &[u8]) -> Option<Value> {
    serde_json::from_slice(data).ok()
}
