//! End-to-end tests of `ChatGpt` over the reqwest transport.
//!
//! A wiremock server stands in for the remote API; response bodies follow the
//! shapes documented at https://platform.openai.com/docs/api-reference

use std::time::Duration;

use serde_json::json;
use simple_chatgpt::model::{ChatModel, ImageSize, WhisperAudioType};
use simple_chatgpt::options::TransportOptions;
use simple_chatgpt::request::{ChatRequest, ImageRequest, WhisperRequest};
use simple_chatgpt::{ChatGpt, ClientError, Configuration};
use wiremock::matchers::{body_json, body_string_contains, header, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn chat_completion_response() -> serde_json::Value {
    json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "created": 1677652288,
        "model": "gpt-4o",
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": "Paris"
            },
            "finish_reason": "stop"
        }]
    })
}

fn error_response(message: &str, error_type: &str) -> serde_json::Value {
    json!({
        "error": {
            "message": message,
            "type": error_type,
            "param": null,
            "code": null
        }
    })
}

fn client_for(server: &MockServer) -> ChatGpt {
    ChatGpt::new(Configuration::new("test-api-key").with_base_url(server.uri()))
}

#[tokio::test]
async fn test_chat_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("Authorization", "Bearer test-api-key"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({
            "model": "gpt-4o",
            "messages": [{"role": "user", "content": "Capital of \"France\"?"}],
            "temperature": 0.7
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_completion_response()))
        .expect(1)
        .mount(&server)
        .await;

    let reply = client_for(&server)
        .chat(ChatRequest::new("Capital of \"France\"?").with_model(ChatModel::Gpt4o))
        .await
        .unwrap();
    assert_eq!(reply, Some("Paris".to_string()));
}

#[tokio::test]
async fn test_chat_unauthorized_is_remote_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(error_response("Incorrect API key provided", "invalid_request_error")),
        )
        .mount(&server)
        .await;

    match client_for(&server).chat("hi").await {
        Err(ClientError::Remote(error)) => {
            assert_eq!(error.message(), Some("Incorrect API key provided"));
            assert_eq!(error.error_type(), Some("invalid_request_error"));
            assert_eq!(error.raw()["param"], serde_json::Value::Null);
        }
        other => panic!("expected remote error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_speech_binary_body() {
    let server = MockServer::start().await;
    let audio = vec![0x49u8, 0x44, 0x33, 0x04, 0x00];

    Mock::given(method("POST"))
        .and(path("/v1/audio/speech"))
        .and(body_json(json!({"model": "tts-1", "input": "hello", "voice": "alloy", "speed": 1.0})))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(audio.clone()))
        .mount(&server)
        .await;

    let bytes = client_for(&server).speech("hello").await.unwrap().unwrap();
    assert_eq!(bytes.as_ref(), audio.as_slice());
}

#[tokio::test]
async fn test_whisper_multipart_upload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/audio/transcriptions"))
        .and(header("Authorization", "Bearer test-api-key"))
        .and(header_regex("Content-Type", "^multipart/form-data; boundary="))
        .and(body_string_contains("name=\"file\""))
        .and(body_string_contains("filename=\"whisper.mp3\""))
        .and(body_string_contains("audio/wav"))
        .and(body_string_contains("RIFF-fake-wave"))
        .and(body_string_contains("name=\"model\""))
        .and(body_string_contains("whisper-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"text": "hello world"})))
        .expect(1)
        .mount(&server)
        .await;

    let text = client_for(&server)
        .whisper(WhisperRequest::new(WhisperAudioType::Wav, b"RIFF-fake-wave".to_vec()))
        .await
        .unwrap();
    assert_eq!(text, Some("hello world".to_string()));
}

#[tokio::test]
async fn test_image_generation() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/images/generations"))
        .and(body_json(json!({"model": "dall-e-3", "prompt": "a cat", "n": 2, "size": "1024x1024"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "created": 1589478378,
            "data": [{"url": "https://example.com/1.png"}, {"url": "https://example.com/2.png"}]
        })))
        .mount(&server)
        .await;

    let images = client_for(&server)
        .image(
            ImageRequest::new("a cat")
                .with_model(simple_chatgpt::model::ImageModel::V3)
                .with_count(2)
                .with_size(ImageSize::S1024x1024),
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(images.len(), 2);
    assert_eq!(images[1]["url"], "https://example.com/2.png");
}

#[tokio::test]
async fn test_models_with_extra_headers() {
    let server = MockServer::start().await;
    let payload = json!({"object": "list", "data": [{"id": "gpt-4o", "object": "model"}]});

    Mock::given(method("GET"))
        .and(path("/v2/models"))
        .and(header("OpenAI-Organization", "org-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload.clone()))
        .expect(2)
        .mount(&server)
        .await;

    let options = TransportOptions::default()
        .with_timeout(Duration::from_secs(5))
        .with_header("OpenAI-Organization".to_string(), "org-123".to_string());
    let config = Configuration::new("test-api-key")
        .with_api_version("v2")
        .with_base_url(server.uri());
    let client = ChatGpt::with_transport_options(config, options).unwrap();

    let first = client.models().await.unwrap();
    let second = client.models().await.unwrap();
    assert_eq!(first, Some(payload));
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_connection_failure_is_transport_error() {
    // Nothing listens on port 1.
    let client = ChatGpt::new(Configuration::new("test-api-key").with_base_url("http://127.0.0.1:1"));
    assert!(matches!(client.models().await, Err(ClientError::Transport(_))));
}

#[tokio::test]
async fn test_extra_authorization_header_is_replaced() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    let options =
        TransportOptions::default().with_header("Authorization".to_string(), "Bearer other".to_string());
    let config = Configuration::new("test-api-key").with_base_url(server.uri());
    let client = ChatGpt::with_transport_options(config, options).unwrap();
    client.models().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let values: Vec<&str> = requests[0]
        .headers
        .get_all("authorization")
        .iter()
        .map(|value| value.to_str().unwrap())
        .collect();
    assert_eq!(values, vec!["Bearer test-api-key"]);
}
