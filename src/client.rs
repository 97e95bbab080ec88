//! The API client and its error types.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use bytes::Bytes;
use reqwest::header::AUTHORIZATION;
use reqwest::Method;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, debug_span, warn, Instrument};

use crate::endpoint::Api;
use crate::http::{
    FormData, HttpClient, ReqwestHttpClient, RequestEnvelope, ResponseInfo, TransportError,
    UploadEnvelope, JSON_CONTENT_TYPE,
};
use crate::options::{Configuration, SecretString, TransportOptions, DEFAULT_API_VERSION};
use crate::request::{ChatRequest, ImageRequest, SpeechRequest, WhisperRequest};
use crate::response;

/// Errors that can occur during client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Remote service error: {0}")]
    Remote(#[from] RemoteServiceError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Transport(TransportError::Http(e))
    }
}

/// Error object returned by the remote API, kept verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteServiceError {
    error: Map<String, Value>,
}

impl RemoteServiceError {
    pub fn new(error: Map<String, Value>) -> Self {
        Self { error }
    }

    /// The raw `error` object.
    pub fn raw(&self) -> &Map<String, Value> {
        &self.error
    }

    pub fn into_raw(self) -> Map<String, Value> {
        self.error
    }

    pub fn message(&self) -> Option<&str> {
        self.field("message")
    }

    pub fn error_type(&self) -> Option<&str> {
        self.field("type")
    }

    pub fn code(&self) -> Option<&str> {
        self.field("code")
    }

    fn field(&self, key: &str) -> Option<&str> {
        self.error.get(key).and_then(Value::as_str)
    }
}

impl fmt::Display for RemoteServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.message(), self.error_type()) {
            (Some(message), Some(error_type)) => write!(f, "{message} ({error_type})"),
            (Some(message), None) => f.write_str(message),
            _ => write!(f, "{}", Value::Object(self.error.clone())),
        }
    }
}

impl std::error::Error for RemoteServiceError {}

/// Client for the chat, speech, whisper, image and models operations.
///
/// Every operation returns a `Result` the caller inspects; nothing is retried.
///
/// # Example
/// ```no_run
/// use simple_chatgpt::client::ChatGpt;
/// use simple_chatgpt::options::Configuration;
/// use simple_chatgpt::request::ImageRequest;
/// use simple_chatgpt::model::ImageSize;
///
/// # async fn run() -> Result<(), simple_chatgpt::client::ClientError> {
/// let client = ChatGpt::new(Configuration::new("sk-..."));
///
/// let reply = client.chat("What is the capital of France?").await?;
/// println!("{:?}", reply);
///
/// let images = client
///     .image(ImageRequest::new("a cat").with_count(2).with_size(ImageSize::S512x512))
///     .await?;
/// println!("{:?}", images);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ChatGpt<H = ReqwestHttpClient> {
    config: Configuration,
    http: H,
}

impl ChatGpt<ReqwestHttpClient> {
    /// Create a client using the default reqwest transport.
    pub fn new(config: Configuration) -> Self {
        Self::with_http_client(config, ReqwestHttpClient::default())
    }

    /// Create a client whose reqwest transport applies `transport_options`.
    pub fn with_transport_options(
        config: Configuration,
        transport_options: TransportOptions,
    ) -> Result<Self, ClientError> {
        Ok(Self::with_http_client(
            config,
            ReqwestHttpClient::new(transport_options)?,
        ))
    }
}

impl<H: HttpClient> ChatGpt<H> {
    pub fn with_http_client(config: Configuration, http: H) -> Self {
        Self { config, http }
    }

    /// Replace the credential and reset the API version to `v1`. The base URL is kept.
    pub fn configure(&mut self, credential: impl Into<SecretString>) {
        self.configure_with_version(credential, DEFAULT_API_VERSION);
    }

    /// Replace the credential and API version. The base URL is kept.
    pub fn configure_with_version(
        &mut self,
        credential: impl Into<SecretString>,
        api_version: impl Into<String>,
    ) {
        let base_url = self.config.base_url().to_string();
        self.config = Configuration::new(credential)
            .with_api_version(api_version)
            .with_base_url(base_url);
    }

    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    pub fn http_client(&self) -> &H {
        &self.http
    }

    fn authorization_headers(&self) -> HashMap<String, String> {
        HashMap::from([(AUTHORIZATION.to_string(), self.config.authorization())])
    }

    /// Send a JSON request and return the raw response without interpreting it.
    pub async fn execute(
        &self,
        method: Method,
        url: String,
        body: Option<String>,
    ) -> Result<ResponseInfo, ClientError> {
        debug!(%method, %url, "sending request");

        let envelope = RequestEnvelope {
            method,
            url,
            content_type: JSON_CONTENT_TYPE,
            headers: self.authorization_headers(),
            body,
        };

        let info = self.http.request(envelope).await?;
        debug!(status = %info.status, bytes = info.data.len(), "received response");
        Ok(info)
    }

    /// Send a multipart upload and return the raw response.
    pub async fn upload(
        &self,
        url: String,
        form_data: FormData,
        parameters: BTreeMap<String, String>,
    ) -> Result<ResponseInfo, ClientError> {
        debug!(%url, field = %form_data.name, bytes = form_data.data.len(), "uploading");

        let envelope = UploadEnvelope {
            url,
            form_data,
            parameters,
            headers: self.authorization_headers(),
        };

        let info = self.http.upload(envelope).await?;
        debug!(status = %info.status, bytes = info.data.len(), "received response");
        Ok(info)
    }

    /// Chat completion. Returns `choices[0].message.content`.
    pub async fn chat(&self, request: impl Into<ChatRequest>) -> Result<Option<String>, ClientError> {
        let request = request.into();
        let info = self
            .execute(Method::POST, Api::Chat.url(&self.config), Some(request.body()))
            .instrument(operation_span(Api::Chat))
            .await?;

        response::chat_content(&info.data).map_err(log_remote_error)
    }

    /// Text to speech. Returns the response body as-is.
    pub async fn speech(&self, request: impl Into<SpeechRequest>) -> Result<Option<Bytes>, ClientError> {
        let request = request.into();
        let info = self
            .execute(Method::POST, Api::Speech.url(&self.config), Some(request.body()))
            .instrument(operation_span(Api::Speech))
            .await?;

        Ok(response::speech_audio(info.data))
    }

    /// Speech to text. Returns the `text` field of the transcription.
    pub async fn whisper(&self, request: WhisperRequest) -> Result<Option<String>, ClientError> {
        let info = self
            .upload(
                Api::Whisper.url(&self.config),
                request.form_data(),
                request.parameters(),
            )
            .instrument(operation_span(Api::Whisper))
            .await?;

        Ok(response::whisper_text(&info.data))
    }

    /// Image generation. Returns the `data` array.
    pub async fn image(
        &self,
        request: impl Into<ImageRequest>,
    ) -> Result<Option<Vec<Value>>, ClientError> {
        let request = request.into();
        let info = self
            .execute(Method::POST, Api::Images.url(&self.config), Some(request.body()))
            .instrument(operation_span(Api::Images))
            .await?;

        response::image_data(&info.data).map_err(log_remote_error)
    }

    /// Model listing. Returns the whole payload untyped.
    pub async fn models(&self) -> Result<Option<Value>, ClientError> {
        let info = self
            .execute(Method::GET, Api::Models.url(&self.config), None)
            .instrument(operation_span(Api::Models))
            .await?;

        Ok(response::models_payload(&info.data))
    }
}

fn operation_span(api: Api) -> tracing::Span {
    debug_span!("operation", op = ?api)
}

fn log_remote_error(error: RemoteServiceError) -> ClientError {
    warn!(
        message = error.message().unwrap_or_default(),
        error_type = error.error_type().unwrap_or_default(),
        "remote service returned an error"
    );
    ClientError::Remote(error)
}
