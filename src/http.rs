//! HTTP transport capability and its reqwest implementation.
//!
//! The client builds a [`RequestEnvelope`] (or an [`UploadEnvelope`] for
//! multipart uploads) and hands it to an [`HttpClient`]. The transport only
//! moves bytes: it reports the status and body of every response, whatever
//! the status code, and fails only when no response was obtained.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use thiserror::Error;

use crate::options::TransportOptions;

/// Content type of every JSON request body.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Errors raised when no response could be obtained.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Transport error: {0}")]
    Other(String),
}

/// A fully-built request, ready for transport.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestEnvelope {
    pub method: Method,
    pub url: String,
    pub content_type: &'static str,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

/// The file part of a multipart upload.
#[derive(Debug, Clone, PartialEq)]
pub struct FormData {
    /// Form field name
    pub name: String,
    pub filename: String,
    pub content_type: String,
    pub data: Bytes,
}

/// A multipart upload: one file part plus string parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadEnvelope {
    pub url: String,
    pub form_data: FormData,
    pub parameters: BTreeMap<String, String>,
    pub headers: HashMap<String, String>,
}

/// Raw response: status plus body bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseInfo {
    pub status: StatusCode,
    pub data: Bytes,
}

impl ResponseInfo {
    pub fn new(status: StatusCode, data: impl Into<Bytes>) -> Self {
        Self {
            status,
            data: data.into(),
        }
    }
}

/// Transport capability the client delegates to.
///
/// Implementations own connection handling, TLS and timeouts.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Send a request with an optional JSON body.
    async fn request(&self, envelope: RequestEnvelope) -> Result<ResponseInfo, TransportError>;

    /// Send a `multipart/form-data` upload.
    async fn upload(&self, envelope: UploadEnvelope) -> Result<ResponseInfo, TransportError>;
}

/// Build a configured HTTP client from transport options.
///
/// This applies common configuration like timeouts and proxies.
pub fn build_http_client(transport_options: &TransportOptions) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder();

    if let Some(timeout) = transport_options.timeout {
        builder = builder.timeout(timeout);
    }

    if let Some(proxy_url) = &transport_options.proxy {
        builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
    }

    builder.build()
}

/// Add headers to a request.
pub fn add_headers(mut request: RequestBuilder, headers: &HashMap<String, String>) -> RequestBuilder {
    for (key, value) in headers {
        request = request.header(key, value);
    }
    request
}

/// Convert envelope headers into a `HeaderMap`.
pub fn header_map(headers: &HashMap<String, String>) -> Result<HeaderMap, TransportError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (key, value) in headers {
        let name = HeaderName::from_bytes(key.as_bytes())
            .map_err(|e| TransportError::InvalidRequest(format!("header name {key}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| TransportError::InvalidRequest(format!("header value for {key}: {e}")))?;
        map.insert(name, value);
    }
    Ok(map)
}

/// Apply transport-level extra headers, then the envelope headers.
///
/// Envelope headers replace extra headers of the same name, so
/// `Authorization` always comes from the client configuration.
pub fn apply_headers(
    request: RequestBuilder,
    extra_headers: &Option<HashMap<String, String>>,
    envelope_headers: &HashMap<String, String>,
) -> Result<RequestBuilder, TransportError> {
    let request = add_extra_headers(request, extra_headers);
    Ok(request.headers(header_map(envelope_headers)?))
}

/// Add extra headers to a request if specified in transport options.
pub fn add_extra_headers(
    request: RequestBuilder,
    extra_headers: &Option<HashMap<String, String>>,
) -> RequestBuilder {
    match extra_headers {
        Some(headers) => add_headers(request, headers),
        None => request,
    }
}

/// [`HttpClient`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
    transport_options: TransportOptions,
}

impl ReqwestHttpClient {
    pub fn new(transport_options: TransportOptions) -> Result<Self, TransportError> {
        let client = build_http_client(&transport_options)?;
        Ok(Self {
            client,
            transport_options,
        })
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            transport_options: TransportOptions::default(),
        }
    }

    async fn finish(request: RequestBuilder) -> Result<ResponseInfo, TransportError> {
        let response = request.send().await?;
        let status = response.status();
        let data = response.bytes().await?;
        Ok(ResponseInfo { status, data })
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::with_client(Client::new())
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn request(&self, envelope: RequestEnvelope) -> Result<ResponseInfo, TransportError> {
        let mut req = self
            .client
            .request(envelope.method, &envelope.url)
            .header(CONTENT_TYPE, envelope.content_type);

        req = apply_headers(req, &self.transport_options.extra_headers, &envelope.headers)?;

        if let Some(body) = envelope.body {
            req = req.body(body);
        }

        Self::finish(req).await
    }

    async fn upload(&self, envelope: UploadEnvelope) -> Result<ResponseInfo, TransportError> {
        let FormData {
            name,
            filename,
            content_type,
            data,
        } = envelope.form_data;

        let part = Part::bytes(data.to_vec())
            .file_name(filename)
            .mime_str(&content_type)
            .map_err(|e| TransportError::InvalidRequest(format!("content type {content_type}: {e}")))?;

        let form = envelope
            .parameters
            .into_iter()
            .fold(Form::new().part(name, part), |form, (key, value)| form.text(key, value));

        let req = apply_headers(
            self.client.post(&envelope.url),
            &self.transport_options.extra_headers,
            &envelope.headers,
        )?;

        Self::finish(req.multipart(form)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::AUTHORIZATION;
    use std::time::Duration;

    #[test]
    fn test_build_http_client() {
        let transport_options = TransportOptions::default().with_timeout(Duration::from_secs(30));

        let client = build_http_client(&transport_options);
        assert!(client.is_ok());
    }

    #[test]
    fn test_build_http_client_with_proxy() {
        let transport_options =
            TransportOptions::default().with_proxy("http://proxy.example.com:8080".to_string());

        assert!(ReqwestHttpClient::new(transport_options).is_ok());
    }

    #[test]
    fn test_add_headers() {
        let client = Client::new();
        let mut headers = HashMap::new();
        headers.insert("authorization".to_string(), "Bearer sk-test".to_string());
        headers.insert("X-Trace".to_string(), "abc".to_string());

        let request = add_headers(client.get("http://localhost/"), &headers)
            .build()
            .unwrap();
        assert_eq!(request.headers()[AUTHORIZATION], "Bearer sk-test");
        assert_eq!(request.headers()["x-trace"], "abc");
    }

    #[test]
    fn test_envelope_headers_replace_extra_headers() {
        let client = Client::new();
        let extra = Some(HashMap::from([
            ("Authorization".to_string(), "Bearer other".to_string()),
            ("OpenAI-Organization".to_string(), "org-123".to_string()),
        ]));
        let envelope = HashMap::from([("authorization".to_string(), "Bearer sk-test".to_string())]);

        let request = apply_headers(client.get("http://localhost/"), &extra, &envelope)
            .unwrap()
            .build()
            .unwrap();
        let values: Vec<_> = request.headers().get_all(AUTHORIZATION).iter().collect();
        assert_eq!(values, vec!["Bearer sk-test"]);
        assert_eq!(request.headers()["openai-organization"], "org-123");
    }

    #[test]
    fn test_invalid_header_is_rejected() {
        let headers = HashMap::from([("bad header".to_string(), "x".to_string())]);
        assert!(matches!(
            header_map(&headers),
            Err(TransportError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_response_info_new() {
        let info = ResponseInfo::new(StatusCode::OK, "{}");
        assert_eq!(info.data, Bytes::from_static(b"{}"));
    }
}
