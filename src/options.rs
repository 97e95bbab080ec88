//! Configuration for authorizing and addressing requests, plus transport options.

use std::collections::HashMap;
use std::time::Duration;

use crate::client::ClientError;

/// Base URL of the remote API.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// API version used when none is given.
pub const DEFAULT_API_VERSION: &str = "v1";

/// A secret string type for sensitive data like API keys.
/// Prevents accidental logging or display of secrets.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SecretString(String);

impl SecretString {
    /// Create a new secret string.
    pub fn new(s: String) -> Self {
        Self(s)
    }

    /// Get the underlying secret value.
    pub fn expose_secret(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecretString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretString([REDACTED])")
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s.to_string())
    }
}

/// Credential and addressing used by every request.
///
/// The credential is not validated locally. An empty or wrong key is sent as-is
/// and the remote service answers with an authorization error.
///
/// # Example
/// ```rust
/// use simple_chatgpt::options::Configuration;
///
/// let config = Configuration::new("sk-...").with_api_version("v1");
/// assert_eq!(config.api_version(), "v1");
/// assert_eq!(config.base_url(), "https://api.openai.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    credential: SecretString,
    api_version: String,
    base_url: String,
}

impl Configuration {
    /// Create a configuration with the default API version and base URL.
    pub fn new(credential: impl Into<SecretString>) -> Self {
        Self {
            credential: credential.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Read the configuration from `OPENAI_API_KEY` and, optionally,
    /// `OPENAI_API_VERSION`.
    pub fn from_env() -> Result<Self, ClientError> {
        let credential = std::env::var("OPENAI_API_KEY")
            .map_err(|_| ClientError::Config("OPENAI_API_KEY is not set".to_string()))?;

        let mut config = Self::new(credential);
        if let Ok(version) = std::env::var("OPENAI_API_VERSION") {
            config = config.with_api_version(version);
        }
        Ok(config)
    }

    /// Set the API version path segment.
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Point requests at another host, e.g. a proxy or a mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn credential(&self) -> &SecretString {
        &self.credential
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Value of the `Authorization` header sent with every request.
    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.credential.expose_secret())
    }
}

/// Options for the default reqwest transport.
///
/// # Example
/// ```rust
/// use simple_chatgpt::options::TransportOptions;
/// use std::time::Duration;
///
/// let options = TransportOptions::default()
///     .with_timeout(Duration::from_secs(30))
///     .with_header("OpenAI-Organization".to_string(), "org-123".to_string());
/// assert!(options.extra_headers.is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TransportOptions {
    /// Request timeout
    pub timeout: Option<Duration>,

    /// HTTP proxy URL
    pub proxy: Option<String>,

    /// Additional HTTP headers to include in requests
    pub extra_headers: Option<HashMap<String, String>>,
}

impl TransportOptions {
    /// Set the timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the proxy URL.
    pub fn with_proxy(mut self, proxy: String) -> Self {
        self.proxy = Some(proxy);
        self
    }

    /// Add a single extra header.
    pub fn with_header(mut self, key: String, value: String) -> Self {
        self.extra_headers
            .get_or_insert_with(HashMap::new)
            .insert(key, value);
        self
    }
}
