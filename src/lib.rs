//! # simple-chatgpt - a small typed client for the OpenAI HTTP API
//!
//! Wraps chat completion, text-to-speech, speech-to-text, image generation and
//! model listing behind one method each.
//!
//! ## Features
//! - Async-first, tokio compatible
//! - Typed model, voice and size selectors with canonical wire strings
//! - JSON bodies built with `serde_json`, audio uploads as multipart forms
//! - Pluggable transport through the [`HttpClient`] trait, reqwest by default
//! - Uniform `Result` values: transport failures and remote error objects are
//!   both returned, never panicked on
//!
//! ## Architecture
//!
//! - **[`endpoint::Api`]** maps each operation to `{base_url}/{api_version}/{path}`.
//! - **[`Configuration`]** holds the credential and API version, passed to the client
//!   explicitly rather than kept as global state.
//! - **[`ChatGpt`]** builds each request, delegates to its [`HttpClient`] and
//!   normalizes the response.
//!
//! ## Example
//! ```no_run
//! use simple_chatgpt::{ChatGpt, Configuration};
//! use simple_chatgpt::model::ChatModel;
//! use simple_chatgpt::request::ChatRequest;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ChatGpt::new(Configuration::new("your-api-key"));
//!
//!     let request = ChatRequest::new("Hello!").with_model(ChatModel::Gpt4o);
//!     match client.chat(request).await? {
//!         Some(reply) => println!("{}", reply),
//!         None => println!("(no reply)"),
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod endpoint;
pub mod http;
pub mod model;
pub mod options;
pub mod request;
pub mod response;

// Re-exports for convenience
pub use client::{ChatGpt, ClientError, RemoteServiceError};
pub use http::{HttpClient, ReqwestHttpClient, TransportError};
pub use options::Configuration;
