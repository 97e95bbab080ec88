//! Console front-end issuing one request and printing the raw result.
//!
//! Run with:
//! ```bash
//! export OPENAI_API_KEY="your-api-key"
//! cargo run --example chatgpt_console -- chat "What is the capital of France?"
//! cargo run --example chatgpt_console -- image "a watercolor cat" 1024x1024
//! cargo run --example chatgpt_console -- speech "Hello there" speech.mp3
//! cargo run --example chatgpt_console -- whisper speech.mp3
//! cargo run --example chatgpt_console -- models
//! ```
//!
//! Set `RUST_LOG=simple_chatgpt=debug` to see each request.

use std::fmt::Debug;

use simple_chatgpt::model::{ChatModel, ImageModel, ImageSize, WhisperAudioType};
use simple_chatgpt::request::{ChatRequest, ImageRequest, WhisperRequest};
use simple_chatgpt::{ChatGpt, ClientError, Configuration};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: chatgpt_console <chat|image|speech|whisper|models> [args...]";

/// Print the value, or the error description.
fn display_result<T: Debug>(result: Result<Option<T>, ClientError>) {
    match result {
        Ok(value) => println!("{:?}", value),
        Err(error) => eprintln!("{}", error),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = ChatGpt::new(Configuration::from_env()?);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let arg = |i: usize| args.get(i).map(String::as_str);

    match arg(0) {
        Some("chat") => {
            let content = arg(1).ok_or(USAGE)?;
            let request = ChatRequest::new(content).with_model(ChatModel::Gpt4o);
            display_result(client.chat(request).await);
        }
        Some("image") => {
            let prompt = arg(1).ok_or(USAGE)?;
            let size = arg(2).map(str::parse::<ImageSize>).transpose()?.unwrap_or(ImageSize::S1024x1024);
            let request = ImageRequest::new(prompt)
                .with_model(ImageModel::V3)
                .with_size(size);
            display_result(client.image(request).await);
        }
        Some("speech") => {
            let input = arg(1).ok_or(USAGE)?;
            let output = arg(2).unwrap_or("speech.mp3");
            match client.speech(input).await {
                Ok(Some(audio)) => {
                    std::fs::write(output, &audio)?;
                    println!("wrote {} bytes to {}", audio.len(), output);
                }
                other => display_result(other),
            }
        }
        Some("whisper") => {
            let filename = arg(1).ok_or(USAGE)?;
            let audio_type = filename
                .rsplit_once('.')
                .map(|(_, ext)| ext.parse::<WhisperAudioType>())
                .transpose()?
                .unwrap_or_default();
            let data = std::fs::read(filename)?;
            display_result(client.whisper(WhisperRequest::new(audio_type, data)).await);
        }
        Some("models") => display_result(client.models().await),
        _ => eprintln!("{}", USAGE),
    }

    Ok(())
}
