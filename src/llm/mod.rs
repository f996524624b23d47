pub mod client;
pub mod prompt;

pub use client::LlmClient;

use async_openai::error::OpenAIError;
use async_trait::async_trait;

/// A text-completion backend.
///
/// Returns `Ok(None)` when the request succeeded but the model produced no
/// usable content.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<Option<String>, OpenAIError>;
}
