use async_openai::error::OpenAIError;

use crate::spotify::SpotifyError;

pub const SUGGESTIONS_FAILED_MESSAGE: &str = "Failed to generate playlist suggestions.";
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate playlist. Please try again.";

#[derive(Debug, thiserror::Error)]
pub enum PlaylistError {
    #[error("Completion returned no content")]
    EmptyCompletion,
    #[error("Completion request failed: {0}")]
    Completion(#[from] OpenAIError),
    #[error("Failed to parse song suggestions: {0}")]
    InvalidSuggestions(#[from] serde_json::Error),
    #[error("Catalog search failed: {0}")]
    Catalog(#[from] SpotifyError),
}

impl PlaylistError {
    /// The message shown to the caller. Details stay in the operator log.
    pub fn user_message(&self) -> &'static str {
        match self {
            PlaylistError::EmptyCompletion => SUGGESTIONS_FAILED_MESSAGE,
            _ => GENERATION_FAILED_MESSAGE,
        }
    }
}
