//! Prompt construction and reply parsing for song suggestions.
//!
//! The prompt asks for a JSON object of the form
//! `{"songs": [{"title": "...", "artist": "..."}]}` and the parser reads exactly
//! that shape. A bare top-level array is rejected.

use serde::Deserialize;

use crate::playlist::SongCandidate;

#[derive(Deserialize)]
struct SongSuggestions {
    songs: Vec<SongCandidate>,
}

/// Build the completion prompt for `limit` songs matching `theme`.
pub fn build_playlist_prompt(theme: &str, limit: u32) -> String {
    format!(
        "Generate a list of {} songs that would be perfect for {}.\n\
         For each song, provide the title and artist name.\n\
         Format the response as a JSON object with a \"songs\" property holding an array \
         of objects with \"title\" and \"artist\" properties.\n\
         Example format: {{\"songs\": [{{\"title\": \"Song Name\", \"artist\": \"Artist Name\"}}]}}",
        limit, theme
    )
}

/// Parse the model's reply into song candidates.
pub fn parse_song_suggestions(content: &str) -> Result<Vec<SongCandidate>, serde_json::Error> {
    let suggestions: SongSuggestions = serde_json::from_str(strip_code_fence(content))?;
    Ok(suggestions.songs)
}

/// Models occasionally wrap JSON in a Markdown fence even in JSON mode.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = rest.strip_prefix("json").unwrap_or(rest);
    body.strip_suffix("```").unwrap_or(body).trim()
}
