use serde::{Deserialize, Serialize};

/// Spotify client-credentials token response
#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyTokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// `GET /search?type=track` response
#[derive(Debug, Clone, Deserialize)]
pub struct SpotifySearchResponse {
    pub tracks: Option<SpotifyTrackPage>,
}

/// Spotify can return `null` in place of tracks it cannot serve.
#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyTrackPage {
    #[serde(default)]
    pub items: Vec<Option<SpotifyTrack>>,
}

impl SpotifyTrackPage {
    pub fn into_tracks(self) -> Vec<SpotifyTrack> {
        self.items.into_iter().flatten().collect()
    }
}

/// Spotify track from API. Only the fields needed to identify a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotifyTrack {
    pub uri: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<SpotifyArtist>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotifyArtist {
    pub name: String,
}
