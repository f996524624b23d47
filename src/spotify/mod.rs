pub mod client;
pub mod types;

pub use client::{SpotifyClient, SpotifyError};
pub use types::SpotifyTrack;

use async_trait::async_trait;

/// A music catalog that resolves free-text queries to ranked tracks.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Search for at most `limit` tracks, best match first.
    async fn search_tracks(&self, query: &str, limit: u32)
        -> Result<Vec<SpotifyTrack>, SpotifyError>;
}
