use futures::future::try_join_all;
use std::sync::Arc;
use tracing::{debug, info};

use crate::llm::prompt::{build_playlist_prompt, parse_song_suggestions};
use crate::llm::CompletionProvider;
use crate::playlist::{Playlist, PlaylistError, ResolvedTrack, SongCandidate};
use crate::spotify::{CatalogProvider, SpotifyError};

/// Turns a theme into a playlist of catalog tracks.
///
/// Holds no per-request state; clones share the same provider clients.
#[derive(Clone)]
pub struct PlaylistGenerator {
    completion: Arc<dyn CompletionProvider>,
    catalog: Arc<dyn CatalogProvider>,
}

impl PlaylistGenerator {
    pub fn new(completion: Arc<dyn CompletionProvider>, catalog: Arc<dyn CatalogProvider>) -> Self {
        Self {
            completion,
            catalog,
        }
    }

    pub async fn generate(&self, theme: &str, limit: u32) -> Result<Playlist, PlaylistError> {
        let prompt = build_playlist_prompt(theme, limit);
        let content = self
            .completion
            .complete(&prompt)
            .await?
            .ok_or(PlaylistError::EmptyCompletion)?;

        let candidates = parse_song_suggestions(&content)?;
        let suggested = candidates.len();
        info!("Model suggested {} songs for theme '{}'", suggested, theme);

        let resolved = self.resolve(candidates).await?;
        let playlist = Playlist::new(theme, resolved, limit as usize);
        info!(
            "Resolved {}/{} suggested songs for theme '{}'",
            playlist.len(),
            suggested,
            theme
        );

        Ok(playlist)
    }

    /// Search the catalog for every candidate at once. Results keep candidate
    /// order; the first failed search fails the whole batch.
    async fn resolve(
        &self,
        candidates: Vec<SongCandidate>,
    ) -> Result<Vec<ResolvedTrack>, SpotifyError> {
        try_join_all(candidates.into_iter().map(|song| async move {
            let tracks = self.catalog.search_tracks(&song.search_query(), 1).await?;
            let uri = tracks.into_iter().next().map(|track| track.uri);
            if uri.is_none() {
                debug!("No catalog match for '{}' by '{}'", song.title, song.artist);
            }
            Ok::<_, SpotifyError>(ResolvedTrack { song, uri })
        }))
        .await
    }
}
