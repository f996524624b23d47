pub mod error;
pub mod generator;
#[cfg(test)]
pub(crate) mod testing;

pub use error::PlaylistError;
pub use generator::PlaylistGenerator;

use serde::{Deserialize, Serialize};

/// A song suggested by the language model. May not exist in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongCandidate {
    pub title: String,
    pub artist: String,
}

impl SongCandidate {
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
        }
    }

    /// Catalog query narrowing the title to the suggested artist.
    pub fn search_query(&self) -> String {
        format!("{} artist:{}", self.title, self.artist)
    }
}

/// A candidate after catalog lookup. `uri` is `None` when the search had no hits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTrack {
    pub song: SongCandidate,
    pub uri: Option<String>,
}

/// The tracks that made it into the final playlist, in suggestion order.
///
/// Every track held here has a catalog identifier.
#[derive(Debug, Clone)]
pub struct Playlist {
    theme: String,
    tracks: Vec<ResolvedTrack>,
}

impl Playlist {
    /// Drop unresolved tracks and keep at most `limit` of the rest.
    pub fn new(theme: impl Into<String>, resolved: Vec<ResolvedTrack>, limit: usize) -> Self {
        let tracks = resolved
            .into_iter()
            .filter(|track| track.uri.is_some())
            .take(limit)
            .collect();

        Self {
            theme: theme.into(),
            tracks,
        }
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn tracks(&self) -> &[ResolvedTrack] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn uris(&self) -> Vec<String> {
        self.tracks
            .iter()
            .filter_map(|track| track.uri.clone())
            .collect()
    }

    /// Human-readable summary line followed by the numbered track list.
    pub fn summary(&self) -> String {
        let track_list = self
            .tracks
            .iter()
            .enumerate()
            .map(|(index, track)| {
                format!("{}. {} by {}", index + 1, track.song.title, track.song.artist)
            })
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "Found {} songs matching your theme: {}\n\n{}",
            self.len(),
            self.theme,
            track_list
        )
    }
}
