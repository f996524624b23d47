//! In-process fakes for the completion and catalog providers.

use async_openai::error::OpenAIError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::llm::CompletionProvider;
use crate::playlist::PlaylistGenerator;
use crate::spotify::types::SpotifyArtist;
use crate::spotify::{CatalogProvider, SpotifyError, SpotifyTrack};

pub(crate) enum FakeCompletion {
    Reply(String),
    Empty,
    Fail,
}

#[async_trait]
impl CompletionProvider for FakeCompletion {
    async fn complete(&self, _prompt: &str) -> Result<Option<String>, OpenAIError> {
        match self {
            FakeCompletion::Reply(content) => Ok(Some(content.clone())),
            FakeCompletion::Empty => Ok(None),
            FakeCompletion::Fail => Err(OpenAIError::InvalidArgument(
                "simulated provider failure".to_string(),
            )),
        }
    }
}

/// Catalog keyed by search query. Unknown queries return no tracks.
#[derive(Default)]
pub(crate) struct FakeCatalog {
    uris: HashMap<String, String>,
    failing: Option<String>,
    delays: HashMap<String, Duration>,
    pub(crate) calls: AtomicUsize,
    pub(crate) limits: Mutex<Vec<u32>>,
}

impl FakeCatalog {
    pub(crate) fn with_track(mut self, query: &str, uri: &str) -> Self {
        self.uris.insert(query.to_string(), uri.to_string());
        self
    }

    pub(crate) fn failing_on(mut self, query: &str) -> Self {
        self.failing = Some(query.to_string());
        self
    }

    pub(crate) fn delayed(mut self, query: &str, delay: Duration) -> Self {
        self.delays.insert(query.to_string(), delay);
        self
    }
}

#[async_trait]
impl CatalogProvider for FakeCatalog {
    async fn search_tracks(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<SpotifyTrack>, SpotifyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.limits.lock().unwrap().push(limit);

        if let Some(delay) = self.delays.get(query) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing.as_deref() == Some(query) {
            return Err(SpotifyError::RateLimited {
                retry_after_secs: Some(1),
            });
        }

        Ok(self
            .uris
            .get(query)
            .map(|uri| {
                vec![SpotifyTrack {
                    uri: uri.clone(),
                    name: query.to_string(),
                    artists: vec![SpotifyArtist {
                        name: "Someone".to_string(),
                    }],
                }]
            })
            .unwrap_or_default())
    }
}

pub(crate) fn fake_generator(
    completion: FakeCompletion,
    catalog: FakeCatalog,
) -> (PlaylistGenerator, Arc<FakeCatalog>) {
    let catalog = Arc::new(catalog);
    let generator = PlaylistGenerator::new(Arc::new(completion), catalog.clone());
    (generator, catalog)
}

pub(crate) const TWO_SONGS: &str =
    r#"{"songs":[{"title":"A","artist":"X"},{"title":"B","artist":"Y"}]}"#;
