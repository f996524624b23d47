use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::spotify::types::{SpotifySearchResponse, SpotifyTokenResponse, SpotifyTrack};
use crate::spotify::CatalogProvider;

/// Tokens are refreshed this long before Spotify would reject them.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

#[derive(Debug, thiserror::Error)]
pub enum SpotifyError {
    #[error("Failed to send http request: {0}")]
    FailedToSendRequest(#[from] reqwest::Error),
    #[error("Token request rejected ({status}): {reason}")]
    Unauthorized { status: StatusCode, reason: String },
    #[error("Rate limited by Spotify (retry after {retry_after_secs:?}s)")]
    RateLimited { retry_after_secs: Option<u64> },
    #[error("Spotify API error ({status}): {reason}")]
    Api { status: StatusCode, reason: String },
}

struct AccessToken {
    value: String,
    expires_at: Instant,
}

impl AccessToken {
    fn is_fresh(&self) -> bool {
        Instant::now() + TOKEN_EXPIRY_MARGIN < self.expires_at
    }
}

/// Spotify Web API client authenticated with the client-credentials flow.
pub struct SpotifyClient {
    http: reqwest::Client,
    api_url: String,
    accounts_url: String,
    client_id: String,
    client_secret: String,
    token: Mutex<Option<AccessToken>>,
}

impl SpotifyClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.spotify_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            api_url: config.spotify_api_url.trim_end_matches('/').to_string(),
            accounts_url: config.spotify_accounts_url.trim_end_matches('/').to_string(),
            client_id: config.spotify_client_id.clone(),
            client_secret: config.spotify_client_secret.clone(),
            token: Mutex::new(None),
        })
    }

    /// Return a cached access token, requesting a new one when it is missing
    /// or about to expire. The lock is held across the request so concurrent
    /// searches share a single token fetch.
    async fn access_token(&self) -> Result<String, SpotifyError> {
        let mut token = self.token.lock().await;
        if let Some(cached) = token.as_ref().filter(|t| t.is_fresh()) {
            return Ok(cached.value.clone());
        }

        debug!("Requesting Spotify client-credentials token");
        let response = self
            .http
            .post(format!("{}/api/token", self.accounts_url))
            // Serializes to x-www-form-urlencoded as Spotify requires
            .form(&[("grant_type", "client_credentials")])
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SpotifyError::Unauthorized {
                status,
                reason: response
                    .text()
                    .await
                    .unwrap_or("Failed to get error text".to_string()),
            });
        }

        let token_response: SpotifyTokenResponse = response.json().await?;
        info!(
            "Obtained Spotify {} token valid for {}s",
            token_response.token_type, token_response.expires_in
        );

        let value = token_response.access_token;
        *token = Some(AccessToken {
            value: value.clone(),
            expires_at: Instant::now() + Duration::from_secs(token_response.expires_in),
        });
        Ok(value)
    }
}

#[async_trait]
impl CatalogProvider for SpotifyClient {
    async fn search_tracks(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<SpotifyTrack>, SpotifyError> {
        let token = self.access_token().await?;
        let limit = limit.to_string();

        let response = self
            .http
            .get(format!("{}/search", self.api_url))
            .query(&[("q", query), ("type", "track"), ("limit", limit.as_str())])
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.parse().ok());
            warn!("Spotify search rate limited for query '{}'", query);
            return Err(SpotifyError::RateLimited { retry_after_secs });
        }
        if !status.is_success() {
            return Err(SpotifyError::Api {
                status,
                reason: response
                    .text()
                    .await
                    .unwrap_or("Failed to get error text".to_string()),
            });
        }

        let search: SpotifySearchResponse = response.json().await?;
        let tracks = search
            .tracks
            .map(|page| page.into_tracks())
            .unwrap_or_default();
        debug!("Spotify search '{}' returned {} tracks", query, tracks.len());
        Ok(tracks)
    }
}
