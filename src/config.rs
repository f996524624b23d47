use dotenvy::dotenv;
use std::env;

#[derive(Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_api_base: String,
    pub openai_model: String,
    pub llm_timeout_secs: u64,
    pub spotify_client_id: String,
    pub spotify_client_secret: String,
    pub spotify_api_url: String,
    pub spotify_accounts_url: String,
    pub spotify_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv().ok();
        Self::build()
    }

    fn build() -> anyhow::Result<Self> {
        Ok(Config {
            openai_api_key: env::var("OPENAI_API_KEY")
                .map_err(|_| anyhow::anyhow!("OPENAI_API_KEY must be set"))?,
            openai_api_base: env::var("OPENAI_API_BASE")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            openai_model: env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| "gpt-4-turbo-preview".to_string()),
            llm_timeout_secs: env::var("LLM_TIMEOUT_SECS")
                .unwrap_or_else(|_| "120".to_string())
                .parse()
                .unwrap_or(120),
            spotify_client_id: env::var("SPOTIFY_CLIENT_ID")
                .map_err(|_| anyhow::anyhow!("SPOTIFY_CLIENT_ID must be set"))?,
            spotify_client_secret: env::var("SPOTIFY_CLIENT_SECRET")
                .map_err(|_| anyhow::anyhow!("SPOTIFY_CLIENT_SECRET must be set"))?,
            spotify_api_url: env::var("SPOTIFY_API_URL")
                .unwrap_or_else(|_| "https://api.spotify.com/v1".to_string()),
            spotify_accounts_url: env::var("SPOTIFY_ACCOUNTS_URL")
                .unwrap_or_else(|_| "https://accounts.spotify.com".to_string()),
            spotify_timeout_secs: env::var("SPOTIFY_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(30),
        })
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("openai_api_key", &"[REDACTED]")
            .field("openai_api_base", &self.openai_api_base)
            .field("openai_model", &self.openai_model)
            .field("llm_timeout_secs", &self.llm_timeout_secs)
            .field("spotify_client_id", &self.spotify_client_id)
            .field("spotify_client_secret", &"[REDACTED]")
            .field("spotify_api_url", &self.spotify_api_url)
            .field("spotify_accounts_url", &self.spotify_accounts_url)
            .field("spotify_timeout_secs", &self.spotify_timeout_secs)
            .finish()
    }
}

#[cfg(test)]
pub(crate) fn test_config(base_url: &str) -> Config {
    Config {
        openai_api_key: "test-openai-key".to_string(),
        openai_api_base: format!("{}/v1", base_url),
        openai_model: "test-model".to_string(),
        llm_timeout_secs: 5,
        spotify_client_id: "client-id".to_string(),
        spotify_client_secret: "client-secret".to_string(),
        spotify_api_url: format!("{}/v1", base_url),
        spotify_accounts_url: base_url.to_string(),
        spotify_timeout_secs: 5,
    }
}
