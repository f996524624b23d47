use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::playlist::{Playlist, PlaylistGenerator};

pub const SERVER_NAME: &str = "playlist-generator";
pub const DEFAULT_TRACK_LIMIT: u32 = 10;
pub const PLAYLIST_RESOURCE_URI: &str = "spotify:playlist:uris";
const PLAYLIST_RESOURCE_TITLE: &str = "Spotify Playlist URIs";

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GeneratePlaylistParams {
    /// The theme or mood for the playlist (e.g., "rainy day", "workout", "relaxing evening")
    pub theme: String,
    /// The maximum number of tracks in the playlist
    #[serde(default = "default_track_limit")]
    pub limit: u32,
}

fn default_track_limit() -> u32 {
    DEFAULT_TRACK_LIMIT
}

#[derive(Clone)]
pub struct PlaylistServer {
    generator: PlaylistGenerator,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl PlaylistServer {
    pub fn new(generator: PlaylistGenerator) -> Self {
        Self {
            generator,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        name = "generate-playlist",
        description = "Generate a Spotify playlist of songs matching a theme or mood"
    )]
    async fn generate_playlist(
        &self,
        params: Parameters<GeneratePlaylistParams>,
    ) -> Result<CallToolResult, McpError> {
        let (theme, limit) = validate_params(params.0)?;
        info!("Generating playlist of up to {} songs for theme '{}'", limit, theme);

        match self.generator.generate(&theme, limit).await {
            Ok(playlist) => Ok(playlist_result(&playlist)),
            Err(e) => {
                error!("Error generating playlist for theme '{}': {}", theme, e);
                Ok(CallToolResult::error(vec![Content::text(e.user_message())]))
            }
        }
    }
}

#[tool_handler]
impl ServerHandler for PlaylistServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Playlist generator. Call generate-playlist with a theme or mood to get \
                 a numbered list of matching Spotify tracks and their track URIs."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }
}

fn validate_params(params: GeneratePlaylistParams) -> Result<(String, u32), McpError> {
    let theme = params.theme.trim();
    if theme.is_empty() {
        return Err(McpError::invalid_params("theme must not be empty", None));
    }

    if params.limit == 0 {
        return Err(McpError::invalid_params("limit must be a positive integer", None));
    }

    Ok((theme.to_string(), params.limit))
}

/// Text listing plus an embedded resource carrying the ordered track URIs.
fn playlist_result(playlist: &Playlist) -> CallToolResult {
    let resource = json!({
        "text": PLAYLIST_RESOURCE_TITLE,
        "uri": PLAYLIST_RESOURCE_URI,
        "data": playlist.uris(),
    });

    CallToolResult::success(vec![
        Content::text(playlist.summary()),
        Content::embedded_text(PLAYLIST_RESOURCE_URI, resource.to_string()),
    ])
}
