//! Server configuration
use crate::error::{Result, ServerError};
use melo_playlist::{PlaylistConfig, PlaylistId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Configuration file read when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "melo.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_playlist")]
    pub playlist: PlaylistSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaylistSettings {
    /// Events buffered per WebSocket client
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,

    /// Playlist current at startup
    #[serde(default = "default_playlist_id")]
    pub default_playlist: String,

    /// More playlists registered at startup
    #[serde(default)]
    pub extra_playlists: Vec<String>,
}

impl PlaylistSettings {
    /// Engine configuration
    pub fn engine(&self) -> Result<PlaylistConfig> {
        Ok(PlaylistConfig {
            event_capacity: self.event_capacity,
            default_playlist: PlaylistId::parse(&self.default_playlist)?,
        })
    }

    /// Extra playlist IDs, parsed
    pub fn extra_ids(&self) -> Result<Vec<PlaylistId>> {
        self.extra_playlists
            .iter()
            .map(|id| PlaylistId::parse(id).map_err(ServerError::from))
            .collect()
    }
}

impl ServerConfig {
    /// Load configuration from file and environment
    ///
    /// Without `path`, `melo.toml` is read if it exists. Environment
    /// variables prefixed with `MELO_` override the file, nested keys being
    /// separated by `__` (`MELO_SERVER__PORT=9000`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        let (config_path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };
        settings = settings.add_source(config::File::from(config_path).required(required));

        settings = settings.add_source(
            config::Environment::with_prefix("MELO")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("playlist.extra_playlists")
                .try_parsing(true),
        );

        let config = settings.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(ServerError::Config("server.port must not be 0".to_string()));
        }

        if self.playlist.event_capacity == 0 {
            return Err(ServerError::Config(
                "playlist.event_capacity must be at least 1".to_string(),
            ));
        }

        let default = PlaylistId::parse(&self.playlist.default_playlist)
            .map_err(|e| ServerError::Config(format!("playlist.default_playlist: {e}")))?;
        let mut seen = HashSet::from([default]);
        for id in &self.playlist.extra_playlists {
            let id = PlaylistId::parse(id)
                .map_err(|e| ServerError::Config(format!("playlist.extra_playlists: {e}")))?;
            if !seen.insert(id.clone()) {
                return Err(ServerError::Config(format!(
                    "playlist.extra_playlists: duplicate playlist {id}"
                )));
            }
        }

        Ok(())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_playlist() -> PlaylistSettings {
    PlaylistSettings {
        event_capacity: default_event_capacity(),
        default_playlist: default_playlist_id(),
        extra_playlists: Vec::new(),
    }
}

fn default_event_capacity() -> usize {
    PlaylistConfig::default().event_capacity
}

fn default_playlist_id() -> String {
    PlaylistId::DEFAULT.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            playlist: default_playlist(),
        }
    }
}
