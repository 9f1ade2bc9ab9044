//! Shared application state
use crate::{config::ServerConfig, error::Result, player::LogPlayer};
use melo_playlist::PlaylistRegistry;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<PlaylistRegistry>,
    pub player: Arc<LogPlayer>,
}

impl AppState {
    pub fn new(registry: Arc<PlaylistRegistry>, player: Arc<LogPlayer>) -> Self {
        Self { registry, player }
    }

    /// Build the registry described by `config`, extra playlists included
    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        let player = Arc::new(LogPlayer::new());
        let registry = Arc::new(PlaylistRegistry::new(
            config.playlist.engine()?,
            player.clone(),
        ));

        for id in config.playlist.extra_ids()? {
            registry.create(Some(id))?;
        }

        Ok(Self::new(registry, player))
    }
}
