//! Playlist engine configuration

use melo_core::PlaylistId;
use serde::{Deserialize, Serialize};

/// Playlist registry configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistConfig {
    /// Events buffered per listener before new ones are dropped
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,

    /// Playlist created with the registry, and current until another plays
    #[serde(default = "default_playlist")]
    pub default_playlist: PlaylistId,
}

impl Default for PlaylistConfig {
    fn default() -> Self {
        Self {
            event_capacity: default_event_capacity(),
            default_playlist: default_playlist(),
        }
    }
}

fn default_event_capacity() -> usize {
    64
}

fn default_playlist() -> PlaylistId {
    PlaylistId::default_id()
}
