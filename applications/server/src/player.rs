//! Logging player
//!
//! The server does not output audio. [`LogPlayer`] stands in for a real
//! player: it logs every command it receives and remembers what it was last
//! asked to play so clients can query it.

use melo_playlist::{PlayRequest, Player, PlaylistControls, PlaylistId, Tags};
use serde::Serialize;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info};

/// Media last handed to the player
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NowPlaying {
    pub player_id: String,
    pub path: Option<String>,
    pub name: Option<String>,
    pub tags: Option<Tags>,
    pub playlist: PlaylistId,
    pub entry: String,
}

/// Snapshot of the player state
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlayerStatus {
    pub now_playing: Option<NowPlaying>,
    pub controls: PlaylistControls,
    /// Number of medias played since startup
    pub played: u64,
}

#[derive(Debug, Default)]
pub struct LogPlayer {
    status: Mutex<PlayerStatus>,
}

impl LogPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> PlayerStatus {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, PlayerStatus> {
        self.status.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Player for LogPlayer {
    fn play(&self, request: PlayRequest) -> bool {
        info!(
            player = %request.player_id,
            path = request.path.as_deref().unwrap_or("-"),
            playlist = %request.entry.playlist(),
            "Playing media"
        );

        let mut status = self.lock();
        status.played += 1;
        status.now_playing = Some(NowPlaying {
            player_id: request.player_id,
            path: request.path,
            name: request.name,
            tags: request.tags.as_deref().cloned(),
            playlist: request.entry.playlist().clone(),
            entry: request.entry.entry().to_string(),
        });
        true
    }

    fn reset(&self) {
        info!("Player reset");
        self.lock().now_playing = None;
    }

    fn update_playlist_controls(&self, controls: PlaylistControls) {
        debug!(
            has_prev = controls.has_prev,
            has_next = controls.has_next,
            shuffle = controls.shuffle,
            "Playlist controls updated"
        );
        self.lock().controls = controls;
    }
}
