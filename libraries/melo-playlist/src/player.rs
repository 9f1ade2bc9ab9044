//! Player seam
//!
//! Decoding and output live outside the playlist engine. The registry drives
//! whatever implements [`Player`]: it asks it to play a selected entry, to
//! stop when the playing entry vanishes, and keeps it informed of which
//! transport controls make sense.

use crate::types::EntryRef;
use melo_core::Tags;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Player service driven by the playlist registry
///
/// Calls are made without any playlist lock held, so an implementation may
/// call back into the registry (e.g. to attach sub-medias).
pub trait Player: Send + Sync {
    /// Start playback of a media
    ///
    /// Returns `false` when the player refused the media.
    fn play(&self, request: PlayRequest) -> bool;

    /// Stop playback and forget the current media
    fn reset(&self);

    /// Report which transport controls are available
    fn update_playlist_controls(&self, controls: PlaylistControls);
}

/// Media selected for playback
#[derive(Debug, Clone, PartialEq)]
pub struct PlayRequest {
    /// Player in charge of the media
    pub player_id: String,
    /// Media path / URI
    pub path: Option<String>,
    /// Display name
    pub name: Option<String>,
    /// Media tags
    pub tags: Option<Arc<Tags>>,
    /// Handle to report back against the entry
    pub entry: EntryRef,
}

/// Transport control availability
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistControls {
    /// A previous media exists
    pub has_prev: bool,
    /// A next media exists
    pub has_next: bool,
    /// Shuffle is active
    pub shuffle: bool,
}
