//! Playlist events
//!
//! Every structural change is broadcast to the listeners of the playlist and,
//! when the playlist is the current one, to the listeners of the current
//! playlist channel. Each listener owns a bounded queue fed without blocking:
//! - a full queue drops the event (the listener is lagging)
//! - a closed queue unregisters the listener

use crate::types::{IndexPath, Range};
use melo_core::{PlaylistId, Tags};
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, warn};

/// Media description sent to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    /// Position among its siblings
    pub index: usize,

    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Media can be selected for playback
    pub playable: bool,

    /// Media children can be reordered
    pub sortable: bool,

    /// Media tags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Tags>,

    /// Children, one level deep
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MediaItem>,
}

/// Events emitted by a playlist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PlaylistEvent {
    /// Media inserted at `index` in the list under `parent`
    Add {
        /// Path of the container, empty for the root
        parent: IndexPath,
        /// Position of the new media
        index: usize,
        /// New media
        media: MediaItem,
    },

    /// Media name or tags changed
    Update {
        /// Path of the media
        path: IndexPath,
        /// Refreshed media
        media: MediaItem,
    },

    /// Entries moved, as requested
    Move {
        /// Moved entries
        range: Range,
        /// Requested destination
        destination: Option<IndexPath>,
    },

    /// Entries deleted, as requested
    Delete {
        /// Deleted entries
        range: Range,
    },

    /// Playing entry changed
    Play {
        /// Path of the playing entry, empty when nothing plays
        current: IndexPath,
    },

    /// Shuffle toggled
    Shuffle {
        /// Shuffle state
        enabled: bool,
    },
}

/// Event tagged with the playlist it comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Source playlist
    pub playlist_id: PlaylistId,
    /// Event
    #[serde(flatten)]
    pub event: PlaylistEvent,
}

/// Channel a listener subscribes to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventScope {
    /// Whichever playlist is current
    Current,
    /// One specific playlist
    Playlist(PlaylistId),
}

/// Listener identifier, unique within a registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Receiving half handed to a listener
pub type EventReceiver = mpsc::Receiver<EventEnvelope>;

/// Listener set of one channel
#[derive(Debug, Default)]
pub(crate) struct Listeners {
    senders: Vec<(ListenerId, mpsc::Sender<EventEnvelope>)>,
}

impl Listeners {
    pub fn add(&mut self, id: ListenerId, capacity: usize) -> EventReceiver {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        self.senders.push((id, sender));
        receiver
    }

    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.senders.len();
        self.senders.retain(|(listener, _)| *listener != id);
        self.senders.len() != before
    }

    /// Send to a single listener
    pub fn send_to(&mut self, id: ListenerId, envelope: EventEnvelope) {
        if let Some((_, sender)) = self.senders.iter().find(|(listener, _)| *listener == id) {
            if sender.try_send(envelope).is_err() {
                debug!(listener = %id, "initial event not delivered");
            }
        }
    }

    pub fn broadcast(&mut self, envelope: &EventEnvelope) {
        self.senders
            .retain(|(id, sender)| match sender.try_send(envelope.clone()) {
                Ok(()) => true,
                Err(TrySendError::Full(_)) => {
                    warn!(listener = %id, playlist = %envelope.playlist_id, "event queue full, dropping event");
                    true
                }
                Err(TrySendError::Closed(_)) => {
                    debug!(listener = %id, "listener gone, unregistering");
                    false
                }
            });
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.senders.len()
    }
}
