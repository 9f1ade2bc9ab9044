//! Melo Playlist - Hierarchical playlist engine
//!
//! Playlists are trees of media entries. Each level is an ordered list of
//! siblings: a plain media, or a container (folder, album, web listing)
//! holding more entries. The engine keeps track of what plays at every level
//! and drives an external player.
//!
//! This crate provides:
//! - Named playlists behind a [`PlaylistRegistry`], one of them current
//! - Insertion at the head of a list (newest first, oldest plays first)
//! - Play, play-next and play-previous across nesting levels
//! - Move and delete of linear or explicit ranges of entries
//! - Reversible shuffle that survives edits made while shuffled
//! - Event streams per playlist and for the current playlist
//! - Serde-tagged [`Request`]/[`Response`] dispatch for transports
//!
//! # Architecture
//!
//! `melo-playlist` does not decode audio. Everything media related happens
//! behind the [`Player`] trait, which receives the entry to play and the
//! state of the previous/next/shuffle controls.
//!
//! Entries of a playlist live in a generational arena; handles given out
//! ([`EntryRef`]) are checked against the arena before use, so a handle on a
//! deleted entry is rejected instead of dereferenced.
//!
//! # Example: Basic Usage
//!
//! ```rust
//! use melo_playlist::{
//!     IndexPath, PlayRequest, Player, PlaylistConfig, PlaylistControls, PlaylistRegistry,
//! };
//! use std::sync::Arc;
//!
//! struct Silent;
//!
//! impl Player for Silent {
//!     fn play(&self, _request: PlayRequest) -> bool {
//!         true
//!     }
//!     fn reset(&self) {}
//!     fn update_playlist_controls(&self, _controls: PlaylistControls) {}
//! }
//!
//! let registry = PlaylistRegistry::new(PlaylistConfig::default(), Arc::new(Silent));
//!
//! registry.add_media(None, "file", "/music/a.mp3", Some("A".into()), None)?;
//! registry.add_media(None, "file", "/music/b.mp3", Some("B".into()), None)?;
//!
//! // Newest first
//! let list = registry.media_list(None, 0, 10)?;
//! assert_eq!(list.medias[0].name.as_deref(), Some("B"));
//!
//! // Play "A", then step toward the head of the list
//! assert!(registry.play(None, &IndexPath::new(vec![1]))?);
//! assert!(registry.play_next()?);
//! assert_eq!(registry.current(None)?, IndexPath::new(vec![0]));
//! # Ok::<(), melo_playlist::PlaylistError>(())
//! ```
//!
//! # Example: Events
//!
//! ```rust
//! use melo_playlist::{EventScope, PlaylistConfig, PlaylistEvent, PlaylistRegistry};
//! # use melo_playlist::{PlayRequest, Player, PlaylistControls};
//! # use std::sync::Arc;
//! # struct Silent;
//! # impl Player for Silent {
//! #     fn play(&self, _request: PlayRequest) -> bool { true }
//! #     fn reset(&self) {}
//! #     fn update_playlist_controls(&self, _controls: PlaylistControls) {}
//! # }
//! # let registry = PlaylistRegistry::new(PlaylistConfig::default(), Arc::new(Silent));
//!
//! let (_listener, mut events) = registry.subscribe(EventScope::Current)?;
//! registry.set_shuffle(None, true)?;
//!
//! // Initial position first, then the change
//! assert!(matches!(events.try_recv().unwrap().event, PlaylistEvent::Play { .. }));
//! assert_eq!(
//!     events.try_recv().unwrap().event,
//!     PlaylistEvent::Shuffle { enabled: true }
//! );
//! # Ok::<(), melo_playlist::PlaylistError>(())
//! ```

#![forbid(unsafe_code)]

mod arena;
pub mod config;
mod edit;
pub mod entry;
pub mod error;
pub mod events;
mod list;
mod play;
pub mod player;
pub mod registry;
pub mod request;
mod shuffle;
mod tree;
pub mod types;

// Re-exports
pub use config::PlaylistConfig;
pub use entry::PlaylistEntry;
pub use error::{PlaylistError, Result};
pub use events::{EventEnvelope, EventReceiver, EventScope, ListenerId, MediaItem, PlaylistEvent};
pub use player::{PlayRequest, Player, PlaylistControls};
pub use registry::PlaylistRegistry;
pub use request::{MediaList, Request, Response};
pub use types::{EntryFlags, EntryId, EntryRef, IndexPath, PlayDirection, Range};

pub use melo_core::{PlaylistId, Tags};
