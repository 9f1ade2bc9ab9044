//! Error types for playlist operations

use crate::types::{EntryId, IndexPath};
use melo_core::PlaylistId;
use thiserror::Error;

/// Playlist errors
///
/// Every structural error is raised before the tree is touched, so a failed
/// operation never leaves a partial mutation behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaylistError {
    /// Path does not designate an entry
    #[error("Invalid path: {0}")]
    InvalidPath(IndexPath),

    /// Range is empty, out of bounds or overlapping
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// Move destination cannot receive the entries
    #[error("Invalid destination: {0}")]
    InvalidDestination(String),

    /// Entry handle is stale or detached
    #[error("Entry not found: {0}")]
    EntryNotFound(EntryId),

    /// No playlist registered under this ID
    #[error("Playlist not found: {0}")]
    PlaylistNotFound(PlaylistId),

    /// A playlist is already registered under this ID
    #[error("Playlist already exists: {0}")]
    PlaylistAlreadyExists(PlaylistId),

    /// Operation needs a current playlist and none is set
    #[error("No current playlist")]
    NoCurrentPlaylist,
}

/// Result type for playlist operations
pub type Result<T> = std::result::Result<T, PlaylistError>;
