use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{MeloError, Result};

/// Playlist identifier
///
/// Playlists are addressed by a caller-chosen name. The playlist created at
/// startup is called [`PlaylistId::DEFAULT`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaylistId(String);

impl PlaylistId {
    /// Name of the playlist created at startup
    pub const DEFAULT: &'static str = "default";

    /// Create a new playlist ID without validation
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The `"default"` playlist ID
    pub fn default_id() -> Self {
        Self::new(Self::DEFAULT)
    }

    /// Parse a user supplied ID, rejecting empty or blank names
    pub fn parse(id: &str) -> Result<Self> {
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(MeloError::invalid_input("playlist id must not be empty"));
        }
        Ok(Self::new(trimmed))
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaylistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PlaylistId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for PlaylistId {
    fn from(s: String) -> Self {
        Self(s)
    }
}
