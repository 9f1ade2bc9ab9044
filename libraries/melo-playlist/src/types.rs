//! Core types for the playlist tree

use melo_core::PlaylistId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::BitOr;

/// Handle of an entry inside a playlist arena
///
/// The generation is bumped every time a slot is released, so a handle to a
/// released entry never aliases the entry that reuses its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId {
    index: u32,
    generation: u32,
}

impl EntryId {
    /// Placeholder link for a node that is not yet stored in an arena
    pub(crate) const DANGLING: Self = Self {
        index: u32::MAX,
        generation: u32::MAX,
    };

    pub(crate) const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    pub(crate) const fn slot(self) -> usize {
        self.index as usize
    }

    pub(crate) const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// Entry flag set
///
/// `PLAYABLE` and `SORTABLE` describe the entry; the three `SHUFFLE_*` flags
/// are bookkeeping for an active shuffle and are never serialized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct EntryFlags(u8);

impl EntryFlags {
    /// No flag set
    pub const NONE: Self = Self(0);
    /// Entry can be selected for playback
    pub const PLAYABLE: Self = Self(1 << 0);
    /// Entry children can be reordered
    pub const SORTABLE: Self = Self(1 << 1);
    /// Placed by the last shuffle
    pub const SHUFFLE_INSERTED: Self = Self(1 << 2);
    /// Added (or moved) while shuffle was active
    pub const SHUFFLE_ADDED: Self = Self(1 << 3);
    /// Deleted while shuffle was active, released on restore
    pub const SHUFFLE_DELETED: Self = Self(1 << 4);

    /// Check whether all flags in `other` are set
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Set the flags in `other`
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    /// Clear the flags in `other`
    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }
}

impl BitOr for EntryFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Sibling indices from the playlist root down to an entry
///
/// An empty path designates no entry (e.g. nothing is playing).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndexPath(Vec<usize>);

impl IndexPath {
    /// Create a path from sibling indices
    pub fn new(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    /// Indices as a slice
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Check whether the path is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Nesting depth of the designated entry
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Index of the designated entry among its siblings
    pub fn last(&self) -> Option<usize> {
        self.0.last().copied()
    }

    /// Append a nested index
    pub fn push(&mut self, index: usize) {
        self.0.push(index);
    }

    /// Consume into the underlying indices
    pub fn into_vec(self) -> Vec<usize> {
        self.0
    }
}

impl From<Vec<usize>> for IndexPath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl From<&[usize]> for IndexPath {
    fn from(indices: &[usize]) -> Self {
        Self(indices.to_vec())
    }
}

impl fmt::Display for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// Entries targeted by a move or delete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Range {
    /// `length` consecutive siblings starting at `first`
    Linear {
        /// Path of the first entry
        first: IndexPath,
        /// Number of siblings
        length: usize,
    },

    /// Independent entries, in request order
    Explicit {
        /// Path of every entry
        paths: Vec<IndexPath>,
    },
}

/// Handle to an entry of a registered playlist
///
/// Given to the player with every play request so it can later update the
/// entry or attach sub-medias to it. A handle outliving its entry is rejected
/// with [`crate::PlaylistError::EntryNotFound`], including after its
/// playlist was removed and registered again under the same ID.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryRef {
    playlist: PlaylistId,
    /// Registration serial of the playlist
    instance: u64,
    entry: EntryId,
}

impl EntryRef {
    pub(crate) fn new(playlist: PlaylistId, instance: u64, entry: EntryId) -> Self {
        Self {
            playlist,
            instance,
            entry,
        }
    }

    pub(crate) fn instance(&self) -> u64 {
        self.instance
    }

    /// Playlist holding the entry
    pub fn playlist(&self) -> &PlaylistId {
        &self.playlist
    }

    /// Entry handle within the playlist
    pub fn entry(&self) -> EntryId {
        self.entry
    }
}

/// Direction of a play-next / play-previous step
///
/// Lists are built by prepending, so "next" walks toward the head of a list
/// and "previous" toward its tail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayDirection {
    /// Toward lower indices
    Next,
    /// Toward higher indices
    Previous,
}
