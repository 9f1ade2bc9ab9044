//! Media tags
//!
//! [`Tags`] is the metadata attached to a playable media: title, artist,
//! album, genre, track number and cover. The playlist treats it as an opaque
//! value and shares it between the tree and the player behind an `Arc`.

use serde::{Deserialize, Serialize};
use std::ops::BitOr;

/// Media metadata
///
/// Every field is optional. Setters only fill a field that is still unset;
/// use [`Tags::merge`] to combine two tag sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tags {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    artist: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    album: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    genre: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    track: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    cover: Option<String>,
}

/// Fields to leave untouched during [`Tags::merge_with`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TagsMergeFlags(u8);

impl TagsMergeFlags {
    /// Merge every field
    pub const NONE: Self = Self(0);
    /// Keep the title of the new tags only
    pub const SKIP_TITLE: Self = Self(1 << 0);
    /// Keep the artist of the new tags only
    pub const SKIP_ARTIST: Self = Self(1 << 1);
    /// Keep the album of the new tags only
    pub const SKIP_ALBUM: Self = Self(1 << 2);
    /// Keep the genre of the new tags only
    pub const SKIP_GENRE: Self = Self(1 << 3);
    /// Keep the track number of the new tags only
    pub const SKIP_TRACK: Self = Self(1 << 4);
    /// Keep the cover of the new tags only
    pub const SKIP_COVER: Self = Self(1 << 5);
    /// Skip every field
    pub const SKIP_ALL: Self = Self(0b0011_1111);

    /// Check whether all flags in `other` are set
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for TagsMergeFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl Tags {
    /// Create empty tags
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title (builder style)
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the artist (builder style)
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    /// Set the album (builder style)
    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = Some(album.into());
        self
    }

    /// Set the genre (builder style)
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    /// Set the track number (builder style)
    pub fn with_track(mut self, track: u32) -> Self {
        self.track = Some(track);
        self
    }

    /// Set the cover reference (builder style)
    pub fn with_cover(mut self, cover: impl Into<String>) -> Self {
        self.cover = Some(cover.into());
        self
    }

    /// Set the title if not already set
    ///
    /// Returns `false` when a title was already present.
    pub fn set_title(&mut self, title: impl Into<String>) -> bool {
        fill(&mut self.title, title.into())
    }

    /// Set the artist if not already set
    pub fn set_artist(&mut self, artist: impl Into<String>) -> bool {
        fill(&mut self.artist, artist.into())
    }

    /// Set the album if not already set
    pub fn set_album(&mut self, album: impl Into<String>) -> bool {
        fill(&mut self.album, album.into())
    }

    /// Set the genre if not already set
    pub fn set_genre(&mut self, genre: impl Into<String>) -> bool {
        fill(&mut self.genre, genre.into())
    }

    /// Set the track number if not already set
    pub fn set_track(&mut self, track: u32) -> bool {
        fill(&mut self.track, track)
    }

    /// Set the cover reference if not already set
    pub fn set_cover(&mut self, cover: impl Into<String>) -> bool {
        fill(&mut self.cover, cover.into())
    }

    /// Media title
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Media artist
    pub fn artist(&self) -> Option<&str> {
        self.artist.as_deref()
    }

    /// Media album
    pub fn album(&self) -> Option<&str> {
        self.album.as_deref()
    }

    /// Media genre
    pub fn genre(&self) -> Option<&str> {
        self.genre.as_deref()
    }

    /// Track number in album
    pub fn track(&self) -> Option<u32> {
        self.track
    }

    /// Cover reference
    pub fn cover(&self) -> Option<&str> {
        self.cover.as_deref()
    }

    /// Check whether no field is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Fill the unset fields of `self` from `old`
    ///
    /// Fields already set in `self` win. Equivalent to
    /// `merge_with(old, TagsMergeFlags::NONE)`.
    pub fn merge(self, old: &Tags) -> Self {
        self.merge_with(old, TagsMergeFlags::NONE)
    }

    /// Fill the unset fields of `self` from `old`, skipping the fields named
    /// in `flags`
    pub fn merge_with(mut self, old: &Tags, flags: TagsMergeFlags) -> Self {
        if !flags.contains(TagsMergeFlags::SKIP_TITLE) && self.title.is_none() {
            self.title.clone_from(&old.title);
        }
        if !flags.contains(TagsMergeFlags::SKIP_ARTIST) && self.artist.is_none() {
            self.artist.clone_from(&old.artist);
        }
        if !flags.contains(TagsMergeFlags::SKIP_ALBUM) && self.album.is_none() {
            self.album.clone_from(&old.album);
        }
        if !flags.contains(TagsMergeFlags::SKIP_GENRE) && self.genre.is_none() {
            self.genre.clone_from(&old.genre);
        }
        if !flags.contains(TagsMergeFlags::SKIP_TRACK) && self.track.is_none() {
            self.track = old.track;
        }
        if !flags.contains(TagsMergeFlags::SKIP_COVER) && self.cover.is_none() {
            self.cover.clone_from(&old.cover);
        }
        self
    }
}

fn fill<T>(slot: &mut Option<T>, value: T) -> bool {
    if slot.is_some() {
        return false;
    }
    *slot = Some(value);
    true
}
