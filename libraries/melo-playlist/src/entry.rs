//! Playlist entries
//!
//! A [`PlaylistEntry`] is a detached entry tree built by a browser or a
//! player before it is handed to the registry. Once attached it becomes a set
//! of [`Node`]s owned by the playlist arena.

use crate::list::List;
use crate::types::{EntryFlags, EntryId};
use melo_core::Tags;
use std::sync::Arc;

/// Detached playlist entry
///
/// An entry with a player ID is a playable media; an entry without one is a
/// sortable container whose children can be populated with
/// [`PlaylistEntry::add_child`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistEntry {
    player: Option<String>,
    path: Option<String>,
    name: Option<String>,
    tags: Option<Tags>,
    flags: EntryFlags,
    children: Vec<PlaylistEntry>,
}

impl PlaylistEntry {
    /// Create an entry
    ///
    /// When `name` is `None` it is derived from the last segment of `path`.
    pub fn new(
        player_id: Option<String>,
        path: Option<String>,
        name: Option<String>,
        tags: Option<Tags>,
    ) -> Self {
        let name = name.or_else(|| path.as_deref().and_then(name_from_path));
        let mut flags = EntryFlags::PLAYABLE;
        if player_id.is_none() {
            flags.insert(EntryFlags::SORTABLE);
        }

        Self {
            player: player_id,
            path,
            name,
            tags,
            flags,
            children: Vec::new(),
        }
    }

    /// Create a playable media entry
    pub fn media(player_id: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(Some(player_id.into()), Some(path.into()), None, None)
    }

    /// Create a container entry
    pub fn folder(name: impl Into<String>) -> Self {
        Self::new(None, None, Some(name.into()), None)
    }

    /// Set the display name (builder style)
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the tags (builder style)
    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = Some(tags);
        self
    }

    /// Insert a child at the head of the children list
    pub fn add_child(&mut self, child: PlaylistEntry) {
        self.children.insert(0, child);
    }

    /// Insert a child at the head of the children list (builder style)
    pub fn with_child(mut self, child: PlaylistEntry) -> Self {
        self.add_child(child);
        self
    }

    /// Player ID
    pub fn player_id(&self) -> Option<&str> {
        self.player.as_deref()
    }

    /// Media path / URI
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Display name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Media tags
    pub fn tags(&self) -> Option<&Tags> {
        self.tags.as_ref()
    }

    /// Entry flags
    pub fn flags(&self) -> EntryFlags {
        self.flags
    }

    /// Children in list order
    pub fn children(&self) -> &[PlaylistEntry] {
        &self.children
    }

    pub(crate) fn into_node(self, parent: Option<EntryId>) -> (Node, Vec<PlaylistEntry>) {
        let node = Node {
            player: self.player,
            path: self.path,
            name: self.name,
            tags: self.tags.map(Arc::new),
            flags: self.flags,
            parent,
            children: List::default(),
            prev: EntryId::DANGLING,
            next: EntryId::DANGLING,
        };
        (node, self.children)
    }
}

fn name_from_path(path: &str) -> Option<String> {
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .map(str::to_owned)
}

/// Entry stored in a playlist arena
///
/// `prev`/`next` link the node into the circular list of its siblings; a
/// node alone in its list links to itself.
#[derive(Debug)]
pub(crate) struct Node {
    pub player: Option<String>,
    pub path: Option<String>,
    pub name: Option<String>,
    pub tags: Option<Arc<Tags>>,
    pub flags: EntryFlags,
    pub parent: Option<EntryId>,
    pub children: List,
    pub prev: EntryId,
    pub next: EntryId,
}

impl Node {
    pub fn has_player(&self) -> bool {
        self.player.is_some()
    }
}
