//! Playlist tree
//!
//! [`Tree`] owns the arena of one playlist, its root list and the shuffle
//! backup. Operations never talk to listeners or to the player directly:
//! they record what has to happen in [`Effects`], which the registry applies
//! once the tree is consistent again.

use crate::arena::Arena;
use crate::entry::PlaylistEntry;
use crate::error::{PlaylistError, Result};
use crate::events::{MediaItem, PlaylistEvent};
use crate::list::{List, ListOwner, Siblings};
use crate::player::{PlayRequest, PlaylistControls};
use crate::request::MediaList;
use crate::shuffle::ShuffleBackup;
use crate::types::{EntryFlags, EntryId, EntryRef, IndexPath};
use melo_core::{PlaylistId, Tags};
use std::sync::Arc;
use tracing::debug;

/// Side effects of a tree operation
#[derive(Debug, Default)]
pub(crate) struct Effects {
    /// Make the playlist the current one
    pub make_current: bool,
    /// Events to broadcast, in order
    pub events: Vec<PlaylistEvent>,
    /// Stop the player
    pub reset: bool,
    /// Media to hand to the player
    pub play: Option<PlayRequest>,
    /// Player controls may have changed
    pub controls: bool,
}

#[derive(Debug)]
pub(crate) struct Tree {
    pub playlist: PlaylistId,
    /// Registration serial, stamped into entry handles
    pub instance: u64,
    pub arena: Arena,
    pub root: List,
    pub shuffle: Option<ShuffleBackup>,
}

impl Tree {
    pub fn new(playlist: PlaylistId) -> Self {
        Self {
            playlist,
            instance: 0,
            arena: Arena::default(),
            root: List::default(),
            shuffle: None,
        }
    }

    pub fn entry_ref(&self, id: EntryId) -> EntryRef {
        EntryRef::new(self.playlist.clone(), self.instance, id)
    }

    pub fn is_shuffled(&self) -> bool {
        self.shuffle.is_some()
    }

    /// Store a detached entry tree; the returned node is not linked anywhere
    pub(crate) fn attach(&mut self, entry: PlaylistEntry, parent: Option<EntryId>) -> EntryId {
        let (node, children) = entry.into_node(parent);
        let id = self.arena.insert(node);
        for child in children {
            let child = self.attach(child, Some(id));
            self.append(ListOwner::Entry(id), child);
        }
        id
    }

    /// Release a node and everything below it
    pub(crate) fn free_subtree(&mut self, id: EntryId) {
        let mut pending = vec![id];
        while let Some(id) = pending.pop() {
            let Some(node) = self.arena.get(id) else {
                continue;
            };
            let children = node.children;
            pending.extend(Siblings::new(&self.arena, children.head, children.count));
            self.arena.remove(id);
        }
    }

    /// Release every entry, including those kept for a shuffle restore
    pub(crate) fn release_all(&mut self) {
        self.shuffle = None;
        self.root = List::default();
        self.arena.clear();
    }

    /// Entry designated by a non-empty path
    pub(crate) fn resolve(&self, path: &IndexPath) -> Result<EntryId> {
        let mut owner = ListOwner::Root;
        let mut found = None;
        for &index in path.as_slice() {
            let id = self
                .nth(owner, index)
                .ok_or_else(|| PlaylistError::InvalidPath(path.clone()))?;
            owner = ListOwner::Entry(id);
            found = Some(id);
        }
        found.ok_or_else(|| PlaylistError::InvalidPath(path.clone()))
    }

    /// Path of an attached entry, `None` for a stale or detached one
    pub(crate) fn path_of(&self, id: EntryId) -> Option<IndexPath> {
        self.arena.get(id)?;

        let mut indices = Vec::new();
        let mut node = id;
        loop {
            let owner = self.owner_of(node);
            indices.push(self.index_of(owner, node)?);
            match owner {
                ListOwner::Entry(parent) => node = parent,
                ListOwner::Root => break,
            }
        }
        indices.reverse();
        Some(IndexPath::new(indices))
    }

    pub(crate) fn locate(&self, id: EntryId) -> Result<IndexPath> {
        self.path_of(id).ok_or(PlaylistError::EntryNotFound(id))
    }

    pub(crate) fn depth(&self, id: EntryId) -> usize {
        let mut depth = 0;
        let mut node = id;
        while let Some(parent) = self.arena[node].parent {
            depth += 1;
            node = parent;
        }
        depth
    }

    /// Forget the current chain below `owner`
    pub(crate) fn clear_current(&mut self, owner: ListOwner) {
        let mut owner = owner;
        loop {
            let list = self.list_mut(owner);
            let current = list.current.take();
            list.current_index = 0;
            match current {
                Some(id) => owner = ListOwner::Entry(id),
                None => break,
            }
        }
    }

    /// Mark `id` and all its ancestors as current at their level
    pub(crate) fn set_current_chain(&mut self, id: EntryId) {
        let mut node = id;
        loop {
            let owner = self.owner_of(node);
            let Some(index) = self.index_of(owner, node) else {
                break;
            };
            let list = self.list_mut(owner);
            list.current = Some(node);
            list.current_index = index;
            match owner {
                ListOwner::Entry(parent) => node = parent,
                ListOwner::Root => break,
            }
        }
    }

    /// Deepest entry of the current chain
    pub(crate) fn current_leaf(&self) -> Option<EntryId> {
        let mut leaf = self.root.current?;
        while let Some(next) = self.arena[leaf].children.current {
            leaf = next;
        }
        Some(leaf)
    }

    pub(crate) fn current_path(&self) -> IndexPath {
        let mut path = IndexPath::default();
        let mut list = &self.root;
        while let Some(current) = list.current {
            path.push(list.current_index);
            list = &self.arena[current].children;
        }
        path
    }

    pub(crate) fn controls(&self) -> PlaylistControls {
        let mut has_prev = false;
        let mut has_next = false;
        let mut owner = ListOwner::Root;

        while let Some(current) = self.list(owner).current {
            has_prev |= !self.is_last(owner, current);
            has_next |= !self.is_first(owner, current);
            if has_prev && has_next {
                break;
            }
            owner = ListOwner::Entry(current);
        }

        PlaylistControls {
            has_prev,
            has_next,
            shuffle: self.is_shuffled(),
        }
    }

    pub(crate) fn media_item(&self, id: EntryId, index: usize, nested: bool) -> MediaItem {
        let node = &self.arena[id];
        let children = if nested {
            self.siblings(ListOwner::Entry(id))
                .enumerate()
                .map(|(index, child)| self.media_item(child, index, false))
                .collect()
        } else {
            Vec::new()
        };

        MediaItem {
            index,
            name: node.name.clone(),
            playable: node.flags.contains(EntryFlags::PLAYABLE),
            sortable: node.flags.contains(EntryFlags::SORTABLE),
            tags: node.tags.as_deref().cloned(),
            children,
        }
    }

    pub(crate) fn media_list(&self, offset: usize, count: usize) -> MediaList {
        let total = self.root.count;
        let offset = offset.min(total);
        let count = count.min(total - offset);

        let medias = self
            .siblings(ListOwner::Root)
            .enumerate()
            .skip(offset)
            .take(count)
            .map(|(index, id)| self.media_item(id, index, true))
            .collect();

        MediaList {
            offset,
            count,
            medias,
            current: self.current_path(),
        }
    }

    /// Insert a detached entry at the head of the root list
    pub(crate) fn add_entry(&mut self, entry: PlaylistEntry, fx: &mut Effects) -> EntryId {
        let id = self.attach(entry, None);
        if self.is_shuffled() {
            self.arena[id].flags.insert(EntryFlags::SHUFFLE_ADDED);
        }
        self.prepend(ListOwner::Root, id);

        fx.events.push(PlaylistEvent::Add {
            parent: IndexPath::default(),
            index: 0,
            media: self.media_item(id, 0, true),
        });
        fx.controls = true;
        debug!(playlist = %self.playlist, entry = %id, "entry added");
        id
    }

    /// Insert a new media at the head of `parent`'s children and select it
    pub(crate) fn add_child_media(
        &mut self,
        parent: EntryId,
        path: Option<String>,
        name: Option<String>,
        tags: Option<Tags>,
        fx: &mut Effects,
    ) -> Result<EntryId> {
        let parent_path = self.locate(parent)?;
        let owned_by_player = self.has_player_in_chain(parent);

        let id = self.attach(PlaylistEntry::new(None, path, name, tags), Some(parent));
        let flags = &mut self.arena[id].flags;
        if owned_by_player {
            flags.remove(EntryFlags::PLAYABLE | EntryFlags::SORTABLE);
        }
        if self.shuffle.is_some() {
            flags.insert(EntryFlags::SHUFFLE_ADDED);
        }

        let owner = ListOwner::Entry(parent);
        self.prepend(owner, id);
        let list = self.list_mut(owner);
        list.current = Some(id);
        list.current_index = 0;

        fx.events.push(PlaylistEvent::Add {
            parent: parent_path,
            index: 0,
            media: self.media_item(id, 0, true),
        });
        fx.controls = true;
        Ok(id)
    }

    fn has_player_in_chain(&self, id: EntryId) -> bool {
        let mut node = Some(id);
        while let Some(id) = node {
            if self.arena[id].has_player() {
                return true;
            }
            node = self.arena[id].parent;
        }
        false
    }

    /// Replace (`reset`) or merge the name and tags of an entry
    pub(crate) fn update_entry(
        &mut self,
        id: EntryId,
        name: Option<String>,
        tags: Option<Tags>,
        reset: bool,
        fx: &mut Effects,
    ) -> Result<()> {
        let path = self.locate(id)?;

        let node = &mut self.arena[id];
        if reset {
            node.name = name;
            node.tags = tags.map(Arc::new);
        } else if let Some(tags) = tags {
            let merged = match node.tags.as_deref() {
                Some(old) => tags.merge(old),
                None => tags,
            };
            node.tags = Some(Arc::new(merged));
        }

        let media = self.media_item(id, path.last().unwrap_or_default(), true);
        fx.events.push(PlaylistEvent::Update { path, media });
        Ok(())
    }
}
