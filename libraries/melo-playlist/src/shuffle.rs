//! Reversible shuffle
//!
//! Enabling shuffle records the original order of the root list and of every
//! sortable container below it, then rebuilds each of those lists in a random
//! order. Disabling it puts the original order back without losing what
//! happened meanwhile:
//! - entries added (or moved in) while shuffled come first, in their order
//! - entries still present follow in their original order
//! - entries deleted while shuffled are released for good

use crate::events::PlaylistEvent;
use crate::list::{List, ListOwner};
use crate::tree::{Effects, Tree};
use crate::types::{EntryFlags, EntryId};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use tracing::debug;

/// Original order of one shuffled list
#[derive(Debug)]
struct Level {
    owner: ListOwner,
    order: Vec<EntryId>,
}

/// Snapshot taken when shuffle is enabled
#[derive(Debug, Default)]
pub(crate) struct ShuffleBackup {
    levels: Vec<Level>,
    /// Entries deleted while shuffled, detached but not yet released
    deleted: Vec<EntryId>,
}

impl ShuffleBackup {
    pub fn keep_deleted(&mut self, id: EntryId) {
        self.deleted.push(id);
    }
}

impl Tree {
    /// Enable or disable shuffle
    ///
    /// Returns `false` when shuffle already was in the requested state.
    pub(crate) fn set_shuffle<R: Rng + ?Sized>(
        &mut self,
        enable: bool,
        rng: &mut R,
        fx: &mut Effects,
    ) -> bool {
        match (enable, self.shuffle.take()) {
            (true, None) => self.shuffle = Some(self.shuffle_save(rng)),
            (false, Some(backup)) => self.shuffle_restore(backup),
            (_, backup) => {
                self.shuffle = backup;
                return false;
            }
        }

        fx.events.push(PlaylistEvent::Shuffle { enabled: enable });
        fx.controls = true;
        true
    }

    /// Record the original order and shuffle every sortable level
    pub(crate) fn shuffle_save<R: Rng + ?Sized>(&mut self, rng: &mut R) -> ShuffleBackup {
        let mut levels = Vec::new();
        let mut pending = vec![ListOwner::Root];

        while let Some(owner) = pending.pop() {
            let order: Vec<EntryId> = self.siblings(owner).collect();
            for &id in &order {
                let node = &mut self.arena[id];
                node.flags.remove(EntryFlags::SHUFFLE_INSERTED | EntryFlags::SHUFFLE_ADDED);
                if node.flags.contains(EntryFlags::SORTABLE) {
                    pending.push(ListOwner::Entry(id));
                }
            }

            let mut picks = order.clone();
            picks.shuffle(rng);
            self.rebuild_shuffled(owner, &picks);
            levels.push(Level { owner, order });
        }

        debug!(playlist = %self.playlist, levels = levels.len(), "shuffle backup saved");
        ShuffleBackup {
            levels,
            deleted: Vec::new(),
        }
    }

    /// Refill a list by prepending `picks`, tracking `current` as prepend does
    fn rebuild_shuffled(&mut self, owner: ListOwner, picks: &[EntryId]) {
        let current = self.list(owner).current;
        *self.list_mut(owner) = List::default();

        for &id in picks {
            self.isolate(id);
            self.prepend(owner, id);
            self.arena[id].flags.insert(EntryFlags::SHUFFLE_INSERTED);
            if current == Some(id) {
                let list = self.list_mut(owner);
                list.current = Some(id);
                list.current_index = 0;
            }
        }
    }

    /// Put back the original order of every level saved in `backup`
    pub(crate) fn shuffle_restore(&mut self, backup: ShuffleBackup) {
        for level in backup.levels {
            if let ListOwner::Entry(id) = level.owner {
                if !self.arena.contains(id) {
                    continue;
                }
            }
            self.restore_level(level);
        }

        for id in backup.deleted {
            self.free_subtree(id);
        }
        debug!(playlist = %self.playlist, "shuffle backup restored");
    }

    fn restore_level(&mut self, level: Level) {
        let live: Vec<EntryId> = self.siblings(level.owner).collect();
        let present: HashSet<EntryId> = live.iter().copied().collect();
        let mut placed = HashSet::with_capacity(live.len());
        let mut order = Vec::with_capacity(live.len());

        let added = live
            .iter()
            .copied()
            .filter(|&id| self.arena[id].flags.contains(EntryFlags::SHUFFLE_ADDED));
        let original = level.order.into_iter().filter(|id| present.contains(id));
        for id in added.chain(original).chain(live.iter().copied()) {
            if placed.insert(id) {
                order.push(id);
            }
        }

        self.relink(level.owner, &order);
    }

    /// Rebuild a list in `order`, keeping its current entry
    fn relink(&mut self, owner: ListOwner, order: &[EntryId]) {
        let current = self.list(owner).current;
        *self.list_mut(owner) = List::default();

        for &id in order {
            self.isolate(id);
            self.arena[id]
                .flags
                .remove(EntryFlags::SHUFFLE_ADDED | EntryFlags::SHUFFLE_INSERTED);
            self.append(owner, id);
        }

        if let Some(current) = current {
            if let Some(index) = order.iter().position(|&id| id == current) {
                let list = self.list_mut(owner);
                list.current = Some(current);
                list.current_index = index;
            }
        }
    }
}
