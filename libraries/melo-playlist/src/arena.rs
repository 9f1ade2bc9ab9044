//! Generational slot storage for playlist entries

use crate::entry::Node;
use crate::types::EntryId;
use std::ops::{Index, IndexMut};

#[derive(Debug)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Owner of every node of one playlist
///
/// Released slots are reused with a bumped generation, so lookups through a
/// stale [`EntryId`] miss instead of aliasing a newer entry.
#[derive(Debug, Default)]
pub(crate) struct Arena {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl Arena {
    /// Store a node, linked to itself
    pub fn insert(&mut self, mut node: Node) -> EntryId {
        let id = match self.free.pop() {
            Some(index) => EntryId::new(index, self.slots[index as usize].generation),
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    node: None,
                });
                EntryId::new(index, 0)
            }
        };

        node.prev = id;
        node.next = id;
        self.slots[id.slot()].node = Some(node);
        id
    }

    pub fn get(&self, id: EntryId) -> Option<&Node> {
        self.slots
            .get(id.slot())
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.node.as_ref())
    }

    pub fn get_mut(&mut self, id: EntryId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.slot())
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.node.as_mut())
    }

    pub fn contains(&self, id: EntryId) -> bool {
        self.get(id).is_some()
    }

    /// Release a node; its children are left untouched
    pub fn remove(&mut self, id: EntryId) -> Option<Node> {
        let slot = self.slots.get_mut(id.slot())?;
        if slot.generation != id.generation() {
            return None;
        }

        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.slot() as u32);
        Some(node)
    }

    /// Live nodes
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.node.is_some()).count()
    }

    pub fn clear(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.node.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(index as u32);
            }
        }
    }
}

impl Index<EntryId> for Arena {
    type Output = Node;

    fn index(&self, id: EntryId) -> &Node {
        match self.get(id) {
            Some(node) => node,
            None => panic!("stale entry id {id}"),
        }
    }
}

impl IndexMut<EntryId> for Arena {
    fn index_mut(&mut self, id: EntryId) -> &mut Node {
        match self.get_mut(id) {
            Some(node) => node,
            None => panic!("stale entry id {id}"),
        }
    }
}
