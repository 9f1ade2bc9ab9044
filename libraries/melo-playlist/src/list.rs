//! Circular sibling lists
//!
//! Siblings are linked through the `prev`/`next` handles of their nodes into
//! a circular list: the head's `prev` is the tail, so first and last are both
//! O(1). Every level also caches which sibling leads to the playing entry.

use crate::arena::Arena;
use crate::tree::Tree;
use crate::types::EntryId;

/// Ordered children of a container or of the playlist root
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct List {
    pub head: Option<EntryId>,
    pub count: usize,
    /// Sibling leading to the playing entry
    pub current: Option<EntryId>,
    /// Position of `current`, meaningless while `current` is `None`
    pub current_index: usize,
}

/// List addressed by the node owning it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum ListOwner {
    Root,
    Entry(EntryId),
}

impl ListOwner {
    pub fn parent(self) -> Option<EntryId> {
        match self {
            Self::Root => None,
            Self::Entry(id) => Some(id),
        }
    }
}

impl From<Option<EntryId>> for ListOwner {
    fn from(parent: Option<EntryId>) -> Self {
        parent.map_or(Self::Root, Self::Entry)
    }
}

/// Closed circular run of nodes detached from any list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Run {
    pub head: EntryId,
    pub count: usize,
}

impl Run {
    /// Run made of one self-linked node
    pub fn single(id: EntryId) -> Self {
        Self { head: id, count: 1 }
    }
}

/// Iterator over the members of a list or run, head first
pub(crate) struct Siblings<'a> {
    arena: &'a Arena,
    next: Option<EntryId>,
    remaining: usize,
}

impl<'a> Siblings<'a> {
    pub fn new(arena: &'a Arena, head: Option<EntryId>, count: usize) -> Self {
        Self {
            arena,
            next: head,
            remaining: count,
        }
    }
}

impl Iterator for Siblings<'_> {
    type Item = EntryId;

    fn next(&mut self) -> Option<EntryId> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.next?;
        self.remaining -= 1;
        self.next = Some(self.arena[id].next);
        Some(id)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl Tree {
    pub(crate) fn list(&self, owner: ListOwner) -> &List {
        match owner {
            ListOwner::Root => &self.root,
            ListOwner::Entry(id) => &self.arena[id].children,
        }
    }

    pub(crate) fn list_mut(&mut self, owner: ListOwner) -> &mut List {
        match owner {
            ListOwner::Root => &mut self.root,
            ListOwner::Entry(id) => &mut self.arena[id].children,
        }
    }

    /// List holding `id`, according to its parent link
    pub(crate) fn owner_of(&self, id: EntryId) -> ListOwner {
        self.arena[id].parent.into()
    }

    pub(crate) fn siblings(&self, owner: ListOwner) -> Siblings<'_> {
        let list = self.list(owner);
        Siblings::new(&self.arena, list.head, list.count)
    }

    pub(crate) fn run_ids(&self, run: Run) -> Vec<EntryId> {
        Siblings::new(&self.arena, Some(run.head), run.count).collect()
    }

    pub(crate) fn last(&self, owner: ListOwner) -> Option<EntryId> {
        self.list(owner).head.map(|head| self.arena[head].prev)
    }

    pub(crate) fn is_first(&self, owner: ListOwner, id: EntryId) -> bool {
        self.list(owner).head == Some(id)
    }

    pub(crate) fn is_last(&self, owner: ListOwner, id: EntryId) -> bool {
        self.last(owner) == Some(id)
    }

    /// Entry at `index`, walking from whichever end is closer
    pub(crate) fn nth(&self, owner: ListOwner, index: usize) -> Option<EntryId> {
        let list = self.list(owner);
        if index >= list.count {
            return None;
        }

        let mut id = list.head?;
        if index <= list.count / 2 {
            for _ in 0..index {
                id = self.arena[id].next;
            }
        } else {
            for _ in index..list.count {
                id = self.arena[id].prev;
            }
        }
        Some(id)
    }

    pub(crate) fn index_of(&self, owner: ListOwner, id: EntryId) -> Option<usize> {
        self.siblings(owner).position(|sibling| sibling == id)
    }

    /// Reset the sibling links of a node so it forms a run on its own
    pub(crate) fn isolate(&mut self, id: EntryId) {
        let node = &mut self.arena[id];
        node.prev = id;
        node.next = id;
    }

    fn link_before(&mut self, anchor: EntryId, run: Run) {
        let tail = self.arena[run.head].prev;
        let before = self.arena[anchor].prev;

        self.arena[before].next = run.head;
        self.arena[run.head].prev = before;
        self.arena[tail].next = anchor;
        self.arena[anchor].prev = tail;
    }

    /// Insert a run before `anchor`, or at the tail when `anchor` is `None`
    ///
    /// `at` is the position of `anchor` (the list length for the tail). A
    /// `current` at or after the insertion point is shifted by the run length.
    pub(crate) fn splice(&mut self, owner: ListOwner, run: Run, anchor: Option<EntryId>, at: usize) {
        if let Some(head) = self.list(owner).head {
            self.link_before(anchor.unwrap_or(head), run);
        }

        let list = self.list_mut(owner);
        if at == 0 || list.head.is_none() {
            list.head = Some(run.head);
        }
        list.count += run.count;
        if list.current.is_some() && list.current_index >= at {
            list.current_index += run.count;
        }
    }

    pub(crate) fn prepend(&mut self, owner: ListOwner, id: EntryId) {
        let head = self.list(owner).head;
        self.splice(owner, Run::single(id), head, 0);
    }

    pub(crate) fn append(&mut self, owner: ListOwner, id: EntryId) {
        let count = self.list(owner).count;
        self.splice(owner, Run::single(id), None, count);
    }

    /// Detach up to `max_count` siblings starting at `first` (found at `index`)
    ///
    /// When the run holds the list's `current`, the owner forgets it and it is
    /// handed back; restoring the current chain is up to the caller.
    pub(crate) fn extract(
        &mut self,
        owner: ListOwner,
        first: EntryId,
        index: usize,
        max_count: usize,
    ) -> (Run, Option<EntryId>) {
        let list = *self.list(owner);
        let count = max_count.min(list.count.saturating_sub(index)).max(1);

        let mut last = first;
        let mut holds_current = list.current == Some(first);
        for _ in 1..count {
            last = self.arena[last].next;
            holds_current |= list.current == Some(last);
        }

        let mut head = list.head;
        if count == list.count {
            head = None;
        } else {
            let before = self.arena[first].prev;
            let after = self.arena[last].next;
            self.arena[before].next = after;
            self.arena[after].prev = before;
            if head == Some(first) {
                head = Some(after);
            }
        }
        self.arena[first].prev = last;
        self.arena[last].next = first;

        let list = self.list_mut(owner);
        list.head = head;
        list.count -= count;
        let current = if holds_current {
            list.current_index = 0;
            list.current.take()
        } else {
            if list.current.is_some() && list.current_index > index {
                list.current_index -= count;
            }
            None
        };

        (Run { head: first, count }, current)
    }

    /// Join two detached runs, `b` after `a`
    pub(crate) fn concat(&mut self, a: Run, b: Run) -> Run {
        let a_tail = self.arena[a.head].prev;
        let b_tail = self.arena[b.head].prev;

        self.arena[a_tail].next = b.head;
        self.arena[b.head].prev = a_tail;
        self.arena[b_tail].next = a.head;
        self.arena[a.head].prev = b_tail;

        Run {
            head: a.head,
            count: a.count + b.count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::PlaylistEntry;
    use melo_core::PlaylistId;

    fn tree_with(names: &[&str]) -> (Tree, Vec<EntryId>) {
        let mut tree = Tree::new(PlaylistId::default_id());
        let ids = names
            .iter()
            .map(|name| {
                let id = tree.attach(PlaylistEntry::media("file", *name), None);
                tree.append(ListOwner::Root, id);
                id
            })
            .collect();
        (tree, ids)
    }

    fn names(tree: &Tree, owner: ListOwner) -> Vec<String> {
        tree.siblings(owner)
            .filter_map(|id| tree.arena[id].name.clone())
            .collect()
    }

    fn assert_ring(tree: &Tree, owner: ListOwner) {
        let list = tree.list(owner);
        let Some(head) = list.head else {
            assert_eq!(list.count, 0);
            return;
        };
        let mut id = head;
        let mut steps = 0;
        loop {
            let next = tree.arena[id].next;
            assert_eq!(tree.arena[next].prev, id);
            id = next;
            steps += 1;
            if id == head {
                break;
            }
        }
        assert_eq!(steps, list.count);
    }

    #[test]
    fn single_entry_links_to_itself() {
        let (tree, ids) = tree_with(&["a"]);
        assert_eq!(tree.arena[ids[0]].prev, ids[0]);
        assert_eq!(tree.arena[ids[0]].next, ids[0]);
        assert!(tree.is_first(ListOwner::Root, ids[0]));
        assert!(tree.is_last(ListOwner::Root, ids[0]));
    }

    #[test]
    fn prepend_shifts_current_index() {
        let (mut tree, ids) = tree_with(&["a", "b"]);
        tree.root.current = Some(ids[1]);
        tree.root.current_index = 1;

        let c = tree.attach(PlaylistEntry::media("file", "c"), None);
        tree.prepend(ListOwner::Root, c);

        assert_eq!(names(&tree, ListOwner::Root), vec!["c", "a", "b"]);
        assert_eq!(tree.root.current_index, 2);
        assert_ring(&tree, ListOwner::Root);
    }

    #[test]
    fn nth_from_both_ends() {
        let (tree, ids) = tree_with(&["a", "b", "c", "d", "e"]);
        for (index, id) in ids.iter().enumerate() {
            assert_eq!(tree.nth(ListOwner::Root, index), Some(*id));
            assert_eq!(tree.index_of(ListOwner::Root, *id), Some(index));
        }
        assert_eq!(tree.nth(ListOwner::Root, 5), None);
    }

    #[test]
    fn extract_middle_run() {
        let (mut tree, ids) = tree_with(&["a", "b", "c", "d", "e"]);
        tree.root.current = Some(ids[4]);
        tree.root.current_index = 4;

        let (run, current) = tree.extract(ListOwner::Root, ids[1], 1, 2);

        assert_eq!(current, None);
        assert_eq!(run.count, 2);
        assert_eq!(tree.run_ids(run), vec![ids[1], ids[2]]);
        assert_eq!(names(&tree, ListOwner::Root), vec!["a", "d", "e"]);
        assert_eq!(tree.root.current_index, 2);
        assert_ring(&tree, ListOwner::Root);
    }

    #[test]
    fn extract_head_hands_back_current() {
        let (mut tree, ids) = tree_with(&["a", "b", "c"]);
        tree.root.current = Some(ids[0]);
        tree.root.current_index = 0;

        let (run, current) = tree.extract(ListOwner::Root, ids[0], 0, 1);

        assert_eq!(current, Some(ids[0]));
        assert_eq!(tree.root.current, None);
        assert_eq!(tree.root.head, Some(ids[1]));
        assert_eq!(run, Run::single(ids[0]));
        assert_eq!(tree.arena[ids[0]].next, ids[0]);
        assert_ring(&tree, ListOwner::Root);
    }

    #[test]
    fn extract_whole_list() {
        let (mut tree, ids) = tree_with(&["a", "b"]);
        let (run, _) = tree.extract(ListOwner::Root, ids[0], 0, 10);

        assert_eq!(run.count, 2);
        assert_eq!(tree.root.head, None);
        assert_eq!(tree.root.count, 0);
    }

    #[test]
    fn splice_before_anchor_and_at_tail() {
        let (mut tree, ids) = tree_with(&["a", "b", "c", "d"]);
        tree.root.current = Some(ids[2]);
        tree.root.current_index = 2;

        let (run, _) = tree.extract(ListOwner::Root, ids[3], 3, 1);
        tree.splice(ListOwner::Root, run, Some(ids[1]), 1);
        assert_eq!(names(&tree, ListOwner::Root), vec!["a", "d", "b", "c"]);
        assert_eq!(tree.root.current_index, 3);

        let (run, _) = tree.extract(ListOwner::Root, ids[0], 0, 1);
        assert_eq!(tree.root.current_index, 2);
        tree.splice(ListOwner::Root, run, None, 3);
        assert_eq!(names(&tree, ListOwner::Root), vec!["d", "b", "c", "a"]);
        assert_eq!(tree.root.current_index, 2);
        assert_ring(&tree, ListOwner::Root);
    }

    #[test]
    fn concat_keeps_request_order() {
        let (mut tree, ids) = tree_with(&["a", "b", "c", "d"]);
        let (second, _) = tree.extract(ListOwner::Root, ids[3], 3, 1);
        let (first, _) = tree.extract(ListOwner::Root, ids[1], 1, 1);

        let run = tree.concat(second, first);

        assert_eq!(tree.run_ids(run), vec![ids[3], ids[1]]);
        assert_eq!(names(&tree, ListOwner::Root), vec!["a", "c"]);
    }
}
