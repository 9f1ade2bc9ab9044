//! Move and delete
//!
//! Both operations select entries, check everything they need, and only then
//! extract them from the tree as one detached run. A request that fails
//! validation leaves the tree untouched.

use crate::error::{PlaylistError, Result};
use crate::events::PlaylistEvent;
use crate::list::{ListOwner, Run};
use crate::tree::{Effects, Tree};
use crate::types::{EntryFlags, EntryId, IndexPath, Range};
use std::collections::HashSet;
use tracing::debug;

/// Validated set of entries to extract
struct Selection {
    /// Contiguous run: owner, first entry and its index
    linear: Option<(ListOwner, EntryId, usize)>,
    /// Selected entries, in request order
    ids: Vec<EntryId>,
    members: HashSet<EntryId>,
}

/// Where a moved run lands
struct Target {
    owner: ListOwner,
    /// Entry to insert before, `None` for the tail
    anchor: Option<EntryId>,
}

impl Selection {
    /// Check whether `id` or one of its ancestors is selected
    fn covers(&self, tree: &Tree, id: EntryId) -> bool {
        let mut node = Some(id);
        while let Some(id) = node {
            if self.members.contains(&id) {
                return true;
            }
            node = tree.arena[id].parent;
        }
        false
    }
}

impl Tree {
    fn select(&self, range: &Range) -> Result<Selection> {
        match range {
            Range::Linear { first, length } => {
                let id = self.resolve(first)?;
                let owner = self.owner_of(id);
                let index = first.last().unwrap_or_default();
                if *length == 0 || *length > self.list(owner).count.saturating_sub(index) {
                    return Err(PlaylistError::InvalidRange(format!(
                        "{length} entries from {first}"
                    )));
                }

                let ids: Vec<_> = self.siblings(owner).skip(index).take(*length).collect();
                Ok(Selection {
                    linear: Some((owner, id, index)),
                    members: ids.iter().copied().collect(),
                    ids,
                })
            }
            Range::Explicit { paths } => {
                if paths.is_empty() {
                    return Err(PlaylistError::InvalidRange("no entry".into()));
                }

                let ids = paths
                    .iter()
                    .map(|path| self.resolve(path))
                    .collect::<Result<Vec<_>>>()?;
                let members: HashSet<_> = ids.iter().copied().collect();
                if members.len() != ids.len() {
                    return Err(PlaylistError::InvalidRange("duplicate entry".into()));
                }

                let selection = Selection {
                    linear: None,
                    ids,
                    members,
                };
                for &id in &selection.ids {
                    if let Some(parent) = self.arena[id].parent {
                        if selection.covers(self, parent) {
                            return Err(PlaylistError::InvalidRange(
                                "entry selected along with its container".into(),
                            ));
                        }
                    }
                }
                Ok(selection)
            }
        }
    }

    fn target(&self, destination: Option<&IndexPath>, selection: &Selection) -> Result<Target> {
        let Some(path) = destination else {
            return Ok(Target {
                owner: ListOwner::Root,
                anchor: None,
            });
        };
        let invalid = |reason: &str| PlaylistError::InvalidDestination(format!("{path}: {reason}"));

        let Some((&index, parents)) = path.as_slice().split_last() else {
            return Err(invalid("empty path"));
        };
        let owner = if parents.is_empty() {
            ListOwner::Root
        } else {
            let container = self
                .resolve(&IndexPath::from(parents))
                .map_err(|_| invalid("no such container"))?;
            if !self.arena[container].flags.contains(EntryFlags::SORTABLE) {
                return Err(invalid("container is not sortable"));
            }
            if selection.covers(self, container) {
                return Err(invalid("container is being moved"));
            }
            ListOwner::Entry(container)
        };

        let count = self.list(owner).count;
        let anchor = match index {
            index if index == count => None,
            index if index < count => self.nth(owner, index),
            _ => return Err(invalid("index out of range")),
        };
        if anchor.is_some_and(|anchor| selection.members.contains(&anchor)) {
            return Err(invalid("anchor is being moved"));
        }

        Ok(Target { owner, anchor })
    }

    /// Detach the selection as one run, in request order
    ///
    /// Also returns the entry of the current chain found in the run, the
    /// deepest one if several lists handed one back.
    fn extract_selection(&mut self, selection: &Selection) -> Option<(Run, Option<EntryId>)> {
        if let Some((owner, first, index)) = selection.linear {
            return Some(self.extract(owner, first, index, selection.ids.len()));
        }

        let mut run: Option<Run> = None;
        let mut current: Option<(EntryId, usize)> = None;
        for &id in &selection.ids {
            let owner = self.owner_of(id);
            let index = self.index_of(owner, id)?;
            let depth = self.depth(id);

            let (single, found) = self.extract(owner, id, index, 1);
            if let Some(found) = found {
                if current.map_or(true, |(_, deepest)| depth > deepest) {
                    current = Some((found, depth));
                }
            }
            run = Some(match run {
                Some(run) => self.concat(run, single),
                None => single,
            });
        }

        run.map(|run| (run, current.map(|(id, _)| id)))
    }

    pub(crate) fn move_entries(
        &mut self,
        range: &Range,
        destination: Option<&IndexPath>,
        fx: &mut Effects,
    ) -> Result<()> {
        let selection = self.select(range)?;
        let target = self.target(destination, &selection)?;
        let (run, current) = self
            .extract_selection(&selection)
            .ok_or_else(|| PlaylistError::InvalidRange("nothing to move".into()))?;

        if current.is_some() {
            self.clear_current(ListOwner::Root);
        }

        let parent = target.owner.parent();
        let shuffled = self.shuffle.is_some();
        for id in self.run_ids(run) {
            let node = &mut self.arena[id];
            node.parent = parent;
            if shuffled {
                node.flags.insert(EntryFlags::SHUFFLE_ADDED);
            }
        }

        let count = self.list(target.owner).count;
        let at = target
            .anchor
            .and_then(|anchor| self.index_of(target.owner, anchor))
            .unwrap_or(count);
        self.splice(target.owner, run, target.anchor, at);

        if let Some(current) = current {
            self.set_current_chain(current);
        }

        debug!(playlist = %self.playlist, count = run.count, "entries moved");
        fx.events.push(PlaylistEvent::Move {
            range: range.clone(),
            destination: destination.cloned(),
        });
        fx.controls = true;
        Ok(())
    }

    pub(crate) fn delete_entries(&mut self, range: &Range, fx: &mut Effects) -> Result<()> {
        let selection = self.select(range)?;
        let (run, current) = self
            .extract_selection(&selection)
            .ok_or_else(|| PlaylistError::InvalidRange("nothing to delete".into()))?;

        if current.is_some() {
            self.clear_current(ListOwner::Root);
            fx.reset = true;
        }
        self.release_run(run);

        debug!(playlist = %self.playlist, count = run.count, "entries deleted");
        fx.events.push(PlaylistEvent::Delete {
            range: range.clone(),
        });
        fx.controls = true;
        Ok(())
    }

    /// Release a detached run
    ///
    /// While shuffled, entries that belong to the backup are only flagged and
    /// kept aside until the backup is restored.
    fn release_run(&mut self, run: Run) {
        for id in self.run_ids(run) {
            let keep = self.shuffle.is_some()
                && !self.arena[id].flags.contains(EntryFlags::SHUFFLE_ADDED);
            if !keep {
                self.free_subtree(id);
                continue;
            }

            self.isolate(id);
            self.arena[id].flags.insert(EntryFlags::SHUFFLE_DELETED);
            if let Some(backup) = self.shuffle.as_mut() {
                backup.keep_deleted(id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::tests::{id_at, names_at, sample_tree};

    fn path(indices: &[usize]) -> IndexPath {
        IndexPath::from(indices)
    }

    #[test]
    fn move_child_into_other_container() {
        let mut tree = sample_tree();
        let a = id_at(&tree, &[0]);
        let c = id_at(&tree, &[2]);
        let a1 = id_at(&tree, &[0, 0]);
        let mut fx = Effects::default();

        tree.move_entries(
            &Range::Explicit {
                paths: vec![path(&[0, 0])],
            },
            Some(&path(&[2, 0])),
            &mut fx,
        )
        .unwrap();

        assert_eq!(tree.arena[a].children.count, 1);
        assert_eq!(tree.arena[c].children.count, 1);
        assert_eq!(tree.arena[a1].parent, Some(c));
        assert_eq!(names_at(&tree, ListOwner::Entry(c)), vec!["a1"]);
        assert_eq!(fx.events.len(), 1);
    }

    #[test]
    fn move_linear_run_before_anchor() {
        let mut tree = sample_tree();
        let mut fx = Effects::default();

        tree.move_entries(
            &Range::Linear {
                first: path(&[1]),
                length: 2,
            },
            Some(&path(&[0])),
            &mut fx,
        )
        .unwrap();

        assert_eq!(names_at(&tree, ListOwner::Root), vec!["B", "C", "A"]);
    }

    #[test]
    fn move_keeps_current_chain() {
        let mut tree = sample_tree();
        let mut fx = Effects::default();
        tree.play_path(&path(&[0, 0]), &mut fx).unwrap();

        tree.move_entries(
            &Range::Explicit {
                paths: vec![path(&[0])],
            },
            None,
            &mut fx,
        )
        .unwrap();

        assert_eq!(names_at(&tree, ListOwner::Root), vec!["B", "C", "A"]);
        assert_eq!(tree.current_path(), path(&[2, 0]));
    }

    #[test]
    fn move_shifts_current_index_of_destination() {
        let mut tree = sample_tree();
        let mut fx = Effects::default();
        tree.play_path(&path(&[1]), &mut fx).unwrap();

        tree.move_entries(
            &Range::Explicit {
                paths: vec![path(&[2])],
            },
            Some(&path(&[0])),
            &mut fx,
        )
        .unwrap();

        assert_eq!(names_at(&tree, ListOwner::Root), vec!["C", "A", "B"]);
        assert_eq!(tree.current_path(), path(&[2]));
    }

    #[test]
    fn invalid_move_leaves_tree_untouched() {
        let mut tree = sample_tree();
        let mut fx = Effects::default();

        let into_itself = tree.move_entries(
            &Range::Explicit {
                paths: vec![path(&[0])],
            },
            Some(&path(&[0, 0])),
            &mut fx,
        );
        assert!(matches!(into_itself, Err(PlaylistError::InvalidDestination(_))));

        let into_media = tree.move_entries(
            &Range::Explicit {
                paths: vec![path(&[2])],
            },
            Some(&path(&[1, 0])),
            &mut fx,
        );
        assert!(matches!(into_media, Err(PlaylistError::InvalidDestination(_))));

        let missing = tree.move_entries(
            &Range::Explicit {
                paths: vec![path(&[1]), path(&[9])],
            },
            None,
            &mut fx,
        );
        assert!(matches!(missing, Err(PlaylistError::InvalidPath(_))));

        let overlapping = tree.delete_entries(
            &Range::Explicit {
                paths: vec![path(&[0]), path(&[0, 1])],
            },
            &mut fx,
        );
        assert!(matches!(overlapping, Err(PlaylistError::InvalidRange(_))));

        let too_long = tree.delete_entries(
            &Range::Linear {
                first: path(&[1]),
                length: 3,
            },
            &mut fx,
        );
        assert!(matches!(too_long, Err(PlaylistError::InvalidRange(_))));

        assert_eq!(names_at(&tree, ListOwner::Root), vec!["A", "B", "C"]);
        assert_eq!(tree.arena.len(), 5);
        assert!(fx.events.is_empty());
    }

    #[test]
    fn delete_current_resets_once() {
        let mut tree = sample_tree();
        let mut fx = Effects::default();
        tree.play_path(&path(&[0, 1]), &mut fx).unwrap();

        let mut fx = Effects::default();
        tree.delete_entries(
            &Range::Explicit {
                paths: vec![path(&[0, 1]), path(&[1])],
            },
            &mut fx,
        )
        .unwrap();

        assert!(fx.reset);
        assert!(tree.current_path().is_empty());
        assert_eq!(names_at(&tree, ListOwner::Root), vec!["A", "C"]);
        assert_eq!(tree.arena.len(), 3);
    }

    #[test]
    fn delete_other_entry_keeps_playing() {
        let mut tree = sample_tree();
        let mut fx = Effects::default();
        tree.play_path(&path(&[1]), &mut fx).unwrap();

        let mut fx = Effects::default();
        tree.delete_entries(
            &Range::Linear {
                first: path(&[0]),
                length: 1,
            },
            &mut fx,
        )
        .unwrap();

        assert!(!fx.reset);
        assert_eq!(tree.current_path(), path(&[0]));
    }

    #[test]
    fn oversized_range_is_rejected() {
        let mut tree = sample_tree();
        let before = tree.media_list(0, usize::MAX);

        let mut fx = Effects::default();
        let result = tree.delete_entries(
            &Range::Linear {
                first: path(&[1]),
                length: usize::MAX,
            },
            &mut fx,
        );

        assert!(matches!(result, Err(PlaylistError::InvalidRange(_))));
        assert_eq!(tree.media_list(0, usize::MAX), before);
        assert!(fx.events.is_empty());
    }
}
