//! Play, play-next and play-previous
//!
//! Playing an entry selects the deepest last child below it: lists are built
//! by prepending, so the last child is the oldest one. Containers that hold
//! nothing playable are climbed back out of, and reaching either end of the
//! root list stops playback altogether.

use crate::error::Result;
use crate::events::PlaylistEvent;
use crate::list::ListOwner;
use crate::player::PlayRequest;
use crate::tree::{Effects, Tree};
use crate::types::{EntryId, IndexPath, PlayDirection};
use tracing::{debug, info};

/// Result of a single play attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PlayOutcome {
    /// A media was handed to the player
    Played,
    /// Nothing playable below the entry
    Failed,
    /// Boundary of the root list reached, playback stopped
    Exhausted,
}

impl Tree {
    /// Play from `start`
    ///
    /// With `limit`, the upward search never climbs above `start`.
    pub(crate) fn play_from(&mut self, start: EntryId, limit: bool, fx: &mut Effects) -> PlayOutcome {
        let mut node = start;
        while let Some(last) = self.last(ListOwner::Entry(node)) {
            node = last;
        }

        let player_id = loop {
            if let Some(player) = &self.arena[node].player {
                break player.clone();
            }

            let Some(parent) = self.arena[node].parent else {
                if self.is_first(ListOwner::Root, node) || self.is_last(ListOwner::Root, node) {
                    self.exhaust(fx);
                    return PlayOutcome::Exhausted;
                }
                debug!(playlist = %self.playlist, entry = %node, "nothing to play");
                return PlayOutcome::Failed;
            };
            if limit && node == start {
                return PlayOutcome::Failed;
            }

            node = parent;
            self.clear_current(ListOwner::Entry(parent));
        };

        self.clear_current(ListOwner::Root);
        self.set_current_chain(node);
        let current = self.current_path();
        info!(playlist = %self.playlist, current = %current, "playing entry");

        let media = &self.arena[node];
        fx.make_current = true;
        fx.play = Some(PlayRequest {
            player_id,
            path: media.path.clone(),
            name: media.name.clone(),
            tags: media.tags.clone(),
            entry: self.entry_ref(node),
        });
        fx.events.push(PlaylistEvent::Play { current });
        fx.controls = true;
        PlayOutcome::Played
    }

    /// Stop: forget the current chain and reset the player
    pub(crate) fn exhaust(&mut self, fx: &mut Effects) {
        info!(playlist = %self.playlist, "end of playlist reached");
        self.clear_current(ListOwner::Root);
        fx.reset = true;
        fx.events.push(PlaylistEvent::Play {
            current: IndexPath::default(),
        });
        fx.controls = true;
    }

    pub(crate) fn play_path(&mut self, path: &IndexPath, fx: &mut Effects) -> Result<bool> {
        let id = self.resolve(path)?;
        Ok(self.play_from(id, false, fx) == PlayOutcome::Played)
    }

    /// Step sideways from the playing entry until something plays
    ///
    /// Returns `false` when nothing is playing or the end was reached.
    pub(crate) fn play_step(&mut self, direction: PlayDirection, fx: &mut Effects) -> bool {
        match self.current_leaf() {
            Some(leaf) => self.play_recursive(leaf, direction, fx),
            None => false,
        }
    }

    fn play_recursive(&mut self, from: EntryId, direction: PlayDirection, fx: &mut Effects) -> bool {
        let mut node = from;
        loop {
            let owner = self.owner_of(node);
            let sibling = match direction {
                PlayDirection::Next => (!self.is_first(owner, node)).then(|| self.arena[node].prev),
                PlayDirection::Previous => {
                    (!self.is_last(owner, node)).then(|| self.arena[node].next)
                }
            };

            match (sibling, self.arena[node].parent) {
                (Some(sibling), _) => match self.play_from(sibling, true, fx) {
                    PlayOutcome::Played => return true,
                    PlayOutcome::Exhausted => return false,
                    PlayOutcome::Failed => node = sibling,
                },
                (None, Some(parent)) => node = parent,
                (None, None) => {
                    self.exhaust(fx);
                    return false;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::PlaylistEntry;
    use crate::tree::tests::{id_at, sample_tree};
    use melo_core::PlaylistId;

    fn played_path(tree: &Tree, fx: &Effects) -> IndexPath {
        let request = fx.play.as_ref().unwrap();
        tree.path_of(request.entry.entry()).unwrap()
    }

    #[test]
    fn play_container_selects_last_child() {
        let mut tree = sample_tree();
        let mut fx = Effects::default();

        assert!(tree.play_path(&IndexPath::new(vec![0]), &mut fx).unwrap());

        assert_eq!(played_path(&tree, &fx), IndexPath::new(vec![0, 1]));
        assert_eq!(tree.current_path(), IndexPath::new(vec![0, 1]));
        assert!(fx.make_current);
        assert!(!fx.reset);
        assert_eq!(fx.play.as_ref().unwrap().player_id, "file");
    }

    #[test]
    fn play_next_walks_toward_head_across_levels() {
        let mut tree = sample_tree();
        let mut fx = Effects::default();
        tree.play_path(&IndexPath::new(vec![1]), &mut fx).unwrap();

        let mut fx = Effects::default();
        assert!(tree.play_step(PlayDirection::Next, &mut fx));
        assert_eq!(tree.current_path(), IndexPath::new(vec![0, 1]));

        let mut fx = Effects::default();
        assert!(tree.play_step(PlayDirection::Next, &mut fx));
        assert_eq!(tree.current_path(), IndexPath::new(vec![0, 0]));

        let mut fx = Effects::default();
        assert!(!tree.play_step(PlayDirection::Next, &mut fx));
        assert!(tree.current_path().is_empty());
        assert!(fx.reset);
        assert_eq!(
            fx.events,
            vec![PlaylistEvent::Play {
                current: IndexPath::default()
            }]
        );
    }

    #[test]
    fn play_previous_exhausts_on_empty_tail_container() {
        let mut tree = sample_tree();
        let mut fx = Effects::default();
        tree.play_path(&IndexPath::new(vec![1]), &mut fx).unwrap();

        let mut fx = Effects::default();
        assert!(!tree.play_step(PlayDirection::Previous, &mut fx));
        assert!(fx.reset);
        assert!(tree.current_path().is_empty());
    }

    #[test]
    fn play_skips_empty_container_in_the_middle() {
        let mut tree = Tree::new(PlaylistId::default_id());
        for entry in [
            PlaylistEntry::media("file", "/first.mp3"),
            PlaylistEntry::folder("empty"),
            PlaylistEntry::media("file", "/last.mp3"),
        ] {
            let id = tree.attach(entry, None);
            tree.append(ListOwner::Root, id);
        }

        let mut fx = Effects::default();
        tree.play_path(&IndexPath::new(vec![2]), &mut fx).unwrap();

        let mut fx = Effects::default();
        assert!(tree.play_step(PlayDirection::Next, &mut fx));
        assert_eq!(tree.current_path(), IndexPath::new(vec![0]));
        assert!(!fx.reset);
    }

    #[test]
    fn playing_middle_empty_container_fails() {
        let mut tree = Tree::new(PlaylistId::default_id());
        for entry in [
            PlaylistEntry::media("file", "/first.mp3"),
            PlaylistEntry::folder("empty"),
            PlaylistEntry::media("file", "/last.mp3"),
        ] {
            let id = tree.attach(entry, None);
            tree.append(ListOwner::Root, id);
        }

        let mut fx = Effects::default();
        assert!(!tree.play_path(&IndexPath::new(vec![1]), &mut fx).unwrap());
        assert!(fx.play.is_none());
        assert!(!fx.reset);
    }

    #[test]
    fn play_with_nothing_current_is_noop() {
        let mut tree = sample_tree();
        let mut fx = Effects::default();

        assert!(!tree.play_step(PlayDirection::Next, &mut fx));
        assert!(fx.events.is_empty());
    }

    #[test]
    fn play_entry_with_sub_medias_plays_the_entry() {
        let mut tree = sample_tree();
        let b = id_at(&tree, &[1]);
        let mut fx = Effects::default();
        tree.add_child_media(b, Some("/b/1".into()), None, None, &mut fx)
            .unwrap();

        let mut fx = Effects::default();
        assert!(tree.play_path(&IndexPath::new(vec![1]), &mut fx).unwrap());

        assert_eq!(fx.play.as_ref().unwrap().entry.entry(), b);
        assert_eq!(tree.current_path(), IndexPath::new(vec![1]));
    }
}
