//! Playlist registry
//!
//! Owns every playlist, tracks which one is current and routes events to
//! listeners. All methods take `&self`: each playlist tree sits behind its
//! own lock, and the player is only called once every lock is released, so a
//! player may call back into the registry from `play`.
//!
//! Lock order is tree, then registry state, then listeners.

use crate::config::PlaylistConfig;
use crate::entry::PlaylistEntry;
use crate::error::{PlaylistError, Result};
use crate::events::{
    EventEnvelope, EventReceiver, EventScope, ListenerId, Listeners, PlaylistEvent,
};
use crate::play::PlayOutcome;
use crate::player::Player;
use crate::request::{MediaList, Request, Response};
use crate::tree::{Effects, Tree};
use crate::types::{EntryRef, IndexPath, PlayDirection, Range};
use melo_core::{PlaylistId, Tags};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// One registered playlist
#[derive(Debug)]
struct Playlist {
    id: PlaylistId,
    /// Registration serial, unique within the registry
    instance: u64,
    tree: Mutex<Tree>,
    listeners: Mutex<Listeners>,
}

impl Playlist {
    fn new(id: PlaylistId, instance: u64) -> Self {
        let mut tree = Tree::new(id.clone());
        tree.instance = instance;
        Self {
            tree: Mutex::new(tree),
            listeners: Mutex::new(Listeners::default()),
            id,
            instance,
        }
    }

    fn tree(&self) -> MutexGuard<'_, Tree> {
        lock(&self.tree)
    }
}

#[derive(Debug, Default)]
struct RegistryState {
    playlists: HashMap<PlaylistId, Arc<Playlist>>,
    current: Option<PlaylistId>,
}

/// Registry of named playlists
///
/// The default playlist is created with the registry and is current until
/// another playlist starts playing.
pub struct PlaylistRegistry {
    config: PlaylistConfig,
    player: Arc<dyn Player>,
    state: Mutex<RegistryState>,
    /// Listeners of the current playlist channel
    listeners: Mutex<Listeners>,
    next_listener: AtomicU64,
    next_instance: AtomicU64,
}

impl PlaylistRegistry {
    /// Create a registry holding the default playlist
    pub fn new(config: PlaylistConfig, player: Arc<dyn Player>) -> Self {
        let next_instance = AtomicU64::new(1);
        let default = Arc::new(Playlist::new(
            config.default_playlist.clone(),
            next_instance.fetch_add(1, Ordering::Relaxed),
        ));
        let state = RegistryState {
            current: Some(default.id.clone()),
            playlists: HashMap::from([(default.id.clone(), default)]),
        };

        info!(playlist = %config.default_playlist, "playlist registry ready");
        Self {
            config,
            player,
            state: Mutex::new(state),
            listeners: Mutex::new(Listeners::default()),
            next_listener: AtomicU64::new(1),
            next_instance,
        }
    }

    pub fn config(&self) -> &PlaylistConfig {
        &self.config
    }

    /// Register a new, empty playlist
    ///
    /// `None` designates the default playlist, which becomes current when
    /// registered again.
    pub fn create(&self, id: Option<PlaylistId>) -> Result<PlaylistId> {
        let id = id.unwrap_or_else(|| self.config.default_playlist.clone());
        let mut state = lock(&self.state);
        if state.playlists.contains_key(&id) {
            return Err(PlaylistError::PlaylistAlreadyExists(id));
        }

        let instance = self.next_instance.fetch_add(1, Ordering::Relaxed);
        state
            .playlists
            .insert(id.clone(), Arc::new(Playlist::new(id.clone(), instance)));
        if id == self.config.default_playlist {
            state.current = Some(id.clone());
        }
        info!(playlist = %id, "playlist created");
        Ok(id)
    }

    /// Unregister a playlist and release all its entries
    ///
    /// Removing the current playlist leaves the registry without one; the
    /// player is not reset.
    pub fn remove(&self, id: &PlaylistId) -> Result<()> {
        let playlist = {
            let mut state = lock(&self.state);
            let playlist = state
                .playlists
                .remove(id)
                .ok_or_else(|| PlaylistError::PlaylistNotFound(id.clone()))?;
            if state.current.as_ref() == Some(id) {
                state.current = None;
            }
            playlist
        };

        playlist.tree().release_all();
        info!(playlist = %id, "playlist removed");
        Ok(())
    }

    /// Registered playlist IDs, sorted
    pub fn playlist_ids(&self) -> Vec<PlaylistId> {
        let mut ids: Vec<PlaylistId> = lock(&self.state).playlists.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn current_playlist_id(&self) -> Option<PlaylistId> {
        lock(&self.state).current.clone()
    }

    /// Playlist `id`, or the current one for `None`
    fn playlist(&self, id: Option<&PlaylistId>) -> Result<Arc<Playlist>> {
        let state = lock(&self.state);
        let id = match id {
            Some(id) => id,
            None => state
                .current
                .as_ref()
                .ok_or(PlaylistError::NoCurrentPlaylist)?,
        };
        state
            .playlists
            .get(id)
            .cloned()
            .ok_or_else(|| PlaylistError::PlaylistNotFound(id.clone()))
    }

    /// Playlist holding the entry behind `entry`
    ///
    /// A handle from an earlier registration of the same ID is stale.
    fn entry_playlist(&self, entry: &EntryRef) -> Result<Arc<Playlist>> {
        let playlist = self.playlist(Some(entry.playlist()))?;
        if playlist.instance != entry.instance() {
            return Err(PlaylistError::EntryNotFound(entry.entry()));
        }
        Ok(playlist)
    }

    /// Subscribe to the events of a playlist or of the current playlist
    ///
    /// A listener of the current playlist first receives a `play` event with
    /// the path currently playing.
    pub fn subscribe(&self, scope: EventScope) -> Result<(ListenerId, EventReceiver)> {
        let id = ListenerId(self.next_listener.fetch_add(1, Ordering::Relaxed));
        let capacity = self.config.event_capacity;

        let receiver = match scope {
            EventScope::Playlist(playlist_id) => {
                let playlist = self.playlist(Some(&playlist_id))?;
                let mut listeners = lock(&playlist.listeners);
                listeners.add(id, capacity)
            }
            EventScope::Current => {
                let initial = self.playlist(None).ok().map(|playlist| {
                    let current = playlist.tree().current_path();
                    EventEnvelope {
                        playlist_id: playlist.id.clone(),
                        event: PlaylistEvent::Play { current },
                    }
                });

                let mut listeners = lock(&self.listeners);
                let receiver = listeners.add(id, capacity);
                if let Some(envelope) = initial {
                    listeners.send_to(id, envelope);
                }
                receiver
            }
        };

        debug!(listener = %id, "listener subscribed");
        Ok((id, receiver))
    }

    /// Drop a listener; returns whether it was registered
    pub fn unsubscribe(&self, scope: &EventScope, id: ListenerId) -> Result<bool> {
        let removed = match scope {
            EventScope::Playlist(playlist_id) => {
                let playlist = self.playlist(Some(playlist_id))?;
                let mut listeners = lock(&playlist.listeners);
                listeners.remove(id)
            }
            EventScope::Current => lock(&self.listeners).remove(id),
        };
        debug!(listener = %id, removed, "listener unsubscribed");
        Ok(removed)
    }

    /// Cancel the pending request of a listener
    ///
    /// Requests are answered synchronously, so there is never anything to
    /// cancel.
    pub fn cancel_request(&self, playlist_id: Option<&PlaylistId>, listener: ListenerId) -> Result<bool> {
        let playlist = self.playlist(playlist_id)?;
        debug!(playlist = %playlist.id, listener = %listener, "no pending request to cancel");
        Ok(false)
    }

    /// Run a tree operation and apply its effects
    ///
    /// Returns the operation result and whether the player accepted the media
    /// it was handed, `true` when there was none.
    fn execute<R>(
        &self,
        playlist: &Playlist,
        op: impl FnOnce(&mut Tree, &mut Effects) -> Result<R>,
    ) -> Result<(R, bool)> {
        let mut fx = Effects::default();
        let (value, is_current, controls) = {
            let mut tree = playlist.tree();
            let value = op(&mut tree, &mut fx)?;

            let is_current = self.commit_current(&playlist.id, fx.make_current);
            self.publish(playlist, is_current, fx.events.drain(..));
            let controls = (is_current && fx.controls).then(|| tree.controls());
            (value, is_current, controls)
        };

        // Only the current playlist drives the player
        if fx.reset && is_current {
            self.player.reset();
        }
        let accepted = match fx.play.take() {
            Some(request) => {
                let accepted = self.player.play(request);
                if !accepted {
                    warn!(playlist = %playlist.id, "player refused media");
                }
                accepted
            }
            None => true,
        };
        if let Some(controls) = controls {
            self.player.update_playlist_controls(controls);
        }
        Ok((value, accepted))
    }

    /// Make `id` current if asked to; returns whether it is current
    fn commit_current(&self, id: &PlaylistId, make_current: bool) -> bool {
        let mut state = lock(&self.state);
        if make_current && state.current.as_ref() != Some(id) && state.playlists.contains_key(id) {
            info!(playlist = %id, "current playlist changed");
            state.current = Some(id.clone());
        }
        state.current.as_ref() == Some(id)
    }

    fn publish(
        &self,
        playlist: &Playlist,
        is_current: bool,
        events: impl IntoIterator<Item = PlaylistEvent>,
    ) {
        let mut own = lock(&playlist.listeners);
        let mut current = is_current.then(|| lock(&self.listeners));

        for event in events {
            let envelope = EventEnvelope {
                playlist_id: playlist.id.clone(),
                event,
            };
            own.broadcast(&envelope);
            if let Some(current) = current.as_mut() {
                current.broadcast(&envelope);
            }
        }
    }

    /// Answer a decoded request
    pub fn handle_request(&self, playlist_id: Option<&PlaylistId>, request: Request) -> Result<Response> {
        debug!(?request, "handling playlist request");
        let response = match request {
            Request::GetMediaList { offset, count } => {
                self.media_list(playlist_id, offset, count).map(Response::MediaList)
            }
            Request::GetCurrent => self
                .current(playlist_id)
                .map(|current| Response::Current { current }),
            Request::Play { path } => self
                .play(playlist_id, &path)
                .map(|success| Response::Done { success }),
            Request::Move { range, destination } => self
                .move_entries(playlist_id, &range, destination.as_ref())
                .map(|()| Response::Done { success: true }),
            Request::Delete { range } => self
                .delete(playlist_id, &range)
                .map(|()| Response::Done { success: true }),
            Request::Shuffle { enable } => self
                .set_shuffle(playlist_id, enable)
                .map(|_| Response::Done { success: true }),
        };

        if let Err(err) = &response {
            warn!(error = %err, "playlist request rejected");
        }
        response
    }

    /// Slice of the root list; `count` is an upper bound
    pub fn media_list(&self, playlist_id: Option<&PlaylistId>, offset: usize, count: usize) -> Result<MediaList> {
        let playlist = self.playlist(playlist_id)?;
        let tree = playlist.tree();
        Ok(tree.media_list(offset, count))
    }

    /// Path of the playing entry, empty when nothing plays
    pub fn current(&self, playlist_id: Option<&PlaylistId>) -> Result<IndexPath> {
        let playlist = self.playlist(playlist_id)?;
        let current = playlist.tree().current_path();
        Ok(current)
    }

    pub fn is_shuffled(&self, playlist_id: Option<&PlaylistId>) -> Result<bool> {
        let playlist = self.playlist(playlist_id)?;
        let shuffled = playlist.tree().is_shuffled();
        Ok(shuffled)
    }

    /// Play the entry at `path`
    ///
    /// Returns whether a media was handed to the player and accepted.
    pub fn play(&self, playlist_id: Option<&PlaylistId>, path: &IndexPath) -> Result<bool> {
        let playlist = self.playlist(playlist_id)?;
        let (played, accepted) = self.execute(&playlist, |tree, fx| tree.play_path(path, fx))?;
        Ok(played && accepted)
    }

    /// Play the next media of the current playlist
    pub fn play_next(&self) -> Result<bool> {
        self.play_step(PlayDirection::Next)
    }

    /// Play the previous media of the current playlist
    pub fn play_previous(&self) -> Result<bool> {
        self.play_step(PlayDirection::Previous)
    }

    fn play_step(&self, direction: PlayDirection) -> Result<bool> {
        let playlist = self.playlist(None)?;
        let (played, accepted) =
            self.execute(&playlist, |tree, fx| Ok(tree.play_step(direction, fx)))?;
        Ok(played && accepted)
    }

    /// Move entries before the destination entry
    ///
    /// A destination whose last index equals the length of its list appends
    /// there; `None` appends to the root list.
    pub fn move_entries(
        &self,
        playlist_id: Option<&PlaylistId>,
        range: &Range,
        destination: Option<&IndexPath>,
    ) -> Result<()> {
        let playlist = self.playlist(playlist_id)?;
        self.execute(&playlist, |tree, fx| tree.move_entries(range, destination, fx))?;
        Ok(())
    }

    /// Delete entries; deleting the playing entry resets the player
    pub fn delete(&self, playlist_id: Option<&PlaylistId>, range: &Range) -> Result<()> {
        let playlist = self.playlist(playlist_id)?;
        self.execute(&playlist, |tree, fx| tree.delete_entries(range, fx))?;
        Ok(())
    }

    /// Enable or disable shuffle; returns whether the state changed
    pub fn set_shuffle(&self, playlist_id: Option<&PlaylistId>, enable: bool) -> Result<bool> {
        let playlist = self.playlist(playlist_id)?;
        let (changed, _) = self.execute(&playlist, |tree, fx| {
            Ok(tree.set_shuffle(enable, &mut rand::thread_rng(), fx))
        })?;
        if changed {
            info!(playlist = %playlist.id, enable, "shuffle toggled");
        }
        Ok(changed)
    }

    /// Add an entry tree at the head of a playlist's root list
    pub fn add_entry(&self, playlist_id: Option<&PlaylistId>, entry: PlaylistEntry) -> Result<EntryRef> {
        let playlist = self.playlist(playlist_id)?;
        let (entry, _) = self.execute(&playlist, |tree, fx| {
            let id = tree.add_entry(entry, fx);
            Ok(tree.entry_ref(id))
        })?;
        Ok(entry)
    }

    /// Add an entry tree and play it right away
    pub fn play_entry(&self, playlist_id: Option<&PlaylistId>, entry: PlaylistEntry) -> Result<bool> {
        let playlist = self.playlist(playlist_id)?;
        let (played, accepted) = self.execute(&playlist, |tree, fx| {
            let id = tree.add_entry(entry, fx);
            Ok(tree.play_from(id, false, fx) == PlayOutcome::Played)
        })?;
        Ok(played && accepted)
    }

    /// Add a media handled by `player_id`
    pub fn add_media(
        &self,
        playlist_id: Option<&PlaylistId>,
        player_id: impl Into<String>,
        path: impl Into<String>,
        name: Option<String>,
        tags: Option<Tags>,
    ) -> Result<EntryRef> {
        let entry = PlaylistEntry::new(Some(player_id.into()), Some(path.into()), name, tags);
        self.add_entry(playlist_id, entry)
    }

    /// Add a media handled by `player_id` and play it right away
    pub fn play_media(
        &self,
        playlist_id: Option<&PlaylistId>,
        player_id: impl Into<String>,
        path: impl Into<String>,
        name: Option<String>,
        tags: Option<Tags>,
    ) -> Result<bool> {
        let entry = PlaylistEntry::new(Some(player_id.into()), Some(path.into()), name, tags);
        self.play_entry(playlist_id, entry)
    }

    /// Add a sub-media at the head of an entry's children and select it
    ///
    /// Sub-medias of an entry handled by a player are neither playable nor
    /// sortable.
    pub fn entry_add_media(
        &self,
        parent: &EntryRef,
        path: Option<String>,
        name: Option<String>,
        tags: Option<Tags>,
    ) -> Result<EntryRef> {
        let playlist = self.entry_playlist(parent)?;
        let (entry, _) = self.execute(&playlist, |tree, fx| {
            let id = tree.add_child_media(parent.entry(), path, name, tags, fx)?;
            Ok(tree.entry_ref(id))
        })?;
        Ok(entry)
    }

    /// Update the name and tags of an entry
    ///
    /// With `reset`, both are replaced. Otherwise the name is kept and the
    /// new tags are merged over the old ones.
    pub fn entry_update(
        &self,
        entry: &EntryRef,
        name: Option<String>,
        tags: Option<Tags>,
        reset: bool,
    ) -> Result<()> {
        let playlist = self.entry_playlist(entry)?;
        self.execute(&playlist, |tree, fx| {
            tree.update_entry(entry.entry(), name, tags, reset, fx)
        })?;
        Ok(())
    }
}

impl std::fmt::Debug for PlaylistRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = lock(&self.state);
        f.debug_struct("PlaylistRegistry")
            .field("config", &self.config)
            .field("playlists", &state.playlists.len())
            .field("current", &state.current)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{PlayRequest, PlaylistControls};

    // ===== Helpers =====

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Play(Option<String>),
        Reset,
        Controls(PlaylistControls),
    }

    #[derive(Default)]
    struct RecordingPlayer {
        calls: Mutex<Vec<Call>>,
    }

    impl RecordingPlayer {
        fn take(&self) -> Vec<Call> {
            std::mem::take(&mut *self.calls.lock().unwrap())
        }
    }

    impl Player for RecordingPlayer {
        fn play(&self, request: PlayRequest) -> bool {
            self.calls.lock().unwrap().push(Call::Play(request.path));
            true
        }

        fn reset(&self) {
            self.calls.lock().unwrap().push(Call::Reset);
        }

        fn update_playlist_controls(&self, controls: PlaylistControls) {
            self.calls.lock().unwrap().push(Call::Controls(controls));
        }
    }

    fn registry() -> (PlaylistRegistry, Arc<RecordingPlayer>) {
        let player = Arc::new(RecordingPlayer::default());
        let registry = PlaylistRegistry::new(PlaylistConfig::default(), player.clone());
        (registry, player)
    }

    fn names(registry: &PlaylistRegistry) -> Vec<String> {
        registry
            .media_list(None, 0, usize::MAX)
            .unwrap()
            .medias
            .into_iter()
            .map(|media| media.name.unwrap_or_default())
            .collect()
    }

    // ===== Tests =====

    #[test]
    fn default_playlist_is_current() {
        let (registry, _) = registry();
        assert_eq!(registry.current_playlist_id(), Some(PlaylistId::default_id()));
        assert_eq!(registry.playlist_ids(), vec![PlaylistId::default_id()]);
    }

    #[test]
    fn create_rejects_duplicates() {
        let (registry, _) = registry();
        let id = registry.create(Some("radio".into())).unwrap();

        assert_eq!(
            registry.create(Some(id.clone())),
            Err(PlaylistError::PlaylistAlreadyExists(id))
        );
        assert_eq!(registry.playlist_ids().len(), 2);
    }

    #[test]
    fn add_media_prepends() {
        let (registry, _) = registry();
        registry.add_media(None, "file", "/a.mp3", Some("A".into()), None).unwrap();
        registry.add_media(None, "file", "/b.mp3", Some("B".into()), None).unwrap();

        assert_eq!(names(&registry), vec!["B", "A"]);
    }

    #[test]
    fn play_media_reports_controls_after_play() {
        let (registry, player) = registry();
        registry.add_media(None, "file", "/a.mp3", None, None).unwrap();
        player.take();

        assert!(registry.play_media(None, "file", "/b.mp3", None, None).unwrap());

        assert_eq!(
            player.take(),
            vec![
                Call::Play(Some("/b.mp3".into())),
                Call::Controls(PlaylistControls {
                    has_prev: true,
                    has_next: false,
                    shuffle: false,
                }),
            ]
        );
        assert_eq!(registry.current(None).unwrap(), IndexPath::new(vec![0]));
    }

    #[test]
    fn playing_another_playlist_makes_it_current() {
        let (registry, player) = registry();
        let radio = registry.create(Some("radio".into())).unwrap();
        registry.add_media(Some(&radio), "file", "/r.mp3", None, None).unwrap();
        let (_, mut events) = registry.subscribe(EventScope::Current).unwrap();
        assert_eq!(events.try_recv().unwrap().playlist_id, PlaylistId::default_id());

        // Not current yet: no controls pushed for it
        assert!(player.take().is_empty());

        assert!(registry.play(Some(&radio), &IndexPath::new(vec![0])).unwrap());

        assert_eq!(registry.current_playlist_id(), Some(radio.clone()));
        let envelope = events.try_recv().unwrap();
        assert_eq!(envelope.playlist_id, radio);
        assert_eq!(
            envelope.event,
            PlaylistEvent::Play {
                current: IndexPath::new(vec![0])
            }
        );
    }

    #[test]
    fn removing_current_playlist_leaves_none() {
        let (registry, player) = registry();
        registry.play_media(None, "file", "/a.mp3", None, None).unwrap();
        player.take();

        registry.remove(&PlaylistId::default_id()).unwrap();

        assert_eq!(registry.current_playlist_id(), None);
        assert_eq!(registry.play_next(), Err(PlaylistError::NoCurrentPlaylist));
        assert!(player.take().is_empty());

        registry.create(None).unwrap();
        assert_eq!(registry.current_playlist_id(), Some(PlaylistId::default_id()));
        assert!(registry.current(None).unwrap().is_empty());
    }

    #[test]
    fn current_listener_gets_initial_play_event() {
        let (registry, _) = registry();
        registry.play_media(None, "file", "/a.mp3", None, None).unwrap();

        let (_, mut events) = registry.subscribe(EventScope::Current).unwrap();

        let envelope = events.try_recv().unwrap();
        assert_eq!(
            envelope.event,
            PlaylistEvent::Play {
                current: IndexPath::new(vec![0])
            }
        );
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn subscribe_to_unknown_playlist_fails() {
        let (registry, _) = registry();
        let result = registry.subscribe(EventScope::Playlist("nope".into()));
        assert!(matches!(result, Err(PlaylistError::PlaylistNotFound(_))));
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let (registry, _) = registry();
        let scope = EventScope::Playlist(PlaylistId::default_id());
        let (id, mut events) = registry.subscribe(scope.clone()).unwrap();

        assert!(registry.unsubscribe(&scope, id).unwrap());
        assert!(!registry.unsubscribe(&scope, id).unwrap());
        registry.add_media(None, "file", "/a.mp3", None, None).unwrap();

        assert!(events.try_recv().is_err());
    }

    #[test]
    fn handle_request_dispatches() {
        let (registry, player) = registry();
        registry.add_media(None, "file", "/a.mp3", Some("A".into()), None).unwrap();
        registry.add_media(None, "file", "/b.mp3", Some("B".into()), None).unwrap();
        player.take();

        let response = registry
            .handle_request(None, Request::Play { path: IndexPath::new(vec![1]) })
            .unwrap();
        assert_eq!(response, Response::Done { success: true });
        assert_eq!(player.take()[0], Call::Play(Some("/a.mp3".into())));

        let response = registry.handle_request(None, Request::GetCurrent).unwrap();
        assert_eq!(
            response,
            Response::Current {
                current: IndexPath::new(vec![1])
            }
        );

        let response = registry
            .handle_request(None, Request::Delete {
                range: Range::Linear { first: IndexPath::new(vec![1]), length: 1 },
            })
            .unwrap();
        assert_eq!(response, Response::Done { success: true });
        assert_eq!(player.take()[0], Call::Reset);
        assert_eq!(names(&registry), vec!["B"]);
    }

    #[test]
    fn invalid_request_is_an_error() {
        let (registry, _) = registry();
        let result = registry.handle_request(
            None,
            Request::Play {
                path: IndexPath::new(vec![3]),
            },
        );
        assert!(matches!(result, Err(PlaylistError::InvalidPath(_))));
    }

    #[test]
    fn shuffle_toggle_reports_change() {
        let (registry, player) = registry();
        for i in 0..5 {
            registry.add_media(None, "file", format!("/{i}.mp3"), None, None).unwrap();
        }
        player.take();

        assert!(registry.set_shuffle(None, true).unwrap());
        assert!(!registry.set_shuffle(None, true).unwrap());
        assert!(registry.is_shuffled(None).unwrap());
        assert_eq!(
            player.take(),
            vec![Call::Controls(PlaylistControls {
                has_prev: false,
                has_next: false,
                shuffle: true,
            })]
        );
    }

    #[test]
    fn entry_update_after_remove_fails() {
        let (registry, _) = registry();
        let entry = registry.add_media(None, "file", "/a.mp3", None, None).unwrap();
        registry
            .delete(None, &Range::Linear { first: IndexPath::new(vec![0]), length: 1 })
            .unwrap();

        assert_eq!(
            registry.entry_update(&entry, Some("x".into()), None, true),
            Err(PlaylistError::EntryNotFound(entry.entry()))
        );
    }

    #[test]
    fn cancel_request_has_nothing_to_cancel() {
        let (registry, _) = registry();
        let (id, _events) = registry.subscribe(EventScope::Current).unwrap();
        assert!(!registry.cancel_request(None, id).unwrap());
    }

    #[test]
    fn entry_handle_does_not_survive_playlist_recreation() {
        let (registry, _) = registry();
        let radio = registry.create(Some("radio".into())).unwrap();
        let old = registry
            .add_media(Some(&radio), "file", "/old.mp3", Some("OLD".into()), None)
            .unwrap();

        registry.remove(&radio).unwrap();
        registry.create(Some(radio.clone())).unwrap();
        let new = registry
            .add_media(Some(&radio), "file", "/new.mp3", Some("NEW".into()), None)
            .unwrap();
        assert_eq!(old.entry(), new.entry());

        assert_eq!(
            registry.entry_update(&old, Some("x".into()), None, true),
            Err(PlaylistError::EntryNotFound(old.entry()))
        );
        assert!(matches!(
            registry.entry_add_media(&old, None, Some("sub".into()), None),
            Err(PlaylistError::EntryNotFound(_))
        ));

        let medias = registry.media_list(Some(&radio), 0, 10).unwrap().medias;
        assert_eq!(medias.len(), 1);
        assert_eq!(medias[0].name.as_deref(), Some("NEW"));
        assert!(medias[0].children.is_empty());
        assert!(registry.entry_update(&new, Some("x".into()), None, true).is_ok());
    }

    #[test]
    fn deleting_in_other_playlist_keeps_player_going() {
        let (registry, player) = registry();
        let default = PlaylistId::default_id();
        let radio = registry.create(Some("radio".into())).unwrap();

        assert!(registry.play_media(None, "file", "/a.mp3", None, None).unwrap());
        assert!(registry.play_media(Some(&radio), "file", "/r.mp3", None, None).unwrap());
        assert_eq!(registry.current_playlist_id(), Some(radio));
        player.take();

        registry
            .delete(Some(&default), &Range::Linear { first: IndexPath::new(vec![0]), length: 1 })
            .unwrap();

        assert!(registry.media_list(Some(&default), 0, 10).unwrap().medias.is_empty());
        assert!(!player.take().contains(&Call::Reset));
    }

    #[test]
    fn exhausting_other_playlist_keeps_player_going() {
        let (registry, player) = registry();
        let radio = registry.create(Some("radio".into())).unwrap();
        registry.add_media(Some(&radio), "file", "/r.mp3", None, None).unwrap();
        assert!(registry.play_media(None, "file", "/a.mp3", None, None).unwrap());
        player.take();

        // An empty container at the root boundary ends the playlist
        registry
            .add_entry(Some(&radio), PlaylistEntry::new(None, None, Some("empty".into()), None))
            .unwrap();
        assert!(!registry.play(Some(&radio), &IndexPath::new(vec![0])).unwrap());

        assert_eq!(registry.current_playlist_id(), Some(PlaylistId::default_id()));
        assert!(!player.take().contains(&Call::Reset));
    }
}
