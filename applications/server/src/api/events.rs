//! Event stream API routes
//!
//! Each WebSocket client gets its own listener on the registry and receives
//! the JSON event envelopes of its scope as text frames.

use crate::{error::Result, state::AppState};
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    response::Response,
};
use melo_playlist::{EventReceiver, EventScope, ListenerId, PlaylistId, PlaylistRegistry};
use std::sync::Arc;

/// GET /api/playlist/events - Events of whichever playlist is current
pub async fn current_events(
    State(app_state): State<AppState>,
    ws: WebSocketUpgrade,
) -> Result<Response> {
    open_stream(ws, app_state, EventScope::Current)
}

/// GET /api/playlists/:id/events - Events of one playlist
pub async fn playlist_events(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    ws: WebSocketUpgrade,
) -> Result<Response> {
    let id = PlaylistId::parse(&id)?;
    open_stream(ws, app_state, EventScope::Playlist(id))
}

fn open_stream(ws: WebSocketUpgrade, app_state: AppState, scope: EventScope) -> Result<Response> {
    let (listener, events) = app_state.registry.subscribe(scope.clone())?;
    let registry = Arc::clone(&app_state.registry);

    Ok(ws.on_upgrade(move |socket| forward_events(socket, events, registry, scope, listener)))
}

async fn forward_events(
    mut socket: WebSocket,
    mut events: EventReceiver,
    registry: Arc<PlaylistRegistry>,
    scope: EventScope,
    listener: ListenerId,
) {
    tracing::debug!("Event stream {} opened", listener);

    loop {
        tokio::select! {
            event = events.recv() => {
                // Playlist removed
                let Some(envelope) = event else { break };
                let text = match serde_json::to_string(&envelope) {
                    Ok(text) => text,
                    Err(e) => {
                        tracing::error!("Failed to encode event: {}", e);
                        continue;
                    }
                };
                if socket.send(Message::Text(text)).await.is_err() {
                    break;
                }
            }
            incoming = socket.recv() => match incoming {
                Some(Ok(Message::Close(_)) | Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
        }
    }

    if let Err(e) = registry.unsubscribe(&scope, listener) {
        tracing::debug!("Event stream {} already detached: {}", listener, e);
    }
    tracing::debug!("Event stream {} closed", listener);
}
