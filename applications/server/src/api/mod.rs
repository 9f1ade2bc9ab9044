//! API routes
use crate::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

pub mod events;
pub mod health;
pub mod player;
pub mod playlists;

/// Build the application router
pub fn router(app_state: AppState) -> Router {
    let routes = Router::new()
        .route("/health", get(health::health))
        // Playlists
        .route("/playlists", get(playlists::list_playlists))
        .route("/playlists", post(playlists::create_playlist))
        .route("/playlists/:id", delete(playlists::delete_playlist))
        .route("/playlists/:id/request", post(playlists::playlist_request))
        .route("/playlists/:id/events", get(events::playlist_events))
        // Current playlist
        .route("/playlist/request", post(playlists::current_request))
        .route("/playlist/media", post(playlists::add_media))
        .route("/playlist/events", get(events::current_events))
        // Player
        .route("/player", get(player::status))
        .route("/player/next", post(player::next))
        .route("/player/previous", post(player::previous));

    Router::new()
        .nest("/api", routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
