//! Player API routes
use crate::{error::Result, player::PlayerStatus, state::AppState};
use axum::{extract::State, Json};
use melo_playlist::Response;

/// GET /api/player - What the player was last asked to do
pub async fn status(State(app_state): State<AppState>) -> Json<PlayerStatus> {
    Json(app_state.player.status())
}

/// POST /api/player/next - Play the next media of the current playlist
pub async fn next(State(app_state): State<AppState>) -> Result<Json<Response>> {
    let success = app_state.registry.play_next()?;
    Ok(Json(Response::Done { success }))
}

/// POST /api/player/previous - Play the previous media of the current playlist
pub async fn previous(State(app_state): State<AppState>) -> Result<Json<Response>> {
    let success = app_state.registry.play_previous()?;
    Ok(Json(Response::Done { success }))
}
