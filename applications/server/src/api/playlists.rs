//! Playlists API routes
use crate::{error::Result, state::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use melo_playlist::{PlaylistId, Request, Response, Tags};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct PlaylistsResponse {
    pub playlists: Vec<PlaylistId>,
    pub current: Option<PlaylistId>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreatePlaylistRequest {
    /// Defaults to the configured default playlist
    pub id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreatedPlaylist {
    pub id: PlaylistId,
}

#[derive(Debug, Deserialize)]
pub struct AddMediaRequest {
    /// Target playlist, the current one when omitted
    pub playlist: Option<String>,
    pub player_id: String,
    pub path: String,
    pub name: Option<String>,
    pub tags: Option<Tags>,
    /// Play the media right away
    #[serde(default)]
    pub play: bool,
}

#[derive(Debug, Serialize)]
pub struct AddMediaResponse {
    pub playlist: Option<PlaylistId>,
    /// Handle of the new entry, absent when played right away
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<String>,
    pub played: bool,
}

fn parse_id(id: &str) -> Result<PlaylistId> {
    Ok(PlaylistId::parse(id)?)
}

/// GET /api/playlists
/// Registered playlists and the current one
pub async fn list_playlists(State(app_state): State<AppState>) -> Json<PlaylistsResponse> {
    Json(PlaylistsResponse {
        playlists: app_state.registry.playlist_ids(),
        current: app_state.registry.current_playlist_id(),
    })
}

/// POST /api/playlists
/// Register a new, empty playlist
pub async fn create_playlist(
    State(app_state): State<AppState>,
    Json(req): Json<CreatePlaylistRequest>,
) -> Result<(StatusCode, Json<CreatedPlaylist>)> {
    let id = req.id.as_deref().map(parse_id).transpose()?;
    let id = app_state.registry.create(id)?;
    tracing::info!("Playlist {} created", id);
    Ok((StatusCode::CREATED, Json(CreatedPlaylist { id })))
}

/// DELETE /api/playlists/:id
/// Remove a playlist and all its entries
pub async fn delete_playlist(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<StatusCode> {
    let id = parse_id(&id)?;
    app_state.registry.remove(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/playlist/request
/// Run a request against the current playlist
pub async fn current_request(
    State(app_state): State<AppState>,
    Json(request): Json<Request>,
) -> Result<Json<Response>> {
    let response = app_state.registry.handle_request(None, request)?;
    Ok(Json(response))
}

/// POST /api/playlists/:id/request
/// Run a request against a specific playlist
pub async fn playlist_request(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    Json(request): Json<Request>,
) -> Result<Json<Response>> {
    let id = parse_id(&id)?;
    let response = app_state.registry.handle_request(Some(&id), request)?;
    Ok(Json(response))
}

/// POST /api/playlist/media
/// Add a media, optionally playing it
pub async fn add_media(
    State(app_state): State<AppState>,
    Json(req): Json<AddMediaRequest>,
) -> Result<(StatusCode, Json<AddMediaResponse>)> {
    let playlist = req.playlist.as_deref().map(parse_id).transpose()?;
    let registry = &app_state.registry;

    if req.play {
        let target = playlist.clone().or_else(|| registry.current_playlist_id());
        let played = registry.play_media(playlist.as_ref(), req.player_id, req.path, req.name, req.tags)?;
        return Ok((
            StatusCode::OK,
            Json(AddMediaResponse {
                playlist: target,
                entry: None,
                played,
            }),
        ));
    }

    let entry = registry.add_media(playlist.as_ref(), req.player_id, req.path, req.name, req.tags)?;
    Ok((
        StatusCode::CREATED,
        Json(AddMediaResponse {
            playlist: Some(entry.playlist().clone()),
            entry: Some(entry.entry().to_string()),
            played: false,
        }),
    ))
}
