//! Common test utilities and fixtures
use axum::{
    body::Body,
    http::{header, Method, Request},
    response::Response,
    Router,
};
use melo_server::{api, config::ServerConfig, state::AppState};

/// Build a router over a fresh registry holding the default playlist and
/// the fixture playlists
pub fn create_test_app() -> (Router, AppState) {
    let mut config = ServerConfig::default();
    config.playlist.extra_playlists = vec![fixtures::RADIO.to_string()];
    let app_state = AppState::from_config(&config).unwrap();
    (api::router(app_state.clone()), app_state)
}

pub fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method(method)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

pub fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method(method)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Test playlists and medias
pub mod fixtures {
    pub const RADIO: &str = "radio";
    pub const PLAYER: &str = "file";
    pub const TRACKS: [&str; 3] = ["/music/a.mp3", "/music/b.mp3", "/music/c.mp3"];
}
