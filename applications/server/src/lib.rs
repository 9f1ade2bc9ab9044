//! Melo Server Library
//!
//! HTTP front end of the Melo playlist engine: JSON requests, WebSocket
//! event streams and a logging player.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod player;
pub mod state;

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use player::{LogPlayer, PlayerStatus};
pub use state::AppState;
