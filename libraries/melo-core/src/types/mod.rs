//! Domain types for Melo
mod ids;

pub use ids::PlaylistId;
