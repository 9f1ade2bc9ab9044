//! Melo Core
//!
//! Shared types used by every Melo component (playlists, players, browsers).
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Media metadata**: [`Tags`] and the [`TagsMergeFlags`] used when merging them
//! - **Identifiers**: [`PlaylistId`]
//! - **Error Handling**: Unified [`MeloError`] and [`Result`] types
//!
//! # Example
//!
//! ```rust
//! use melo_core::{PlaylistId, Tags};
//!
//! let tags = Tags::new()
//!     .with_title("So What")
//!     .with_artist("Miles Davis")
//!     .with_track(1);
//!
//! let id = PlaylistId::default_id();
//! assert_eq!(id.as_str(), "default");
//! assert_eq!(tags.title(), Some("So What"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod tags;
pub mod types;

pub use error::{MeloError, Result};
pub use tags::{Tags, TagsMergeFlags};
pub use types::PlaylistId;
