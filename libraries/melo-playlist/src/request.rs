//! Playlist requests
//!
//! Requests arrive already decoded from whatever transport carries them and
//! are answered synchronously by [`crate::PlaylistRegistry::handle_request`].

use crate::events::MediaItem;
use crate::types::{IndexPath, Range};
use serde::{Deserialize, Serialize};

/// Request addressed to a playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    /// Slice of the root list
    GetMediaList {
        /// First root index
        #[serde(default)]
        offset: usize,
        /// Maximum number of medias
        count: usize,
    },

    /// Path of the playing entry
    GetCurrent,

    /// Play an entry
    Play {
        /// Entry to play
        path: IndexPath,
    },

    /// Move entries
    Move {
        /// Entries to move
        range: Range,
        /// Where to insert them: the last index designates the entry to
        /// insert before, or the list length to append. `None` appends to the
        /// root list.
        #[serde(default)]
        destination: Option<IndexPath>,
    },

    /// Delete entries
    Delete {
        /// Entries to delete
        range: Range,
    },

    /// Enable or disable shuffle
    Shuffle {
        /// Requested state
        enable: bool,
    },
}

/// Slice of the root list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaList {
    /// Index of the first media
    pub offset: usize,
    /// Number of medias
    pub count: usize,
    /// Medias, children inlined one level deep
    pub medias: Vec<MediaItem>,
    /// Path of the playing entry
    pub current: IndexPath,
}

/// Answer to a [`Request`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    /// Answer to `get_media_list`
    MediaList(MediaList),

    /// Answer to `get_current`
    Current {
        /// Path of the playing entry
        current: IndexPath,
    },

    /// Answer to operations
    Done {
        /// Whether the operation took effect
        success: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_move_request() {
        let request: Request = serde_json::from_str(
            r#"{
                "type": "move",
                "range": { "type": "explicit", "paths": [[0, 1]] },
                "destination": [2, 0]
            }"#,
        )
        .unwrap();

        assert_eq!(
            request,
            Request::Move {
                range: Range::Explicit {
                    paths: vec![IndexPath::new(vec![0, 1])]
                },
                destination: Some(IndexPath::new(vec![2, 0])),
            }
        );
    }

    #[test]
    fn decode_unit_request() {
        let request: Request = serde_json::from_str(r#"{ "type": "get_current" }"#).unwrap();
        assert_eq!(request, Request::GetCurrent);
    }

    #[test]
    fn encode_media_list_response() {
        let response = Response::MediaList(MediaList {
            offset: 0,
            count: 0,
            medias: Vec::new(),
            current: IndexPath::default(),
        });

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "media_list",
                "offset": 0,
                "count": 0,
                "medias": [],
                "current": []
            })
        );
    }
}
