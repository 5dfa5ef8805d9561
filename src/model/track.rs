//! Resolved track metadata and the queue's notion of an enqueued reference
//! to a track. Tracks themselves are never stored in [`crate::PlayerState`];
//! only [`TrackID`]s are — metadata is resolved on demand through
//! [`crate::ports::TrackProvider`].

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{TrackID, UserID};

/// Where a track's audio originates from.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackSource {
    Youtube,
    Spotify,
    Soundcloud,
    Twitch,
    Other,
}

impl fmt::Display for TrackSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Youtube => "youtube",
            Self::Spotify => "spotify",
            Self::Soundcloud => "soundcloud",
            Self::Twitch => "twitch",
            Self::Other => "other",
        };
        write!(f, "{s}")
    }
}

/// Immutable metadata for a resolved track, as returned by
/// [`crate::ports::TrackProvider`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: TrackID,
    pub title: String,
    pub artist: String,
    pub duration: Duration,
    pub uri: String,
    pub artwork_url: Option<String>,
    pub source: TrackSource,
    pub is_stream: bool,
}

/// A list resolved from a query, per `TrackProvider::ResolveQuery`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackList {
    pub kind: TrackListKind,
    pub identifier: Option<String>,
    pub name: Option<String>,
    pub url: Option<String>,
    pub tracks: Vec<Track>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackListKind {
    Track,
    Playlist,
    Search,
}

/// A queue slot: which track, who asked for it, and when. Carried so the
/// notification handler can attribute "Now Playing" to the right user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QueueEntry {
    pub track_id: TrackID,
    pub requester_id: UserID,
    pub enqueued_at: DateTime<Utc>,
}

impl QueueEntry {
    pub fn new(track_id: TrackID, requester_id: UserID) -> Self {
        Self {
            track_id,
            requester_id,
            enqueued_at: Utc::now(),
        }
    }
}
