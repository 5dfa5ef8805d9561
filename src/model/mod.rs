//! Core domain types: identifiers, track metadata, queue entries, and loop
//! mode. Nothing in this module performs I/O.

mod ids;
mod loop_mode;
mod track;

pub use ids::{GuildID, MessageID, NotificationChannelID, TrackID, UserID, VoiceChannelID};
pub use loop_mode::LoopMode;
pub use track::{QueueEntry, Track, TrackList, TrackListKind, TrackSource};
