//! The bus-carried event set of spec §3's "Events" subsection. The minimal
//! sufficient set is `CurrentTrackChanged` + `TrackEnded`; the remaining
//! variants are the "specialized events" the spec allows as projections of
//! those two, included here because handlers (§4.6/§4.7) and the
//! orchestrator's own tests are clearer when `Leave`/`Clear` publish an
//! event that says what happened rather than relying on callers to infer it
//! from `CurrentTrackChanged` alone.

use crate::model::{GuildID, MessageID, NotificationChannelID};

/// Discriminant used by [`crate::events::EventBus::subscribe`] to route
/// events to handlers without requiring Rust's `TypeId` machinery — the
/// "typed registry keyed by runtime type" alternative spec §9 sanctions.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum EventKind {
    CurrentTrackChanged,
    TrackEnded,
    TrackEnqueued,
    PlaybackStarted,
    PlaybackFinished,
    QueueCleared,
}

#[derive(Clone, Debug)]
pub enum Event {
    /// The current index or playback-active flag changed; a handler should
    /// (re)drive the audio engine.
    CurrentTrackChanged { guild_id: GuildID },
    /// Emitted by the audio engine adapter: reports why a track stopped.
    TrackEnded {
        guild_id: GuildID,
        should_advance_queue: bool,
        track_failed: bool,
    },
    /// Projection: a track was appended to a guild's queue.
    TrackEnqueued { guild_id: GuildID },
    /// Projection: playback transitioned from idle to active.
    PlaybackStarted { guild_id: GuildID },
    /// Projection: playback ended for the guild (e.g. on `Leave`), with an
    /// optional Now-Playing message that should be deleted.
    PlaybackFinished {
        guild_id: GuildID,
        channel_id: Option<NotificationChannelID>,
        message_id: Option<MessageID>,
    },
    /// Projection: the queue was wiped via `Clear(keep_current = false)`.
    QueueCleared { guild_id: GuildID },
}

impl Event {
    pub fn guild_id(&self) -> GuildID {
        match self {
            Self::CurrentTrackChanged { guild_id }
            | Self::TrackEnded { guild_id, .. }
            | Self::TrackEnqueued { guild_id }
            | Self::PlaybackStarted { guild_id }
            | Self::PlaybackFinished { guild_id, .. }
            | Self::QueueCleared { guild_id } => *guild_id,
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            Self::CurrentTrackChanged { .. } => EventKind::CurrentTrackChanged,
            Self::TrackEnded { .. } => EventKind::TrackEnded,
            Self::TrackEnqueued { .. } => EventKind::TrackEnqueued,
            Self::PlaybackStarted { .. } => EventKind::PlaybackStarted,
            Self::PlaybackFinished { .. } => EventKind::PlaybackFinished,
            Self::QueueCleared { .. } => EventKind::QueueCleared,
        }
    }
}
