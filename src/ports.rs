//! External collaborators, specified only at their interface (spec §1/§6).
//! Each trait is `Send + Sync` and `async_trait`, the same bound
//! `songbird::events::EventHandler` carries, so implementations can be
//! freely shared via `Arc` across the orchestrator and handlers. None of
//! these traits are implemented by this crate except as test fakes — the
//! real audio engine, track resolver, notification channel, user
//! directory, and voice transport are out of scope (spec §1).

use std::error::Error as StdError;
use std::fmt;

use async_trait::async_trait;

use crate::model::{
    GuildID, MessageID, NotificationChannelID, Track, TrackID, TrackList, UserID, VoiceChannelID,
};

pub type PortResult<T> = Result<T, Box<dyn StdError + Send + Sync>>;

/// Opaque sink for actually decoding/streaming audio. Asynchronous — track
/// lifecycle is reported back via `TrackEnded` events on the bus, not as
/// the return value of `play`.
#[async_trait]
pub trait AudioPlayer: Send + Sync {
    async fn play(&self, guild_id: GuildID, track_id: &TrackID) -> PortResult<()>;
    async fn stop(&self, guild_id: GuildID) -> PortResult<()>;
    async fn pause(&self, guild_id: GuildID) -> PortResult<()>;
    async fn resume(&self, guild_id: GuildID) -> PortResult<()>;
}

/// Resolves queries and ids into track metadata.
#[async_trait]
pub trait TrackProvider: Send + Sync {
    async fn load_track(&self, id: &TrackID) -> PortResult<Track>;
    async fn load_tracks(&self, ids: &[TrackID]) -> PortResult<Vec<Track>>;
    async fn resolve_query(&self, query: &str) -> PortResult<TrackList>;
}

/// Display info for attributing a Now-Playing notification to its
/// requester.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserDisplayInfo {
    pub display_name: String,
    pub avatar_url: Option<String>,
}

impl UserDisplayInfo {
    /// Used by handlers when `UserInfoProvider` fails — the spec requires
    /// graceful degradation, never a propagated error (§4.7).
    pub fn unknown() -> Self {
        Self {
            display_name: "Unknown".to_owned(),
            avatar_url: None,
        }
    }
}

impl fmt::Display for UserDisplayInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name)
    }
}

/// Info to render a Now-Playing embed: the entry plus its requester's
/// display info.
#[derive(Clone, Debug)]
pub struct NowPlayingInfo {
    pub track: Track,
    pub requester: UserDisplayInfo,
}

/// Sends/deletes user-facing notifications. Messages are opaque to the
/// core beyond their id.
#[async_trait]
pub trait NotificationSender: Send + Sync {
    async fn send_now_playing(
        &self,
        channel_id: NotificationChannelID,
        info: &NowPlayingInfo,
    ) -> PortResult<MessageID>;

    async fn delete_message(
        &self,
        channel_id: NotificationChannelID,
        message_id: MessageID,
    ) -> PortResult<()>;

    async fn send_error(&self, channel_id: NotificationChannelID, message: &str) -> PortResult<()>;
}

/// The chat-user directory. Failures degrade gracefully to
/// [`UserDisplayInfo::unknown`] wherever this is consulted.
#[async_trait]
pub trait UserInfoProvider: Send + Sync {
    async fn get_user_info(&self, guild_id: GuildID, user_id: UserID) -> PortResult<UserDisplayInfo>;
}

/// Used only by `Join`, to find which voice channel a user who didn't
/// specify one is currently in.
#[async_trait]
pub trait VoiceStateProvider: Send + Sync {
    async fn get_user_voice_channel(
        &self,
        guild_id: GuildID,
        user_id: UserID,
    ) -> PortResult<Option<VoiceChannelID>>;
}

/// The voice transport: actually joining/leaving a Discord voice channel.
#[async_trait]
pub trait VoiceConnection: Send + Sync {
    async fn join_channel(&self, guild_id: GuildID, channel_id: VoiceChannelID) -> PortResult<()>;
    async fn leave_channel(&self, guild_id: GuildID) -> PortResult<()>;
}
