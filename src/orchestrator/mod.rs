//! The use-case layer of spec §4.5: `Join`, `Leave`, and (in the sibling
//! modules) the queue- and playback-mutating operations. Every operation
//! follows the same shape — Get, validate, mutate, Save, (maybe) Publish —
//! and depends only on the repository, the bus, and the ports it needs,
//! never on the event handlers (spec §9's "avoiding cyclic ownership").

mod playback_ops;
mod queue_ops;

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::error::{Error, RepositoryError as RepoErr, Result};
use crate::events::{Event, EventBus};
use crate::model::{GuildID, NotificationChannelID, UserID, VoiceChannelID};
use crate::player_state::PlayerState;
use crate::ports::{AudioPlayer, VoiceConnection, VoiceStateProvider};
use crate::repository::PlayerStateRepository;

pub use queue_ops::SkipOutcome;

/// The orchestrator. Constructed once per process and shared (via `Arc`)
/// across every command-originating task; guild isolation comes from the
/// repository, not from any lock held here.
pub struct PlaybackOrchestrator {
    repository: Arc<dyn PlayerStateRepository>,
    events: Arc<EventBus>,
    audio: Arc<dyn AudioPlayer>,
    voice_state: Arc<dyn VoiceStateProvider>,
    voice_connection: Arc<dyn VoiceConnection>,
}

impl PlaybackOrchestrator {
    pub fn new(
        repository: Arc<dyn PlayerStateRepository>,
        events: Arc<EventBus>,
        audio: Arc<dyn AudioPlayer>,
        voice_state: Arc<dyn VoiceStateProvider>,
        voice_connection: Arc<dyn VoiceConnection>,
    ) -> Self {
        Self {
            repository,
            events,
            audio,
            voice_state,
            voice_connection,
        }
    }

    async fn publish(&self, event: Event) {
        if let Err(e) = self.events.publish(event).await {
            warn!(?e, "failed to publish event");
        }
    }

    /// Join a voice channel and (re)point notifications at
    /// `notification_channel_id`. If `voice_channel_id` is omitted, the
    /// user's current voice channel is used.
    #[instrument(skip(self))]
    pub async fn join(
        &self,
        guild_id: GuildID,
        user_id: UserID,
        notification_channel_id: NotificationChannelID,
        voice_channel_id: Option<VoiceChannelID>,
    ) -> Result<VoiceChannelID> {
        let target = match voice_channel_id {
            Some(id) => id,
            None => self
                .voice_state
                .get_user_voice_channel(guild_id, user_id)
                .await
                .map_err(|e| Error::port("voice_state.get_user_voice_channel", JoinPortError(e)))?
                .ok_or(Error::UserNotInVoice)?,
        };

        match self.repository.get(guild_id).await {
            Ok(mut existing) if existing.voice_channel_id() == target => {
                existing.set_notification_channel_id(notification_channel_id);
                self.repository
                    .save(existing)
                    .await
                    .map_err(RepoErr::into_domain)?;
                return Ok(target);
            },
            Ok(mut moved) => {
                self.voice_connection
                    .join_channel(guild_id, target)
                    .await
                    .map_err(|e| Error::port("voice_connection.join_channel", JoinPortError(e)))?;
                moved.set_voice_channel_id(target);
                moved.set_notification_channel_id(notification_channel_id);
                self.repository
                    .save(moved)
                    .await
                    .map_err(RepoErr::into_domain)?;
                return Ok(target);
            },
            Err(RepoErr::NotFound(_)) => {},
            Err(e) => return Err(e.into_domain()),
        }

        self.voice_connection
            .join_channel(guild_id, target)
            .await
            .map_err(|e| Error::port("voice_connection.join_channel", JoinPortError(e)))?;

        let state = PlayerState::new(guild_id, target, notification_channel_id);
        self.repository
            .save(state)
            .await
            .map_err(RepoErr::into_domain)?;

        info!(%guild_id, %target, "joined voice channel");
        Ok(target)
    }

    /// Leave a guild's voice channel and destroy its `PlayerState`.
    #[instrument(skip(self))]
    pub async fn leave(&self, guild_id: GuildID) -> Result<()> {
        let state = self
            .repository
            .get(guild_id)
            .await
            .map_err(RepoErr::into_domain)?;

        if let Some(now_playing) = state.now_playing_message() {
            self.publish(Event::PlaybackFinished {
                guild_id,
                channel_id: Some(now_playing.channel_id),
                message_id: Some(now_playing.message_id),
            })
            .await;
        }

        self.voice_connection
            .leave_channel(guild_id)
            .await
            .map_err(|e| Error::port("voice_connection.leave_channel", JoinPortError(e)))?;

        self.repository
            .delete(guild_id)
            .await
            .map_err(RepoErr::into_domain)?;

        info!(%guild_id, "left voice channel");
        Ok(())
    }
}

/// Bridges `Box<dyn StdError + Send + Sync>` port errors into something
/// `Error::port` can box again without an extra `Box<Box<dyn Error>>` layer.
struct JoinPortError(Box<dyn std::error::Error + Send + Sync>);

impl std::fmt::Debug for JoinPortError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(&self.0, f)
    }
}

impl std::fmt::Display for JoinPortError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for JoinPortError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

