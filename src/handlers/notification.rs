//! `NotificationEventHandler` (spec §4.7): subscribes to
//! `CurrentTrackChanged`, deleting the stale Now-Playing message (if any)
//! and posting a new one for the current entry (if any); and to
//! `PlaybackFinished`, deleting whatever Now-Playing message it carries
//! (e.g. on `Leave`, where there is no new current track to post for).

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, warn};

use crate::error::RepositoryError as RepoErr;
use crate::model::{GuildID, MessageID, NotificationChannelID};
use crate::player_state::NowPlayingMessage;
use crate::ports::{NotificationSender, NowPlayingInfo, TrackProvider, UserDisplayInfo, UserInfoProvider};
use crate::events::{Event, EventHandler};
use crate::repository::PlayerStateRepository;

pub struct NotificationEventHandler {
    repository: Arc<dyn PlayerStateRepository>,
    notifications: Arc<dyn NotificationSender>,
    users: Arc<dyn UserInfoProvider>,
    tracks: Arc<dyn TrackProvider>,
}

impl NotificationEventHandler {
    pub fn new(
        repository: Arc<dyn PlayerStateRepository>,
        notifications: Arc<dyn NotificationSender>,
        users: Arc<dyn UserInfoProvider>,
        tracks: Arc<dyn TrackProvider>,
    ) -> Self {
        Self { repository, notifications, users, tracks }
    }

    async fn on_current_track_changed(&self, guild_id: GuildID) {
        let mut state = match self.repository.get(guild_id).await {
            Ok(state) => state,
            Err(RepoErr::NotFound(_)) => return,
            Err(e) => {
                error!(?e, %guild_id, "failed to load state for notification handler");
                return;
            },
        };

        if let Some(pending) = state.now_playing_message() {
            match self
                .notifications
                .delete_message(pending.channel_id, pending.message_id)
                .await
            {
                Ok(()) | Err(_) => {
                    // Race-safety: only clear the pointer if it still
                    // equals what we just tried to delete — out-of-order
                    // handler execution must not erase a newer pointer.
                    if state.now_playing_message() == Some(pending) {
                        state.set_now_playing_message(None);
                    }
                },
            }
        }

        if let Some(entry) = state.queue().current().cloned() {
            let track = match self.tracks.load_track(&entry.track_id).await {
                Ok(track) => track,
                Err(e) => {
                    warn!(?e, %guild_id, "failed to resolve current track; skipping notification");
                    if let Err(e) = self.repository.save(state).await {
                        error!(?e, %guild_id, "failed to save state after notification skip");
                    }
                    return;
                },
            };

            let requester = self
                .users
                .get_user_info(guild_id, entry.requester_id)
                .await
                .unwrap_or_else(|_| UserDisplayInfo::unknown());

            let info = NowPlayingInfo { track, requester };

            // Between publish and now, a TrackEnded(load_failed) may have
            // already advanced past this entry. Re-check before sending.
            let still_current = state.queue().current().map(|c| &c.track_id) == Some(&entry.track_id);
            if still_current {
                match self
                    .notifications
                    .send_now_playing(state.notification_channel_id(), &info)
                    .await
                {
                    Ok(message_id) => {
                        state.set_now_playing_message(Some(NowPlayingMessage {
                            channel_id: state.notification_channel_id(),
                            message_id,
                        }));
                    },
                    Err(e) => warn!(?e, %guild_id, "failed to send now-playing notification"),
                }
            }
        }

        if let Err(e) = self.repository.save(state).await {
            error!(?e, %guild_id, "failed to save state after notification handling");
        }
    }

    /// By the time this runs, the guild's `PlayerState` may already be gone
    /// (e.g. `Leave` deletes it right after publishing), so there is
    /// nothing to re-`Get` — the event itself carries the exact message to
    /// delete.
    async fn on_playback_finished(
        &self,
        channel_id: Option<NotificationChannelID>,
        message_id: Option<MessageID>,
    ) {
        let (Some(channel_id), Some(message_id)) = (channel_id, message_id) else {
            return;
        };
        if let Err(e) = self.notifications.delete_message(channel_id, message_id).await {
            warn!(?e, %channel_id, %message_id, "failed to delete now-playing message on PlaybackFinished");
        }
    }
}

#[async_trait]
impl EventHandler for NotificationEventHandler {
    async fn handle(&self, event: &Event) {
        match *event {
            Event::CurrentTrackChanged { guild_id } => self.on_current_track_changed(guild_id).await,
            Event::PlaybackFinished {
                channel_id,
                message_id,
                ..
            } => self.on_playback_finished(channel_id, message_id).await,
            _ => {},
        }
    }
}
