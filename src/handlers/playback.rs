//! `PlaybackEventHandler` (spec §4.6): subscribes to `CurrentTrackChanged`
//! and `TrackEnded`, drives the audio engine, and advances the queue on
//! track end. Depends only on the repository, the bus, and `AudioPlayer` —
//! never on the orchestrator (spec §9).

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, warn};

use crate::error::RepositoryError as RepoErr;
use crate::events::{Event, EventBus, EventHandler};
use crate::ports::AudioPlayer;
use crate::repository::PlayerStateRepository;

pub struct PlaybackEventHandler {
    repository: Arc<dyn PlayerStateRepository>,
    events: Arc<EventBus>,
    audio: Arc<dyn AudioPlayer>,
}

impl PlaybackEventHandler {
    pub fn new(
        repository: Arc<dyn PlayerStateRepository>,
        events: Arc<EventBus>,
        audio: Arc<dyn AudioPlayer>,
    ) -> Self {
        Self { repository, events, audio }
    }

    async fn on_current_track_changed(&self, guild_id: crate::model::GuildID) {
        // Never trust the event payload for anything beyond the guild id.
        let state = match self.repository.get(guild_id).await {
            Ok(state) => state,
            Err(RepoErr::NotFound(_)) => return,
            Err(e) => {
                error!(?e, %guild_id, "failed to load state for CurrentTrackChanged");
                return;
            },
        };

        match state.queue().current() {
            None => {
                if let Err(e) = self.audio.stop(guild_id).await {
                    warn!(?e, %guild_id, "engine stop failed");
                }
            },
            Some(entry) => {
                if let Err(e) = self.audio.play(guild_id, &entry.track_id).await {
                    warn!(?e, %guild_id, "engine play failed");
                }
            },
        }
    }

    async fn on_track_ended(
        &self,
        guild_id: crate::model::GuildID,
        should_advance_queue: bool,
        track_failed: bool,
    ) {
        if !should_advance_queue {
            return;
        }

        let mut state = match self.repository.get(guild_id).await {
            Ok(state) => state,
            Err(RepoErr::NotFound(_)) => return,
            Err(e) => {
                error!(?e, %guild_id, "failed to load state for TrackEnded");
                return;
            },
        };

        // Prevent infinite retry of a broken track.
        let effective_loop = if track_failed {
            state.loop_mode().demote_track()
        } else {
            state.loop_mode()
        };

        let active = state.is_playback_active();
        if track_failed {
            let current_index = state.queue().current_index();
            match state.queue_mut().remove(current_index, active, effective_loop) {
                Ok(outcome) if outcome.deactivate => state.set_playback_active(false),
                Ok(_) => {},
                Err(e) => {
                    warn!(?e, %guild_id, "failed to remove failed track");
                    return;
                },
            }
        } else if state.queue_mut().advance(effective_loop).is_none() {
            state.set_playback_active(false);
        }

        if let Err(e) = self.repository.save(state).await {
            error!(?e, %guild_id, "failed to save state after TrackEnded");
            return;
        }

        if let Err(e) = self.events.publish(Event::CurrentTrackChanged { guild_id }).await {
            warn!(?e, %guild_id, "failed to publish CurrentTrackChanged after TrackEnded");
        }
    }
}

#[async_trait]
impl EventHandler for PlaybackEventHandler {
    async fn handle(&self, event: &Event) {
        match *event {
            Event::CurrentTrackChanged { guild_id } => self.on_current_track_changed(guild_id).await,
            Event::TrackEnded {
                guild_id,
                should_advance_queue,
                track_failed,
            } => self.on_track_ended(guild_id, should_advance_queue, track_failed).await,
            _ => {},
        }
    }
}
