//! Add/Remove/Clear/Seek/Skip (spec §4.5). Each method: Get, validate,
//! mutate, Save, then — in that order, so a handler re-`Get`ting on a
//! published event observes the committed state — Publish.

use tracing::instrument;

use crate::error::{Error, RepositoryError as RepoErr, Result};
use crate::events::Event;
use crate::model::{GuildID, QueueEntry, TrackID, UserID};

use super::PlaybackOrchestrator;

/// Output of [`PlaybackOrchestrator::skip`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SkipOutcome {
    pub skipped_track_id: TrackID,
    pub next_track_id: Option<TrackID>,
}

impl PlaybackOrchestrator {
    #[instrument(skip(self, track_ids))]
    pub async fn add(
        &self,
        guild_id: GuildID,
        track_ids: Vec<TrackID>,
        requester_id: UserID,
    ) -> Result<()> {
        let mut state = self.repository.get(guild_id).await.map_err(RepoErr::into_domain)?;

        let was_active = state.is_playback_active();
        let start_index = state.queue().len();
        let entries = track_ids
            .into_iter()
            .map(|id| QueueEntry::new(id, requester_id));
        state.queue_mut().append(entries);

        if !was_active {
            state.queue_mut().seek(start_index).map_err(|_| Error::QueueEmpty)?;
            state.set_playback_active(true);
        }

        self.repository.save(state).await.map_err(RepoErr::into_domain)?;

        if !was_active {
            self.publish(Event::CurrentTrackChanged { guild_id }).await;
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn remove(&self, guild_id: GuildID, index: usize) -> Result<()> {
        let mut state = self.repository.get(guild_id).await.map_err(RepoErr::into_domain)?;

        if state.queue().is_empty() {
            return Err(Error::QueueEmpty);
        }
        if index >= state.queue().len() {
            return Err(Error::invalid_index(index, state.queue().len()));
        }
        if index == state.queue().current_index() && state.is_playback_active() {
            return Err(Error::IsCurrentTrack);
        }

        let mode = state.loop_mode();
        let active = state.is_playback_active();
        let outcome = state.queue_mut().remove(index, active, mode)?;
        if outcome.deactivate {
            state.set_playback_active(false);
        }

        self.repository.save(state).await.map_err(RepoErr::into_domain)?;
        Ok(())
    }

    /// `keep_current_track = true` retains the current entry (dropping
    /// everything else); `false` wipes the queue entirely.
    #[instrument(skip(self))]
    pub async fn clear(&self, guild_id: GuildID, keep_current_track: bool) -> Result<()> {
        let mut state = self.repository.get(guild_id).await.map_err(RepoErr::into_domain)?;

        if keep_current_track {
            let Some(current) = state.queue().current().cloned() else {
                return Err(Error::NothingToClear);
            };
            if state.queue().len() <= 1 {
                return Err(Error::NothingToClear);
            }
            let mut queue = crate::queue::Queue::new();
            queue.append(std::iter::once(current));
            *state.queue_mut() = queue;
            state.set_playback_active(true);
            self.repository.save(state).await.map_err(RepoErr::into_domain)?;
            return Ok(());
        }

        if state.queue().is_empty() {
            return Err(Error::QueueEmpty);
        }
        state.queue_mut().clear();
        state.set_playback_active(false);
        self.repository.save(state).await.map_err(RepoErr::into_domain)?;
        self.publish(Event::CurrentTrackChanged { guild_id }).await;
        self.publish(Event::QueueCleared { guild_id }).await;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn seek(&self, guild_id: GuildID, index: usize) -> Result<()> {
        let mut state = self.repository.get(guild_id).await.map_err(RepoErr::into_domain)?;

        if state.queue().is_empty() {
            return Err(Error::QueueEmpty);
        }
        state.queue_mut().seek(index)?;
        state.set_playback_active(true);

        self.repository.save(state).await.map_err(RepoErr::into_domain)?;
        self.publish(Event::CurrentTrackChanged { guild_id }).await;
        Ok(())
    }

    /// `Restart` is `Seek(0)`.
    pub async fn restart(&self, guild_id: GuildID) -> Result<()> {
        self.seek(guild_id, 0).await
    }

    #[instrument(skip(self))]
    pub async fn skip(&self, guild_id: GuildID) -> Result<SkipOutcome> {
        let mut state = self.repository.get(guild_id).await.map_err(RepoErr::into_domain)?;

        let Some(skipped) = state.queue().current().cloned() else {
            return Err(Error::NotPlaying);
        };

        // Skip must not repeat the same track, so `Track` is demoted here.
        let mode = state.loop_mode().demote_track();
        let next = state.queue_mut().advance(mode).cloned();
        if next.is_none() {
            state.set_playback_active(false);
        }

        self.repository.save(state).await.map_err(RepoErr::into_domain)?;
        self.publish(Event::CurrentTrackChanged { guild_id }).await;

        Ok(SkipOutcome {
            skipped_track_id: skipped.track_id,
            next_track_id: next.map(|e| e.track_id),
        })
    }
}

