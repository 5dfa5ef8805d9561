//! Pause/Resume/SetLoopMode/CycleLoopMode (spec §4.5). Pause/Resume request
//! the engine directly rather than publishing — unlike `Advance`, there is
//! no new current track for a handler to react to, just the existing one's
//! playback state flipping. Loop mode doesn't publish either: it only
//! affects the *next* `Advance`.

use tracing::instrument;

use crate::error::{Error, RepositoryError as RepoErr, Result};
use crate::model::{GuildID, LoopMode};

use super::{JoinPortError, PlaybackOrchestrator};

impl PlaybackOrchestrator {
    #[instrument(skip(self))]
    pub async fn pause(&self, guild_id: GuildID) -> Result<()> {
        let mut state = self.repository.get(guild_id).await.map_err(RepoErr::into_domain)?;
        if !state.is_playback_active() {
            return Err(Error::NotPlaying);
        }
        if state.is_paused() {
            return Err(Error::AlreadyPaused);
        }
        self.audio
            .pause(guild_id)
            .await
            .map_err(|e| Error::port("audio.pause", JoinPortError(e)))?;
        state.set_paused(true)?;
        self.repository.save(state).await.map_err(RepoErr::into_domain)?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn resume(&self, guild_id: GuildID) -> Result<()> {
        let mut state = self.repository.get(guild_id).await.map_err(RepoErr::into_domain)?;
        if !state.is_playback_active() {
            return Err(Error::NotPlaying);
        }
        if !state.is_paused() {
            return Err(Error::NotPaused);
        }
        self.audio
            .resume(guild_id)
            .await
            .map_err(|e| Error::port("audio.resume", JoinPortError(e)))?;
        state.set_paused(false)?;
        self.repository.save(state).await.map_err(RepoErr::into_domain)?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn set_loop_mode(&self, guild_id: GuildID, mode: LoopMode) -> Result<()> {
        let mut state = self.repository.get(guild_id).await.map_err(RepoErr::into_domain)?;
        state.set_loop_mode(mode);
        self.repository.save(state).await.map_err(RepoErr::into_domain)?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn cycle_loop_mode(&self, guild_id: GuildID) -> Result<LoopMode> {
        let mut state = self.repository.get(guild_id).await.map_err(RepoErr::into_domain)?;
        let mode = state.cycle_loop_mode();
        self.repository.save(state).await.map_err(RepoErr::into_domain)?;
        Ok(mode)
    }
}
