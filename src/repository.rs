//! `PlayerStateRepository` (§4.3): atomic Get/Save/Delete keyed by guild.
//!
//! The reference implementation is grounded on
//! `songbird::Songbird`'s `calls: parking_lot::RwLock<HashMap<GuildId,
//! Arc<Mutex<Call>>>>` — a process-wide map guarded against concurrent
//! mutation. We use `dashmap::DashMap` instead of a single `RwLock<HashMap>`
//! so that Get/Save for *different* guilds never contend on one global
//! lock, while Save/Get on the *same* guild key still serialize through
//! that shard's internal lock, satisfying the atomicity contract of §4.3.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::error::RepositoryError;
use crate::model::GuildID;
use crate::player_state::PlayerState;

pub type RepoResult<T> = std::result::Result<T, RepositoryError>;

/// Durable (or in-memory) storage for per-guild [`PlayerState`].
///
/// Implementations MUST serialize concurrent `Save` + `Get` on the same
/// `GuildID`: a `Save` must never be partially visible to a concurrent
/// `Get`. A reader/writer lock (or, as here, a per-key sharded lock) over
/// an in-memory map satisfies this; external stores must use per-guild
/// optimistic or pessimistic locking.
#[async_trait]
pub trait PlayerStateRepository: Send + Sync {
    async fn get(&self, guild_id: GuildID) -> RepoResult<PlayerState>;
    async fn save(&self, state: PlayerState) -> RepoResult<()>;
    async fn delete(&self, guild_id: GuildID) -> RepoResult<()>;
}

/// The reference in-memory implementation.
#[derive(Default)]
pub struct InMemoryPlayerStateRepository {
    states: DashMap<GuildID, PlayerState>,
}

impl InMemoryPlayerStateRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PlayerStateRepository for InMemoryPlayerStateRepository {
    async fn get(&self, guild_id: GuildID) -> RepoResult<PlayerState> {
        self.states
            .get(&guild_id)
            .map(|entry| entry.value().clone())
            .ok_or(RepositoryError::NotFound(guild_id))
    }

    async fn save(&self, state: PlayerState) -> RepoResult<()> {
        self.states.insert(state.guild_id(), state);
        Ok(())
    }

    async fn delete(&self, guild_id: GuildID) -> RepoResult<()> {
        self.states
            .remove(&guild_id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound(guild_id))
    }
}
