//! The error taxonomy of §7: domain kinds returned as-is by use cases, and
//! a `Port` variant that wraps an external-collaborator failure with the
//! call site that produced it. Modeled on `serenity::Error` /
//! `songbird::error::JoinError`: a flat enum, hand-written `Display`, and
//! `std::error::Error` via the blanket impl below rather than `thiserror`.

use std::error::Error as StdError;
use std::fmt;

use crate::model::GuildID;

/// The common result type for use cases and handlers in this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// No `PlayerState` exists for the guild.
    NotConnected,
    /// `Join`'s voice-channel fallback couldn't locate the user.
    UserNotInVoice,
    /// The operation requires an active current track.
    NotPlaying,
    /// `Pause` on an already-paused player.
    AlreadyPaused,
    /// `Resume` on a player that isn't paused.
    NotPaused,
    /// The queue has no entries.
    QueueEmpty,
    /// `Clear(keep_current = true)` had nothing besides the current track.
    NothingToClear,
    /// Index outside `[0, Len())`.
    InvalidIndex { index: usize, len: usize },
    /// `Remove` targeted the current index; caller must `Skip` instead.
    IsCurrentTrack,
    /// Track resolution returned no results.
    NoResults,
    /// Track resolution failed with a transport error.
    LoadFailed(Box<dyn StdError + Send + Sync>),
    /// An external-port call failed; `site` names the use case/handler call
    /// site, `source` is the collaborator's own error.
    Port {
        site: &'static str,
        source: Box<dyn StdError + Send + Sync>,
    },
    /// The repository reported an I/O failure distinct from `NotFound`.
    Repository(Box<dyn StdError + Send + Sync>),
}

impl Error {
    pub fn port(site: &'static str, source: impl StdError + Send + Sync + 'static) -> Self {
        Self::Port {
            site,
            source: Box::new(source),
        }
    }

    pub fn invalid_index(index: usize, len: usize) -> Self {
        Self::InvalidIndex { index, len }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConnected => write!(f, "no player is connected for this guild"),
            Self::UserNotInVoice => write!(f, "user is not in a voice channel"),
            Self::NotPlaying => write!(f, "no track is currently playing"),
            Self::AlreadyPaused => write!(f, "playback is already paused"),
            Self::NotPaused => write!(f, "playback is not paused"),
            Self::QueueEmpty => write!(f, "the queue is empty"),
            Self::NothingToClear => write!(f, "nothing to clear besides the current track"),
            Self::InvalidIndex { index, len } => {
                write!(f, "index {index} out of range (queue has {len} entries)")
            },
            Self::IsCurrentTrack => write!(f, "cannot remove the current track; use skip"),
            Self::NoResults => write!(f, "track resolution returned no results"),
            Self::LoadFailed(e) => write!(f, "track resolution failed: {e}"),
            Self::Port { site, source } => write!(f, "{site}: {source}"),
            Self::Repository(e) => write!(f, "repository error: {e}"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::LoadFailed(e) | Self::Port { source: e, .. } | Self::Repository(e) => {
                Some(e.as_ref())
            },
            _ => None,
        }
    }
}

/// Error surface for [`crate::repository::PlayerStateRepository`].
#[derive(Debug)]
pub enum RepositoryError {
    /// No state stored for this guild.
    NotFound(GuildID),
    /// The backing store failed for some other reason.
    Io(Box<dyn StdError + Send + Sync>),
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(guild) => write!(f, "no stored state for guild {guild}"),
            Self::Io(e) => write!(f, "repository I/O error: {e}"),
        }
    }
}

impl StdError for RepositoryError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Io(e) => Some(e.as_ref()),
            Self::NotFound(_) => None,
        }
    }
}

impl RepositoryError {
    /// Per §4.3: use cases translate `NotFound` into the domain error.
    pub fn into_domain(self) -> Error {
        match self {
            Self::NotFound(_) => Error::NotConnected,
            Self::Io(e) => Error::Repository(e),
        }
    }
}
