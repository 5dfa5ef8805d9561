//! Cadence is the concurrent playback orchestrator at the core of a
//! multi-tenant music-player service: for each independent guild, it
//! maintains a durable queue/playback state and coordinates commands,
//! an external audio engine's `TrackEnded` events, and user-facing
//! notifications through a single-writer event bus.
//!
//! Command parsing, the audio engine itself, track resolution, the
//! notification channel, the chat-user directory, and state durability are
//! all external collaborators — this crate specifies and consumes them as
//! ports (see [`ports`]) without implementing any of them.
//!
//! ```text
//! command -> PlaybackOrchestrator -> PlayerStateRepository (Save)
//!                                 -> EventBus (Publish)
//!                                        |
//!                     +------------------+------------------+
//!                     v                                     v
//!           PlaybackEventHandler                 NotificationEventHandler
//!           (drives AudioPlayer)                 (drives NotificationSender)
//! ```
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod events;
pub mod handlers;
pub mod model;
pub mod orchestrator;
pub mod player_state;
pub mod ports;
pub mod queue;
pub mod repository;

pub use error::{Error, Result};
pub use orchestrator::{PlaybackOrchestrator, SkipOutcome};
pub use player_state::{NowPlayingMessage, PlayerState};
pub use queue::Queue;
pub use repository::{InMemoryPlayerStateRepository, PlayerStateRepository};
