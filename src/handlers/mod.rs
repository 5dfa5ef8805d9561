//! Event handlers (§4.6, §4.7): the bus subscribers that turn state-change
//! events into side effects against the audio engine and the notification
//! channel. Handlers depend on the repository and ports only, never on the
//! orchestrator (spec §9) — wiring them up to the bus is the caller's job,
//! typically once at startup via [`crate::events::EventBus::subscribe`].

mod notification;
mod playback;

pub use notification::NotificationEventHandler;
pub use playback::PlaybackEventHandler;
