//! The per-guild aggregate of spec §3/§4.2: a `Queue` plus the scalar
//! fields that track playback/pause/loop/notification state. A thin domain
//! object with accessor methods that enforce the transition preconditions
//! of §4.2 — no I/O, no locking; concurrency is handled by the repository
//! that owns it (§4.3).

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{GuildID, LoopMode, MessageID, NotificationChannelID, VoiceChannelID};
use crate::queue::Queue;

/// Pointer to the last posted Now-Playing notification, kept only so it can
/// later be deleted.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct NowPlayingMessage {
    pub channel_id: NotificationChannelID,
    pub message_id: MessageID,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerState {
    guild_id: GuildID,
    voice_channel_id: VoiceChannelID,
    notification_channel_id: NotificationChannelID,
    queue: Queue,
    playback_active: bool,
    paused: bool,
    loop_mode: LoopMode,
    now_playing_message: Option<NowPlayingMessage>,
}

impl PlayerState {
    pub fn new(
        guild_id: GuildID,
        voice_channel_id: VoiceChannelID,
        notification_channel_id: NotificationChannelID,
    ) -> Self {
        Self {
            guild_id,
            voice_channel_id,
            notification_channel_id,
            queue: Queue::new(),
            playback_active: false,
            paused: false,
            loop_mode: LoopMode::None,
            now_playing_message: None,
        }
    }

    pub fn guild_id(&self) -> GuildID {
        self.guild_id
    }

    pub fn voice_channel_id(&self) -> VoiceChannelID {
        self.voice_channel_id
    }

    pub fn set_voice_channel_id(&mut self, id: VoiceChannelID) {
        self.voice_channel_id = id;
    }

    pub fn notification_channel_id(&self) -> NotificationChannelID {
        self.notification_channel_id
    }

    pub fn set_notification_channel_id(&mut self, id: NotificationChannelID) {
        self.notification_channel_id = id;
    }

    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    pub fn queue_mut(&mut self) -> &mut Queue {
        &mut self.queue
    }

    pub fn is_playback_active(&self) -> bool {
        self.playback_active
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn loop_mode(&self) -> LoopMode {
        self.loop_mode
    }

    pub fn set_loop_mode(&mut self, mode: LoopMode) {
        self.loop_mode = mode;
    }

    pub fn cycle_loop_mode(&mut self) -> LoopMode {
        self.loop_mode = self.loop_mode.cycle();
        self.loop_mode
    }

    pub fn now_playing_message(&self) -> Option<NowPlayingMessage> {
        self.now_playing_message
    }

    pub fn set_now_playing_message(&mut self, msg: Option<NowPlayingMessage>) {
        self.now_playing_message = msg;
    }

    /// idle -> active, per §4.2.
    pub fn set_playback_active(&mut self, active: bool) {
        self.playback_active = active;
        if !active {
            self.paused = false;
        }
    }

    /// active -> paused. Requires `playback_active`.
    pub fn set_paused(&mut self, paused: bool) -> Result<()> {
        if !self.playback_active {
            return Err(Error::NotPlaying);
        }
        self.paused = paused;
        Ok(())
    }
}
