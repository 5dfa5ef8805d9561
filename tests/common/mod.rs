//! In-memory fakes for every port trait, shared across the integration
//! tests. Each fake records what it was asked to do so a test can assert on
//! it after flushing the bus with `EventBus::close`.

use std::sync::Arc;

use async_trait::async_trait;
use cadence_core::model::{
    GuildID, MessageID, NotificationChannelID, Track, TrackID, TrackList, TrackListKind,
    TrackSource, UserID, VoiceChannelID,
};
use cadence_core::ports::{
    AudioPlayer, NotificationSender, NowPlayingInfo, PortResult, TrackProvider, UserDisplayInfo,
    UserInfoProvider, VoiceConnection, VoiceStateProvider,
};
use parking_lot::Mutex;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AudioCall {
    Play(TrackID),
    Stop,
    Pause,
    Resume,
}

#[derive(Default)]
pub struct FakeAudioPlayer {
    pub calls: Mutex<Vec<AudioCall>>,
}

#[async_trait]
impl AudioPlayer for FakeAudioPlayer {
    async fn play(&self, _guild_id: GuildID, track_id: &TrackID) -> PortResult<()> {
        self.calls.lock().push(AudioCall::Play(track_id.clone()));
        Ok(())
    }

    async fn stop(&self, _guild_id: GuildID) -> PortResult<()> {
        self.calls.lock().push(AudioCall::Stop);
        Ok(())
    }

    async fn pause(&self, _guild_id: GuildID) -> PortResult<()> {
        self.calls.lock().push(AudioCall::Pause);
        Ok(())
    }

    async fn resume(&self, _guild_id: GuildID) -> PortResult<()> {
        self.calls.lock().push(AudioCall::Resume);
        Ok(())
    }
}

impl AudioCall {
    pub fn track_id(&self) -> Option<&TrackID> {
        match self {
            AudioCall::Play(id) => Some(id),
            _ => None,
        }
    }
}

/// Resolves every id to a stub track, never fails.
#[derive(Default)]
pub struct FakeTrackProvider;

#[async_trait]
impl TrackProvider for FakeTrackProvider {
    async fn load_track(&self, id: &TrackID) -> PortResult<Track> {
        Ok(stub_track(id.clone()))
    }

    async fn load_tracks(&self, ids: &[TrackID]) -> PortResult<Vec<Track>> {
        Ok(ids.iter().cloned().map(stub_track).collect())
    }

    async fn resolve_query(&self, query: &str) -> PortResult<TrackList> {
        Ok(TrackList {
            kind: TrackListKind::Track,
            identifier: Some(query.to_owned()),
            name: None,
            url: None,
            tracks: vec![stub_track(TrackID::from(query))],
        })
    }
}

fn stub_track(id: TrackID) -> Track {
    Track {
        title: format!("title-{id}"),
        id,
        artist: "artist".to_owned(),
        duration: std::time::Duration::from_secs(180),
        uri: "https://example.invalid/track".to_owned(),
        artwork_url: None,
        source: TrackSource::Youtube,
        is_stream: false,
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum NotificationCall {
    Sent { channel_id: NotificationChannelID, track_id: TrackID },
    Deleted { channel_id: NotificationChannelID, message_id: MessageID },
}

pub struct FakeNotificationSender {
    pub calls: Mutex<Vec<NotificationCall>>,
    next_message_id: Mutex<u64>,
}

impl Default for FakeNotificationSender {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            next_message_id: Mutex::new(1),
        }
    }
}

#[async_trait]
impl NotificationSender for FakeNotificationSender {
    async fn send_now_playing(
        &self,
        channel_id: NotificationChannelID,
        info: &NowPlayingInfo,
    ) -> PortResult<MessageID> {
        self.calls.lock().push(NotificationCall::Sent {
            channel_id,
            track_id: info.track.id.clone(),
        });
        let mut next = self.next_message_id.lock();
        let id = MessageID(*next);
        *next += 1;
        Ok(id)
    }

    async fn delete_message(
        &self,
        channel_id: NotificationChannelID,
        message_id: MessageID,
    ) -> PortResult<()> {
        self.calls
            .lock()
            .push(NotificationCall::Deleted { channel_id, message_id });
        Ok(())
    }

    async fn send_error(&self, _channel_id: NotificationChannelID, _message: &str) -> PortResult<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeUserInfoProvider;

#[async_trait]
impl UserInfoProvider for FakeUserInfoProvider {
    async fn get_user_info(&self, _guild_id: GuildID, user_id: UserID) -> PortResult<UserDisplayInfo> {
        Ok(UserDisplayInfo {
            display_name: format!("user-{user_id}"),
            avatar_url: None,
        })
    }
}

/// Every user reports as being in `channel`, unless overridden per-user.
#[derive(Default)]
pub struct FakeVoiceStateProvider {
    pub channel: Mutex<Option<VoiceChannelID>>,
}

#[async_trait]
impl VoiceStateProvider for FakeVoiceStateProvider {
    async fn get_user_voice_channel(
        &self,
        _guild_id: GuildID,
        _user_id: UserID,
    ) -> PortResult<Option<VoiceChannelID>> {
        Ok(*self.channel.lock())
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VoiceCall {
    Join(VoiceChannelID),
    Leave,
}

#[derive(Default)]
pub struct FakeVoiceConnection {
    pub calls: Mutex<Vec<VoiceCall>>,
}

#[async_trait]
impl VoiceConnection for FakeVoiceConnection {
    async fn join_channel(&self, _guild_id: GuildID, channel_id: VoiceChannelID) -> PortResult<()> {
        self.calls.lock().push(VoiceCall::Join(channel_id));
        Ok(())
    }

    async fn leave_channel(&self, _guild_id: GuildID) -> PortResult<()> {
        self.calls.lock().push(VoiceCall::Leave);
        Ok(())
    }
}

/// The full wiring of one orchestrator + its two handlers, backed by the
/// fakes above, exactly as a real binary would assemble them at startup.
pub struct Harness {
    pub orchestrator: Arc<cadence_core::PlaybackOrchestrator>,
    pub repository: Arc<cadence_core::InMemoryPlayerStateRepository>,
    pub events: Arc<cadence_core::events::EventBus>,
    pub audio: Arc<FakeAudioPlayer>,
    pub notifications: Arc<FakeNotificationSender>,
    pub voice_state: Arc<FakeVoiceStateProvider>,
    pub voice_connection: Arc<FakeVoiceConnection>,
}

impl Harness {
    pub fn new() -> Self {
        let repository = Arc::new(cadence_core::InMemoryPlayerStateRepository::new());
        let events = cadence_core::events::EventBus::new(cadence_core::events::EventBusConfig::default());
        let audio = Arc::new(FakeAudioPlayer::default());
        let tracks = Arc::new(FakeTrackProvider);
        let notifications = Arc::new(FakeNotificationSender::default());
        let users = Arc::new(FakeUserInfoProvider);
        let voice_state = Arc::new(FakeVoiceStateProvider::default());
        let voice_connection = Arc::new(FakeVoiceConnection::default());

        let playback_handler = Arc::new(cadence_core::handlers::PlaybackEventHandler::new(
            repository.clone(),
            events.clone(),
            audio.clone(),
        ));
        let notification_handler = Arc::new(cadence_core::handlers::NotificationEventHandler::new(
            repository.clone(),
            notifications.clone(),
            users,
            tracks,
        ));

        events
            .subscribe(cadence_core::events::EventKind::CurrentTrackChanged, playback_handler.clone())
            .unwrap();
        events
            .subscribe(cadence_core::events::EventKind::TrackEnded, playback_handler)
            .unwrap();
        events
            .subscribe(cadence_core::events::EventKind::CurrentTrackChanged, notification_handler.clone())
            .unwrap();
        events
            .subscribe(cadence_core::events::EventKind::PlaybackFinished, notification_handler)
            .unwrap();

        let orchestrator = Arc::new(cadence_core::PlaybackOrchestrator::new(
            repository.clone(),
            events.clone(),
            audio.clone(),
            voice_state.clone(),
            voice_connection.clone(),
        ));

        Self {
            orchestrator,
            repository,
            events,
            audio,
            notifications,
            voice_state,
            voice_connection,
        }
    }

    /// Gives the bus's dispatcher task a chance to drain and run handlers
    /// for everything published so far. `EventBus::close` is the only hard
    /// synchronization point the bus exposes, but closing ends the bus for
    /// good — tests that keep driving the orchestrator afterwards need to
    /// observe handler side effects without tearing anything down.
    pub async fn settle(&self) {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }
}
