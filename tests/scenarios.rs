//! End-to-end scenarios (spec §8) driven entirely through
//! `PlaybackOrchestrator`'s public surface plus directly-published events
//! standing in for the audio engine's own `TrackEnded` reports, against the
//! fakes in `common`.

mod common;

use cadence_core::events::Event;
use cadence_core::model::{GuildID, LoopMode, NotificationChannelID, TrackID, UserID, VoiceChannelID};
use cadence_core::{Error, PlayerStateRepository};
use common::{AudioCall, Harness, NotificationCall, VoiceCall};

const GUILD: GuildID = GuildID(1);
const USER: UserID = UserID(1);
const NOTIFY_CHANNEL: NotificationChannelID = NotificationChannelID(10);
const VOICE_CHANNEL: VoiceChannelID = VoiceChannelID(20);

async fn joined(h: &Harness) {
    h.orchestrator
        .join(GUILD, USER, NOTIFY_CHANNEL, Some(VOICE_CHANNEL))
        .await
        .unwrap();
}

#[tokio::test]
async fn idle_enqueue_triggers_playback() {
    let h = Harness::new();
    joined(&h).await;

    h.orchestrator
        .add(GUILD, vec![TrackID::from("a")], USER)
        .await
        .unwrap();
    h.settle().await;

    let state = h.repository.get(GUILD).await.unwrap();
    assert!(state.is_playback_active());
    assert_eq!(state.queue().current().unwrap().track_id, TrackID::from("a"));

    assert_eq!(*h.audio.calls.lock(), vec![AudioCall::Play(TrackID::from("a"))]);
    assert!(h
        .notifications
        .calls
        .lock()
        .iter()
        .any(|c| matches!(c, NotificationCall::Sent { track_id, .. } if *track_id == TrackID::from("a"))));
}

#[tokio::test]
async fn natural_advance_through_queue_end() {
    let h = Harness::new();
    joined(&h).await;
    h.orchestrator
        .add(GUILD, vec![TrackID::from("a"), TrackID::from("b")], USER)
        .await
        .unwrap();
    h.settle().await;

    // Audio engine reports the first track ended naturally.
    h.events
        .publish(Event::TrackEnded {
            guild_id: GUILD,
            should_advance_queue: true,
            track_failed: false,
        })
        .await
        .unwrap();
    h.settle().await;

    let state = h.repository.get(GUILD).await.unwrap();
    assert_eq!(state.queue().current().unwrap().track_id, TrackID::from("b"));
    assert!(state.is_playback_active());

    // Second (last) track also ends naturally; LoopMode::None falls off the end.
    h.events
        .publish(Event::TrackEnded {
            guild_id: GUILD,
            should_advance_queue: true,
            track_failed: false,
        })
        .await
        .unwrap();
    h.settle().await;

    let state = h.repository.get(GUILD).await.unwrap();
    assert!(!state.is_playback_active());
    assert!(h.audio.calls.lock().contains(&AudioCall::Stop));
}

#[tokio::test]
async fn failing_track_with_loop_track_gets_removed_not_repeated() {
    let h = Harness::new();
    joined(&h).await;
    h.orchestrator
        .add(GUILD, vec![TrackID::from("a"), TrackID::from("b")], USER)
        .await
        .unwrap();
    h.orchestrator.set_loop_mode(GUILD, LoopMode::Track).await.unwrap();
    h.settle().await;
    h.audio.calls.lock().clear();

    // "a" fails to load/play; TrackEnded reports it, and Track-loop must not
    // cause it to be retried — it gets removed, not replayed.
    h.events
        .publish(Event::TrackEnded {
            guild_id: GUILD,
            should_advance_queue: true,
            track_failed: true,
        })
        .await
        .unwrap();
    h.settle().await;

    let state = h.repository.get(GUILD).await.unwrap();
    assert_eq!(state.queue().len(), 1);
    assert_eq!(state.queue().current().unwrap().track_id, TrackID::from("b"));
    assert!(state.is_playback_active());
    assert_eq!(*h.audio.calls.lock(), vec![AudioCall::Play(TrackID::from("b"))]);
}

#[tokio::test]
async fn skip_at_last_with_loop_queue_wraps() {
    let h = Harness::new();
    joined(&h).await;
    h.orchestrator
        .add(GUILD, vec![TrackID::from("a"), TrackID::from("b")], USER)
        .await
        .unwrap();
    h.orchestrator.set_loop_mode(GUILD, LoopMode::Queue).await.unwrap();
    h.orchestrator.seek(GUILD, 1).await.unwrap();
    h.settle().await;
    h.audio.calls.lock().clear();

    let outcome = h.orchestrator.skip(GUILD).await.unwrap();
    assert_eq!(outcome.skipped_track_id, TrackID::from("b"));
    assert_eq!(outcome.next_track_id, Some(TrackID::from("a")));
    h.settle().await;

    let state = h.repository.get(GUILD).await.unwrap();
    assert_eq!(state.queue().current_index(), 0);
    assert_eq!(*h.audio.calls.lock(), vec![AudioCall::Play(TrackID::from("a"))]);
}

#[tokio::test]
async fn remove_of_current_is_rejected() {
    let h = Harness::new();
    joined(&h).await;
    h.orchestrator
        .add(GUILD, vec![TrackID::from("a"), TrackID::from("b")], USER)
        .await
        .unwrap();

    let err = h.orchestrator.remove(GUILD, 0).await.unwrap_err();
    assert!(matches!(err, Error::IsCurrentTrack));

    // The non-current entry is still removable.
    h.orchestrator.remove(GUILD, 1).await.unwrap();
    let state = h.repository.get(GUILD).await.unwrap();
    assert_eq!(state.queue().len(), 1);
}

#[tokio::test]
async fn pause_and_resume_drive_the_engine() {
    let h = Harness::new();
    joined(&h).await;
    h.orchestrator
        .add(GUILD, vec![TrackID::from("a")], USER)
        .await
        .unwrap();
    h.settle().await;
    h.audio.calls.lock().clear();

    h.orchestrator.pause(GUILD).await.unwrap();
    assert_eq!(*h.audio.calls.lock(), vec![AudioCall::Pause]);
    assert!(h.repository.get(GUILD).await.unwrap().is_paused());

    h.audio.calls.lock().clear();
    h.orchestrator.resume(GUILD).await.unwrap();
    assert_eq!(*h.audio.calls.lock(), vec![AudioCall::Resume]);
    assert!(!h.repository.get(GUILD).await.unwrap().is_paused());
}

#[tokio::test]
async fn leave_publishes_playback_finished_then_deletes_state() {
    let h = Harness::new();
    joined(&h).await;
    h.orchestrator
        .add(GUILD, vec![TrackID::from("a")], USER)
        .await
        .unwrap();
    h.settle().await;

    let state_before = h.repository.get(GUILD).await.unwrap();
    let now_playing = state_before.now_playing_message().unwrap();

    h.orchestrator.leave(GUILD).await.unwrap();
    h.settle().await;

    assert_eq!(
        *h.notifications.calls.lock(),
        vec![
            NotificationCall::Sent {
                channel_id: NOTIFY_CHANNEL,
                track_id: TrackID::from("a"),
            },
            NotificationCall::Deleted {
                channel_id: now_playing.channel_id,
                message_id: now_playing.message_id,
            },
        ]
    );

    assert!(h.voice_connection.calls.lock().contains(&VoiceCall::Leave));
    assert!(matches!(
        h.repository.get(GUILD).await,
        Err(cadence_core::error::RepositoryError::NotFound(_))
    ));
}
