//! The bounded, non-blocking, type-dispatched bus of spec §4.4.
//!
//! Grounded on `songbird::driver::tasks::events::runner`: a single Tokio
//! task owns the receiving end of a channel and `recv`s in a loop,
//! dispatching to whatever has registered interest. Delivery is from one
//! bounded FIFO, so — exactly as songbird's single event-processor task
//! gives total order across `AddGlobalEvent`/`FireCoreEvent`/`ChangeState`
//! — this bus gives total order across every `Event` variant published to
//! it, not just per-kind order.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use tokio::sync::{mpsc, Mutex as AsyncMutex};
use tokio::task::JoinHandle;
use tracing::{debug, instrument, trace, warn};

use super::types::{Event, EventKind};

/// Default channel capacity per spec §4.4.
pub const DEFAULT_BUFFER_SIZE: usize = 100;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EventBusConfig {
    pub buffer_size: usize,
}

impl Default for EventBusConfig {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
pub enum PublishError {
    /// `Close` has already run.
    BusClosed,
    /// The bus's internal buffer is full; the event was dropped.
    BufferFull,
}

#[derive(Debug, Eq, PartialEq)]
pub struct SubscribeError;

#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle(&self, event: &Event);
}

type Subscribers = RwLock<HashMap<EventKind, Vec<Arc<dyn EventHandler>>>>;

/// A process-wide, bounded pub/sub bus. Subscribe before publishing — the
/// handler snapshot for a kind is copied on each dispatch, so subscribing
/// concurrently with dispatch is safe, but a handler added after an event
/// for its kind has already been pulled off the queue will simply not see
/// that event.
pub struct EventBus {
    sender: AsyncMutex<Option<mpsc::Sender<Event>>>,
    dispatcher: AsyncMutex<Option<JoinHandle<()>>>,
    subscribers: Arc<Subscribers>,
    closed: AtomicBool,
}

impl EventBus {
    pub fn new(config: EventBusConfig) -> Arc<Self> {
        let (tx, rx) = mpsc::channel(config.buffer_size.max(1));
        let subscribers: Arc<Subscribers> = Arc::new(RwLock::new(HashMap::new()));

        let dispatcher = tokio::spawn(dispatch_loop(rx, subscribers.clone()));

        Arc::new(Self {
            sender: AsyncMutex::new(Some(tx)),
            dispatcher: AsyncMutex::new(Some(dispatcher)),
            subscribers,
            closed: AtomicBool::new(false),
        })
    }

    /// Registers `handler` for every event whose kind matches `kind`.
    /// Fails with [`SubscribeError`] if called after [`Self::close`].
    pub fn subscribe(
        &self,
        kind: EventKind,
        handler: Arc<dyn EventHandler>,
    ) -> Result<(), SubscribeError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(SubscribeError);
        }
        self.subscribers.write().entry(kind).or_default().push(handler);
        Ok(())
    }

    /// Accepts `event` into the bus's buffer immediately, or reports why it
    /// could not be accepted. Never blocks, never retries.
    pub async fn publish(&self, event: Event) -> Result<(), PublishError> {
        let guard = self.sender.lock().await;
        let Some(sender) = guard.as_ref() else {
            return Err(PublishError::BusClosed);
        };
        match sender.try_send(event) {
            Ok(()) => Ok(()),
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!("event bus buffer full, dropping event");
                Err(PublishError::BufferFull)
            },
            Err(mpsc::error::TrySendError::Closed(_)) => Err(PublishError::BusClosed),
        }
    }

    /// Flushes in-flight events to already-registered handlers, then
    /// refuses new publishes/subscribes. Idempotent.
    pub async fn close(&self) {
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }
        // Dropping the sender lets the dispatcher's `recv` drain the
        // remaining buffered events and then return `None`.
        self.sender.lock().await.take();
        if let Some(handle) = self.dispatcher.lock().await.take() {
            let _ = handle.await;
        }
    }
}

#[instrument(skip(rx, subscribers))]
async fn dispatch_loop(mut rx: mpsc::Receiver<Event>, subscribers: Arc<Subscribers>) {
    while let Some(event) = rx.recv().await {
        let kind = event.kind();
        let handlers = subscribers.read().get(&kind).cloned().unwrap_or_default();
        trace!(?kind, guild = %event.guild_id(), handlers = handlers.len(), "dispatching event");
        for handler in &handlers {
            handler.handle(&event).await;
        }
    }
    debug!("event bus dispatcher exiting");
}
