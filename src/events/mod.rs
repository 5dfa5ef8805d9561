//! Event bus (§4.4) and the bus-carried event set (§3).

mod bus;
mod types;

pub use bus::{EventBus, EventBusConfig, EventHandler, PublishError, SubscribeError, DEFAULT_BUFFER_SIZE};
pub use types::{Event, EventKind};
