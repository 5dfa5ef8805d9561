//! Newtype identifiers, in the style of `songbird::id`: thin wrappers that
//! keep guild, channel, user and message ids from being accidentally mixed
//! up at call sites, without imposing any encoding beyond "opaque handle".

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! numeric_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
        pub struct $name(pub u64);

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

numeric_id!(GuildID, "A guild (tenant) identifier.");
numeric_id!(UserID, "A chat-user identifier.");
numeric_id!(VoiceChannelID, "A voice-channel identifier.");
numeric_id!(NotificationChannelID, "A text/notification-channel identifier.");
numeric_id!(MessageID, "A chat-message identifier.");

/// An opaque, externally-assigned track identifier. Unique within a guild's
/// lifetime of queue references, but otherwise meaningless to this crate.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct TrackID(pub String);

impl From<String> for TrackID {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for TrackID {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl fmt::Display for TrackID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
