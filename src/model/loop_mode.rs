use serde::{Deserialize, Serialize};

/// Loop semantics that govern [`crate::queue::Queue::advance`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopMode {
    /// Linear playback: advance falls off the end of the queue.
    #[default]
    None,
    /// Repeat the current entry indefinitely.
    Track,
    /// Wrap back to index 0 after the last entry.
    Queue,
}

impl LoopMode {
    /// None -> Track -> Queue -> None.
    pub fn cycle(self) -> Self {
        match self {
            Self::None => Self::Track,
            Self::Track => Self::Queue,
            Self::Queue => Self::None,
        }
    }

    /// `Track` demoted to `None`; used wherever the spec says "the looped
    /// track is being removed/skipped, so don't let it repeat itself."
    pub fn demote_track(self) -> Self {
        match self {
            Self::Track => Self::None,
            other => other,
        }
    }
}
