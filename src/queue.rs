//! The ordered queue of [`QueueEntry`] plus its cursor, per spec §4.1.
//!
//! Unlike `songbird::tracks::queue::TrackQueue`, which wraps its storage in
//! an `Arc<Mutex<_>>` because it is shared directly with the audio driver,
//! `Queue` is a plain value type: it lives inside [`crate::PlayerState`],
//! and concurrency is handled one layer up by the repository's atomic
//! Get/Save (§4.3). This keeps `Advance`/`Remove`'s cursor arithmetic
//! trivially testable without any locking machinery.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{LoopMode, QueueEntry};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Queue {
    entries: Vec<QueueEntry>,
    current_index: usize,
}

impl Queue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The entry at the cursor, or `None` if the queue is empty.
    pub fn current(&self) -> Option<&QueueEntry> {
        self.entries.get(self.current_index)
    }

    /// A defensive copy of all entries in order.
    pub fn list(&self) -> Vec<QueueEntry> {
        self.entries.clone()
    }

    pub fn get(&self, index: usize) -> Result<&QueueEntry> {
        self.entries
            .get(index)
            .ok_or_else(|| Error::invalid_index(index, self.entries.len()))
    }

    /// Appends entries at the end; the cursor is left unchanged. Does not
    /// activate playback — that is the caller's responsibility (spec §4.1).
    pub fn append(&mut self, entries: impl IntoIterator<Item = QueueEntry>) {
        self.entries.extend(entries);
    }

    /// Prepends entries. If `playback_active`, the cursor shifts by the
    /// number of entries prepended so it keeps pointing at the same entry.
    pub fn prepend(&mut self, entries: Vec<QueueEntry>, playback_active: bool) {
        let shift = entries.len();
        let mut new_entries = entries;
        new_entries.append(&mut self.entries);
        self.entries = new_entries;
        if playback_active {
            self.current_index += shift;
        }
    }

    /// Sets the cursor to `index`, returning the entry there.
    pub fn seek(&mut self, index: usize) -> Result<&QueueEntry> {
        if index >= self.entries.len() {
            return Err(Error::invalid_index(index, self.entries.len()));
        }
        self.current_index = index;
        Ok(&self.entries[self.current_index])
    }

    /// Removes the entry at `index`, repairing the cursor per spec §4.1.
    ///
    /// `playback_active` and `mode` describe the owning `PlayerState` at the
    /// time of the call; `mode` should already have `Track` demoted to
    /// `None` by the caller, since the looped track is the one being
    /// removed. Returns whether playback should be deactivated as a result
    /// (queue became empty, or `Advance` ran out of entries while removing
    /// the current one).
    pub fn remove(
        &mut self,
        index: usize,
        playback_active: bool,
        mode: LoopMode,
    ) -> Result<RemoveOutcome> {
        if index >= self.entries.len() {
            return Err(Error::invalid_index(index, self.entries.len()));
        }

        let mut deactivate = false;

        if index == self.current_index && playback_active {
            // Advance past the entry being removed before dropping it. The
            // looped track is the one being removed, so `Track` is always
            // demoted to `None` here regardless of the caller's mode.
            if self.advance(mode.demote_track()).is_none() {
                deactivate = true;
            }
            // `advance` may have left current_index pointing at `index`
            // itself (None-mode-at-last, Track-demoted-to-None-at-last).
            // Removal below repairs it regardless.
        }

        self.entries.remove(index);

        if index < self.current_index {
            self.current_index -= 1;
        }

        if self.entries.is_empty() {
            self.current_index = 0;
            deactivate = true;
        } else if self.current_index >= self.entries.len() {
            self.current_index = self.entries.len() - 1;
        }

        Ok(RemoveOutcome { deactivate })
    }

    /// Advances the cursor according to `mode`, returning the new current
    /// entry (or `None`). See spec §4.1 for the exact per-mode semantics.
    pub fn advance(&mut self, mode: LoopMode) -> Option<&QueueEntry> {
        if self.entries.is_empty() {
            return None;
        }

        let last = self.entries.len() - 1;
        match mode {
            LoopMode::None => {
                if self.current_index >= last {
                    None
                } else {
                    self.current_index += 1;
                    self.entries.get(self.current_index)
                }
            },
            LoopMode::Track => self.entries.get(self.current_index),
            LoopMode::Queue => {
                if self.current_index >= last {
                    self.current_index = 0;
                } else {
                    self.current_index += 1;
                }
                self.entries.get(self.current_index)
            },
        }
    }

    /// Empties the queue and resets the cursor. The owning `PlayerState`'s
    /// `playback_active` is the caller's responsibility to clear (Queue has
    /// no such field of its own).
    pub fn clear(&mut self) {
        self.entries.clear();
        self.current_index = 0;
    }
}

/// What `remove` learned about the owning player that the caller must apply.
pub struct RemoveOutcome {
    pub deactivate: bool,
}
