// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change channels and polling watchers.

use crate::{TransformState, TransformStore};

/// Identifies one of the two notification channels of a [`TransformStore`].
///
/// Every committed write bumps [`ChangeChannel::Output`]. Writes made through
/// [`TransformStore::set_scale_invisibly`] skip [`ChangeChannel::Gesture`], so
/// gesture and scale-state logic never mistake an animation step for a user
/// driven change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChangeChannel {
    /// Raw value changes, including animation-driven scale writes.
    Output,
    /// Changes relevant to gesture handling and scale-state transitions.
    Gesture,
}

/// A cursor over one change channel of a [`TransformStore`].
///
/// Watchers have latest-value semantics: polling yields the current value if
/// anything was committed on the channel since the previous poll, however many
/// writes that was. A freshly created watcher yields the current value on its
/// first poll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransformWatcher {
    channel: ChangeChannel,
    seen: u64,
}

impl TransformWatcher {
    /// Creates a watcher that has not observed anything yet.
    #[must_use]
    pub fn new(channel: ChangeChannel) -> Self {
        Self { channel, seen: 0 }
    }

    /// The channel this watcher follows.
    #[must_use]
    pub fn channel(&self) -> ChangeChannel {
        self.channel
    }

    /// Returns `true` if the channel advanced since the last poll.
    #[must_use]
    pub fn has_changed(&self, store: &TransformStore) -> bool {
        store.revision(self.channel) != self.seen
    }

    /// Returns the current value if the channel advanced since the last poll.
    pub fn poll(&mut self, store: &TransformStore) -> Option<TransformState> {
        let revision = store.revision(self.channel);
        if revision == self.seen {
            return None;
        }
        self.seen = revision;
        Some(*store.value())
    }
}
