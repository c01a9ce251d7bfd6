// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Vec2};

use crate::state::floor_scale;
use crate::{ChangeChannel, TransformState, TransformUpdate, TransformWatcher};

/// The current and previous transform value plus its change channels.
///
/// All writes go through the setters below. Each setter is a no-op when the
/// resulting value equals the current one; otherwise it records the current
/// value as [`TransformStore::prev_value`], commits the new value and bumps the
/// revision of the affected [`ChangeChannel`]s.
///
/// Once [`TransformStore::dispose`] has run, any further write is a contract
/// violation: it trips a `debug_assert!` and is ignored in release builds.
#[derive(Clone, Debug)]
pub struct TransformStore {
    initial: TransformState,
    value: TransformState,
    prev_value: TransformState,
    output_revision: u64,
    gesture_revision: u64,
    disposed: bool,
}

impl TransformStore {
    /// Creates a store holding `initial`.
    #[must_use]
    pub fn new(initial: TransformState) -> Self {
        Self {
            initial,
            value: initial,
            prev_value: initial,
            // Start at 1 so a fresh watcher (which has seen 0) observes the
            // initial value immediately.
            output_revision: 1,
            gesture_revision: 1,
            disposed: false,
        }
    }

    /// The current value.
    #[must_use]
    pub fn value(&self) -> &TransformState {
        &self.value
    }

    /// The value immediately preceding the last committed write.
    ///
    /// Every setter is one commit, so consumers can derive per-write deltas
    /// (and velocities) from this and [`TransformStore::value`].
    #[must_use]
    pub fn prev_value(&self) -> &TransformState {
        &self.prev_value
    }

    /// The value this store was created with.
    #[must_use]
    pub fn initial(&self) -> &TransformState {
        &self.initial
    }

    /// Current revision of `channel`; increases on every notifying write.
    #[must_use]
    pub fn revision(&self, channel: ChangeChannel) -> u64 {
        match channel {
            ChangeChannel::Output => self.output_revision,
            ChangeChannel::Gesture => self.gesture_revision,
        }
    }

    /// Subscribes to `channel`. The watcher sees the current value first.
    #[must_use]
    pub fn watch(&self, channel: ChangeChannel) -> TransformWatcher {
        TransformWatcher::new(channel)
    }

    /// Returns `true` after [`TransformStore::dispose`].
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Sets the position.
    pub fn set_position(&mut self, position: Vec2) {
        let next = TransformState {
            position,
            ..self.value
        };
        self.commit(next, true, "set_position");
    }

    /// Sets the scale, floored to [`SCALE_FLOOR`](crate::SCALE_FLOOR).
    ///
    /// Non-finite scales are rejected.
    pub fn set_scale(&mut self, scale: f64) {
        let Some(scale) = self.accept_scale(scale) else {
            return;
        };
        let next = TransformState {
            scale: Some(scale),
            ..self.value
        };
        self.commit(next, true, "set_scale");
    }

    /// Sets the rotation in radians.
    pub fn set_rotation(&mut self, rotation: f64) {
        let next = TransformState {
            rotation,
            ..self.value
        };
        self.commit(next, true, "set_rotation");
    }

    /// Sets or clears the rotation focus point.
    pub fn set_rotation_focus_point(&mut self, point: Option<Point>) {
        let next = TransformState {
            rotation_focus_point: point,
            ..self.value
        };
        self.commit(next, true, "set_rotation_focus_point");
    }

    /// Applies several fields as one write with a single notification.
    pub fn update_multiple(&mut self, update: TransformUpdate) {
        if let Some(scale) = update.scale {
            if self.accept_scale(scale).is_none() {
                return;
            }
        }
        let next = self.value.updated(&update);
        self.commit(next, true, "update_multiple");
    }

    /// Sets the scale notifying only [`ChangeChannel::Output`].
    ///
    /// Animations use this to drive the scale without gesture-facing watchers
    /// interpreting the change as user input.
    pub fn set_scale_invisibly(&mut self, scale: f64) {
        let Some(scale) = self.accept_scale(scale) else {
            return;
        };
        let next = TransformState {
            scale: Some(scale),
            ..self.value
        };
        self.commit(next, false, "set_scale_invisibly");
    }

    /// Applies several fields as one write, treating the scale as invisible.
    ///
    /// [`ChangeChannel::Gesture`] is notified only when a field other than the
    /// scale changed. Animation frames that move scale and position together
    /// use this so each frame is a single commit and
    /// [`TransformStore::prev_value`] is the previous frame's value.
    pub fn update_multiple_scale_invisibly(&mut self, update: TransformUpdate) {
        if let Some(scale) = update.scale {
            if self.accept_scale(scale).is_none() {
                return;
            }
        }
        let next = self.value.updated(&update);
        let visible = TransformState {
            scale: self.value.scale,
            ..next
        } != self.value;
        self.commit(next, visible, "update_multiple_scale_invisibly");
    }

    /// Restores the initial value, notifying both channels if it differs.
    pub fn restore_initial(&mut self) {
        self.commit(self.initial, true, "restore_initial");
    }

    /// Marks the store dead. Must be called exactly once.
    pub fn dispose(&mut self) {
        if !self.ensure_live("dispose") {
            return;
        }
        self.disposed = true;
    }

    fn accept_scale(&self, scale: f64) -> Option<f64> {
        let floored = floor_scale(scale);
        if floored.is_none() {
            log::warn!("rejecting non-finite scale {scale}");
        }
        floored
    }

    fn commit(&mut self, next: TransformState, notify_gesture: bool, op: &str) -> bool {
        if !self.ensure_live(op) || next == self.value {
            return false;
        }
        self.prev_value = self.value;
        self.value = next;
        self.output_revision += 1;
        if notify_gesture {
            self.gesture_revision += 1;
        }
        true
    }

    fn ensure_live(&self, op: &str) -> bool {
        debug_assert!(
            !self.disposed,
            "`{op}` called on a disposed transform store"
        );
        if self.disposed {
            log::error!("`{op}` called on a disposed transform store; ignoring");
            return false;
        }
        true
    }
}
