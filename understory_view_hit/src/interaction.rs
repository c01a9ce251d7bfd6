// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grab/hover interaction state driven by pointer events and hit tests.

use cursor_icon::CursorIcon;
use kurbo::Point;
use ui_events::pointer::{PointerButton, PointerEvent};

/// Observable pointer interaction with the subject.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum InteractionState {
    /// The pointer is not over the subject.
    #[default]
    Idle,
    /// The pointer is over the subject with no primary button held.
    Hovering,
    /// The subject is being dragged.
    Grabbing,
}

impl InteractionState {
    /// Returns `true` while hovering (but not grabbing).
    #[must_use]
    pub fn is_hovering(self) -> bool {
        self == Self::Hovering
    }

    /// Returns `true` while grabbing.
    #[must_use]
    pub fn is_grabbing(self) -> bool {
        self == Self::Grabbing
    }

    /// The cursor to show in this state.
    #[must_use]
    pub fn cursor(self) -> CursorIcon {
        match self {
            Self::Idle => CursorIcon::Default,
            Self::Hovering => CursorIcon::Grab,
            Self::Grabbing => CursorIcon::Grabbing,
        }
    }
}

/// A change of [`InteractionState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InteractionChange {
    /// State before the event.
    pub previous: InteractionState,
    /// State after the event.
    pub current: InteractionState,
}

impl InteractionChange {
    /// The cursor for the new state.
    #[must_use]
    pub fn cursor(&self) -> CursorIcon {
        self.current.cursor()
    }
}

/// The `Idle ↔ Hovering → Grabbing` state machine.
///
/// Every method returns a change only when the observable
/// `(hovering, grabbing)` pair changed, so hosts can update cursors and
/// styles without redundant work at pointer-move rates.
///
/// Hit tests are passed lazily and only run when the state machine needs one:
/// moves during a grab do not hit test.
#[derive(Clone, Copy, Debug, Default)]
pub struct InteractionTracker {
    state: InteractionState,
    last_hit: bool,
}

impl InteractionTracker {
    /// An idle tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current state.
    #[must_use]
    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// The pointer entered or moved. Ignored while grabbing.
    pub fn pointer_move(&mut self, hit_test: impl FnOnce() -> bool) -> Option<InteractionChange> {
        if self.state.is_grabbing() {
            return None;
        }
        self.last_hit = hit_test();
        self.transition(self.resting_state())
    }

    /// A button went down. Only the primary button while hovering grabs.
    pub fn pointer_down(&mut self, primary: bool) -> Option<InteractionChange> {
        if primary && self.state.is_hovering() {
            return self.transition(InteractionState::Grabbing);
        }
        None
    }

    /// A button went up: a grab ends according to the last hit test.
    pub fn pointer_up(&mut self) -> Option<InteractionChange> {
        if !self.state.is_grabbing() {
            return None;
        }
        self.transition(self.resting_state())
    }

    /// The pointer sequence was cancelled. Same as [`InteractionTracker::pointer_up`].
    pub fn pointer_cancel(&mut self) -> Option<InteractionChange> {
        self.pointer_up()
    }

    /// The pointer left the viewport.
    pub fn pointer_leave(&mut self) -> Option<InteractionChange> {
        self.last_hit = false;
        self.transition(InteractionState::Idle)
    }

    /// Feeds a `ui-events` pointer event, hit testing its logical position.
    ///
    /// `Enter` carries no position and is picked up by the following move.
    pub fn handle_pointer_event(
        &mut self,
        event: &PointerEvent,
        hit_test: impl FnOnce(Point) -> bool,
    ) -> Option<InteractionChange> {
        match event {
            PointerEvent::Move(update) => {
                let point = update.current.logical_point();
                self.pointer_move(|| hit_test(point))
            }
            PointerEvent::Down(down) => {
                self.pointer_down(down.button == Some(PointerButton::Primary))
            }
            PointerEvent::Up(_) => self.pointer_up(),
            PointerEvent::Cancel(_) => self.pointer_cancel(),
            PointerEvent::Leave(_) => self.pointer_leave(),
            _ => None,
        }
    }

    fn resting_state(&self) -> InteractionState {
        if self.last_hit {
            InteractionState::Hovering
        } else {
            InteractionState::Idle
        }
    }

    fn transition(&mut self, next: InteractionState) -> Option<InteractionChange> {
        if next == self.state {
            return None;
        }
        let change = InteractionChange {
            previous: self.state,
            current: next,
        };
        self.state = next;
        Some(change)
    }
}
