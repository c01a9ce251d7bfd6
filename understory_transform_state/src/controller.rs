// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Controller: a [`TransformStore`] plus animation command routing.
//!
//! The controller is what the host UI layer talks to. Plain setters act on the
//! store directly (through `Deref`). The two additive animation commands,
//! [`TransformController::animate_scale_by`] and
//! [`TransformController::animate_position_by`], need an animation delegate to
//! execute; until one is attached they are queued and replayed in order when
//! [`TransformController::attach`] runs.

use alloc::collections::VecDeque;
use core::ops::{Deref, DerefMut};

use kurbo::{Point, Vec2};

use crate::{TransformState, TransformStore};

/// Maximum number of commands held while no delegate is attached.
///
/// A command arriving at a full queue is first folded into the newest queued
/// command, then the oldest pair of adjacent equivalent commands is merged.
/// Only when neither frees a slot (for example strictly alternating zooms and
/// pans) is the oldest command dropped, with a warning.
pub const PENDING_CAPACITY: usize = 32;

/// Executes the additive animation commands on behalf of a controller.
///
/// `understory_motion::AnimationEngine` is the canonical implementation.
pub trait TransformDelegate {
    /// Zoom by `factor` around `focal_point` (viewport coordinates).
    fn animate_scale_by(
        &mut self,
        store: &mut TransformStore,
        factor: f64,
        focal_point: Option<Point>,
    );

    /// Pan by `delta`.
    fn animate_position_by(&mut self, store: &mut TransformStore, delta: Vec2);

    /// Halts any running animation.
    ///
    /// Called by [`TransformController::reset`] before the initial value is
    /// restored, so no frame writes over it afterwards.
    fn stop(&mut self) {}

    /// Called once when the owning controller is disposed.
    fn dispose(&mut self) {}
}

/// A command requested before a delegate was attached.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PendingCommand {
    /// Deferred [`TransformDelegate::animate_scale_by`].
    ScaleBy {
        /// Multiplicative zoom factor.
        factor: f64,
        /// Focal point in viewport coordinates.
        focal_point: Option<Point>,
    },
    /// Deferred [`TransformDelegate::animate_position_by`].
    PositionBy {
        /// Pan delta.
        delta: Vec2,
    },
}

impl PendingCommand {
    /// Executes this command against `delegate`.
    pub fn replay<D: TransformDelegate>(self, delegate: &mut D, store: &mut TransformStore) {
        match self {
            Self::ScaleBy {
                factor,
                focal_point,
            } => delegate.animate_scale_by(store, factor, focal_point),
            Self::PositionBy { delta } => delegate.animate_position_by(store, delta),
        }
    }

    /// Folds `next` into `self` when running both equals running the result.
    ///
    /// Zoom targets accumulate multiplicatively and pan targets additively, so
    /// two scale commands around the same focal point (or two pans) collapse
    /// into one.
    fn coalesce(&mut self, next: &Self) -> bool {
        match (self, next) {
            (
                Self::ScaleBy {
                    factor,
                    focal_point,
                },
                Self::ScaleBy {
                    factor: next_factor,
                    focal_point: next_focal,
                },
            ) if focal_point == next_focal => {
                *factor *= next_factor;
                true
            }
            (Self::PositionBy { delta }, Self::PositionBy { delta: next_delta }) => {
                *delta += *next_delta;
                true
            }
            _ => false,
        }
    }
}

/// Owns the transform value and routes animation commands to a delegate.
///
/// `D` is the delegate type, usually an animation engine. The store is
/// reachable through `Deref`/`DerefMut`, so setters such as
/// [`TransformStore::set_position`] can be called on the controller directly.
#[derive(Debug)]
pub struct TransformController<D> {
    store: TransformStore,
    pending: VecDeque<PendingCommand>,
    delegate: Option<D>,
}

impl<D> TransformController<D> {
    /// Creates an unattached controller holding `initial`.
    #[must_use]
    pub fn new(initial: TransformState) -> Self {
        Self {
            store: TransformStore::new(initial),
            pending: VecDeque::new(),
            delegate: None,
        }
    }

    /// The transform store.
    #[must_use]
    pub fn store(&self) -> &TransformStore {
        &self.store
    }

    /// Mutable access to the transform store.
    pub fn store_mut(&mut self) -> &mut TransformStore {
        &mut self.store
    }

    /// Returns `true` while a delegate is attached.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.delegate.is_some()
    }

    /// The attached delegate, if any.
    #[must_use]
    pub fn delegate(&self) -> Option<&D> {
        self.delegate.as_ref()
    }

    /// Commands waiting for a delegate, oldest first.
    pub fn pending(&self) -> impl ExactSizeIterator<Item = &PendingCommand> + '_ {
        self.pending.iter()
    }

    /// Runs `f` with the attached delegate and the store.
    ///
    /// Returns `None` when nothing is attached. Hosts use this to forward
    /// frame callbacks and direct calls to the delegate.
    pub fn with_delegate<R>(
        &mut self,
        f: impl FnOnce(&mut D, &mut TransformStore) -> R,
    ) -> Option<R> {
        let delegate = self.delegate.as_mut()?;
        Some(f(delegate, &mut self.store))
    }

    /// Unbinds and returns the delegate. Later commands queue again.
    pub fn detach(&mut self) -> Option<D> {
        self.delegate.take()
    }

    fn enqueue(&mut self, command: PendingCommand) {
        if self.pending.len() >= PENDING_CAPACITY {
            if let Some(last) = self.pending.back_mut() {
                if last.coalesce(&command) {
                    return;
                }
            }
            if !self.merge_neighbours() {
                log::warn!("pending command queue full; dropping oldest command");
                self.pending.pop_front();
            }
        }
        self.pending.push_back(command);
    }

    /// Folds the oldest pair of adjacent equivalent commands into one.
    fn merge_neighbours(&mut self) -> bool {
        for i in 1..self.pending.len() {
            let next = self.pending[i];
            if self.pending[i - 1].coalesce(&next) {
                self.pending.remove(i);
                return true;
            }
        }
        false
    }
}

impl<D: TransformDelegate> TransformController<D> {
    /// Zooms by `factor` around `focal_point`, or queues the request.
    pub fn animate_scale_by(&mut self, factor: f64, focal_point: Option<Point>) {
        self.dispatch(PendingCommand::ScaleBy {
            factor,
            focal_point,
        });
    }

    /// Pans by `delta`, or queues the request.
    pub fn animate_position_by(&mut self, delta: Vec2) {
        self.dispatch(PendingCommand::PositionBy { delta });
    }

    /// Binds `delegate`, replacing any previous one, and replays queued
    /// commands against it in FIFO order.
    pub fn attach(&mut self, delegate: D) {
        let delegate = self.delegate.insert(delegate);
        if !self.pending.is_empty() {
            log::debug!("replaying {} queued transform commands", self.pending.len());
        }
        while let Some(command) = self.pending.pop_front() {
            command.replay(delegate, &mut self.store);
        }
    }

    /// Stops the attached delegate, drops every queued command and restores
    /// the initial value.
    pub fn reset(&mut self) {
        self.pending.clear();
        if let Some(delegate) = self.delegate.as_mut() {
            delegate.stop();
        }
        self.store.restore_initial();
    }

    /// Disposes the delegate and the store. Must be called exactly once.
    pub fn dispose(&mut self) {
        if let Some(mut delegate) = self.delegate.take() {
            delegate.dispose();
        }
        self.pending.clear();
        self.store.dispose();
    }

    fn dispatch(&mut self, command: PendingCommand) {
        if self.store.is_disposed() {
            debug_assert!(false, "command issued to a disposed transform controller");
            log::error!("command issued to a disposed controller; ignoring");
            return;
        }
        match self.delegate.as_mut() {
            Some(delegate) => command.replay(delegate, &mut self.store),
            None => self.enqueue(command),
        }
    }
}

impl<D> Deref for TransformController<D> {
    type Target = TransformStore;

    fn deref(&self) -> &TransformStore {
        &self.store
    }
}

impl<D> DerefMut for TransformController<D> {
    fn deref_mut(&mut self) -> &mut TransformStore {
        &mut self.store
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    #[derive(Debug, Default)]
    struct Recorder {
        calls: Vec<PendingCommand>,
        stops: usize,
    }

    impl TransformDelegate for Recorder {
        fn animate_scale_by(
            &mut self,
            _store: &mut TransformStore,
            factor: f64,
            focal_point: Option<Point>,
        ) {
            self.calls.push(PendingCommand::ScaleBy {
                factor,
                focal_point,
            });
        }

        fn animate_position_by(&mut self, _store: &mut TransformStore, delta: Vec2) {
            self.calls.push(PendingCommand::PositionBy { delta });
        }

        fn stop(&mut self) {
            self.stops += 1;
        }
    }

    #[test]
    fn commands_queue_until_attach_then_replay_in_order() {
        let mut ctl = TransformController::<Recorder>::new(TransformState::default());
        ctl.animate_scale_by(1.05, None);
        ctl.animate_position_by(Vec2::new(1.0, 0.0));
        ctl.animate_scale_by(0.95, Some(Point::new(3.0, 4.0)));
        assert_eq!(ctl.pending().len(), 3);

        ctl.attach(Recorder::default());
        assert_eq!(ctl.pending().len(), 0);
        let calls = &ctl.delegate().unwrap().calls;
        assert_eq!(
            calls,
            &[
                PendingCommand::ScaleBy {
                    factor: 1.05,
                    focal_point: None,
                },
                PendingCommand::PositionBy {
                    delta: Vec2::new(1.0, 0.0),
                },
                PendingCommand::ScaleBy {
                    factor: 0.95,
                    focal_point: Some(Point::new(3.0, 4.0)),
                },
            ]
        );
    }

    #[test]
    fn attached_commands_execute_immediately() {
        let mut ctl = TransformController::new(TransformState::default());
        ctl.attach(Recorder::default());
        ctl.animate_position_by(Vec2::new(0.0, 2.0));
        assert_eq!(ctl.pending().len(), 0);
        assert_eq!(ctl.delegate().unwrap().calls.len(), 1);
    }

    #[test]
    fn detach_queues_again() {
        let mut ctl = TransformController::new(TransformState::default());
        ctl.attach(Recorder::default());
        let first = ctl.detach().unwrap();
        assert!(first.calls.is_empty());
        ctl.animate_position_by(Vec2::new(0.0, 2.0));
        assert_eq!(ctl.pending().len(), 1);
    }

    #[test]
    fn reset_discards_queue() {
        let mut ctl = TransformController::<Recorder>::new(TransformState::default());
        ctl.set_rotation(1.0);
        ctl.animate_scale_by(2.0, None);
        ctl.reset();
        assert_eq!(ctl.pending().len(), 0);
        assert_eq!(ctl.value().rotation, 0.0);
    }

    #[test]
    fn reset_stops_attached_delegate_first() {
        let mut ctl = TransformController::new(TransformState::default());
        ctl.attach(Recorder::default());
        ctl.set_position(Vec2::new(5.0, 0.0));
        ctl.reset();
        assert_eq!(ctl.delegate().map(|d| d.stops), Some(1));
        assert_eq!(ctl.value(), ctl.initial());
    }

    #[test]
    fn full_queue_coalesces_equivalent_tail() {
        let mut ctl = TransformController::<Recorder>::new(TransformState::default());
        for _ in 0..PENDING_CAPACITY {
            ctl.animate_scale_by(2.0, None);
        }
        ctl.animate_scale_by(3.0, None);
        assert_eq!(ctl.pending().len(), PENDING_CAPACITY);
        assert_eq!(
            ctl.pending().last(),
            Some(&PendingCommand::ScaleBy {
                factor: 6.0,
                focal_point: None,
            })
        );
    }

    #[test]
    fn full_queue_merges_oldest_equivalent_neighbours() {
        let mut ctl = TransformController::<Recorder>::new(TransformState::default());
        ctl.animate_position_by(Vec2::new(9.0, 9.0));
        ctl.animate_position_by(Vec2::new(1.0, 0.0));
        for i in 2..PENDING_CAPACITY {
            if i % 2 == 0 {
                ctl.animate_scale_by(2.0, None);
            } else {
                ctl.animate_position_by(Vec2::new(0.0, 1.0));
            }
        }
        ctl.animate_scale_by(5.0, Some(Point::new(1.0, 1.0)));

        assert_eq!(ctl.pending().len(), PENDING_CAPACITY);
        assert_eq!(
            ctl.pending().next(),
            Some(&PendingCommand::PositionBy {
                delta: Vec2::new(10.0, 9.0),
            })
        );
        assert_eq!(
            ctl.pending().last(),
            Some(&PendingCommand::ScaleBy {
                factor: 5.0,
                focal_point: Some(Point::new(1.0, 1.0)),
            })
        );
    }

    #[test]
    fn full_queue_drops_oldest_when_nothing_merges() {
        let mut ctl = TransformController::<Recorder>::new(TransformState::default());
        for i in 0..PENDING_CAPACITY {
            if i % 2 == 0 {
                ctl.animate_position_by(Vec2::new(1.0, 0.0));
            } else {
                ctl.animate_scale_by(2.0, None);
            }
        }
        ctl.animate_position_by(Vec2::new(0.0, 1.0));
        assert_eq!(ctl.pending().len(), PENDING_CAPACITY);
        assert!(matches!(
            ctl.pending().next(),
            Some(PendingCommand::ScaleBy { .. })
        ));
    }

    #[test]
    fn dispose_detaches_and_retires_store() {
        let mut ctl = TransformController::new(TransformState::default());
        ctl.attach(Recorder::default());
        ctl.dispose();
        assert!(ctl.is_disposed());
        assert!(!ctl.is_attached());
    }
}
