// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame clock seam.
//!
//! The engine never owns an event loop. It registers interest in frames via a
//! [`FrameClock`] and the host calls
//! [`AnimationEngine::on_frame`](crate::AnimationEngine::on_frame) once per
//! rendered frame for every live registration, passing a monotonic elapsed
//! timestamp.

use alloc::vec::Vec;

/// Opaque handle of one frame callback registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(u64);

impl FrameHandle {
    /// Wraps a raw handle value chosen by a [`FrameClock`] implementation.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw handle value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Registers and cancels per-frame callbacks.
///
/// A registration stays live until cancelled. Handles must not be reused
/// while live.
pub trait FrameClock {
    /// Starts delivering frames for a new registration.
    fn register(&mut self) -> FrameHandle;

    /// Stops delivering frames for `handle`. Cancelling a dead handle is a no-op.
    fn cancel(&mut self, handle: FrameHandle);
}

/// A [`FrameClock`] that records registrations for a host-driven frame loop.
///
/// Hosts (and tests) iterate [`ManualClock::live`] each frame and forward each
/// handle to the engine.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    next: u64,
    live: Vec<FrameHandle>,
}

impl ManualClock {
    /// Creates a clock with no registrations.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Live registrations, oldest first.
    #[must_use]
    pub fn live(&self) -> &[FrameHandle] {
        &self.live
    }

    /// The most recent live registration, if any.
    #[must_use]
    pub fn current(&self) -> Option<FrameHandle> {
        self.live.last().copied()
    }

    /// Returns `true` if `handle` is still registered.
    #[must_use]
    pub fn is_live(&self, handle: FrameHandle) -> bool {
        self.live.contains(&handle)
    }
}

impl FrameClock for ManualClock {
    fn register(&mut self) -> FrameHandle {
        self.next += 1;
        let handle = FrameHandle(self.next);
        self.live.push(handle);
        handle
    }

    fn cancel(&mut self, handle: FrameHandle) {
        self.live.retain(|h| *h != handle);
    }
}
