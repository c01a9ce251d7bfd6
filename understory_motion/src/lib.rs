// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_motion --heading-base-level=0

//! Understory Motion: frame-driven animation of a subject transform.
//!
//! [`AnimationEngine`] owns every time-driven write to a
//! [`TransformStore`](understory_transform_state::TransformStore):
//! - discrete tweens between two transforms, advanced by a critically damped
//!   fling spring ([`FlingDriver`]);
//! - continuous zoom and pan that decay exponentially toward an accumulated
//!   target, so bursts of wheel ticks merge into one smooth motion;
//! - rebound into the scale and position limits after a direct gesture
//!   ([`GestureTracker`]).
//!
//! The engine never owns a timer. It registers with a [`FrameClock`] and the
//! host forwards each rendered frame to [`AnimationEngine::on_frame`].
//! [`ManualClock`] is a clock for hosts that drive frames themselves.
//!
//! ## Minimal example
//!
//! ```rust
//! use core::time::Duration;
//! use kurbo::{Point, Size, Vec2};
//! use understory_motion::{AnimationEngine, AnimationEvent, ManualClock};
//! use understory_transform_state::{ScaleBoundaries, TransformController, TransformState};
//!
//! let (subject, viewport) = (Size::new(100.0, 100.0), Size::new(400.0, 300.0));
//! let bounds = ScaleBoundaries::new(1.0, 5.0, 1.0, subject, viewport);
//! let mut controller: TransformController<AnimationEngine<ManualClock, ScaleBoundaries>> =
//!     TransformController::new(TransformState::new(Vec2::ZERO, 1.0));
//!
//! // Commands issued before the engine exists are queued, then replayed.
//! controller.animate_scale_by(2.0, Some(Point::new(200.0, 150.0)));
//! controller.attach(AnimationEngine::new(ManualClock::new(), bounds));
//!
//! let mut now = Duration::ZERO;
//! let mut settled = false;
//! while !settled {
//!     now += Duration::from_millis(16);
//!     settled = controller.with_delegate(|engine, store| {
//!         let handle = engine.clock().current().unwrap();
//!         engine.on_frame(store, handle, now) == Some(AnimationEvent::ZoomSettled)
//!     }).unwrap();
//! }
//! assert_eq!(controller.value().scale, Some(2.0));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod clamp;
mod clock;
mod decay;
mod engine;
mod fling;
mod gesture;
mod tween;

pub use clamp::{clamp_position, position_bounds};
pub use clock::{FrameClock, FrameHandle, ManualClock};
pub use decay::{decay_step, decay_step_vec};
pub use engine::{AnimationEngine, AnimationEvent, MotionConfig};
pub use fling::FlingDriver;
pub use gesture::{GestureSample, GestureTracker};
pub use tween::{TransformTween, Track};
