// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_transform_state --heading-base-level=0

//! Understory Transform State: the transform value of a pan/zoom/rotate viewer.
//!
//! This crate holds the leaf pieces of an interactive subject viewer: a single
//! visual subject (an image, a document page, arbitrary content) shown inside a
//! fixed viewport and moved around by the user. It provides:
//! - [`TransformState`]: the `(position, scale, rotation, rotation focus)`
//!   value describing how the subject is currently displayed.
//! - [`TransformStore`]: the current and previous value plus two change
//!   channels, one for every write and one for gesture-relevant writes only.
//! - [`TransformController`]: the store plus a queue of animation commands
//!   that are replayed once an animation delegate attaches.
//! - [`ScaleLimits`] / [`ScaleBoundaries`]: the boundary calculator turning
//!   subject and viewport sizes into concrete scale limits.
//!
//! It does **not** animate anything or interpret input. Animation lives in
//! `understory_motion`, input normalization in `understory_zoom_intent` and
//! hit testing in `understory_view_hit`.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Vec2;
//! use understory_transform_state::{ChangeChannel, TransformController, TransformState};
//!
//! let mut controller = TransformController::<()>::new(TransformState::default());
//! let mut watcher = controller.watch(ChangeChannel::Output);
//!
//! // A fresh watcher observes the current value right away.
//! assert!(watcher.poll(&controller).is_some());
//!
//! controller.set_position(Vec2::new(10.0, 0.0));
//! let seen = watcher.poll(&controller).unwrap();
//! assert_eq!(seen.position, Vec2::new(10.0, 0.0));
//! assert_eq!(controller.prev_value().position, Vec2::ZERO);
//!
//! // Writing the same value again does not notify.
//! controller.set_position(Vec2::new(10.0, 0.0));
//! assert!(watcher.poll(&controller).is_none());
//! ```
//!
//! ## Boundaries
//!
//! ```rust
//! use kurbo::Size;
//! use understory_transform_state::{ScaleLimit, ScaleLimits};
//!
//! let limits = ScaleLimits {
//!     min: ScaleLimit::Contained(1.0),
//!     max: ScaleLimit::Covered(4.0),
//!     initial: ScaleLimit::Contained(1.0),
//! };
//! let bounds = limits.compute(Size::new(800.0, 400.0), Size::new(400.0, 300.0));
//! assert_eq!(bounds.min_scale, 0.5);
//! assert_eq!(bounds.initial_scale, 0.5);
//! assert_eq!(bounds.max_scale, 3.0);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod boundaries;
mod controller;
mod state;
mod store;
mod watch;

pub use boundaries::{
    BoundaryProvider, ScaleBoundaries, ScaleLimit, ScaleLimitError, ScaleLimits, ScaleState,
};
pub use controller::{PENDING_CAPACITY, PendingCommand, TransformController, TransformDelegate};
pub use state::{SCALE_FLOOR, TransformState, TransformUpdate, floor_scale};
pub use store::TransformStore;
pub use watch::{ChangeChannel, TransformWatcher};
