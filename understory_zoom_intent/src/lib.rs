// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_zoom_intent --heading-base-level=0

//! Understory Zoom Intent: wheel, trackpad and pinch input as zoom/pan commands.
//!
//! [`IntentMapper`] reads [`ui_events::pointer::PointerEvent`]s and produces a
//! small vocabulary of [`Intent`]s:
//! - a wheel tick with the zoom modifier (Control or Meta) zooms by a fixed
//!   step around the pointer;
//! - a plain wheel tick pans by the negated scroll delta, with Shift turning a
//!   vertical tick into a horizontal pan;
//! - a pinch gesture zooms by a damped factor around the pointer;
//! - a trackpad pan-zoom update ([`IntentMapper::map_pan_zoom`]) zooms by its
//!   scale.
//!
//! [`Intent::apply`] forwards an intent to a
//! [`TransformController`](understory_transform_state::TransformController),
//! which queues it until an animation engine is attached.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use understory_zoom_intent::{Intent, IntentMapper};
//!
//! let mapper = IntentMapper::new();
//! let intent = mapper.map_pan_zoom(1.25, Point::new(40.0, 30.0));
//! assert_eq!(
//!     intent,
//!     Some(Intent::ZoomBy { factor: 1.25, focal_point: Point::new(40.0, 30.0) })
//! );
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod intent;
mod mapper;

pub use intent::Intent;
pub use mapper::{IntentConfig, IntentMapper};
