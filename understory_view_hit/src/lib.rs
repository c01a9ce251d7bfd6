// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_view_hit --heading-base-level=0

//! Understory View Hit: is this viewport point over the transformed subject?
//!
//! [`SubjectHitTester`] caches the pivot and the untransformed subject
//! rectangle for a given subject size, viewport size and [`Alignment`]. Each
//! query undoes the live transform (position, scale, rotation about the pivot)
//! and tests containment, cheap enough to run on every pointer move.
//! [`SubjectHitTester::forward_transform`] is the matching render transform.
//!
//! [`InteractionTracker`] turns pointer events plus hit tests into
//! `Idle`/`Hovering`/`Grabbing` transitions, each mapped to a cursor.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use understory_view_hit::{
//!     Alignment, InteractionState, InteractionTracker, SubjectHitTester, SubjectTransform,
//! };
//!
//! let tester = SubjectHitTester::new(
//!     Size::new(100.0, 100.0),
//!     Size::new(400.0, 300.0),
//!     Alignment::CENTER,
//! );
//! let transform = SubjectTransform::IDENTITY;
//! assert!(tester.is_over_subject(Point::new(160.0, 110.0), &transform));
//! assert!(!tester.is_over_subject(Point::new(10.0, 10.0), &transform));
//!
//! let mut tracker = InteractionTracker::new();
//! let point = Point::new(160.0, 110.0);
//! let change = tracker.pointer_move(|| tester.is_over_subject(point, &transform));
//! assert_eq!(change.map(|c| c.current), Some(InteractionState::Hovering));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod hit;
mod interaction;
mod layout;

pub use hit::{SubjectHitTester, SubjectTransform};
pub use interaction::{InteractionChange, InteractionState, InteractionTracker};
pub use layout::{Alignment, SubjectLayout};
