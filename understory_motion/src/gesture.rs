// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Direct-manipulation scale gestures.

use kurbo::{Point, Vec2};
use understory_transform_state::{BoundaryProvider, TransformStore, TransformUpdate, floor_scale};

use crate::clamp::clamp_position;
use crate::decay::anchored_position;
use crate::engine::current_scale;
use crate::{AnimationEngine, FrameClock};

/// One sample of an in-progress pinch, relative to the gesture start.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureSample {
    /// Cumulative scale since the gesture began.
    pub scale: f64,
    /// Cumulative rotation since the gesture began, in radians.
    pub rotation: f64,
    /// Current focal point in viewport coordinates.
    pub focal_point: Point,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct GestureStart {
    scale: f64,
    rotation: f64,
    ref_vector: Vec2,
}

/// Tracks a pinch gesture and writes the transform directly.
///
/// Begin stops every animation. Each update keeps the subject point that was
/// under the initial focal point under the current focal point. End rebounds
/// into limits.
#[derive(Clone, Copy, Debug, Default)]
pub struct GestureTracker {
    start: Option<GestureStart>,
    rotation_enabled: bool,
}

impl GestureTracker {
    /// A tracker that ignores gesture rotation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A tracker that also applies gesture rotation.
    #[must_use]
    pub fn with_rotation() -> Self {
        Self {
            start: None,
            rotation_enabled: true,
        }
    }

    /// Returns `true` between [`GestureTracker::begin`] and [`GestureTracker::end`].
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.start.is_some()
    }

    /// Starts a gesture at `focal_point`.
    pub fn begin<C: FrameClock, B: BoundaryProvider>(
        &mut self,
        engine: &mut AnimationEngine<C, B>,
        store: &TransformStore,
        focal_point: Point,
    ) {
        engine.stop();
        let b = engine.boundaries();
        let value = store.value();
        self.start = Some(GestureStart {
            scale: current_scale(store, &b),
            rotation: value.rotation,
            ref_vector: focal_point - (b.outer_center() + value.position),
        });
    }

    /// Applies a gesture sample. Ignored when no gesture is active.
    pub fn update<C: FrameClock, B: BoundaryProvider>(
        &mut self,
        engine: &AnimationEngine<C, B>,
        store: &mut TransformStore,
        sample: GestureSample,
    ) {
        let Some(start) = self.start else {
            return;
        };
        let Some(scale) = floor_scale(start.scale * sample.scale) else {
            log::warn!("ignoring gesture sample with scale {}", sample.scale);
            return;
        };
        let b = engine.boundaries();
        let anchored = anchored_position(
            sample.focal_point,
            start.ref_vector,
            scale / start.scale,
            b.outer_center(),
        );
        let mut update = TransformUpdate::new()
            .with_scale(scale)
            .with_position(clamp_position(anchored, scale, &b));
        if self.rotation_enabled {
            update = update.with_rotation(start.rotation + sample.rotation);
        }
        store.update_multiple(update);
    }

    /// Finishes the gesture and rebounds into limits.
    ///
    /// Returns `true` when a rebound tween started.
    pub fn end<C: FrameClock, B: BoundaryProvider>(
        &mut self,
        engine: &mut AnimationEngine<C, B>,
        store: &TransformStore,
    ) -> bool {
        self.start.take().is_some() && engine.animate_rebound(store)
    }
}
