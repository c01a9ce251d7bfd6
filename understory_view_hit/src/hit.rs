// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inverse-transform hit testing against the transformed subject.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Affine, Point, Rect, Size, Vec2};
use understory_transform_state::{SCALE_FLOOR, TransformState};

use crate::{Alignment, SubjectLayout};

/// A fully resolved transform: every field concrete.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SubjectTransform {
    /// Offset of the pivot in viewport pixels.
    pub position: Vec2,
    /// Uniform scale.
    pub scale: f64,
    /// Rotation in radians.
    pub rotation: f64,
}

impl SubjectTransform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        position: Vec2::ZERO,
        scale: 1.0,
        rotation: 0.0,
    };

    /// Resolves `state`, substituting `initial_scale` for an unset scale.
    #[must_use]
    pub fn resolve(state: &TransformState, initial_scale: f64) -> Self {
        Self {
            position: state.position,
            scale: state.scale_or(initial_scale),
            rotation: state.rotation,
        }
    }
}

impl Default for SubjectTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Answers whether a viewport point lies over the transformed subject.
///
/// The pivot and the untransformed subject rectangle are cached and only
/// recomputed by [`SubjectHitTester::recalculate_layout`] when one of its
/// inputs changed. Each query maps the point back into untransformed subject
/// space, the exact inverse of [`SubjectHitTester::forward_transform`], and
/// tests containment there.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SubjectHitTester {
    subject: Size,
    viewport: Size,
    alignment: Alignment,
    layout: SubjectLayout,
}

impl SubjectHitTester {
    /// Creates a tester for the given layout inputs.
    #[must_use]
    pub fn new(subject: Size, viewport: Size, alignment: Alignment) -> Self {
        Self {
            subject,
            viewport,
            alignment,
            layout: SubjectLayout::compute(subject, viewport, alignment),
        }
    }

    /// Refreshes the cached layout. Returns `true` when an input changed.
    pub fn recalculate_layout(
        &mut self,
        subject: Size,
        viewport: Size,
        alignment: Alignment,
    ) -> bool {
        if subject == self.subject && viewport == self.viewport && alignment == self.alignment {
            return false;
        }
        *self = Self::new(subject, viewport, alignment);
        true
    }

    /// The cached layout.
    #[must_use]
    pub fn layout(&self) -> &SubjectLayout {
        &self.layout
    }

    /// The cached pivot.
    #[must_use]
    pub fn pivot(&self) -> Point {
        self.layout.pivot
    }

    /// The cached untransformed subject rectangle.
    #[must_use]
    pub fn base_rect(&self) -> Rect {
        self.layout.base_rect
    }

    /// Maps a viewport point into untransformed subject space.
    #[must_use]
    pub fn to_subject(&self, point: Point, transform: &SubjectTransform) -> Point {
        let pivot = self.layout.pivot;
        let scale = transform.scale.max(SCALE_FLOOR);
        let mut local = (point - pivot - transform.position) / scale;
        if transform.rotation != 0.0 {
            let (sin, cos) = (transform.rotation.sin(), transform.rotation.cos());
            local = Vec2::new(local.x * cos + local.y * sin, local.y * cos - local.x * sin);
        }
        pivot + local
    }

    /// Returns `true` when `point` lies over the subject under `transform`.
    #[must_use]
    pub fn is_over_subject(&self, point: Point, transform: &SubjectTransform) -> bool {
        self.layout
            .base_rect
            .contains(self.to_subject(point, transform))
    }

    /// The render transform, from untransformed subject space to the viewport.
    ///
    /// Translates to the pivot plus position, scales, rotates, then undoes the
    /// pivot: `translate(pivot + position) · scale · rotate · translate(−pivot)`.
    #[must_use]
    pub fn forward_transform(&self, transform: &SubjectTransform) -> Affine {
        let pivot = self.layout.pivot.to_vec2();
        Affine::translate(pivot + transform.position)
            * Affine::scale(transform.scale.max(SCALE_FLOOR))
            * Affine::rotate(transform.rotation)
            * Affine::translate(-pivot)
    }
}
