// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Vec2};

/// Smallest scale any mutator will commit.
///
/// Scales are floored to this value before they are stored or divided by, so
/// a transform can never collapse to a degenerate zero scale.
pub const SCALE_FLOOR: f64 = 1e-4;

/// Floors `scale` to [`SCALE_FLOOR`].
///
/// Returns `None` for NaN or infinite input; callers treat that as a rejected
/// write.
#[must_use]
pub fn floor_scale(scale: f64) -> Option<f64> {
    if scale.is_finite() {
        Some(scale.max(SCALE_FLOOR))
    } else {
        None
    }
}

/// How the subject is currently displayed inside the viewport.
///
/// `position` is the offset of the subject from its resting (aligned) place in
/// the viewport. `scale` is `None` until something sets it; readers then use
/// the boundary-computed initial scale (see
/// [`ScaleBoundaries::initial_scale`](crate::ScaleBoundaries::initial_scale)).
///
/// Equality is structural. The store only broadcasts a write when the new
/// value differs from the current one by this equality.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct TransformState {
    /// Offset of the subject from its aligned resting place, in viewport units.
    pub position: Vec2,
    /// Uniform scale, or `None` for "use the initial scale".
    pub scale: Option<f64>,
    /// Rotation in radians.
    pub rotation: f64,
    /// Optional point the rotation is performed around.
    pub rotation_focus_point: Option<Point>,
}

impl TransformState {
    /// A state at `position` with an explicit `scale` and no rotation.
    #[must_use]
    pub fn new(position: Vec2, scale: f64) -> Self {
        Self {
            position,
            scale: floor_scale(scale),
            ..Self::default()
        }
    }

    /// Returns the scale, falling back to `initial` when it is unset.
    #[must_use]
    pub fn scale_or(&self, initial: f64) -> f64 {
        self.scale.unwrap_or(initial)
    }

    /// Applies `update` on top of this value; omitted fields are kept.
    #[must_use]
    pub fn updated(mut self, update: &TransformUpdate) -> Self {
        if let Some(position) = update.position {
            self.position = position;
        }
        if let Some(scale) = update.scale.and_then(floor_scale) {
            self.scale = Some(scale);
        }
        if let Some(rotation) = update.rotation {
            self.rotation = rotation;
        }
        if let Some(focus) = update.rotation_focus_point {
            self.rotation_focus_point = Some(focus);
        }
        self
    }
}

/// A partial write applied atomically by
/// [`TransformStore::update_multiple`](crate::TransformStore::update_multiple).
///
/// Fields left as `None` retain their current value.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct TransformUpdate {
    /// New position, if any.
    pub position: Option<Vec2>,
    /// New scale, if any. Floored to [`SCALE_FLOOR`]; non-finite values are ignored.
    pub scale: Option<f64>,
    /// New rotation in radians, if any.
    pub rotation: Option<f64>,
    /// New rotation focus point, if any.
    pub rotation_focus_point: Option<Point>,
}

impl TransformUpdate {
    /// An empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the position.
    #[must_use]
    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = Some(position);
        self
    }

    /// Sets the scale.
    #[must_use]
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Sets the rotation.
    #[must_use]
    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = Some(rotation);
        self
    }

    /// Sets the rotation focus point.
    #[must_use]
    pub fn with_rotation_focus_point(mut self, point: Point) -> Self {
        self.rotation_focus_point = Some(point);
        self
    }

    /// Returns `true` if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
