// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Exponential decay toward a target and the zoom/pan session state.

use core::f64::consts::E;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Vec2};

/// One frame of exponential approach from `current` toward `target`.
///
/// Returns `current + (target − current)·(1 − e^(−rate·dt))`. For any
/// positive `dt` the result lies strictly between `current` and `target`
/// (or equals `target`), so repeated steps converge without overshoot.
#[must_use]
pub fn decay_step(current: f64, target: f64, rate: f64, dt: f64) -> f64 {
    current + (target - current) * decay_fraction(rate, dt)
}

/// Component-wise [`decay_step`] for vectors.
#[must_use]
pub fn decay_step_vec(current: Vec2, target: Vec2, rate: f64, dt: f64) -> Vec2 {
    current + (target - current) * decay_fraction(rate, dt)
}

fn decay_fraction(rate: f64, dt: f64) -> f64 {
    1.0 - E.powf(-rate * dt.max(0.0))
}

/// Working state of a zoom-decay sequence.
///
/// Captured when the sequence (re)anchors: the scale at that moment and the
/// vector from the subject origin (viewport centre plus position) to the focal
/// point. Scaling that vector by `scale / ref_scale` keeps the focal point
/// visually fixed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ZoomSession {
    pub(crate) ref_scale: f64,
    pub(crate) ref_vector: Vec2,
    pub(crate) focal_point: Point,
    pub(crate) target: f64,
}

impl ZoomSession {
    pub(crate) fn anchor(
        focal_point: Point,
        center: Point,
        position: Vec2,
        scale: f64,
        target: f64,
    ) -> Self {
        Self {
            ref_scale: scale,
            ref_vector: focal_point - (center + position),
            focal_point,
            target,
        }
    }

    /// Position keeping the anchored focal point fixed at `scale`.
    pub(crate) fn position_at(&self, scale: f64, center: Point) -> Vec2 {
        anchored_position(
            self.focal_point,
            self.ref_vector,
            scale / self.ref_scale,
            center,
        )
    }
}

/// `focal − ref_vector·ratio − centre`, as a position offset.
pub(crate) fn anchored_position(
    focal_point: Point,
    ref_vector: Vec2,
    ratio: f64,
    center: Point,
) -> Vec2 {
    focal_point.to_vec2() - ref_vector * ratio - center.to_vec2()
}

/// Working state of a pan-decay sequence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct PanSession {
    pub(crate) target: Vec2,
}
