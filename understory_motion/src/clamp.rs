// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Position clamping against the viewport.

use kurbo::{Rect, Vec2};
use understory_transform_state::ScaleBoundaries;

/// The rectangle of allowed position offsets at `scale`.
///
/// Per axis: if the scaled subject fits inside the viewport the only allowed
/// offset is 0 (the subject stays centred); otherwise the offset may range over
/// `±(scaled − viewport) / 2`, which keeps the viewport fully covered.
#[must_use]
pub fn position_bounds(scale: f64, boundaries: &ScaleBoundaries) -> Rect {
    let scaled = boundaries.scaled_child_size(scale);
    let outer = boundaries.outer_size;
    let half_x = ((scaled.width - outer.width) / 2.0).max(0.0);
    let half_y = ((scaled.height - outer.height) / 2.0).max(0.0);
    Rect::new(-half_x, -half_y, half_x, half_y)
}

/// Clamps `position` into [`position_bounds`].
#[must_use]
pub fn clamp_position(position: Vec2, scale: f64, boundaries: &ScaleBoundaries) -> Vec2 {
    let bounds = position_bounds(scale, boundaries);
    Vec2::new(
        position.x.max(bounds.x0).min(bounds.x1),
        position.y.max(bounds.y0).min(bounds.y1),
    )
}
