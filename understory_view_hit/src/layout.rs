// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Alignment and the cached, layout-derived geometry of the subject.

use kurbo::{Point, Rect, Size};

/// A point within a rectangle in normalized coordinates.
///
/// `(-1, -1)` is the top-left corner, `(0, 0)` the center and `(1, 1)` the
/// bottom-right corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Alignment {
    /// Horizontal component in `[-1, 1]`.
    pub x: f64,
    /// Vertical component in `[-1, 1]`.
    pub y: f64,
}

impl Alignment {
    /// The top-left corner.
    pub const TOP_LEFT: Self = Self::new(-1.0, -1.0);
    /// The center.
    pub const CENTER: Self = Self::new(0.0, 0.0);
    /// The bottom-right corner.
    pub const BOTTOM_RIGHT: Self = Self::new(1.0, 1.0);

    /// Creates an alignment.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The aligned point of a rectangle of `size` at the origin.
    #[must_use]
    pub fn resolve(self, size: Size) -> Point {
        Point::new(
            size.width / 2.0 * (1.0 + self.x),
            size.height / 2.0 * (1.0 + self.y),
        )
    }

    /// Places `child` inside `outer`: centered, then offset by the alignment
    /// times half the free space on each axis.
    #[must_use]
    pub fn inscribe(self, child: Size, outer: Size) -> Rect {
        let free_x = (outer.width - child.width) / 2.0;
        let free_y = (outer.height - child.height) / 2.0;
        let origin = Point::new(free_x + self.x * free_x, free_y + self.y * free_y);
        Rect::from_origin_size(origin, child)
    }
}

impl Default for Alignment {
    fn default() -> Self {
        Self::CENTER
    }
}

/// Geometry derived from the subject size, viewport size and alignment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SubjectLayout {
    /// Point the subject scales and rotates about, in viewport coordinates.
    pub pivot: Point,
    /// The untransformed subject rectangle in viewport coordinates.
    pub base_rect: Rect,
}

impl SubjectLayout {
    /// Computes the layout for the given sizes.
    #[must_use]
    pub fn compute(subject: Size, viewport: Size, alignment: Alignment) -> Self {
        Self {
            pivot: alignment.resolve(viewport),
            base_rect: alignment.inscribe(subject, viewport),
        }
    }
}
