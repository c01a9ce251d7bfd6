// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Boundary calculator: scale limits derived from subject and viewport sizes.

use core::fmt;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Size};

use crate::SCALE_FLOOR;

/// One scale limit, either absolute or relative to the subject/viewport fit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScaleLimit {
    /// A fixed scale. `f64::INFINITY` is allowed for an unbounded maximum.
    Absolute(f64),
    /// A multiple of the scale at which the whole subject fits in the viewport.
    Contained(f64),
    /// A multiple of the scale at which the subject covers the whole viewport.
    Covered(f64),
}

impl ScaleLimit {
    /// Checks that the limit is a usable, non-negative number.
    ///
    /// # Errors
    ///
    /// Returns [`ScaleLimitError`] for NaN or negative values.
    pub fn validated(self) -> Result<Self, ScaleLimitError> {
        let value = match self {
            Self::Absolute(v) | Self::Contained(v) | Self::Covered(v) => v,
        };
        if value.is_nan() {
            Err(ScaleLimitError::NotANumber)
        } else if value < 0.0 {
            Err(ScaleLimitError::Negative(value))
        } else {
            Ok(self)
        }
    }

    /// Resolves the limit to a concrete scale for the given sizes.
    #[must_use]
    pub fn resolve(self, child: Size, outer: Size) -> f64 {
        match self {
            Self::Absolute(v) => v,
            Self::Contained(m) => m * contained_ratio(child, outer),
            Self::Covered(m) => m * covered_ratio(child, outer),
        }
    }
}

/// Error returned by [`ScaleLimit::validated`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScaleLimitError {
    /// The limit was NaN.
    NotANumber,
    /// The limit was negative.
    Negative(f64),
}

impl fmt::Display for ScaleLimitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotANumber => f.write_str("scale limit is NaN"),
            Self::Negative(v) => write!(f, "scale limit {v} is negative"),
        }
    }
}

impl core::error::Error for ScaleLimitError {}

/// The min/max/initial scale policy of a viewer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLimits {
    /// Smallest allowed scale.
    pub min: ScaleLimit,
    /// Largest allowed scale.
    pub max: ScaleLimit,
    /// Scale used while the transform has no explicit scale.
    pub initial: ScaleLimit,
}

impl Default for ScaleLimits {
    fn default() -> Self {
        Self {
            min: ScaleLimit::Absolute(0.0),
            max: ScaleLimit::Absolute(f64::INFINITY),
            initial: ScaleLimit::Contained(1.0),
        }
    }
}

impl ScaleLimits {
    /// Validates every limit.
    ///
    /// # Errors
    ///
    /// Returns the first [`ScaleLimitError`] found.
    pub fn validated(self) -> Result<Self, ScaleLimitError> {
        Ok(Self {
            min: self.min.validated()?,
            max: self.max.validated()?,
            initial: self.initial.validated()?,
        })
    }

    /// Resolves the policy for a subject of size `child` in a viewport of size `outer`.
    #[must_use]
    pub fn compute(&self, child: Size, outer: Size) -> ScaleBoundaries {
        ScaleBoundaries::new(
            self.min.resolve(child, outer),
            self.max.resolve(child, outer),
            self.initial.resolve(child, outer),
            child,
            outer,
        )
    }
}

/// Concrete scale limits and the sizes they were computed from.
///
/// `min_scale <= max_scale` always holds: an inverted range has its maximum
/// raised to the minimum. `initial_scale` lies within the range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleBoundaries {
    /// Smallest allowed scale.
    pub min_scale: f64,
    /// Largest allowed scale.
    pub max_scale: f64,
    /// Scale used while the transform has no explicit scale.
    pub initial_scale: f64,
    /// Untransformed subject size.
    pub child_size: Size,
    /// Viewport size.
    pub outer_size: Size,
}

impl ScaleBoundaries {
    /// Builds boundaries, normalizing an inverted range and the initial scale.
    #[must_use]
    pub fn new(
        min_scale: f64,
        max_scale: f64,
        initial_scale: f64,
        child_size: Size,
        outer_size: Size,
    ) -> Self {
        let max_scale = max_scale.max(min_scale);
        Self {
            min_scale,
            max_scale,
            initial_scale: initial_scale.max(min_scale).min(max_scale),
            child_size,
            outer_size,
        }
    }

    /// Centre of the viewport in viewport coordinates.
    #[must_use]
    pub fn outer_center(&self) -> Point {
        Point::new(self.outer_size.width / 2.0, self.outer_size.height / 2.0)
    }

    /// Size of the subject at `scale`.
    #[must_use]
    pub fn scaled_child_size(&self, scale: f64) -> Size {
        self.child_size * scale
    }

    /// The scale range with both ends floored to [`SCALE_FLOOR`].
    #[must_use]
    pub fn floored_range(&self) -> (f64, f64) {
        (
            self.min_scale.max(SCALE_FLOOR),
            self.max_scale.max(SCALE_FLOOR),
        )
    }

    /// Clamps `scale` into the floored range.
    #[must_use]
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        let (min, max) = self.floored_range();
        scale.max(min).min(max)
    }

    /// Scale at which the whole subject fits in the viewport.
    #[must_use]
    pub fn contained_scale(&self) -> f64 {
        contained_ratio(self.child_size, self.outer_size)
    }

    /// Scale at which the subject covers the whole viewport.
    #[must_use]
    pub fn covered_scale(&self) -> f64 {
        covered_ratio(self.child_size, self.outer_size)
    }

    /// The scale a [`ScaleState`] snaps to, if it has a fixed one.
    #[must_use]
    pub fn scale_for_state(&self, state: ScaleState) -> Option<f64> {
        let scale = match state {
            ScaleState::Initial => self.initial_scale,
            ScaleState::Covering => self.covered_scale(),
            ScaleState::OriginalSize => 1.0,
            ScaleState::ZoomedIn | ScaleState::ZoomedOut => return None,
        };
        Some(self.clamp_scale(scale))
    }
}

/// Supplies the current [`ScaleBoundaries`]. Re-queried whenever needed, so
/// implementations may track layout changes.
pub trait BoundaryProvider {
    /// The boundaries for the current layout.
    fn boundaries(&self) -> ScaleBoundaries;
}

impl BoundaryProvider for ScaleBoundaries {
    fn boundaries(&self) -> ScaleBoundaries {
        *self
    }
}

impl<F> BoundaryProvider for F
where
    F: Fn() -> ScaleBoundaries,
{
    fn boundaries(&self) -> ScaleBoundaries {
        self()
    }
}

/// Named scale positions used by double-tap style shortcuts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ScaleState {
    /// At the initial scale.
    #[default]
    Initial,
    /// Subject covers the viewport.
    Covering,
    /// Subject at its natural size (scale 1).
    OriginalSize,
    /// Larger than the initial scale.
    ZoomedIn,
    /// Smaller than the initial scale.
    ZoomedOut,
}

impl ScaleState {
    /// The default double-tap cycle:
    /// `Initial → Covering → OriginalSize → Initial`; zoomed states return to
    /// `Initial`.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Initial => Self::Covering,
            Self::Covering => Self::OriginalSize,
            Self::OriginalSize | Self::ZoomedIn | Self::ZoomedOut => Self::Initial,
        }
    }

    /// Classifies a live scale relative to the initial scale.
    #[must_use]
    pub fn classify(scale: f64, boundaries: &ScaleBoundaries) -> Self {
        let initial = boundaries.initial_scale;
        if (scale - initial).abs() < SCALE_FLOOR {
            Self::Initial
        } else if scale > initial {
            Self::ZoomedIn
        } else {
            Self::ZoomedOut
        }
    }
}

fn axis_ratios(child: Size, outer: Size) -> Option<(f64, f64)> {
    if child.width <= 0.0 || child.height <= 0.0 {
        return None;
    }
    Some((outer.width / child.width, outer.height / child.height))
}

fn contained_ratio(child: Size, outer: Size) -> f64 {
    axis_ratios(child, outer).map_or(1.0, |(x, y)| x.min(y))
}

fn covered_ratio(child: Size, outer: Size) -> f64 {
    axis_ratios(child, outer).map_or(1.0, |(x, y)| x.max(y))
}
