// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Discrete start → end tweens of the transform.

use kurbo::Vec2;

/// A start → end pair for one animated field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Track<T> {
    /// Value at progress 0.
    pub from: T,
    /// Value at progress 1.
    pub to: T,
}

impl<T> Track<T> {
    /// Creates a track.
    pub fn new(from: T, to: T) -> Self {
        Self { from, to }
    }
}

impl Track<f64> {
    /// Linear interpolation at progress `t`.
    #[must_use]
    pub fn at(&self, t: f64) -> f64 {
        self.from + (self.to - self.from) * t
    }
}

impl Track<Vec2> {
    /// Linear interpolation at progress `t`.
    #[must_use]
    pub fn at(&self, t: f64) -> Vec2 {
        self.from.lerp(self.to, t)
    }
}

/// Which transform fields a discrete tween animates.
///
/// Fields left as `None` are not touched for the duration of the tween.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct TransformTween {
    /// Scale track, written through the invisible path.
    pub scale: Option<Track<f64>>,
    /// Position track.
    pub position: Option<Track<Vec2>>,
    /// Rotation track, in radians.
    pub rotation: Option<Track<f64>>,
}

impl TransformTween {
    /// An empty tween.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a scale track.
    #[must_use]
    pub fn scale(mut self, from: f64, to: f64) -> Self {
        self.scale = Some(Track::new(from, to));
        self
    }

    /// Adds a position track.
    #[must_use]
    pub fn position(mut self, from: Vec2, to: Vec2) -> Self {
        self.position = Some(Track::new(from, to));
        self
    }

    /// Adds a rotation track.
    #[must_use]
    pub fn rotation(mut self, from: f64, to: f64) -> Self {
        self.rotation = Some(Track::new(from, to));
        self
    }

    /// Returns `true` when no track is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scale.is_none() && self.position.is_none() && self.rotation.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_interpolate_linearly() {
        let t = Track::<f64>::new(1.0, 3.0);
        assert_eq!(t.at(0.0), 1.0);
        assert_eq!(t.at(0.5), 2.0);
        assert_eq!(t.at(1.0), 3.0);

        let p = Track::new(Vec2::ZERO, Vec2::new(10.0, -4.0));
        assert_eq!(p.at(0.5), Vec2::new(5.0, -2.0));
    }

    #[test]
    fn builder_sets_only_requested_tracks() {
        let tween = TransformTween::new().scale(1.0, 2.0);
        assert!(tween.position.is_none());
        assert!(tween.rotation.is_none());
        assert!(!tween.is_empty());
        assert!(TransformTween::new().is_empty());
    }
}
