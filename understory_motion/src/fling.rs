// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The 0 → 1 driver shared by all discrete tweens.

use core::f64::consts::E;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// Stiffness of the fling spring (unit mass).
const STIFFNESS: f64 = 500.0;

/// Distance from 1.0 at which a fling counts as finished.
const TOLERANCE: f64 = 0.01;

/// A critically damped spring pulling a value from 0 to 1.
///
/// The spring starts at 0 with a fixed launch velocity and has no overshoot.
/// Position at time `t` (seconds) is `1 + (c1 + c2·t)·e^(−ω·t)` with
/// `ω = √stiffness`, `c1 = −1` and `c2 = v0 − ω`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlingDriver {
    omega: f64,
    velocity: f64,
}

impl FlingDriver {
    /// A driver launched with `velocity` (units of progress per second).
    #[must_use]
    pub fn new(velocity: f64) -> Self {
        Self {
            omega: STIFFNESS.sqrt(),
            velocity,
        }
    }

    /// Signed distance to 1.0 at time `t`.
    fn displacement(&self, t: f64) -> f64 {
        let c1 = -1.0;
        let c2 = self.velocity - self.omega;
        (c1 + c2 * t) * E.powf(-self.omega * t)
    }

    /// Progress at `t` seconds, clamped to `[0, 1]`; exactly 1 once done.
    #[must_use]
    pub fn value(&self, t: f64) -> f64 {
        if self.is_done(t) {
            return 1.0;
        }
        (1.0 + self.displacement(t.max(0.0))).clamp(0.0, 1.0)
    }

    /// Returns `true` once the spring is within tolerance of 1.0.
    #[must_use]
    pub fn is_done(&self, t: f64) -> bool {
        t > 0.0 && self.displacement(t).abs() < TOLERANCE
    }
}
