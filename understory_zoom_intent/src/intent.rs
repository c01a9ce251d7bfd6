// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Vec2};
use understory_transform_state::{TransformController, TransformDelegate};

/// A normalized user request to move the subject.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Intent {
    /// Multiply the scale by `factor`, keeping `focal_point` fixed.
    ZoomBy {
        /// Multiplicative scale factor, always positive and finite.
        factor: f64,
        /// Viewport point to zoom around.
        focal_point: Point,
    },
    /// Move the subject by `delta` viewport pixels.
    PanBy {
        /// Offset added to the position.
        delta: Vec2,
    },
}

impl Intent {
    /// Issues this intent through the controller command API.
    ///
    /// Without an attached delegate the command is queued.
    pub fn apply<D: TransformDelegate>(self, controller: &mut TransformController<D>) {
        match self {
            Self::ZoomBy {
                factor,
                focal_point,
            } => controller.animate_scale_by(factor, Some(focal_point)),
            Self::PanBy { delta } => controller.animate_position_by(delta),
        }
    }
}
