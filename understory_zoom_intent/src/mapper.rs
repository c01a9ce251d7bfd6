// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Vec2};
use ui_events::ScrollDelta;
use ui_events::keyboard::Modifiers;
use ui_events::pointer::{
    PointerEvent, PointerGesture, PointerGestureEvent, PointerScrollEvent, PointerType,
};
use understory_transform_state::{TransformController, TransformDelegate};

use crate::Intent;

/// Tunables of the [`IntentMapper`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntentConfig {
    /// Holding any of these turns wheel ticks into zoom.
    pub zoom_modifiers: Modifiers,
    /// Holding any of these turns purely vertical wheel ticks into horizontal pans.
    pub horizontal_modifiers: Modifiers,
    /// Zoom factor for a wheel tick with positive `y` delta.
    pub wheel_zoom_out: f64,
    /// Zoom factor for any other wheel tick.
    pub wheel_zoom_in: f64,
    /// Fraction of a platform scale signal's deviation from 1 that is applied.
    pub scale_damping: f64,
    /// Pixels per line for [`ScrollDelta::LineDelta`].
    pub line_size: Vec2,
    /// Pixels per page for [`ScrollDelta::PageDelta`].
    pub page_size: Vec2,
}

impl Default for IntentConfig {
    fn default() -> Self {
        Self {
            zoom_modifiers: Modifiers::CONTROL | Modifiers::META,
            horizontal_modifiers: Modifiers::SHIFT,
            wheel_zoom_out: 0.95,
            wheel_zoom_in: 1.05,
            scale_damping: 0.5,
            line_size: Vec2::new(20.0, 20.0),
            page_size: Vec2::new(800.0, 600.0),
        }
    }
}

/// Turns pointer events into [`Intent`]s.
///
/// Only the mouse pointer class is interpreted: ui-events reports trackpads as
/// [`PointerType::Mouse`], while touch and pen input belong to gesture
/// recognition and are ignored here.
#[derive(Clone, Copy, Debug, Default)]
pub struct IntentMapper {
    config: IntentConfig,
}

impl IntentMapper {
    /// A mapper with the default [`IntentConfig`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A mapper with `config`.
    #[must_use]
    pub fn with_config(config: IntentConfig) -> Self {
        Self { config }
    }

    /// The mapper tunables.
    #[must_use]
    pub fn config(&self) -> &IntentConfig {
        &self.config
    }

    /// Maps one pointer event, or returns `None` when it carries no intent.
    #[must_use]
    pub fn map(&self, event: &PointerEvent) -> Option<Intent> {
        match event {
            PointerEvent::Scroll(scroll) => self.map_scroll(scroll),
            PointerEvent::Gesture(gesture) => self.map_gesture(gesture),
            _ => None,
        }
    }

    /// Maps a trackpad pan-zoom update carrying a cumulative `scale`.
    ///
    /// Updates with a scale of exactly 1 (pure pans) carry no zoom intent.
    #[must_use]
    pub fn map_pan_zoom(&self, scale: f64, position: Point) -> Option<Intent> {
        if scale == 1.0 {
            return None;
        }
        zoom_by(scale, position)
    }

    /// Maps `event` and issues the result through `controller`.
    ///
    /// Returns `true` when the event produced an intent.
    pub fn dispatch<D: TransformDelegate>(
        &self,
        event: &PointerEvent,
        controller: &mut TransformController<D>,
    ) -> bool {
        let Some(intent) = self.map(event) else {
            return false;
        };
        intent.apply(controller);
        true
    }

    fn map_scroll(&self, event: &PointerScrollEvent) -> Option<Intent> {
        if !is_pointer_class(event.pointer.pointer_type) {
            return None;
        }
        let delta = self.resolve_scroll_delta(event);
        if delta.x == 0.0 && delta.y == 0.0 {
            return None;
        }
        let modifiers = event.state.modifiers;
        let position = event.state.logical_point();

        if modifiers.intersects(self.config.zoom_modifiers) {
            let factor = if delta.y > 0.0 {
                self.config.wheel_zoom_out
            } else {
                self.config.wheel_zoom_in
            };
            return zoom_by(factor, position);
        }

        let delta = if modifiers.intersects(self.config.horizontal_modifiers) && delta.x == 0.0 {
            Vec2::new(delta.y, 0.0)
        } else {
            delta
        };
        Some(Intent::PanBy { delta: -delta })
    }

    fn map_gesture(&self, event: &PointerGestureEvent) -> Option<Intent> {
        if !is_pointer_class(event.pointer.pointer_type) {
            return None;
        }
        let PointerGesture::Pinch(delta) = &event.gesture else {
            return None;
        };
        if *delta == 0.0 {
            return None;
        }
        let scale = 1.0 + f64::from(*delta);
        let factor = (scale - 1.0) * self.config.scale_damping + 1.0;
        zoom_by(factor, event.state.logical_point())
    }

    fn resolve_scroll_delta(&self, event: &PointerScrollEvent) -> Vec2 {
        match &event.delta {
            ScrollDelta::PixelDelta(pos) => {
                let logical = pos.to_logical::<f64>(event.state.scale_factor);
                Vec2::new(logical.x, logical.y)
            }
            ScrollDelta::LineDelta(x, y) => Vec2::new(
                f64::from(*x) * self.config.line_size.x,
                f64::from(*y) * self.config.line_size.y,
            ),
            ScrollDelta::PageDelta(x, y) => Vec2::new(
                f64::from(*x) * self.config.page_size.x,
                f64::from(*y) * self.config.page_size.y,
            ),
        }
    }
}

fn is_pointer_class(pointer_type: PointerType) -> bool {
    matches!(pointer_type, PointerType::Mouse)
}

fn zoom_by(factor: f64, focal_point: Point) -> Option<Intent> {
    if !factor.is_finite() || factor <= 0.0 {
        log::warn!("dropping zoom intent with factor {factor}");
        return None;
    }
    Some(Intent::ZoomBy {
        factor,
        focal_point,
    })
}
