// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Vec2};
use understory_transform_state::{
    BoundaryProvider, SCALE_FLOOR, ScaleBoundaries, ScaleState, TransformDelegate, TransformStore,
    TransformUpdate,
};

use crate::clamp::clamp_position;
use crate::decay::{PanSession, ZoomSession, anchored_position, decay_step, decay_step_vec};
use crate::fling::FlingDriver;
use crate::tween::TransformTween;
use crate::{FrameClock, FrameHandle};

/// Distance to the zoom target below which zoom decay snaps and stops.
pub(crate) const ZOOM_EPSILON: f64 = SCALE_FLOOR;

/// Tunables of the [`AnimationEngine`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionConfig {
    /// Rate `k` of the exponential decay `1 − e^(−k·dt)`.
    pub decay_rate: f64,
    /// Frame length assumed for the first frame of a decay loop.
    pub reference_frame: Duration,
    /// Launch velocity of the tween driver.
    pub fling_velocity: f64,
    /// Distance at which pan decay snaps to its target.
    pub pan_epsilon: f64,
    /// Focal point movement that re-anchors a running zoom.
    pub refocus_distance: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            decay_rate: 12.0,
            reference_frame: Duration::from_nanos(16_666_667),
            fling_velocity: 0.4,
            pan_epsilon: 0.5,
            refocus_distance: 1.0,
        }
    }
}

/// Reported by [`AnimationEngine::on_frame`] when an animation finishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationEvent {
    /// A discrete tween reached its end values.
    TweenCompleted,
    /// Zoom decay snapped to its target.
    ZoomSettled,
    /// Pan decay snapped to its target.
    PanSettled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LoopKind {
    Tween,
    Zoom,
    Pan,
}

#[derive(Clone, Copy, Debug)]
struct Registration {
    handle: FrameHandle,
    kind: LoopKind,
    last: Option<Duration>,
}

#[derive(Clone, Copy, Debug)]
struct TweenRun {
    tween: TransformTween,
    driver: FlingDriver,
    started: Option<Duration>,
}

/// Owns every time-driven mutation of a [`TransformStore`].
///
/// Two families of animation share the transform and never run together:
/// - discrete tweens ([`AnimationEngine::animate_state_change`] and the
///   single-field helpers), driven 0 → 1 by a fling spring;
/// - continuous exponential decay toward an accumulated zoom target
///   ([`AnimationEngine::animate_scale_by`]) or pan target
///   ([`AnimationEngine::animate_position_by`]).
///
/// Starting anything stops whatever else runs: a tween stops both decays,
/// zoom decay stops tweens and pan decay, pan decay stops tweens and zoom
/// decay. A direct user gesture must call [`AnimationEngine::stop`] first.
///
/// At most one frame registration exists at any time. The host forwards each
/// frame to [`AnimationEngine::on_frame`].
#[derive(Debug)]
pub struct AnimationEngine<C, B> {
    clock: C,
    bounds: B,
    config: MotionConfig,
    registration: Option<Registration>,
    tween: Option<TweenRun>,
    zoom: Option<ZoomSession>,
    pan: Option<PanSession>,
    disposed: bool,
}

impl<C: FrameClock, B: BoundaryProvider> AnimationEngine<C, B> {
    /// Creates an idle engine with the default [`MotionConfig`].
    pub fn new(clock: C, bounds: B) -> Self {
        Self::with_config(clock, bounds, MotionConfig::default())
    }

    /// Creates an idle engine with `config`.
    pub fn with_config(clock: C, bounds: B, config: MotionConfig) -> Self {
        Self {
            clock,
            bounds,
            config,
            registration: None,
            tween: None,
            zoom: None,
            pan: None,
            disposed: false,
        }
    }

    /// The frame clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Mutable access to the frame clock.
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// The boundary provider.
    pub fn bounds(&self) -> &B {
        &self.bounds
    }

    /// Mutable access to the boundary provider.
    pub fn bounds_mut(&mut self) -> &mut B {
        &mut self.bounds
    }

    /// Current boundaries from the provider.
    pub fn boundaries(&self) -> ScaleBoundaries {
        self.bounds.boundaries()
    }

    /// The engine tunables.
    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    /// Returns `true` while any frame loop runs.
    pub fn is_animating(&self) -> bool {
        self.registration.is_some()
    }

    /// Returns `true` while a discrete tween runs.
    pub fn is_tweening(&self) -> bool {
        self.loop_kind() == Some(LoopKind::Tween)
    }

    /// Returns `true` while the zoom-decay loop runs.
    pub fn is_zooming(&self) -> bool {
        self.loop_kind() == Some(LoopKind::Zoom)
    }

    /// Returns `true` while the pan-decay loop runs.
    pub fn is_panning(&self) -> bool {
        self.loop_kind() == Some(LoopKind::Pan)
    }

    /// The accumulated zoom destination, if a zoom sequence is live.
    pub fn zoom_target(&self) -> Option<f64> {
        self.zoom.map(|z| z.target)
    }

    /// The accumulated pan destination, if a pan sequence is live.
    pub fn pan_target(&self) -> Option<Vec2> {
        self.pan.map(|p| p.target)
    }

    /// Stops every loop and clears both decay targets. Idempotent.
    pub fn stop(&mut self) {
        self.cancel_loop();
        self.tween = None;
        self.zoom = None;
        self.pan = None;
    }

    /// Starts a discrete tween of the requested tracks.
    ///
    /// Stops any running animation first. Tracks absent from `tween` stay
    /// untouched. An empty tween only stops.
    pub fn animate_state_change(&mut self, tween: TransformTween) {
        if !self.ensure_live("animate_state_change") {
            return;
        }
        self.stop();
        if tween.is_empty() {
            return;
        }
        self.tween = Some(TweenRun {
            tween,
            driver: FlingDriver::new(self.config.fling_velocity),
            started: None,
        });
        self.ensure_loop(LoopKind::Tween);
    }

    /// Tweens the scale alone.
    pub fn animate_scale(&mut self, from: f64, to: f64) {
        self.animate_state_change(TransformTween::new().scale(from, to));
    }

    /// Tweens the position alone.
    pub fn animate_position(&mut self, from: Vec2, to: Vec2) {
        self.animate_state_change(TransformTween::new().position(from, to));
    }

    /// Tweens the rotation alone.
    pub fn animate_rotation(&mut self, from: f64, to: f64) {
        self.animate_state_change(TransformTween::new().rotation(from, to));
    }

    /// Tweens the transform back inside its limits.
    ///
    /// The scale is brought into `[min, max]` and the position into the clamp
    /// rectangle for that scale. Returns `false` (and starts nothing) when the
    /// transform is already settled.
    pub fn animate_rebound(&mut self, store: &TransformStore) -> bool {
        let b = self.bounds.boundaries();
        let scale = current_scale(store, &b);
        let position = store.value().position;
        let target_scale = b.clamp_scale(scale);
        let target_position = clamp_position(position, target_scale, &b);
        self.tween_to(scale, target_scale, position, target_position)
    }

    /// Tweens to the scale of `state`, keeping `focal_point` fixed.
    ///
    /// `focal_point` defaults to the viewport centre. The destination position
    /// is clamped. Returns `false` when `state` has no fixed scale or the
    /// transform is already there.
    pub fn animate_scale_state(
        &mut self,
        store: &TransformStore,
        state: ScaleState,
        focal_point: Option<Point>,
    ) -> bool {
        let b = self.bounds.boundaries();
        let Some(target_scale) = b.scale_for_state(state) else {
            return false;
        };
        let center = b.outer_center();
        let focal_point = focal_point.unwrap_or(center);
        let scale = current_scale(store, &b);
        let position = store.value().position;
        let ref_vector = focal_point - (center + position);
        let anchored = anchored_position(focal_point, ref_vector, target_scale / scale, center);
        let target_position = clamp_position(anchored, target_scale, &b);
        self.tween_to(scale, target_scale, position, target_position)
    }

    /// Zooms by `factor` around `focal_point` with exponential decay.
    ///
    /// Repeated calls accumulate onto the existing target rather than the live
    /// scale, so rapid wheel ticks merge into one smooth destination. The
    /// target is clamped into the scale limits. `focal_point` defaults to the
    /// viewport centre.
    pub fn animate_scale_by(
        &mut self,
        store: &mut TransformStore,
        factor: f64,
        focal_point: Option<Point>,
    ) {
        if !self.ensure_live("animate_scale_by") {
            return;
        }
        if !factor.is_finite() || factor <= 0.0 {
            log::warn!("ignoring zoom factor {factor}");
            return;
        }
        self.stop_tween();
        self.stop_pan();

        let b = self.bounds.boundaries();
        let center = b.outer_center();
        let focal_point = focal_point.unwrap_or(center);
        let scale = current_scale(store, &b);
        let zooming = self.is_zooming();
        let refocus = self.config.refocus_distance;

        let mut session = match self.zoom.take() {
            Some(session)
                if zooming && (focal_point - session.focal_point).hypot() <= refocus =>
            {
                session
            }
            previous => {
                log::debug!(
                    "anchoring zoom at ({}, {}) from scale {scale}",
                    focal_point.x,
                    focal_point.y
                );
                let target = previous.map_or(scale, |s| s.target);
                ZoomSession::anchor(focal_point, center, store.value().position, scale, target)
            }
        };
        session.target = b.clamp_scale(session.target * factor);
        let settled = (session.target - scale).abs() < ZOOM_EPSILON;
        self.zoom = Some(session);
        if !settled {
            self.ensure_loop(LoopKind::Zoom);
        }
    }

    /// Pans by `delta` with exponential decay.
    ///
    /// Deltas accumulate onto the existing target, which is clamped so the
    /// animation never heads out of bounds.
    pub fn animate_position_by(&mut self, store: &mut TransformStore, delta: Vec2) {
        if !self.ensure_live("animate_position_by") {
            return;
        }
        if !delta.is_finite() {
            log::warn!("ignoring non-finite pan delta");
            return;
        }
        self.stop_tween();
        self.stop_zoom();

        let b = self.bounds.boundaries();
        let scale = current_scale(store, &b);
        let position = store.value().position;
        let seed = self.pan.map_or(position, |p| p.target);
        let target = clamp_position(seed + delta, scale, &b);
        self.pan = Some(PanSession { target });
        if (target - position).hypot() >= self.config.pan_epsilon {
            self.ensure_loop(LoopKind::Pan);
        }
    }

    /// Advances the running animation by one frame.
    ///
    /// `elapsed` is a monotonic timestamp. Frames for a handle other than the
    /// live registration are ignored. Returns an event when an animation
    /// finishes on this frame.
    pub fn on_frame(
        &mut self,
        store: &mut TransformStore,
        handle: FrameHandle,
        elapsed: Duration,
    ) -> Option<AnimationEvent> {
        if self.disposed {
            return None;
        }
        let reference = self.config.reference_frame;
        let registration = self.registration.as_mut()?;
        if registration.handle != handle {
            return None;
        }
        let dt = registration
            .last
            .map_or(reference, |last| elapsed.saturating_sub(last));
        registration.last = Some(elapsed);
        let kind = registration.kind;
        match kind {
            LoopKind::Tween => self.tween_frame(store, elapsed),
            LoopKind::Zoom => self.zoom_frame(store, dt.as_secs_f64()),
            LoopKind::Pan => self.pan_frame(store, dt.as_secs_f64()),
        }
    }

    /// Stops everything and releases the frame registration. Must be called
    /// exactly once; the engine accepts no commands afterwards.
    pub fn dispose(&mut self) {
        if !self.ensure_live("dispose") {
            return;
        }
        self.stop();
        self.disposed = true;
    }

    fn tween_frame(
        &mut self,
        store: &mut TransformStore,
        elapsed: Duration,
    ) -> Option<AnimationEvent> {
        let Some(run) = self.tween.as_mut() else {
            self.cancel_loop();
            return None;
        };
        let started = *run.started.get_or_insert(elapsed);
        let t = elapsed.saturating_sub(started).as_secs_f64();
        let done = run.driver.is_done(t);
        let progress = run.driver.value(t);
        let tween = run.tween;

        let mut update = TransformUpdate::new();
        if let Some(track) = tween.scale {
            update = update.with_scale(track.at(progress));
        }
        if let Some(track) = tween.position {
            update = update.with_position(track.at(progress));
        }
        if let Some(track) = tween.rotation {
            update = update.with_rotation(track.at(progress));
        }
        store.update_multiple_scale_invisibly(update);

        if done {
            self.tween = None;
            self.cancel_loop();
            return Some(AnimationEvent::TweenCompleted);
        }
        None
    }

    fn zoom_frame(&mut self, store: &mut TransformStore, dt: f64) -> Option<AnimationEvent> {
        let Some(session) = self.zoom else {
            self.cancel_loop();
            return None;
        };
        let b = self.bounds.boundaries();
        let scale = current_scale(store, &b);
        let mut next = decay_step(scale, session.target, self.config.decay_rate, dt);
        let done = (session.target - next).abs() < ZOOM_EPSILON;
        if done {
            next = session.target;
        }
        let position = session.position_at(next, b.outer_center());
        store.update_multiple(
            TransformUpdate::new()
                .with_scale(next)
                .with_position(position),
        );

        if done {
            self.zoom = None;
            self.cancel_loop();
            return Some(AnimationEvent::ZoomSettled);
        }
        None
    }

    fn pan_frame(&mut self, store: &mut TransformStore, dt: f64) -> Option<AnimationEvent> {
        let Some(session) = self.pan else {
            self.cancel_loop();
            return None;
        };
        let position = store.value().position;
        let mut next = decay_step_vec(position, session.target, self.config.decay_rate, dt);
        let done = (session.target - next).hypot() < self.config.pan_epsilon;
        if done {
            next = session.target;
        }
        store.set_position(next);

        if done {
            self.pan = None;
            self.cancel_loop();
            return Some(AnimationEvent::PanSettled);
        }
        None
    }

    fn tween_to(
        &mut self,
        scale: f64,
        target_scale: f64,
        position: Vec2,
        target_position: Vec2,
    ) -> bool {
        let mut tween = TransformTween::new();
        if (target_scale - scale).abs() >= ZOOM_EPSILON {
            tween = tween.scale(scale, target_scale);
        }
        if target_position != position {
            tween = tween.position(position, target_position);
        }
        if tween.is_empty() {
            return false;
        }
        self.animate_state_change(tween);
        true
    }

    fn loop_kind(&self) -> Option<LoopKind> {
        self.registration.map(|r| r.kind)
    }

    fn ensure_loop(&mut self, kind: LoopKind) {
        if self.loop_kind() == Some(kind) {
            return;
        }
        self.cancel_loop();
        let handle = self.clock.register();
        log::trace!("starting {kind:?} loop on frame handle {}", handle.get());
        self.registration = Some(Registration {
            handle,
            kind,
            last: None,
        });
    }

    fn cancel_loop(&mut self) {
        if let Some(registration) = self.registration.take() {
            log::trace!(
                "stopping {:?} loop on frame handle {}",
                registration.kind,
                registration.handle.get()
            );
            self.clock.cancel(registration.handle);
        }
    }

    fn stop_tween(&mut self) {
        self.tween = None;
        if self.is_tweening() {
            self.cancel_loop();
        }
    }

    fn stop_zoom(&mut self) {
        self.zoom = None;
        if self.is_zooming() {
            self.cancel_loop();
        }
    }

    fn stop_pan(&mut self) {
        self.pan = None;
        if self.is_panning() {
            self.cancel_loop();
        }
    }

    fn ensure_live(&self, op: &str) -> bool {
        debug_assert!(
            !self.disposed,
            "`{op}` called on a disposed animation engine"
        );
        if self.disposed {
            log::error!("`{op}` called on a disposed animation engine; ignoring");
            return false;
        }
        true
    }
}

impl<C: FrameClock, B: BoundaryProvider> TransformDelegate for AnimationEngine<C, B> {
    fn animate_scale_by(
        &mut self,
        store: &mut TransformStore,
        factor: f64,
        focal_point: Option<Point>,
    ) {
        Self::animate_scale_by(self, store, factor, focal_point);
    }

    fn animate_position_by(&mut self, store: &mut TransformStore, delta: Vec2) {
        Self::animate_position_by(self, store, delta);
    }

    fn stop(&mut self) {
        Self::stop(self);
    }

    fn dispose(&mut self) {
        Self::dispose(self);
    }
}

/// Live scale, falling back to the initial scale and never below the floor.
pub(crate) fn current_scale(store: &TransformStore, boundaries: &ScaleBoundaries) -> f64 {
    store
        .value()
        .scale_or(boundaries.initial_scale)
        .max(SCALE_FLOOR)
}

#[cfg(test)]
mod tests {
    use kurbo::Size;
    use understory_transform_state::TransformState;

    use super::*;
    use crate::ManualClock;

    const FRAME: Duration = Duration::from_millis(16);

    fn boundaries() -> ScaleBoundaries {
        ScaleBoundaries::new(
            1.0,
            5.0,
            1.0,
            Size::new(100.0, 100.0),
            Size::new(400.0, 300.0),
        )
    }

    fn engine() -> AnimationEngine<ManualClock, ScaleBoundaries> {
        AnimationEngine::new(ManualClock::new(), boundaries())
    }

    fn store_at(scale: f64) -> TransformStore {
        TransformStore::new(TransformState::new(Vec2::ZERO, scale))
    }

    /// Drives frames until the engine goes idle, returning the last event.
    fn run_to_rest(
        engine: &mut AnimationEngine<ManualClock, ScaleBoundaries>,
        store: &mut TransformStore,
    ) -> Option<AnimationEvent> {
        let mut now = Duration::ZERO;
        let mut last = None;
        for _ in 0..10_000 {
            let Some(handle) = engine.clock().current() else {
                return last;
            };
            now += FRAME;
            if let Some(event) = engine.on_frame(store, handle, now) {
                last = Some(event);
            }
        }
        panic!("animation did not come to rest");
    }

    #[test]
    fn repeated_wheel_ticks_accumulate_into_clamped_target() {
        let mut engine = engine();
        let mut store = store_at(1.0);
        for _ in 0..10 {
            engine.animate_scale_by(&mut store, 1.05, Some(Point::new(200.0, 150.0)));
        }
        let target = engine.zoom_target().unwrap();
        assert!((target - 1.05_f64.powi(10)).abs() < 1e-12);
        assert!((target - 1.629).abs() < 1e-3);
    }

    #[test]
    fn accumulation_matches_single_combined_factor() {
        let focal = Some(Point::new(220.0, 140.0));
        let mut a = engine();
        let mut store_a = store_at(1.0);
        a.animate_scale_by(&mut store_a, 1.2, focal);
        a.animate_scale_by(&mut store_a, 1.3, focal);

        let mut b = engine();
        let mut store_b = store_at(1.0);
        b.animate_scale_by(&mut store_b, 1.2 * 1.3, focal);

        let (a, b) = (a.zoom_target().unwrap(), b.zoom_target().unwrap());
        assert!((a - b).abs() < 1e-12);
    }

    #[test]
    fn zoom_target_is_clamped_to_limits() {
        let mut engine = engine();
        let mut store = store_at(1.0);
        engine.animate_scale_by(&mut store, 100.0, None);
        assert_eq!(engine.zoom_target(), Some(5.0));
    }

    #[test]
    fn zoom_below_minimum_at_minimum_starts_nothing() {
        let mut engine = engine();
        let mut store = store_at(1.0);
        engine.animate_scale_by(&mut store, 0.5, None);
        assert!(!engine.is_animating());
        assert!(engine.clock().live().is_empty());
    }

    #[test]
    fn zoom_converges_exactly_and_keeps_focal_point() {
        let mut engine = engine();
        let mut store = store_at(1.0);
        let focal = Point::new(260.0, 120.0);
        let center = boundaries().outer_center();
        let local = |s: &TransformStore| {
            let v = s.value();
            (focal - center - v.position) / v.scale.unwrap()
        };
        let before = local(&store);

        engine.animate_scale_by(&mut store, 2.0, Some(focal));
        let event = run_to_rest(&mut engine, &mut store);

        assert_eq!(event, Some(AnimationEvent::ZoomSettled));
        assert_eq!(store.value().scale, Some(2.0));
        assert_eq!(engine.zoom_target(), None);
        let after = local(&store);
        assert!((after - before).hypot() < 1e-9);
    }

    #[test]
    fn first_zoom_frame_uses_reference_frame() {
        let mut engine = engine();
        let mut store = store_at(1.0);
        engine.animate_scale_by(&mut store, 2.0, None);
        let handle = engine.clock().current().unwrap();
        // The elapsed timestamp of the first frame is irrelevant.
        engine.on_frame(&mut store, handle, Duration::from_secs(100));
        let reference = MotionConfig::default().reference_frame.as_secs_f64();
        let expected = decay_step(1.0, 2.0, 12.0, reference);
        assert!((store.value().scale.unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn zoom_scale_writes_reach_the_gesture_channel() {
        use understory_transform_state::ChangeChannel;
        let mut engine = engine();
        let mut store = store_at(1.0);
        let before = store.revision(ChangeChannel::Gesture);
        engine.animate_scale_by(&mut store, 2.0, None);
        let handle = engine.clock().current().unwrap();
        engine.on_frame(&mut store, handle, FRAME);
        assert_eq!(store.revision(ChangeChannel::Gesture), before + 1);
    }

    #[test]
    fn pan_target_is_clamped_and_converges() {
        let mut engine = engine();
        // 500 x 500 in 400 x 300: x in ±50, y in ±100.
        let mut store = store_at(5.0);
        engine.animate_position_by(&mut store, Vec2::new(-400.0, 30.0));
        assert_eq!(engine.pan_target(), Some(Vec2::new(-50.0, 30.0)));
        engine.animate_position_by(&mut store, Vec2::new(0.0, 30.0));
        assert_eq!(engine.pan_target(), Some(Vec2::new(-50.0, 60.0)));

        assert_eq!(
            run_to_rest(&mut engine, &mut store),
            Some(AnimationEvent::PanSettled)
        );
        assert_eq!(store.value().position, Vec2::new(-50.0, 60.0));
        assert_eq!(engine.pan_target(), None);
    }

    #[test]
    fn pan_within_epsilon_starts_no_loop() {
        let mut engine = engine();
        let mut store = store_at(1.0);
        // At scale 1 the subject fits, so every target clamps to zero.
        engine.animate_position_by(&mut store, Vec2::new(0.0, -300.0));
        assert!(!engine.is_animating());
    }

    #[test]
    fn zoom_preempts_pan() {
        let mut engine = engine();
        let mut store = store_at(5.0);
        engine.animate_position_by(&mut store, Vec2::new(0.0, -80.0));
        assert!(engine.is_panning());
        let pan_handle = engine.clock().current().unwrap();

        engine.animate_scale_by(&mut store, 0.8, None);
        assert!(engine.is_zooming());
        assert_eq!(engine.pan_target(), None);
        assert!(!engine.clock().is_live(pan_handle));
        assert_eq!(engine.clock().live().len(), 1);

        // A late frame for the cancelled pan loop is ignored.
        assert_eq!(engine.on_frame(&mut store, pan_handle, FRAME), None);
        assert_eq!(store.value().position, Vec2::ZERO);
    }

    #[test]
    fn pan_stops_zoom() {
        let mut engine = engine();
        let mut store = store_at(5.0);
        engine.animate_scale_by(&mut store, 0.5, None);
        engine.animate_position_by(&mut store, Vec2::new(10.0, 0.0));
        assert_eq!(engine.zoom_target(), None);
        assert!(engine.is_panning());
    }

    #[test]
    fn moving_focal_point_reanchors_but_keeps_target() {
        let mut engine = engine();
        let mut store = store_at(1.0);
        engine.animate_scale_by(&mut store, 2.0, Some(Point::new(100.0, 100.0)));
        let handle = engine.clock().current().unwrap();
        engine.on_frame(&mut store, handle, FRAME);
        engine.animate_scale_by(&mut store, 1.5, Some(Point::new(300.0, 100.0)));
        assert_eq!(engine.zoom_target(), Some(3.0));
        // Still the same loop registration.
        assert_eq!(engine.clock().current(), Some(handle));
    }

    #[test]
    fn tween_writes_scale_invisibly_and_completes() {
        use understory_transform_state::ChangeChannel;
        let mut engine = engine();
        let mut store = store_at(1.0);
        let gesture_before = store.revision(ChangeChannel::Gesture);
        engine.animate_scale(1.0, 3.0);
        assert!(engine.is_tweening());

        assert_eq!(
            run_to_rest(&mut engine, &mut store),
            Some(AnimationEvent::TweenCompleted)
        );
        assert_eq!(store.value().scale, Some(3.0));
        assert_eq!(store.revision(ChangeChannel::Gesture), gesture_before);
    }

    #[test]
    fn tween_frame_is_a_single_commit() {
        use understory_transform_state::ChangeChannel;
        let mut engine = engine();
        let mut store = store_at(1.0);
        engine.animate_state_change(
            TransformTween::new()
                .scale(1.0, 3.0)
                .position(Vec2::ZERO, Vec2::new(0.0, 40.0)),
        );

        let mut now = Duration::ZERO;
        let mut commits = 0;
        while let Some(handle) = engine.clock().current() {
            now += FRAME;
            let before = *store.value();
            let output = store.revision(ChangeChannel::Output);
            let gesture = store.revision(ChangeChannel::Gesture);
            let _ = engine.on_frame(&mut store, handle, now);
            if *store.value() != before {
                commits += 1;
                assert_eq!(*store.prev_value(), before);
                assert_eq!(store.revision(ChangeChannel::Output), output + 1);
                assert_eq!(store.revision(ChangeChannel::Gesture), gesture + 1);
            }
        }
        assert!(commits > 0);
        assert_eq!(store.value().scale, Some(3.0));
        assert_eq!(store.value().position, Vec2::new(0.0, 40.0));
    }

    #[test]
    fn state_change_tween_animates_only_requested_tracks() {
        let mut engine = engine();
        let mut store = store_at(2.0);
        store.set_rotation(0.3);
        engine.animate_state_change(
            TransformTween::new()
                .position(Vec2::ZERO, Vec2::new(40.0, 0.0)),
        );
        run_to_rest(&mut engine, &mut store);
        assert_eq!(store.value().position, Vec2::new(40.0, 0.0));
        assert_eq!(store.value().scale, Some(2.0));
        assert_eq!(store.value().rotation, 0.3);
    }

    #[test]
    fn zoom_stops_tween() {
        let mut engine = engine();
        let mut store = store_at(1.0);
        engine.animate_rotation(0.0, 1.0);
        engine.animate_scale_by(&mut store, 2.0, None);
        assert!(engine.is_zooming());
        assert_eq!(engine.clock().live().len(), 1);
    }

    #[test]
    fn rebound_returns_out_of_range_scale_to_limits() {
        let mut engine = engine();
        let mut store = store_at(6.0);
        store.set_position(Vec2::new(500.0, 0.0));
        assert!(engine.animate_rebound(&store));
        run_to_rest(&mut engine, &mut store);
        assert_eq!(store.value().scale, Some(5.0));
        assert_eq!(store.value().position, Vec2::new(50.0, 0.0));

        assert!(!engine.animate_rebound(&store));
    }

    #[test]
    fn scale_state_tween_targets_state_scale() {
        let mut engine = engine();
        let mut store = store_at(1.0);
        // Covering a 400 x 300 viewport with a 100 x 100 subject takes scale 4.
        let started = engine.animate_scale_state(&store, ScaleState::Covering, None);
        assert!(started);
        run_to_rest(&mut engine, &mut store);
        assert_eq!(store.value().scale, Some(4.0));
        assert_eq!(store.value().position, Vec2::ZERO);
    }

    #[test]
    fn stop_is_idempotent_and_clears_targets() {
        let mut engine = engine();
        let mut store = store_at(5.0);
        engine.stop();
        engine.animate_position_by(&mut store, Vec2::new(20.0, 0.0));
        engine.stop();
        engine.stop();
        assert!(!engine.is_animating());
        assert_eq!(engine.pan_target(), None);
        assert!(engine.clock().live().is_empty());
    }

    #[test]
    fn dispose_releases_frame_registration() {
        let mut engine = engine();
        let mut store = store_at(1.0);
        engine.animate_scale_by(&mut store, 2.0, None);
        engine.dispose();
        assert!(engine.clock().live().is_empty());
    }

    #[test]
    #[should_panic(expected = "disposed animation engine")]
    fn commands_after_dispose_fail_loudly() {
        let mut engine = engine();
        let mut store = store_at(1.0);
        engine.dispose();
        engine.animate_scale_by(&mut store, 2.0, None);
    }
}
