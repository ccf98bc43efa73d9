//! Orbit camera controller.
//!
//! Owns the target point and [`SphericalState`], routes input to the
//! [`DragTracker`] and [`ZoomClamp`], and re-seeds target and radius through
//! the [`BoundingFitter`] when the viewed object changes. Camera positions are
//! never stored; every [`CameraState`] is projected from the current orbit.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use glam::DVec3;

use super::spherical::{to_cartesian, SphericalState};
use super::CameraState;
use crate::config::{ConfigError, OrbitConfig};
use crate::input::{DragTracker, InputEvent, InputSource, ListenerId, Viewport, ZoomClamp};
use crate::scene::fit::Framing;
use crate::scene::{BoundingBox, BoundingFitter, SceneProvider};

/// Subscription created by [`OrbitCameraController::attach`].
#[derive(Debug, PartialEq, Eq)]
#[must_use = "dropping an attachment leaves the listener subscribed"]
pub struct Attachment {
    id: ListenerId,
}

pub struct OrbitCameraController {
    config: OrbitConfig,
    target: DVec3,
    state: SphericalState,
    drag: DragTracker,
    zoom: ZoomClamp,
    fitter: BoundingFitter,
    viewport: Viewport,
}

impl OrbitCameraController {
    /// Create a controller looking at the origin from the configured
    /// initial orbit.
    ///
    /// # Errors
    ///
    /// Returns the first problem found by [`OrbitConfig::validate`].
    pub fn new(config: OrbitConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: OrbitConfig) -> Self {
        let drag = DragTracker::new(config.rotate_speed, config.polar_epsilon);
        let zoom = ZoomClamp::new(config.zoom_speed, config.min_zoom, config.max_zoom);
        let fitter = BoundingFitter::new(config.fallback_distance, config.padding_factor);
        let state = Self::initial_state(&config);

        Self {
            config,
            target: DVec3::ZERO,
            state,
            drag,
            zoom,
            fitter,
            viewport: Viewport::default(),
        }
    }

    fn initial_state(config: &OrbitConfig) -> SphericalState {
        SphericalState::new(
            config.initial_radius,
            config.initial_azimuth,
            config.initial_polar,
        )
        .clamped(config.min_zoom, config.max_zoom, config.polar_epsilon)
    }

    pub fn config(&self) -> &OrbitConfig {
        &self.config
    }

    pub fn target(&self) -> DVec3 {
        self.target
    }

    pub fn spherical(&self) -> SphericalState {
        self.state
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn on_pointer_down(&mut self, x: f64, y: f64) {
        self.drag.pointer_down(x, y);
    }

    /// Returns true if the orbit changed.
    pub fn on_pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.drag.pointer_move(x, y, &mut self.state)
    }

    pub fn on_pointer_up(&mut self) {
        self.drag.pointer_up();
    }

    pub fn on_pointer_leave(&mut self) {
        self.drag.pointer_leave();
    }

    pub fn on_pointer_cancel(&mut self) {
        self.drag.pointer_cancel();
    }

    /// Returns true if the radius changed.
    pub fn on_wheel(&mut self, delta_y: f64) -> bool {
        let radius = self.zoom.wheel(self.state.radius, delta_y);
        if radius == self.state.radius {
            return false;
        }
        log::trace!("zoom {:.3} -> {:.3}", self.state.radius, radius);
        self.state = SphericalState {
            radius,
            ..self.state
        };
        true
    }

    /// Record a new surface size. The orbit is not affected.
    pub fn on_resize(&mut self, width: u32, height: u32) {
        log::debug!("viewport resized to {}x{}", width, height);
        self.viewport = Viewport::new(width, height);
    }

    /// Dispatch a host-agnostic event. Returns true if the orbit changed.
    pub fn handle_event(&mut self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::PointerDown { x, y } => {
                self.on_pointer_down(x, y);
                false
            }
            InputEvent::PointerMove { x, y } => self.on_pointer_move(x, y),
            InputEvent::PointerUp => {
                self.on_pointer_up();
                false
            }
            InputEvent::PointerLeave => {
                self.on_pointer_leave();
                false
            }
            InputEvent::PointerCancel => {
                self.on_pointer_cancel();
                false
            }
            InputEvent::Wheel { delta_y } => self.on_wheel(delta_y),
            InputEvent::Resize { width, height } => {
                self.on_resize(width, height);
                false
            }
        }
    }

    /// Frame `bounds` with the configured padding factor.
    pub fn frame(&mut self, bounds: &BoundingBox, vertical_fov: f64) -> Framing {
        self.frame_with_padding(bounds, vertical_fov, self.config.padding_factor)
    }

    /// Move the target to the center of `bounds` and set the radius that fits
    /// it in `vertical_fov`. Orientation is kept.
    pub fn frame_with_padding(
        &mut self,
        bounds: &BoundingBox,
        vertical_fov: f64,
        padding: f64,
    ) -> Framing {
        let framing = self.fitter.frame(bounds, vertical_fov, padding, &self.zoom);
        log::debug!(
            "framing {:?} at target {:?}, radius {:.3}",
            bounds,
            framing.target,
            framing.radius
        );
        self.target = framing.target;
        self.state = SphericalState {
            radius: framing.radius,
            ..self.state
        };
        framing
    }

    /// Frame whatever `scene` currently reports.
    pub fn frame_scene<S: SceneProvider + ?Sized>(
        &mut self,
        scene: &S,
        vertical_fov: f64,
    ) -> Framing {
        self.frame(&scene.bounding_box(), vertical_fov)
    }

    /// Restore the configured orbit angles and radius. The target is kept.
    pub fn reset_view(&mut self) {
        log::debug!("resetting view");
        self.drag.cancel();
        self.state = Self::initial_state(&self.config);
    }

    /// Camera snapshot for the current orbit.
    pub fn current_camera_state(&self, vertical_fov: f64) -> CameraState {
        CameraState {
            position: to_cartesian(self.target, &self.state),
            target: self.target,
            vertical_fov_radians: vertical_fov,
        }
    }

    /// Subscribe `controller` to `source`.
    ///
    /// The listener holds only a weak reference, so a dropped controller
    /// turns it into a no-op.
    pub fn attach<I: InputSource + ?Sized>(
        controller: &Rc<RefCell<Self>>,
        source: &mut I,
    ) -> Attachment {
        let weak: Weak<RefCell<Self>> = Rc::downgrade(controller);
        let id = source.subscribe(Box::new(move |event: &InputEvent| {
            if let Some(controller) = weak.upgrade() {
                controller.borrow_mut().handle_event(event);
            }
        }));
        log::debug!("attached orbit controller as {:?}", id);
        Attachment { id }
    }

    /// Unsubscribe and discard any drag in progress.
    pub fn detach<I: InputSource + ?Sized>(
        controller: &Rc<RefCell<Self>>,
        source: &mut I,
        attachment: Attachment,
    ) {
        if !source.unsubscribe(attachment.id) {
            log::warn!("listener {:?} was already unsubscribed", attachment.id);
        }
        controller.borrow_mut().drag.cancel();
        log::debug!("detached orbit controller {:?}", attachment.id);
    }
}

impl Default for OrbitCameraController {
    fn default() -> Self {
        Self::from_valid_config(OrbitConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputBus;
    use crate::scene::Scene;
    use std::f64::consts::PI;

    fn fov() -> f64 {
        45f64.to_radians()
    }

    fn controller() -> OrbitCameraController {
        OrbitCameraController::default()
    }

    #[test]
    fn test_controller_default() {
        let c = controller();
        assert_eq!(c.target(), DVec3::ZERO);
        assert_eq!(c.spherical().radius, 12.0);
        assert!(!c.is_dragging());
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let config = OrbitConfig::default().with_zoom_range(10.0, 1.0);
        assert!(OrbitCameraController::new(config).is_err());
    }

    #[test]
    fn test_new_clamps_initial_state() {
        let config = OrbitConfig::default().with_initial_radius(1000.0);
        let c = OrbitCameraController::new(config).unwrap();
        assert_eq!(c.spherical().radius, 40.0);
    }

    #[test]
    fn test_camera_state_matches_orbit() {
        let mut c = controller();
        c.on_pointer_down(0.0, 0.0);
        c.on_pointer_move(37.0, -12.0);

        let camera = c.current_camera_state(fov());
        let expected = to_cartesian(c.target(), &c.spherical());
        assert_eq!(camera.position, expected);
        assert!((camera.distance() - c.spherical().radius).abs() < 1e-9);
        assert_eq!(camera.vertical_fov_radians, fov());
    }

    #[test]
    fn test_camera_state_does_not_mutate() {
        let c = controller();
        let first = c.current_camera_state(fov());
        let second = c.current_camera_state(fov());
        assert_eq!(first, second);
    }

    #[test]
    fn test_drag_scenario() {
        let mut c = controller();
        let before = c.spherical();

        c.on_pointer_down(100.0, 100.0);
        assert!(c.on_pointer_move(150.0, 130.0));
        c.on_pointer_up();

        let after = c.spherical();
        assert!((after.azimuth - before.azimuth + 0.5).abs() < 1e-12);
        assert!((after.polar - before.polar - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_wheel_scenario() {
        let mut c = controller();
        assert!(c.on_wheel(100.0));
        assert!((c.spherical().radius - 13.0).abs() < 1e-12);

        while c.on_wheel(100.0) {
            assert!(c.spherical().radius <= 40.0);
        }
        assert_eq!(c.spherical().radius, 40.0);
        assert!(!c.on_wheel(100.0));
    }

    #[test]
    fn test_invariants_after_mixed_input() {
        let mut c = controller();
        let eps = c.config().polar_epsilon;
        let moves = [
            (0.0, 0.0),
            (900.0, 4000.0),
            (-300.0, -9000.0),
            (12.5, 17.0),
            (5000.0, 314.0),
            (-1.0, -1.0),
        ];

        for (i, (x, y)) in moves.iter().enumerate() {
            if i % 2 == 0 {
                c.on_pointer_down(0.0, 0.0);
            }
            c.on_pointer_move(*x, *y);
            c.on_wheel(if i % 3 == 0 { 5000.0 } else { -2500.0 });

            let s = c.spherical();
            assert!(s.polar >= eps && s.polar <= PI - eps, "polar {}", s.polar);
            assert!(s.radius >= 6.0 && s.radius <= 40.0, "radius {}", s.radius);
            assert!(c.current_camera_state(fov()).position.is_finite());
        }
    }

    #[test]
    fn test_non_finite_pointer_does_not_poison_orbit() {
        let mut c = controller();
        let before = c.spherical();

        c.handle_event(&InputEvent::PointerDown { x: 0.0, y: 0.0 });
        assert!(!c.handle_event(&InputEvent::PointerMove { x: f64::NAN, y: 0.0 }));
        c.handle_event(&InputEvent::PointerDown { x: 0.0, y: 0.0 });
        assert!(c.handle_event(&InputEvent::PointerMove { x: 10.0, y: 10.0 }));

        let s = c.spherical();
        assert!((s.azimuth - (before.azimuth - 0.1)).abs() < 1e-12);
        assert!((s.polar - (before.polar + 0.1)).abs() < 1e-12);
        assert!(c.current_camera_state(fov()).position.is_finite());
    }

    #[test]
    fn test_frame_keeps_orientation() {
        let mut c = controller();
        c.on_pointer_down(0.0, 0.0);
        c.on_pointer_move(40.0, 25.0);
        c.on_pointer_up();
        let before = c.spherical();

        let bounds = BoundingBox::new(DVec3::new(4.0, 0.0, 4.0), DVec3::new(12.0, 8.0, 12.0));
        let framing = c.frame(&bounds, fov());

        assert_eq!(c.target(), DVec3::new(8.0, 4.0, 8.0));
        assert_eq!(c.spherical().radius, framing.radius);
        assert_eq!(c.spherical().azimuth, before.azimuth);
        assert_eq!(c.spherical().polar, before.polar);
    }

    #[test]
    fn test_frame_fit_scenario() {
        let config = OrbitConfig::default().with_zoom_range(1.0, 100.0);
        let mut c = OrbitCameraController::new(config).unwrap();
        let bounds = BoundingBox::new(DVec3::splat(-1.0), DVec3::splat(1.0));

        let framing = c.frame_with_padding(&bounds, fov(), 1.5);
        assert!((framing.radius - 3.62).abs() < 0.005);

        c.frame_with_padding(&bounds, fov(), 1.0);
        let camera = c.current_camera_state(fov());
        assert!((camera.distance() * (fov() / 2.0).tan() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_frame_degenerate_scenario() {
        let mut c = controller();
        let framing = c.frame(&BoundingBox::from_point(DVec3::ZERO), fov());
        assert_eq!(framing.radius, c.config().fallback_distance);
        assert!(c.current_camera_state(fov()).position.is_finite());
    }

    #[test]
    fn test_frame_degenerate_uses_configured_fallback() {
        let config = OrbitConfig::default().with_fallback_distance(8.0);
        let mut c = OrbitCameraController::new(config).unwrap();
        let framing = c.frame(&BoundingBox::from_point(DVec3::new(1.0, 2.0, 3.0)), fov());
        assert_eq!(framing.radius, 8.0);
        assert_eq!(c.spherical().radius, 8.0);

        let config = OrbitConfig::default().with_fallback_distance(3.0);
        assert!(matches!(
            OrbitCameraController::new(config),
            Err(ConfigError::FallbackOutOfRange { .. })
        ));
    }

    #[test]
    fn test_frame_scene_follows_selection() {
        let mut c = controller();
        let mut scene = Scene::demo();

        scene.select("wardrobe");
        c.frame_scene(&scene, fov());
        assert_eq!(c.target(), DVec3::new(0.0, 4.5, 0.0));

        scene.select_next();
        c.frame_scene(&scene, fov());
        assert_eq!(c.target(), scene.current().bounds.center());
    }

    #[test]
    fn test_reset_view() {
        let mut c = controller();
        let initial = c.spherical();
        c.on_pointer_down(0.0, 0.0);
        c.on_pointer_move(120.0, 80.0);
        c.on_wheel(900.0);

        c.reset_view();
        assert_eq!(c.spherical(), initial);
        assert!(!c.is_dragging());
    }

    #[test]
    fn test_resize_leaves_orbit() {
        let mut c = controller();
        let before = c.spherical();
        assert!(!c.handle_event(&InputEvent::Resize {
            width: 800,
            height: 400
        }));
        assert_eq!(c.viewport().aspect(), 2.0);
        assert_eq!(c.spherical(), before);
    }

    #[test]
    fn test_handle_event_dispatch() {
        let mut c = controller();
        assert!(!c.handle_event(&InputEvent::PointerMove { x: 5.0, y: 5.0 }));
        c.handle_event(&InputEvent::PointerDown { x: 5.0, y: 5.0 });
        assert!(c.is_dragging());
        assert!(c.handle_event(&InputEvent::PointerMove { x: 15.0, y: 5.0 }));
        c.handle_event(&InputEvent::PointerLeave);
        assert!(!c.is_dragging());
        assert!(c.handle_event(&InputEvent::Wheel { delta_y: -100.0 }));
    }

    #[test]
    fn test_attach_and_detach() {
        let controller = Rc::new(RefCell::new(controller()));
        let mut bus = InputBus::new();

        let attachment = OrbitCameraController::attach(&controller, &mut bus);
        assert_eq!(bus.listener_count(), 1);

        bus.emit(&InputEvent::Wheel { delta_y: 100.0 });
        assert!((controller.borrow().spherical().radius - 13.0).abs() < 1e-12);

        bus.emit(&InputEvent::PointerDown { x: 0.0, y: 0.0 });
        assert!(controller.borrow().is_dragging());

        OrbitCameraController::detach(&controller, &mut bus, attachment);
        assert_eq!(bus.listener_count(), 0);
        assert!(!controller.borrow().is_dragging());

        let before = controller.borrow().spherical();
        bus.emit(&InputEvent::Wheel { delta_y: 100.0 });
        assert_eq!(controller.borrow().spherical(), before);
    }

    #[test]
    fn test_listener_does_not_keep_controller_alive() {
        let controller = Rc::new(RefCell::new(controller()));
        let mut bus = InputBus::new();
        let _attachment = OrbitCameraController::attach(&controller, &mut bus);

        let weak = Rc::downgrade(&controller);
        drop(controller);
        assert!(weak.upgrade().is_none());

        // Delivering to a dropped controller is a no-op
        bus.emit(&InputEvent::PointerDown { x: 1.0, y: 1.0 });
    }
}
