//! Pointer drag tracking for orbit rotation.

use glam::DVec2;

use crate::camera::spherical::{clamp_polar, SphericalState};

/// An in-progress drag, alive between pointer-down and pointer-up.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DragSession {
    /// Last pointer position (for computing delta)
    last_pointer: DVec2,
}

/// Turns pointer-down/move/up into rotation deltas.
///
/// Idle while `session` is `None`, dragging otherwise.
#[derive(Debug, Clone)]
pub struct DragTracker {
    /// Rotation sensitivity (radians per pixel)
    pub rotate_speed: f64,
    /// Margin kept between the polar angle and the poles
    pub polar_epsilon: f64,
    session: Option<DragSession>,
}

impl DragTracker {
    pub fn new(rotate_speed: f64, polar_epsilon: f64) -> Self {
        Self {
            rotate_speed,
            polar_epsilon,
            session: None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Start a drag. A second pointer-down mid-drag resets the baseline.
    ///
    /// Non-finite coordinates are ignored.
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        let pointer = DVec2::new(x, y);
        if !pointer.is_finite() {
            log::trace!("ignoring pointer down at non-finite ({}, {})", x, y);
            return;
        }
        if self.session.is_some() {
            log::trace!("pointer down while dragging, resetting baseline");
        }
        self.session = Some(DragSession {
            last_pointer: pointer,
        });
    }

    /// Apply the pointer delta to `state`. Returns true if `state` changed.
    ///
    /// Does nothing while idle. A non-finite position is dropped and the
    /// baseline kept.
    pub fn pointer_move(&mut self, x: f64, y: f64, state: &mut SphericalState) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };

        let pointer = DVec2::new(x, y);
        if !pointer.is_finite() {
            log::trace!("ignoring pointer move to non-finite ({}, {})", x, y);
            return false;
        }
        let delta = pointer - session.last_pointer;
        session.last_pointer = pointer;

        if delta == DVec2::ZERO || !delta.is_finite() {
            return false;
        }

        let rotated = SphericalState {
            radius: state.radius,
            // Horizontal movement rotates azimuth
            azimuth: state.azimuth - delta.x * self.rotate_speed,
            // Vertical movement changes the polar angle
            polar: clamp_polar(state.polar + delta.y * self.rotate_speed, self.polar_epsilon),
        };
        log::trace!(
            "drag delta ({}, {}) -> azimuth {:.4}, polar {:.4}",
            delta.x,
            delta.y,
            rotated.azimuth,
            rotated.polar
        );
        *state = rotated;
        true
    }

    pub fn pointer_up(&mut self) {
        self.end();
    }

    pub fn pointer_leave(&mut self) {
        self.end();
    }

    pub fn pointer_cancel(&mut self) {
        self.end();
    }

    /// Drop any pending session without side effects.
    pub fn cancel(&mut self) {
        self.end();
    }

    fn end(&mut self) {
        self.session = None;
    }
}
