//! Conversions between cartesian offsets and spherical coordinates.
//!
//! The convention is +Y up: the polar angle is measured from +Y, and the
//! azimuth is measured around +Y starting at +Z and turning toward +X.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use glam::DVec3;

/// Orbit parameters around a target point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalState {
    /// Distance from target
    pub radius: f64,
    /// Horizontal angle around the vertical axis (radians, unbounded)
    pub azimuth: f64,
    /// Angle from the vertical axis (radians)
    pub polar: f64,
}

impl SphericalState {
    pub fn new(radius: f64, azimuth: f64, polar: f64) -> Self {
        Self {
            radius,
            azimuth,
            polar,
        }
    }

    /// Azimuth wrapped into `[0, 2π)`, for display only.
    pub fn azimuth_display(&self) -> f64 {
        let wrapped = self.azimuth.rem_euclid(TAU);
        // rem_euclid can round up to exactly TAU for tiny negative inputs
        if wrapped >= TAU {
            0.0
        } else {
            wrapped
        }
    }

    /// Copy with the radius clamped to `[min_radius, max_radius]` and the
    /// polar angle kept `polar_epsilon` away from both poles.
    pub fn clamped(self, min_radius: f64, max_radius: f64, polar_epsilon: f64) -> Self {
        Self {
            radius: self.radius.clamp(min_radius, max_radius),
            azimuth: self.azimuth,
            polar: clamp_polar(self.polar, polar_epsilon),
        }
    }
}

impl Default for SphericalState {
    /// Canonical state for an undefined direction.
    fn default() -> Self {
        Self {
            radius: 0.0,
            azimuth: 0.0,
            polar: FRAC_PI_2,
        }
    }
}

/// Keep a polar angle within `[epsilon, π - epsilon]`.
///
/// NaN collapses to the equator so it can never reach the camera position.
pub fn clamp_polar(polar: f64, epsilon: f64) -> f64 {
    if polar.is_nan() {
        return FRAC_PI_2;
    }
    polar.clamp(epsilon, PI - epsilon)
}

/// Position on the sphere described by `state` around `target`.
pub fn to_cartesian(target: DVec3, state: &SphericalState) -> DVec3 {
    let (sin_polar, cos_polar) = state.polar.sin_cos();
    let (sin_azimuth, cos_azimuth) = state.azimuth.sin_cos();
    target
        + DVec3::new(
            state.radius * sin_polar * sin_azimuth,
            state.radius * cos_polar,
            state.radius * sin_polar * cos_azimuth,
        )
}

/// Spherical coordinates of `position` relative to `target`.
///
/// Returns [`SphericalState::default`] when the two points coincide.
pub fn from_cartesian(target: DVec3, position: DVec3) -> SphericalState {
    let offset = position - target;
    let radius = offset.length();
    if radius == 0.0 {
        return SphericalState::default();
    }

    SphericalState {
        radius,
        azimuth: offset.x.atan2(offset.z),
        polar: (offset.y / radius).clamp(-1.0, 1.0).acos(),
    }
}
