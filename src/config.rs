//! Controller configuration.
//!
//! [`OrbitConfig`] carries every tunable of the orbit controller: input
//! sensitivities, zoom bounds, the polar-angle margin and the framing
//! defaults. Construct it with [`Default`] and adjust with the `with_*`
//! setters, then validate before handing it to a controller.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_4};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Zoom range is empty: min {min} > max {max}")]
    InvalidZoomRange { min: f64, max: f64 },
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },
    #[error("Polar epsilon must lie in (0, pi/2), got {0}")]
    PolarEpsilon(f64),
    #[error("{field} is not a finite number")]
    NonFinite { field: &'static str },
    #[error("Fallback distance {value} lies outside zoom range [{min}, {max}]")]
    FallbackOutOfRange { value: f64, min: f64, max: f64 },
}

/// Tunables for the orbit controller.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitConfig {
    /// Drag rotation sensitivity (radians per pixel)
    pub rotate_speed: f64,
    /// Wheel zoom sensitivity (radius units per wheel delta unit)
    pub zoom_speed: f64,
    /// Closest allowed camera distance
    pub min_zoom: f64,
    /// Farthest allowed camera distance
    pub max_zoom: f64,
    /// Margin kept between the polar angle and the poles (radians)
    pub polar_epsilon: f64,
    /// Distance used when framing a zero-size bounding box
    pub fallback_distance: f64,
    /// Default margin multiplier applied when framing
    pub padding_factor: f64,
    /// Radius at construction and after a view reset
    pub initial_radius: f64,
    /// Azimuth at construction and after a view reset (radians)
    pub initial_azimuth: f64,
    /// Polar angle at construction and after a view reset (radians)
    pub initial_polar: f64,
    /// Vertical field of view used by hosts that do not supply one (degrees)
    pub vertical_fov_degrees: f64,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            rotate_speed: 0.01,
            zoom_speed: 0.01,
            min_zoom: 6.0,
            max_zoom: 40.0,
            polar_epsilon: 0.1,
            fallback_distance: 12.0,
            padding_factor: 1.5,
            initial_radius: 12.0,
            initial_azimuth: FRAC_PI_4,
            initial_polar: FRAC_PI_3,
            vertical_fov_degrees: 45.0,
        }
    }
}

impl OrbitConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_zoom_range(mut self, min_zoom: f64, max_zoom: f64) -> Self {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self
    }

    pub fn with_rotate_speed(mut self, rotate_speed: f64) -> Self {
        self.rotate_speed = rotate_speed;
        self
    }

    pub fn with_zoom_speed(mut self, zoom_speed: f64) -> Self {
        self.zoom_speed = zoom_speed;
        self
    }

    pub fn with_polar_epsilon(mut self, polar_epsilon: f64) -> Self {
        self.polar_epsilon = polar_epsilon;
        self
    }

    pub fn with_fallback_distance(mut self, fallback_distance: f64) -> Self {
        self.fallback_distance = fallback_distance;
        self
    }

    pub fn with_padding_factor(mut self, padding_factor: f64) -> Self {
        self.padding_factor = padding_factor;
        self
    }

    pub fn with_initial_radius(mut self, initial_radius: f64) -> Self {
        self.initial_radius = initial_radius;
        self
    }

    pub fn with_vertical_fov_degrees(mut self, degrees: f64) -> Self {
        self.vertical_fov_degrees = degrees;
        self
    }

    /// Vertical field of view in radians.
    pub fn vertical_fov(&self) -> f64 {
        self.vertical_fov_degrees.to_radians()
    }

    /// Check every field for a usable value.
    ///
    /// Initial radius and polar angle are not rejected when outside their
    /// bounds; the controller clamps them at construction. The fallback
    /// distance must lie inside the zoom range so a zero-size box frames at
    /// exactly that distance.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("rotate_speed", self.rotate_speed),
            ("zoom_speed", self.zoom_speed),
            ("min_zoom", self.min_zoom),
            ("max_zoom", self.max_zoom),
            ("polar_epsilon", self.polar_epsilon),
            ("fallback_distance", self.fallback_distance),
            ("padding_factor", self.padding_factor),
            ("initial_radius", self.initial_radius),
            ("initial_azimuth", self.initial_azimuth),
            ("initial_polar", self.initial_polar),
            ("vertical_fov_degrees", self.vertical_fov_degrees),
        ];
        if let Some(&(field, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::NonFinite { field });
        }

        let positive = [
            ("rotate_speed", self.rotate_speed),
            ("zoom_speed", self.zoom_speed),
            ("min_zoom", self.min_zoom),
            ("fallback_distance", self.fallback_distance),
            ("padding_factor", self.padding_factor),
            ("vertical_fov_degrees", self.vertical_fov_degrees),
        ];
        if let Some(&(field, value)) = positive.iter().find(|(_, v)| *v <= 0.0) {
            return Err(ConfigError::NonPositive { field, value });
        }

        if self.min_zoom > self.max_zoom {
            return Err(ConfigError::InvalidZoomRange {
                min: self.min_zoom,
                max: self.max_zoom,
            });
        }

        if self.fallback_distance < self.min_zoom || self.fallback_distance > self.max_zoom {
            return Err(ConfigError::FallbackOutOfRange {
                value: self.fallback_distance,
                min: self.min_zoom,
                max: self.max_zoom,
            });
        }

        if self.polar_epsilon <= 0.0 || self.polar_epsilon >= FRAC_PI_2 {
            return Err(ConfigError::PolarEpsilon(self.polar_epsilon));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = OrbitConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.min_zoom, 6.0);
        assert_eq!(config.max_zoom, 40.0);
    }

    #[test]
    fn test_inverted_zoom_range() {
        let config = OrbitConfig::new().with_zoom_range(50.0, 10.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidZoomRange { .. })
        ));
    }

    #[test]
    fn test_equal_zoom_bounds_allowed() {
        let config = OrbitConfig::new()
            .with_zoom_range(10.0, 10.0)
            .with_fallback_distance(10.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_fallback_outside_zoom_range() {
        let config = OrbitConfig::new().with_fallback_distance(3.0);
        assert_eq!(
            config.validate(),
            Err(ConfigError::FallbackOutOfRange {
                value: 3.0,
                min: 6.0,
                max: 40.0
            })
        );

        let config = OrbitConfig::new().with_fallback_distance(41.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::FallbackOutOfRange { .. })
        ));

        let config = OrbitConfig::new().with_fallback_distance(6.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_non_positive_speed() {
        let config = OrbitConfig::new().with_rotate_speed(0.0);
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositive {
                field: "rotate_speed",
                value: 0.0
            })
        );
    }

    #[test]
    fn test_polar_epsilon_range() {
        let config = OrbitConfig::new().with_polar_epsilon(2.0);
        assert_eq!(config.validate(), Err(ConfigError::PolarEpsilon(2.0)));
    }

    #[test]
    fn test_nan_rejected() {
        let config = OrbitConfig::new().with_zoom_speed(f64::NAN);
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonFinite {
                field: "zoom_speed"
            })
        );
    }

    #[test]
    fn test_vertical_fov_radians() {
        let config = OrbitConfig::new().with_vertical_fov_degrees(90.0);
        assert!((config.vertical_fov() - FRAC_PI_2).abs() < 1e-12);
    }
}
