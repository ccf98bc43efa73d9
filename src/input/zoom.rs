//! Wheel zoom with saturating bounds.

/// Turns wheel deltas into a radius within `[min_zoom, max_zoom]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomClamp {
    /// Radius change per unit of wheel delta
    pub zoom_speed: f64,
    /// Minimum camera distance
    pub min_zoom: f64,
    /// Maximum camera distance
    pub max_zoom: f64,
}

impl ZoomClamp {
    pub fn new(zoom_speed: f64, min_zoom: f64, max_zoom: f64) -> Self {
        Self {
            zoom_speed,
            min_zoom,
            max_zoom,
        }
    }

    /// Clamp a distance into the zoom range. NaN maps to `min_zoom`.
    pub fn clamp(&self, radius: f64) -> f64 {
        if radius.is_nan() {
            return self.min_zoom;
        }
        radius.clamp(self.min_zoom, self.max_zoom)
    }

    /// Radius after applying a wheel delta. Positive deltas zoom out.
    pub fn wheel(&self, radius: f64, delta_y: f64) -> f64 {
        if !delta_y.is_finite() {
            return self.clamp(radius);
        }
        self.clamp(radius + delta_y * self.zoom_speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wheel_step() {
        let zoom = ZoomClamp::new(0.01, 6.0, 40.0);
        let radius = zoom.wheel(12.0, 100.0);
        assert!((radius - 13.0).abs() < 1e-12);
    }

    #[test]
    fn test_zoom_limits() {
        let zoom = ZoomClamp::new(0.01, 6.0, 40.0);

        // Zoom way out
        let mut radius = 12.0;
        for _ in 0..100 {
            radius = zoom.wheel(radius, 100.0);
            assert!(radius <= 40.0);
        }
        assert_eq!(radius, 40.0);

        // Zoom way in
        for _ in 0..100 {
            radius = zoom.wheel(radius, -100.0);
            assert!(radius >= 6.0);
        }
        assert_eq!(radius, 6.0);
    }

    #[test]
    fn test_non_finite_inputs() {
        let zoom = ZoomClamp::new(0.01, 6.0, 40.0);
        assert_eq!(zoom.wheel(12.0, f64::NAN), 12.0);
        assert_eq!(zoom.wheel(12.0, f64::INFINITY), 12.0);
        assert_eq!(zoom.clamp(f64::NAN), 6.0);
        assert_eq!(zoom.clamp(f64::INFINITY), 40.0);
    }
}
