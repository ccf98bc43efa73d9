//! Camera distance needed to fit a bounding box in view.

use glam::DVec3;

use super::BoundingBox;
use crate::input::ZoomClamp;

/// Narrowest field of view accepted for framing (radians)
pub const MIN_FIT_FOV: f64 = 1.0 * std::f64::consts::PI / 180.0;
/// Widest field of view accepted for framing (radians)
pub const MAX_FIT_FOV: f64 = 179.0 * std::f64::consts::PI / 180.0;

/// New target and radius produced by framing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Framing {
    pub target: DVec3,
    pub radius: f64,
}

/// Places the camera where the box's largest extent spans the vertical field
/// of view, backed off by a padding factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingFitter {
    /// Distance used for zero-size or unusable bounds
    pub fallback_distance: f64,
    /// Padding used when the caller's factor is unusable
    pub padding_factor: f64,
}

impl BoundingFitter {
    pub fn new(fallback_distance: f64, padding_factor: f64) -> Self {
        Self {
            fallback_distance,
            padding_factor,
        }
    }

    /// Unclamped camera distance for `bounds`.
    ///
    /// `(max_dimension / 2) / tan(fov / 2) * padding`, or the fallback
    /// distance for a degenerate box. Never NaN or infinite.
    pub fn fit_distance(&self, bounds: &BoundingBox, vertical_fov: f64, padding: f64) -> f64 {
        if !bounds.is_finite() {
            log::warn!("bounds {:?} are not finite, using fallback distance", bounds);
            return self.fallback_distance;
        }

        if bounds.is_degenerate() {
            return self.fallback_distance;
        }
        let max_dimension = bounds.max_dimension();

        if !vertical_fov.is_finite() {
            log::warn!("field of view {} is not finite, using fallback distance", vertical_fov);
            return self.fallback_distance;
        }
        let fov = vertical_fov.clamp(MIN_FIT_FOV, MAX_FIT_FOV);
        if fov != vertical_fov {
            log::warn!("field of view {} clamped to {}", vertical_fov, fov);
        }

        let padding = if padding.is_finite() && padding > 0.0 {
            padding
        } else {
            log::warn!(
                "padding {} is unusable, using {}",
                padding,
                self.padding_factor
            );
            self.padding_factor
        };

        (max_dimension / 2.0) / (fov / 2.0).tan() * padding
    }

    /// Target and zoom-clamped radius framing `bounds`.
    pub fn frame(
        &self,
        bounds: &BoundingBox,
        vertical_fov: f64,
        padding: f64,
        zoom: &ZoomClamp,
    ) -> Framing {
        let target = if bounds.is_finite() {
            bounds.center()
        } else {
            DVec3::ZERO
        };
        let distance = self.fit_distance(bounds, vertical_fov, padding);
        Framing {
            target,
            radius: zoom.clamp(distance),
        }
    }
}

impl Default for BoundingFitter {
    fn default() -> Self {
        Self::new(12.0, 1.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> BoundingBox {
        BoundingBox::new(DVec3::splat(-1.0), DVec3::splat(1.0))
    }

    fn wide_zoom() -> ZoomClamp {
        ZoomClamp::new(0.01, 0.1, 1000.0)
    }

    #[test]
    fn test_fit_exactly_spans_fov() {
        let fitter = BoundingFitter::default();
        let fov = 45f64.to_radians();
        let distance = fitter.fit_distance(&unit_box(), fov, 1.0);

        assert!((distance * (fov / 2.0).tan() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_frame_with_default_padding() {
        let fitter = BoundingFitter::default();
        let framing = fitter.frame(&unit_box(), 45f64.to_radians(), 1.5, &wide_zoom());

        assert_eq!(framing.target, DVec3::ZERO);
        assert!((framing.radius - 3.62).abs() < 0.005);
        assert!((framing.radius - 1.5 / 22.5f64.to_radians().tan()).abs() < 1e-12);
    }

    #[test]
    fn test_frame_clamps_to_zoom_range() {
        let fitter = BoundingFitter::default();
        let zoom = ZoomClamp::new(0.01, 6.0, 40.0);

        let near = fitter.frame(&unit_box(), 45f64.to_radians(), 1.5, &zoom);
        assert_eq!(near.radius, 6.0);

        let huge = BoundingBox::new(DVec3::splat(-100.0), DVec3::splat(100.0));
        let far = fitter.frame(&huge, 45f64.to_radians(), 1.5, &zoom);
        assert_eq!(far.radius, 40.0);
    }

    #[test]
    fn test_target_is_box_center() {
        let fitter = BoundingFitter::default();
        let bounds = BoundingBox::new(DVec3::new(2.0, 0.0, -4.0), DVec3::new(6.0, 3.0, 0.0));
        let framing = fitter.frame(&bounds, 45f64.to_radians(), 1.5, &wide_zoom());
        assert_eq!(framing.target, DVec3::new(4.0, 1.5, -2.0));
    }

    #[test]
    fn test_degenerate_box_uses_fallback() {
        let fitter = BoundingFitter::new(12.0, 1.5);
        let bounds = BoundingBox::from_point(DVec3::ZERO);
        let framing = fitter.frame(&bounds, 45f64.to_radians(), 1.5, &wide_zoom());

        assert_eq!(framing.radius, 12.0);
        assert!(framing.radius.is_finite());
        assert_eq!(framing.target, DVec3::ZERO);
    }

    #[test]
    fn test_inverted_box_frames_like_ordered() {
        let fitter = BoundingFitter::default();
        let zoom = ZoomClamp::new(0.01, 0.1, 100.0);
        let inverted = BoundingBox {
            min: DVec3::splat(10.0),
            max: DVec3::splat(-10.0),
        };
        let ordered = BoundingBox::new(DVec3::splat(-10.0), DVec3::splat(10.0));

        let a = fitter.frame(&inverted, 45f64.to_radians(), 1.5, &zoom);
        let b = fitter.frame(&ordered, 45f64.to_radians(), 1.5, &zoom);
        assert!(a.radius > 0.0);
        assert_eq!(a, b);
        assert!((a.radius - 36.21).abs() < 0.01);
    }

    #[test]
    fn test_flat_box_uses_largest_extent() {
        let fitter = BoundingFitter::default();
        let flat = BoundingBox::new(DVec3::new(-3.0, 0.0, -1.0), DVec3::new(3.0, 0.0, 1.0));
        let fov = 60f64.to_radians();
        let distance = fitter.fit_distance(&flat, fov, 1.0);
        assert!((distance - 3.0 / (fov / 2.0).tan()).abs() < 1e-12);
    }

    #[test]
    fn test_unusable_inputs_stay_finite() {
        let fitter = BoundingFitter::default();
        let zoom = wide_zoom();

        for fov in [0.0, -1.0, std::f64::consts::PI, f64::NAN, f64::INFINITY] {
            let framing = fitter.frame(&unit_box(), fov, 1.5, &zoom);
            assert!(framing.radius.is_finite(), "fov {} gave {}", fov, framing.radius);
        }

        for padding in [0.0, -2.0, f64::NAN] {
            let d = fitter.fit_distance(&unit_box(), 45f64.to_radians(), padding);
            let expected = fitter.fit_distance(&unit_box(), 45f64.to_radians(), 1.5);
            assert_eq!(d, expected);
        }

        let broken = BoundingBox {
            min: DVec3::new(f64::NAN, 0.0, 0.0),
            max: DVec3::ONE,
        };
        let framing = fitter.frame(&broken, 45f64.to_radians(), 1.5, &zoom);
        assert_eq!(framing.radius, 12.0);
        assert_eq!(framing.target, DVec3::ZERO);
    }
}
