//! Scene bounding volumes.
//!
//! This module provides:
//! - [`BoundingBox`] - axis-aligned box with derived center and size
//! - [`SceneProvider`] - anything that can report the bounds of what is viewed
//! - [`Scene`] - a list of named objects with a current selection
//! - [`load_scene`] - parser for scene description files
//! - [`BoundingFitter`] - camera distance needed to fit a box in view

pub mod fit;
pub mod loader;

use glam::DVec3;

pub use fit::BoundingFitter;
pub use loader::{load_scene, parse_scene_content, LoadError};

/// Axis-aligned bounding box.
///
/// [`BoundingBox::new`] orders each component so `min <= max`. Boxes built
/// from a struct literal may be inverted; derived extents are taken as
/// absolute values either way.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: DVec3,
    pub max: DVec3,
}

impl BoundingBox {
    pub fn new(a: DVec3, b: DVec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Zero-size box at `point`.
    pub fn from_point(point: DVec3) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// Smallest ordered box enclosing both boxes.
    pub fn union(&self, other: &BoundingBox) -> Self {
        Self {
            min: self.min.min(self.max).min(other.min.min(other.max)),
            max: self.max.max(self.min).max(other.max.max(other.min)),
        }
    }

    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    /// Extent along each axis, never negative.
    pub fn size(&self) -> DVec3 {
        (self.max - self.min).abs()
    }

    /// Largest extent along any axis.
    pub fn max_dimension(&self) -> f64 {
        self.size().max_element()
    }

    pub fn is_degenerate(&self) -> bool {
        self.max_dimension() == 0.0
    }

    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }
}

/// Source of the bounding volume currently being viewed.
pub trait SceneProvider {
    fn bounding_box(&self) -> BoundingBox;
}

impl SceneProvider for BoundingBox {
    fn bounding_box(&self) -> BoundingBox {
        *self
    }
}

/// A named object in a scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub name: String,
    pub bounds: BoundingBox,
}

/// Named objects with one current selection.
///
/// As a [`SceneProvider`] it reports the bounds of the selected object.
#[derive(Debug, Clone)]
pub struct Scene {
    objects: Vec<SceneObject>,
    current: usize,
}

impl Scene {
    /// Create a scene. Returns `None` when `objects` is empty.
    pub fn new(objects: Vec<SceneObject>) -> Option<Self> {
        if objects.is_empty() {
            return None;
        }
        Some(Self {
            objects,
            current: 0,
        })
    }

    /// A few boxes of different proportions, for use without a scene file.
    pub fn demo() -> Self {
        let object = |name: &str, min: [f64; 3], max: [f64; 3]| SceneObject {
            name: name.to_string(),
            bounds: BoundingBox::new(DVec3::from(min), DVec3::from(max)),
        };
        Self {
            objects: vec![
                object("cube", [-1.0, -1.0, -1.0], [1.0, 1.0, 1.0]),
                object("table", [-4.0, 0.0, -2.5], [4.0, 3.0, 2.5]),
                object("wardrobe", [-3.0, 0.0, -1.5], [3.0, 9.0, 1.5]),
                object("shelf", [-10.0, 0.0, -1.0], [10.0, 12.0, 1.0]),
                object("marker", [0.0, 0.0, 0.0], [0.0, 0.0, 0.0]),
            ],
            current: 0,
        }
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn current(&self) -> &SceneObject {
        &self.objects[self.current]
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Select the next object, wrapping around.
    pub fn select_next(&mut self) -> &SceneObject {
        self.current = (self.current + 1) % self.objects.len();
        self.current()
    }

    /// Select the previous object, wrapping around.
    pub fn select_previous(&mut self) -> &SceneObject {
        self.current = (self.current + self.objects.len() - 1) % self.objects.len();
        self.current()
    }

    /// Select an object by name. Returns false if there is none.
    pub fn select(&mut self, name: &str) -> bool {
        match self.objects.iter().position(|o| o.name == name) {
            Some(index) => {
                self.current = index;
                true
            }
            None => false,
        }
    }

    /// Bounds enclosing every object.
    pub fn total_bounds(&self) -> BoundingBox {
        self.objects
            .iter()
            .skip(1)
            .fold(self.objects[0].bounds, |acc, o| acc.union(&o.bounds))
    }
}

impl SceneProvider for Scene {
    fn bounding_box(&self) -> BoundingBox {
        self.current().bounds
    }
}
