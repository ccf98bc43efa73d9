//! Orbit camera control for interactive 3D viewers.
//!
//! Pointer drags rotate the camera around a target, the wheel zooms within
//! fixed bounds, and [`OrbitCameraController::frame`] fits an object's
//! bounding box into the vertical field of view. Renderers poll
//! [`OrbitCameraController::current_camera_state`] once per frame.
//!
//! ```
//! use glam::DVec3;
//! use orbitcam::{BoundingBox, OrbitCameraController};
//!
//! let mut controller = OrbitCameraController::default();
//! let fov = 45f64.to_radians();
//!
//! controller.frame(&BoundingBox::new(DVec3::splat(-2.0), DVec3::splat(2.0)), fov);
//! controller.on_pointer_down(100.0, 100.0);
//! controller.on_pointer_move(130.0, 110.0);
//! controller.on_pointer_up();
//! controller.on_wheel(-120.0);
//!
//! let camera = controller.current_camera_state(fov);
//! assert!(camera.position.is_finite());
//! ```

pub mod camera;
pub mod config;
pub mod input;
pub mod scene;

pub use camera::{Attachment, CameraState, CameraUniform, OrbitCameraController, SphericalState};
pub use config::{ConfigError, OrbitConfig};
pub use input::{InputBus, InputEvent, InputSource, ListenerId, Viewport, WinitInput};
pub use scene::{BoundingBox, BoundingFitter, LoadError, Scene, SceneObject, SceneProvider};
