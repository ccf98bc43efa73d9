//! Camera state and the orbit controller that produces it.
//!
//! This module provides:
//! - [`SphericalState`] and the cartesian conversions in [`spherical`]
//! - [`OrbitCameraController`] - owns the orbit state and reacts to input
//! - [`CameraState`] - the read-only snapshot handed to a renderer

pub mod controller;
pub mod spherical;

use glam::{DMat4, DVec3, Mat4};

pub use controller::{Attachment, OrbitCameraController};
pub use spherical::{from_cartesian, to_cartesian, SphericalState};

/// Camera snapshot derived from a target and a [`SphericalState`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    /// Eye position in world space
    pub position: DVec3,
    /// Look-at target point
    pub target: DVec3,
    /// Vertical field of view (radians)
    pub vertical_fov_radians: f64,
}

impl CameraState {
    /// Build view matrix (camera transform)
    pub fn view_matrix(&self) -> DMat4 {
        DMat4::look_at_rh(self.position, self.target, DVec3::Y)
    }

    /// Build perspective projection matrix
    pub fn projection_matrix(&self, aspect: f64, near: f64, far: f64) -> DMat4 {
        DMat4::perspective_rh(self.vertical_fov_radians, aspect, near, far)
    }

    /// Combined view-projection matrix
    pub fn view_projection_matrix(&self, aspect: f64, near: f64, far: f64) -> DMat4 {
        self.projection_matrix(aspect, near, far) * self.view_matrix()
    }

    /// Distance between eye and target.
    pub fn distance(&self) -> f64 {
        self.position.distance(self.target)
    }

    /// Pack into a GPU uniform.
    pub fn to_uniform(&self, aspect: f64, near: f64, far: f64) -> CameraUniform {
        let view_proj = self.view_projection_matrix(aspect, near, far).as_mat4();
        let eye = self.position.as_vec3();
        CameraUniform {
            view_proj: view_proj.to_cols_array_2d(),
            eye: eye.to_array(),
            _pad: 0.0,
        }
    }
}

/// Uniform data a renderer can upload as-is.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    view_proj: [[f32; 4]; 4],
    eye: [f32; 3],
    _pad: f32,
}

impl CameraUniform {
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            eye: [0.0; 3],
            _pad: 0.0,
        }
    }

    pub fn view_proj(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.view_proj)
    }

    pub fn eye(&self) -> [f32; 3] {
        self.eye
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}
