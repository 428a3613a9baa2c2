//! Camera matrices from a [`CameraFraming`].

use glam::{Mat4, Quat, Vec3};

use crate::params::{CameraFraming, RenderConfig};

/// Fixed camera looking down -Z, yawed by `rotation_y_rad`
#[derive(Debug, Clone)]
pub struct CameraSystem {
    framing: CameraFraming,
}

impl CameraSystem {
    pub fn new(framing: CameraFraming) -> Self {
        Self { framing }
    }

    pub fn framing(&self) -> &CameraFraming {
        &self.framing
    }

    pub fn eye(&self) -> Vec3 {
        self.framing.position
    }

    /// Unit view direction in world space
    pub fn forward(&self) -> Vec3 {
        Quat::from_rotation_y(self.framing.rotation_y_rad) * Vec3::NEG_Z
    }

    /// World-to-view transform
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(
            Quat::from_rotation_y(self.framing.rotation_y_rad),
            self.framing.position,
        )
        .inverse()
    }

    pub fn projection_matrix(&self, aspect_ratio: f32) -> Mat4 {
        Mat4::perspective_rh(
            self.framing.fov_degrees.to_radians(),
            aspect_ratio,
            self.framing.near_m,
            self.framing.far_m,
        )
    }

    /// Combined view-projection matrix for rendering
    pub fn view_proj(&self, render_config: &RenderConfig) -> Mat4 {
        self.projection_matrix(render_config.aspect_ratio()) * self.view_matrix()
    }

    /// Pixels per world unit at view depth 1 (vertical)
    pub fn focal_length_px(&self, image_height: u32) -> f32 {
        let half_fov = self.framing.fov_degrees.to_radians() * 0.5;
        image_height as f32 * 0.5 / half_fov.tan()
    }
}
