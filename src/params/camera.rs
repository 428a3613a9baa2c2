//! Camera framing parameters.

use glam::Vec3;

use crate::error::{ensure_finite, ensure_positive, ConfigError};

/// Where the camera sits and how wide it sees
#[derive(Debug, Clone, PartialEq)]
pub struct CameraFraming {
    /// Vertical field of view (degrees)
    pub fov_degrees: f32,

    /// Camera position (world units)
    pub position: Vec3,

    /// Yaw around +Y (radians, positive turns the view toward -X)
    pub rotation_y_rad: f32,

    /// Near clipping plane (world units)
    pub near_m: f32,

    /// Far clipping plane (world units)
    pub far_m: f32,
}

impl Default for CameraFraming {
    fn default() -> Self {
        Self {
            fov_degrees: 55.0,
            position: Vec3::new(-3.0, 2.0, 10.0), // Slightly left of and above the grid center
            rotation_y_rad: 0.3,
            near_m: 0.1,
            far_m: 1000.0,
        }
    }
}

impl CameraFraming {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(ConfigError::FieldOfView(self.fov_degrees));
        }
        ensure_finite("camera_x", self.position.x)?;
        ensure_finite("camera_y", self.position.y)?;
        ensure_finite("camera_z", self.position.z)?;
        ensure_finite("camera_rotation_y", self.rotation_y_rad)?;
        ensure_positive("camera_near", self.near_m)?;
        ensure_finite("camera_far", self.far_m)?;
        if self.far_m <= self.near_m {
            return Err(ConfigError::ClipRange {
                near: self.near_m,
                far: self.far_m,
            });
        }
        Ok(())
    }
}
