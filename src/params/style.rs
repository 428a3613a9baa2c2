//! Cosmetic scene parameters: colors, fog, and lighting.
//!
//! Nothing here affects grid generation; changes go through the cheap cosmetic path.

use std::fmt;
use std::str::FromStr;

use glam::Vec3;

use crate::error::{ensure_finite, ensure_non_negative, ConfigError};

/// Linear RGB color with components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    pub fn to_rgb8(self) -> [u8; 3] {
        let quantize = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [quantize(self.r), quantize(self.g), quantize(self.b)]
    }

    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.r, self.g, self.b)
    }

    pub fn from_vec3(v: Vec3) -> Self {
        Self {
            r: v.x,
            g: v.y,
            b: v.z,
        }
    }
}

impl FromStr for Color {
    type Err = ConfigError;

    /// Parse `#RRGGBB` (the leading `#` is optional)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidColor(s.to_string());
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
        };
        Ok(Self::from_rgb8(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.to_rgb8();
        write!(f, "#{:02X}{:02X}{:02X}", r, g, b)
    }
}

/// Linear distance fog
#[derive(Debug, Clone, PartialEq)]
pub struct FogParams {
    pub color: Color,

    /// Distance from the camera where fog starts (world units)
    pub near_m: f32,

    /// Distance where objects are fully fogged (world units)
    pub far_m: f32,
}

impl Default for FogParams {
    fn default() -> Self {
        Self {
            color: Color::from_rgb8(0xFB, 0xF3, 0xFF),
            near_m: 40.0,
            far_m: 60.0,
        }
    }
}

impl FogParams {
    /// Fog blend factor at a view distance: 0 = clear, 1 = fully fogged
    pub fn factor(&self, distance: f32) -> f32 {
        ((distance - self.near_m) / (self.far_m - self.near_m)).clamp(0.0, 1.0)
    }
}

/// Directional sun plus flat ambient term
#[derive(Debug, Clone, PartialEq)]
pub struct LightingParams {
    pub sun_color: Color,

    pub sun_intensity: f32,

    /// Sun sits this far behind the camera along +Z (world units)
    pub sun_offset_z_m: f32,

    /// Blueish white by default
    pub ambient_color: Color,

    pub ambient_intensity: f32,
}

impl Default for LightingParams {
    fn default() -> Self {
        Self {
            sun_color: Color::WHITE,
            sun_intensity: 2.0,
            sun_offset_z_m: 10.0,
            ambient_color: Color::from_rgb8(0xAA, 0xAA, 0xFF),
            ambient_intensity: 0.5,
        }
    }
}

impl LightingParams {
    /// Sun position for a camera at `camera_position`
    pub fn sun_position(&self, camera_position: Vec3) -> Vec3 {
        camera_position + Vec3::Z * self.sun_offset_z_m
    }
}

/// Everything the cosmetic path can change
#[derive(Debug, Clone, PartialEq)]
pub struct SceneStyle {
    /// Background color
    pub clear_color: Color,

    /// Base color of every element
    pub item_color: Color,

    pub fog: FogParams,

    pub lighting: LightingParams,
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self {
            clear_color: Color::from_rgb8(0xAA, 0xAA, 0xFF),
            item_color: Color::WHITE,
            fog: FogParams::default(),
            lighting: LightingParams::default(),
        }
    }
}

impl SceneStyle {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_non_negative("fog_near", self.fog.near_m)?;
        ensure_non_negative("fog_far", self.fog.far_m)?;
        if self.fog.near_m >= self.fog.far_m {
            return Err(ConfigError::FogRange {
                near: self.fog.near_m,
                far: self.fog.far_m,
            });
        }
        ensure_non_negative("sun_intensity", self.lighting.sun_intensity)?;
        ensure_non_negative("ambient_intensity", self.lighting.ambient_intensity)?;
        ensure_finite("sun_offset_z", self.lighting.sun_offset_z_m)?;
        Ok(())
    }
}
