//! Grid layout and animation parameters.

use std::fmt;
use std::str::FromStr;

use crate::error::{ensure_finite, ensure_positive, ConfigError};

/// Geometry used for every element of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ElementShape {
    /// Cube with edge length `element_size`
    #[default]
    Box,
    /// Sphere with radius `element_size`
    Sphere,
}

impl FromStr for ElementShape {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "box" => Ok(Self::Box),
            "sphere" => Ok(Self::Sphere),
            other => Err(ConfigError::UnknownShape(other.to_string())),
        }
    }
}

impl fmt::Display for ElementShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Box => f.write_str("box"),
            Self::Sphere => f.write_str("sphere"),
        }
    }
}

/// How a new [`GridConfig`] differs from the one currently applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigChange {
    /// Nothing to do
    Unchanged,
    /// Only the animation law changed; existing elements are kept
    Live,
    /// Dimensions or geometry changed; the grid must be rebuilt
    Structural,
}

/// Grid generation and animation parameters.
///
/// Replaced wholesale on every change, never edited in place by the animator.
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    /// Elements along X (>= 1)
    pub columns: u32,

    /// Elements along Y (>= 1)
    pub rows: u32,

    /// Geometry of every element
    pub element_shape: ElementShape,

    /// Edge length (box) or radius (sphere) in world units
    pub element_size: f32,

    /// Grid-index to noise-space multiplier (> 0, lower = smoother waves)
    pub noise_scale: f32,

    /// Displacement along Z per unit of noise (world units)
    pub noise_amplitude: f32,

    /// Scale elements with the noise value as well as displacing them
    pub pulse_enabled: bool,

    /// Scale change per unit of noise (0.1 = +/-10%)
    pub pulse_amplitude: f32,

    /// Noise time units per second of elapsed time
    pub animation_speed: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: 80,
            rows: 40,
            element_shape: ElementShape::Box,
            element_size: 1.0,
            noise_scale: 1.0,
            noise_amplitude: 0.5,
            pulse_enabled: false,
            pulse_amplitude: 0.1,
            animation_speed: 0.1, // 0.0001 per millisecond
        }
    }
}

impl GridConfig {
    /// Number of elements a rebuild with this config produces
    pub fn element_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns == 0 {
            return Err(ConfigError::ZeroColumns);
        }
        if self.rows == 0 {
            return Err(ConfigError::ZeroRows);
        }
        ensure_positive("element_size", self.element_size)?;
        ensure_positive("noise_scale", self.noise_scale)?;
        ensure_finite("noise_amplitude", self.noise_amplitude)?;
        ensure_finite("pulse_amplitude", self.pulse_amplitude)?;
        ensure_finite("animation_speed", self.animation_speed)?;
        Ok(())
    }

    /// Classify the change from `self` to `next`
    pub fn change_kind(&self, next: &GridConfig) -> ConfigChange {
        let structural = self.columns != next.columns
            || self.rows != next.rows
            || self.element_shape != next.element_shape
            || self.element_size != next.element_size;

        if structural {
            ConfigChange::Structural
        } else if self == next {
            ConfigChange::Unchanged
        } else {
            ConfigChange::Live
        }
    }
}
