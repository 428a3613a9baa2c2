//! Error types for gridpulse

use thiserror::Error;

/// Reasons a grid configuration, style, or parameter edit is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid must have at least one column")]
    ZeroColumns,

    #[error("grid must have at least one row")]
    ZeroRows,

    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f32 },

    #[error("unknown element shape '{0}' (expected 'box' or 'sphere')")]
    UnknownShape(String),

    #[error("unknown noise algorithm '{0}' (expected 'simplex' or 'perlin')")]
    UnknownNoise(String),

    #[error("invalid color '{0}' (expected #RRGGBB)")]
    InvalidColor(String),

    #[error("fog start ({near}) must be closer than fog end ({far})")]
    FogRange { near: f32, far: f32 },

    #[error("camera field of view must be within (0, 180) degrees, got {0}")]
    FieldOfView(f32),

    #[error("camera far plane ({far}) must be beyond near plane ({near})")]
    ClipRange { near: f32, far: f32 },

    #[error("unknown parameter '{0}'")]
    UnknownParameter(String),

    #[error("invalid value '{value}' for parameter '{key}'")]
    InvalidValue { key: String, value: String },
}

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Noise evaluation error: non-finite input ({x}, {y}, {t})")]
    NoiseEvaluation { x: f32, y: f32, t: f32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Reject NaN and infinities for a named parameter.
pub(crate) fn ensure_finite(field: &'static str, value: f32) -> std::result::Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field, value })
    }
}

/// Reject non-positive (and non-finite) values for a named parameter.
pub(crate) fn ensure_positive(field: &'static str, value: f32) -> std::result::Result<(), ConfigError> {
    ensure_finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

/// Reject negative (and non-finite) values for a named parameter.
pub(crate) fn ensure_non_negative(
    field: &'static str,
    value: f32,
) -> std::result::Result<(), ConfigError> {
    ensure_finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}
