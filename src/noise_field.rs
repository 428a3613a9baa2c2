//! Noise field driving grid displacement.
//!
//! Wraps a seeded lattice noise from the `noise` crate behind a small `f32` API.
//! The field is immutable after construction, so one instance is shared by every
//! element on every frame (and across rayon workers).

use std::fmt;
use std::str::FromStr;

use noise::{NoiseFn, OpenSimplex, Perlin};

use crate::error::{ConfigError, Error, Result};

/// Noise algorithm backing a [`NoiseField`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoiseKind {
    /// OpenSimplex: smooth, no axis-aligned artifacts
    #[default]
    OpenSimplex,
    /// Classic gradient noise (zero at every lattice point)
    Perlin,
}

impl FromStr for NoiseKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "simplex" | "opensimplex" => Ok(Self::OpenSimplex),
            "perlin" => Ok(Self::Perlin),
            other => Err(ConfigError::UnknownNoise(other.to_string())),
        }
    }
}

impl fmt::Display for NoiseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenSimplex => f.write_str("simplex"),
            Self::Perlin => f.write_str("perlin"),
        }
    }
}

enum Source {
    OpenSimplex(OpenSimplex),
    Perlin(Perlin),
}

/// Deterministic 3D scalar noise `N(x, y, t)` with output in `[-1, 1]`
pub struct NoiseField {
    source: Source,
    kind: NoiseKind,
    seed: u32,
}

impl NoiseField {
    /// Create an OpenSimplex field with the given seed
    pub fn new(seed: u32) -> Self {
        Self::with_kind(NoiseKind::OpenSimplex, seed)
    }

    /// Create a field using a specific algorithm
    pub fn with_kind(kind: NoiseKind, seed: u32) -> Self {
        let source = match kind {
            NoiseKind::OpenSimplex => Source::OpenSimplex(OpenSimplex::new(seed)),
            NoiseKind::Perlin => Source::Perlin(Perlin::new(seed)),
        };
        Self { source, kind, seed }
    }

    pub fn kind(&self) -> NoiseKind {
        self.kind
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Sample the field, rejecting non-finite coordinates.
    ///
    /// Returns a value in `[-1, 1]`.
    pub fn try_sample(&self, x: f32, y: f32, t: f32) -> Result<f32> {
        if !(x.is_finite() && y.is_finite() && t.is_finite()) {
            return Err(Error::NoiseEvaluation { x, y, t });
        }

        let point = [x as f64, y as f64, t as f64];
        let value = match &self.source {
            Source::OpenSimplex(simplex) => simplex.get(point),
            Source::Perlin(perlin) => perlin.get(point),
        };
        let value = value as f32;

        if value.is_nan() {
            return Err(Error::NoiseEvaluation { x, y, t });
        }
        Ok(value.clamp(-1.0, 1.0))
    }

    /// Sample the field; rejected inputs yield `0.0` (no displacement) instead of NaN.
    pub fn sample(&self, x: f32, y: f32, t: f32) -> f32 {
        self.try_sample(x, y, t).unwrap_or(0.0)
    }
}

impl fmt::Debug for NoiseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoiseField")
            .field("kind", &self.kind)
            .field("seed", &self.seed)
            .finish()
    }
}
