//! Gridpulse library - noise-driven animated grid of shapes

pub mod camera;
pub mod clock;
pub mod error;
pub mod grid;
pub mod noise_field;
pub mod panel;
pub mod params;
pub mod preview;
pub mod stage;

pub use error::{ConfigError, Error, Result};
