//! Parameter definitions with units and documented semantics.
//!
//! Split by how expensive a change is:
//! - grid: structural (rebuild) and live (animation law) parameters
//! - style, camera: cosmetic, never touch grid elements
//! - render: preview image and recording setup

mod camera;
mod grid;
mod render;
mod style;

// Re-export all types
pub use camera::CameraFraming;
pub use grid::{ConfigChange, ElementShape, GridConfig};
pub use render::{RecordingConfig, RenderConfig};
pub use style::{Color, FogParams, LightingParams, SceneStyle};
