//! Grid element layout: centering and index/coordinate mapping.

use glam::{Vec2, Vec3};

use super::scene::ObjectHandle;

/// One positioned, shaped object in the grid
#[derive(Debug, Clone, PartialEq)]
pub struct GridElement {
    pub grid_x: u32,
    pub grid_y: u32,

    /// Position in the grid plane, fixed at creation
    pub base_position: Vec2,

    /// Offset along Z from the last update
    pub displacement_z: f32,

    /// Uniform scale from the last pulsing update (1.0 until pulsing writes it)
    pub scale_factor: f32,

    /// Materialized representation in the scene
    pub handle: ObjectHandle,
}

impl GridElement {
    pub fn new(grid_x: u32, grid_y: u32, base_position: Vec2, handle: ObjectHandle) -> Self {
        Self {
            grid_x,
            grid_y,
            base_position,
            displacement_z: 0.0,
            scale_factor: 1.0,
            handle,
        }
    }

    /// Base position plus current displacement
    pub fn local_position(&self) -> Vec3 {
        self.base_position.extend(self.displacement_z)
    }
}

/// Position of cell `(grid_x, grid_y)` in a grid centered on the origin
pub fn centered_position(grid_x: u32, grid_y: u32, columns: u32, rows: u32) -> Vec2 {
    Vec2::new(
        grid_x as f32 - columns as f32 / 2.0 + 0.5,
        grid_y as f32 - rows as f32 / 2.0 + 0.5,
    )
}

/// Noise-sampling coordinates for the element at linear `index`.
///
/// The modulus is `rows`, not `columns`. Generation and animation both rely on
/// this exact mapping, so it must not be "corrected" to the row-major inverse.
pub fn sampling_coords(index: usize, rows: u32) -> (u32, u32) {
    let rows = rows.max(1) as usize;
    ((index % rows) as u32, (index / rows) as u32)
}
