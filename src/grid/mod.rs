//! Procedural grid of shapes animated by a noise field.

mod animator;
mod layout;
mod scene;

// Re-export public types
pub use animator::GridAnimator;
pub use layout::{centered_position, sampling_coords, GridElement};
pub use scene::{InstanceRaw, InstanceScene, ObjectHandle, Scene, SceneObject};

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_centered_position() {
        assert_eq!(centered_position(0, 0, 10, 10), Vec2::new(-4.5, -4.5));
        assert_eq!(centered_position(9, 9, 10, 10), Vec2::new(4.5, 4.5));

        // Odd counts put the middle element on the origin
        assert_eq!(centered_position(1, 2, 3, 5), Vec2::ZERO);
    }

    #[test]
    fn test_sampling_coords_use_row_modulus() {
        assert_eq!(sampling_coords(23, 10), (3, 2));
        assert_eq!(sampling_coords(0, 40), (0, 0));
        assert_eq!(sampling_coords(45, 40), (5, 1));
    }

    #[test]
    fn test_element_local_position() {
        let mut element = GridElement::new(1, 2, Vec2::new(0.5, -1.5), ObjectHandle::new(7));
        assert_eq!(element.scale_factor, 1.0);

        element.displacement_z = 0.25;
        assert_eq!(element.local_position(), glam::Vec3::new(0.5, -1.5, 0.25));
    }
}
