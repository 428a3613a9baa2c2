//! Grid generation and per-frame noise animation.

use glam::Vec3;
use rayon::prelude::*;

use super::layout::{centered_position, sampling_coords, GridElement};
use super::scene::Scene;
use crate::error::Result;
use crate::noise_field::NoiseField;
use crate::params::{ConfigChange, GridConfig};

/// Owns the grid elements and drives them from a [`NoiseField`]
#[derive(Debug)]
pub struct GridAnimator {
    noise: NoiseField,
    config: Option<GridConfig>,
    elements: Vec<GridElement>,
}

impl GridAnimator {
    /// Create an animator with an empty grid
    pub fn new(noise: NoiseField) -> Self {
        Self {
            noise,
            config: None,
            elements: Vec::new(),
        }
    }

    /// Last successfully applied configuration
    pub fn config(&self) -> Option<&GridConfig> {
        self.config.as_ref()
    }

    pub fn elements(&self) -> &[GridElement] {
        &self.elements
    }

    pub fn noise(&self) -> &NoiseField {
        &self.noise
    }

    /// Discard the current grid and generate a new one from `config`.
    ///
    /// Validation happens before anything is touched: on error the previous
    /// grid, its scene objects, and the previous config are left as they were.
    ///
    /// Elements are created row by row (`grid_x` fastest), each materialized at
    /// its centered base position with zero displacement.
    pub fn rebuild<S: Scene + ?Sized>(&mut self, config: GridConfig, scene: &mut S) -> Result<()> {
        if let Err(err) = config.validate() {
            log::warn!("Rejected grid configuration: {}", err);
            return Err(err.into());
        }

        let removed = self.elements.len();
        for element in self.elements.drain(..) {
            scene.remove_object(element.handle);
        }

        self.elements.reserve(config.element_count());
        for grid_y in 0..config.rows {
            for grid_x in 0..config.columns {
                let base = centered_position(grid_x, grid_y, config.columns, config.rows);
                let handle = scene.add_object(config.element_shape, config.element_size);
                scene.set_local_position(handle, base.extend(0.0));
                self.elements.push(GridElement::new(grid_x, grid_y, base, handle));
            }
        }

        log::info!(
            "Rebuilt grid: {}x{} {} (size {}), {} elements replaced",
            config.columns,
            config.rows,
            config.element_shape,
            config.element_size,
            removed
        );
        self.config = Some(config);
        Ok(())
    }

    /// Apply a new configuration, rebuilding only when the layout changed.
    ///
    /// Live changes (noise scale/amplitude, pulse, speed) swap the config in
    /// place and take effect on the next [`update`](Self::update).
    pub fn apply<S: Scene + ?Sized>(
        &mut self,
        config: GridConfig,
        scene: &mut S,
    ) -> Result<ConfigChange> {
        let change = match &self.config {
            Some(current) => current.change_kind(&config),
            None => ConfigChange::Structural,
        };

        match change {
            ConfigChange::Unchanged => {}
            ConfigChange::Live => {
                if let Err(err) = config.validate() {
                    log::warn!("Rejected grid configuration: {}", err);
                    return Err(err.into());
                }
                log::debug!(
                    "Live config change: noise_scale={} amplitude={} pulse={} speed={}",
                    config.noise_scale,
                    config.noise_amplitude,
                    config.pulse_enabled,
                    config.animation_speed
                );
                self.config = Some(config);
            }
            ConfigChange::Structural => self.rebuild(config, scene)?,
        }
        Ok(change)
    }

    /// Recompute every element's displacement (and scale when pulsing) for
    /// `elapsed_s` seconds since the animation epoch.
    ///
    /// Pure in `(elapsed_s, config)`: calling it twice with the same time gives
    /// the same result. Sampling runs in parallel; scene writes are serial.
    pub fn update<S: Scene + ?Sized>(&mut self, elapsed_s: f32, scene: &mut S) {
        let Some(config) = &self.config else {
            return;
        };

        let t = elapsed_s * config.animation_speed;
        let noise = &self.noise;

        self.elements
            .par_iter_mut()
            .enumerate()
            .for_each(|(index, element)| {
                let (x, y) = sampling_coords(index, config.rows);
                let value = noise.sample(
                    x as f32 * config.noise_scale,
                    y as f32 * config.noise_scale,
                    t,
                );

                element.displacement_z = value * config.noise_amplitude;
                if config.pulse_enabled {
                    element.scale_factor = 1.0 + value * config.pulse_amplitude;
                }
            });

        for element in &self.elements {
            scene.set_local_position(element.handle, element.local_position());
            if config.pulse_enabled {
                scene.set_local_scale(element.handle, Vec3::splat(element.scale_factor));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, Error};
    use crate::grid::scene::ObjectHandle;
    use crate::params::ElementShape;

    /// Scene double recording every call in order
    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Add(ObjectHandle, ElementShape, f32),
        Remove(ObjectHandle),
        Position(ObjectHandle, Vec3),
        Scale(ObjectHandle, Vec3),
    }

    #[derive(Default)]
    struct RecordingScene {
        calls: Vec<Call>,
        next: u32,
    }

    impl RecordingScene {
        fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
            self.calls.iter().filter(|c| pred(c)).count()
        }
    }

    impl Scene for RecordingScene {
        fn add_object(&mut self, shape: ElementShape, size: f32) -> ObjectHandle {
            let handle = ObjectHandle::new(self.next);
            self.next += 1;
            self.calls.push(Call::Add(handle, shape, size));
            handle
        }

        fn remove_object(&mut self, handle: ObjectHandle) {
            self.calls.push(Call::Remove(handle));
        }

        fn set_local_position(&mut self, handle: ObjectHandle, position: Vec3) {
            self.calls.push(Call::Position(handle, position));
        }

        fn set_local_scale(&mut self, handle: ObjectHandle, scale: Vec3) {
            self.calls.push(Call::Scale(handle, scale));
        }
    }

    fn small_config() -> GridConfig {
        GridConfig {
            columns: 10,
            rows: 10,
            ..GridConfig::default()
        }
    }

    #[test]
    fn test_grid_cardinality() {
        let mut animator = GridAnimator::new(NoiseField::new(42));
        let mut scene = RecordingScene::default();

        animator.rebuild(GridConfig::default(), &mut scene).unwrap();
        assert_eq!(animator.elements().len(), 3200);
        assert_eq!(scene.count(|c| matches!(c, Call::Add(..))), 3200);
        assert_eq!(scene.count(|c| matches!(c, Call::Remove(..))), 0);

        scene.calls.clear();
        let config = GridConfig {
            columns: 20,
            rows: 5,
            ..GridConfig::default()
        };
        animator.rebuild(config, &mut scene).unwrap();
        assert_eq!(animator.elements().len(), 100);

        // Every old object is removed before the first new one is added
        let first_add = scene
            .calls
            .iter()
            .position(|c| matches!(c, Call::Add(..)))
            .unwrap();
        let removes_before = scene.calls[..first_add]
            .iter()
            .filter(|c| matches!(c, Call::Remove(..)))
            .count();
        assert_eq!(removes_before, 3200);
        assert_eq!(scene.count(|c| matches!(c, Call::Remove(..))), 3200);
        assert_eq!(scene.count(|c| matches!(c, Call::Add(..))), 100);
    }

    #[test]
    fn test_rebuild_materializes_shape_and_position() {
        let mut animator = GridAnimator::new(NoiseField::new(1));
        let mut scene = RecordingScene::default();
        let config = GridConfig {
            columns: 2,
            rows: 1,
            element_shape: ElementShape::Sphere,
            element_size: 0.25,
            ..GridConfig::default()
        };

        animator.rebuild(config, &mut scene).unwrap();

        let h0 = animator.elements()[0].handle;
        let h1 = animator.elements()[1].handle;
        assert_eq!(
            scene.calls,
            vec![
                Call::Add(h0, ElementShape::Sphere, 0.25),
                Call::Position(h0, Vec3::new(-0.5, 0.0, 0.0)),
                Call::Add(h1, ElementShape::Sphere, 0.25),
                Call::Position(h1, Vec3::new(0.5, 0.0, 0.0)),
            ]
        );
    }

    #[test]
    fn test_centering() {
        let mut animator = GridAnimator::new(NoiseField::new(42));
        let mut scene = RecordingScene::default();
        animator.rebuild(small_config(), &mut scene).unwrap();

        let first = animator
            .elements()
            .iter()
            .find(|e| e.grid_x == 0 && e.grid_y == 0)
            .unwrap();
        assert_eq!(first.base_position, glam::Vec2::new(-4.5, -4.5));

        let last = animator
            .elements()
            .iter()
            .find(|e| e.grid_x == 9 && e.grid_y == 9)
            .unwrap();
        assert_eq!(last.base_position, glam::Vec2::new(4.5, 4.5));
    }

    #[test]
    fn test_row_major_generation_order() {
        let mut animator = GridAnimator::new(NoiseField::new(42));
        let mut scene = RecordingScene::default();
        let config = GridConfig {
            columns: 3,
            rows: 2,
            ..GridConfig::default()
        };
        animator.rebuild(config, &mut scene).unwrap();

        let coords: Vec<(u32, u32)> = animator
            .elements()
            .iter()
            .map(|e| (e.grid_x, e.grid_y))
            .collect();
        assert_eq!(coords, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn test_update_samples_with_row_modulus() {
        let noise = NoiseField::new(5);
        let config = GridConfig {
            columns: 4,
            rows: 3,
            noise_scale: 0.37,
            noise_amplitude: 2.0,
            animation_speed: 0.5,
            ..GridConfig::default()
        };
        let mut animator = GridAnimator::new(NoiseField::new(5));
        let mut scene = RecordingScene::default();
        animator.rebuild(config.clone(), &mut scene).unwrap();
        animator.update(3.0, &mut scene);

        let t = 3.0 * config.animation_speed;
        for (index, element) in animator.elements().iter().enumerate() {
            let x = (index % 3) as f32;
            let y = (index / 3) as f32;
            let expected =
                noise.sample(x * config.noise_scale, y * config.noise_scale, t) * 2.0;
            assert_eq!(element.displacement_z, expected, "element {}", index);
        }
    }

    #[test]
    fn test_update_is_idempotent() {
        let mut animator = GridAnimator::new(NoiseField::new(42));
        let mut scene = RecordingScene::default();
        animator.rebuild(small_config(), &mut scene).unwrap();

        animator.update(2.5, &mut scene);
        let first: Vec<f32> = animator.elements().iter().map(|e| e.displacement_z).collect();
        animator.update(2.5, &mut scene);
        let second: Vec<f32> = animator.elements().iter().map(|e| e.displacement_z).collect();

        assert_eq!(first, second);
        assert!(first.iter().any(|d| *d != 0.0));
    }

    #[test]
    fn test_time_going_backwards_is_deterministic() {
        let mut animator = GridAnimator::new(NoiseField::new(42));
        let mut scene = RecordingScene::default();
        animator.rebuild(small_config(), &mut scene).unwrap();

        animator.update(1.0, &mut scene);
        let at_one: Vec<f32> = animator.elements().iter().map(|e| e.displacement_z).collect();
        animator.update(5.0, &mut scene);
        animator.update(1.0, &mut scene);
        let again: Vec<f32> = animator.elements().iter().map(|e| e.displacement_z).collect();

        assert_eq!(at_one, again);
    }

    #[test]
    fn test_update_pushes_positions() {
        let mut animator = GridAnimator::new(NoiseField::new(42));
        let mut scene = RecordingScene::default();
        animator.rebuild(small_config(), &mut scene).unwrap();
        scene.calls.clear();

        animator.update(0.75, &mut scene);
        assert_eq!(scene.count(|c| matches!(c, Call::Position(..))), 100);
        assert_eq!(scene.count(|c| matches!(c, Call::Add(..))), 0);

        for (element, call) in animator.elements().iter().zip(&scene.calls) {
            assert_eq!(
                *call,
                Call::Position(element.handle, element.local_position())
            );
        }
    }

    #[test]
    fn test_pulse_disabled_never_writes_scale() {
        let mut animator = GridAnimator::new(NoiseField::new(42));
        let mut scene = RecordingScene::default();
        let config = GridConfig {
            pulse_enabled: false,
            pulse_amplitude: 100.0,
            noise_amplitude: 50.0,
            ..small_config()
        };
        animator.rebuild(config, &mut scene).unwrap();

        for frame in 0..10 {
            animator.update(frame as f32 * 0.7, &mut scene);
        }
        assert_eq!(scene.count(|c| matches!(c, Call::Scale(..))), 0);
        assert!(animator.elements().iter().all(|e| e.scale_factor == 1.0));
    }

    #[test]
    fn test_pulse_scale_bounds() {
        let mut animator = GridAnimator::new(NoiseField::new(42));
        let mut scene = RecordingScene::default();
        let config = GridConfig {
            pulse_enabled: true,
            pulse_amplitude: 0.1,
            animation_speed: 1.0,
            ..small_config()
        };
        animator.rebuild(config, &mut scene).unwrap();
        scene.calls.clear();

        for frame in 0..20 {
            animator.update(frame as f32 * 0.37, &mut scene);
            for element in animator.elements() {
                assert!(
                    (0.9 - 1e-6..=1.1 + 1e-6).contains(&element.scale_factor),
                    "scale {} out of bounds",
                    element.scale_factor
                );
            }
        }
        assert_eq!(scene.count(|c| matches!(c, Call::Scale(..))), 20 * 100);
    }

    #[test]
    fn test_disabling_pulse_keeps_last_scale() {
        let mut animator = GridAnimator::new(NoiseField::new(42));
        let mut scene = RecordingScene::default();
        let pulsing = GridConfig {
            pulse_enabled: true,
            pulse_amplitude: 0.5,
            ..small_config()
        };
        animator.rebuild(pulsing.clone(), &mut scene).unwrap();
        animator.update(1.3, &mut scene);
        let scales: Vec<f32> = animator.elements().iter().map(|e| e.scale_factor).collect();

        let calm = GridConfig {
            pulse_enabled: false,
            ..pulsing
        };
        assert_eq!(animator.apply(calm, &mut scene).unwrap(), ConfigChange::Live);
        animator.update(4.2, &mut scene);

        let after: Vec<f32> = animator.elements().iter().map(|e| e.scale_factor).collect();
        assert_eq!(scales, after);
    }

    #[test]
    fn test_rejected_config_leaves_grid_untouched() {
        let mut animator = GridAnimator::new(NoiseField::new(42));
        let mut scene = RecordingScene::default();
        animator.rebuild(small_config(), &mut scene).unwrap();
        let before = animator.elements().to_vec();
        scene.calls.clear();

        let bad = GridConfig {
            columns: 0,
            ..small_config()
        };
        let err = animator.rebuild(bad, &mut scene).unwrap_err();
        assert!(matches!(
            err,
            Error::Configuration(ConfigError::ZeroColumns)
        ));

        assert!(scene.calls.is_empty());
        assert_eq!(animator.elements(), before.as_slice());
        assert_eq!(animator.config(), Some(&small_config()));
    }

    #[test]
    fn test_apply_classifies_changes() {
        let mut animator = GridAnimator::new(NoiseField::new(42));
        let mut scene = RecordingScene::default();

        assert_eq!(
            animator.apply(small_config(), &mut scene).unwrap(),
            ConfigChange::Structural
        );
        assert_eq!(
            animator.apply(small_config(), &mut scene).unwrap(),
            ConfigChange::Unchanged
        );

        scene.calls.clear();
        let faster = GridConfig {
            animation_speed: 3.0,
            noise_scale: 0.2,
            ..small_config()
        };
        assert_eq!(
            animator.apply(faster.clone(), &mut scene).unwrap(),
            ConfigChange::Live
        );
        assert!(scene.calls.is_empty());
        assert_eq!(animator.config(), Some(&faster));

        let invalid_live = GridConfig {
            noise_scale: 0.0,
            ..faster.clone()
        };
        assert!(animator.apply(invalid_live, &mut scene).is_err());
        assert_eq!(animator.config(), Some(&faster));
    }

    #[test]
    fn test_update_without_grid_is_noop() {
        let mut animator = GridAnimator::new(NoiseField::new(42));
        let mut scene = RecordingScene::default();
        animator.update(1.0, &mut scene);
        assert!(scene.calls.is_empty());
    }
}
