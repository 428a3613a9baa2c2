//! Stage: the animated grid together with its scene, style, and camera.
//!
//! Keeps the three update paths apart: `update` every frame, `apply` /
//! `apply_cosmetic` / `set_camera` on edits, `rebuild` only when the layout changes.

use glam::Vec3;

use crate::camera::CameraSystem;
use crate::error::Result;
use crate::grid::{GridAnimator, Scene};
use crate::noise_field::NoiseField;
use crate::panel::PanelCommand;
use crate::params::{CameraFraming, ConfigChange, GridConfig, SceneStyle};

/// Animated grid plus everything needed to present it
pub struct Stage<S: Scene> {
    animator: GridAnimator,
    scene: S,
    style: SceneStyle,
    camera: CameraSystem,
}

impl<S: Scene> Stage<S> {
    pub fn new(
        noise: NoiseField,
        scene: S,
        style: SceneStyle,
        camera: CameraFraming,
    ) -> Result<Self> {
        style.validate()?;
        camera.validate()?;
        Ok(Self {
            animator: GridAnimator::new(noise),
            scene,
            style,
            camera: CameraSystem::new(camera),
        })
    }

    pub fn animator(&self) -> &GridAnimator {
        &self.animator
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn style(&self) -> &SceneStyle {
        &self.style
    }

    pub fn camera(&self) -> &CameraSystem {
        &self.camera
    }

    /// Current sun position (follows the camera framing)
    pub fn sun_position(&self) -> Vec3 {
        self.style.lighting.sun_position(self.camera.eye())
    }

    pub fn rebuild(&mut self, config: GridConfig) -> Result<()> {
        self.animator.rebuild(config, &mut self.scene)
    }

    pub fn apply(&mut self, config: GridConfig) -> Result<ConfigChange> {
        self.animator.apply(config, &mut self.scene)
    }

    /// Replace fog, lighting, and colors; grid elements are untouched
    pub fn apply_cosmetic(&mut self, style: SceneStyle) -> Result<()> {
        if let Err(err) = style.validate() {
            log::warn!("Rejected scene style: {}", err);
            return Err(err.into());
        }
        log::debug!(
            "Cosmetic change: fog {}..{} sun {}",
            style.fog.near_m,
            style.fog.far_m,
            style.lighting.sun_intensity
        );
        self.style = style;
        Ok(())
    }

    pub fn set_camera(&mut self, framing: CameraFraming) -> Result<()> {
        if let Err(err) = framing.validate() {
            log::warn!("Rejected camera framing: {}", err);
            return Err(err.into());
        }
        self.camera = CameraSystem::new(framing);
        Ok(())
    }

    /// Route a panel command to the matching path
    pub fn handle(&mut self, command: PanelCommand) -> Result<()> {
        match command {
            PanelCommand::Rebuild(config) | PanelCommand::Live(config) => {
                self.apply(config)?;
            }
            PanelCommand::Cosmetic(style) => self.apply_cosmetic(style)?,
            PanelCommand::Camera(framing) => self.set_camera(framing)?,
        }
        Ok(())
    }

    /// Per-frame tick
    pub fn update(&mut self, elapsed_s: f32) {
        self.animator.update(elapsed_s, &mut self.scene);
    }
}
