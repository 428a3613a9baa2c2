//! Parameter panel: turns individual knob edits into whole configuration values.
//!
//! Live and cosmetic edits are emitted immediately. Structural edits (grid size,
//! shape, element size) are held until the user stops editing for the debounce
//! period, so dragging a slider triggers one rebuild rather than one per step.

use std::str::FromStr;
use std::time::{Duration, Instant};

use crate::error::ConfigError;
use crate::params::{CameraFraming, Color, ConfigChange, ElementShape, GridConfig, SceneStyle};

/// Default quiet period before a structural edit is committed
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(250);

/// A single knob change
#[derive(Debug, Clone, PartialEq)]
pub enum ParamEdit {
    // Structural
    Columns(u32),
    Rows(u32),
    Shape(ElementShape),
    ElementSize(f32),

    // Live
    NoiseScale(f32),
    NoiseAmplitude(f32),
    PulseEnabled(bool),
    PulseAmplitude(f32),
    AnimationSpeed(f32),

    // Cosmetic
    ClearColor(Color),
    ItemColor(Color),
    FogColor(Color),
    FogNear(f32),
    FogFar(f32),
    SunColor(Color),
    SunIntensity(f32),
    AmbientColor(Color),
    AmbientIntensity(f32),

    // Camera
    Fov(f32),
    CameraX(f32),
    CameraY(f32),
    CameraZ(f32),
    CameraRotationY(f32),
}

/// Which path an edit goes through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    Structural,
    Live,
    Cosmetic,
    Camera,
}

impl ParamEdit {
    pub fn kind(&self) -> EditKind {
        match self {
            Self::Columns(_) | Self::Rows(_) | Self::Shape(_) | Self::ElementSize(_) => {
                EditKind::Structural
            }
            Self::NoiseScale(_)
            | Self::NoiseAmplitude(_)
            | Self::PulseEnabled(_)
            | Self::PulseAmplitude(_)
            | Self::AnimationSpeed(_) => EditKind::Live,
            Self::Fov(_)
            | Self::CameraX(_)
            | Self::CameraY(_)
            | Self::CameraZ(_)
            | Self::CameraRotationY(_) => EditKind::Camera,
            _ => EditKind::Cosmetic,
        }
    }

    fn apply_grid(&self, config: &mut GridConfig) {
        match *self {
            Self::Columns(v) => config.columns = v,
            Self::Rows(v) => config.rows = v,
            Self::Shape(v) => config.element_shape = v,
            Self::ElementSize(v) => config.element_size = v,
            Self::NoiseScale(v) => config.noise_scale = v,
            Self::NoiseAmplitude(v) => config.noise_amplitude = v,
            Self::PulseEnabled(v) => config.pulse_enabled = v,
            Self::PulseAmplitude(v) => config.pulse_amplitude = v,
            Self::AnimationSpeed(v) => config.animation_speed = v,
            _ => {}
        }
    }

    fn apply_style(&self, style: &mut SceneStyle) {
        match *self {
            Self::ClearColor(c) => style.clear_color = c,
            Self::ItemColor(c) => style.item_color = c,
            Self::FogColor(c) => style.fog.color = c,
            Self::FogNear(v) => style.fog.near_m = v,
            Self::FogFar(v) => style.fog.far_m = v,
            Self::SunColor(c) => style.lighting.sun_color = c,
            Self::SunIntensity(v) => style.lighting.sun_intensity = v,
            Self::AmbientColor(c) => style.lighting.ambient_color = c,
            Self::AmbientIntensity(v) => style.lighting.ambient_intensity = v,
            _ => {}
        }
    }

    fn apply_camera(&self, camera: &mut CameraFraming) {
        match *self {
            Self::Fov(v) => camera.fov_degrees = v,
            Self::CameraX(v) => camera.position.x = v,
            Self::CameraY(v) => camera.position.y = v,
            Self::CameraZ(v) => camera.position.z = v,
            Self::CameraRotationY(v) => camera.rotation_y_rad = v,
            _ => {}
        }
    }
}

impl FromStr for ParamEdit {
    type Err = ConfigError;

    /// Parse `key=value`, e.g. `columns=40`, `shape=sphere`, `fog_color=#FFFFFF`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, value) = s
            .split_once('=')
            .ok_or_else(|| ConfigError::UnknownParameter(s.trim().to_string()))?;
        let key = key.trim();
        let value = value.trim();

        let invalid = || ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };
        let number = || value.parse::<f32>().map_err(|_| invalid());
        let count = || value.parse::<u32>().map_err(|_| invalid());
        let flag = || value.parse::<bool>().map_err(|_| invalid());

        let edit = match key {
            "columns" | "items_x" => Self::Columns(count()?),
            "rows" | "items_y" => Self::Rows(count()?),
            "shape" | "geometry_type" => Self::Shape(value.parse()?),
            "size" | "geometry_size" => Self::ElementSize(number()?),
            "noise_scale" => Self::NoiseScale(number()?),
            "noise_amplitude" => Self::NoiseAmplitude(number()?),
            "pulse" | "pulse_enabled" => Self::PulseEnabled(flag()?),
            "pulse_amplitude" | "pulse_value" => Self::PulseAmplitude(number()?),
            "animation_speed" => Self::AnimationSpeed(number()?),
            // Legacy panel value is noise time per millisecond
            "speed" => Self::AnimationSpeed(number()? * 1000.0),
            "clear_color" | "clear" => Self::ClearColor(value.parse()?),
            "item_color" | "items_color" => Self::ItemColor(value.parse()?),
            "fog_color" => Self::FogColor(value.parse()?),
            "fog_near" | "fog_start" => Self::FogNear(number()?),
            "fog_far" | "fog_end" => Self::FogFar(number()?),
            "sun_color" | "lights_sun_color" => Self::SunColor(value.parse()?),
            "sun_intensity" | "lights_sun_intensity" => Self::SunIntensity(number()?),
            "ambient_color" => Self::AmbientColor(value.parse()?),
            "ambient_intensity" => Self::AmbientIntensity(number()?),
            "fov" | "camera_perspective" => Self::Fov(number()?),
            "camera_x" | "camera_position_x" => Self::CameraX(number()?),
            "camera_y" | "camera_position_y" => Self::CameraY(number()?),
            "camera_z" | "camera_position_z" => Self::CameraZ(number()?),
            "camera_rotation_y" => Self::CameraRotationY(number()?),
            other => return Err(ConfigError::UnknownParameter(other.to_string())),
        };
        Ok(edit)
    }
}

/// A complete configuration value produced by the panel
#[derive(Debug, Clone, PartialEq)]
pub enum PanelCommand {
    /// Layout changed: regenerate the grid
    Rebuild(GridConfig),
    /// Animation law changed: swap config, keep elements
    Live(GridConfig),
    /// Fog, lighting, or colors changed
    Cosmetic(SceneStyle),
    /// Camera framing changed
    Camera(CameraFraming),
}

/// Holds the current parameter values and debounces structural edits
#[derive(Debug)]
pub struct ParamPanel {
    grid: GridConfig,
    style: SceneStyle,
    camera: CameraFraming,
    pending: Option<GridConfig>,
    last_structural_edit: Option<Instant>,
    debounce: Duration,
}

impl Default for ParamPanel {
    fn default() -> Self {
        Self::new(
            GridConfig::default(),
            SceneStyle::default(),
            CameraFraming::default(),
        )
    }
}

impl ParamPanel {
    pub fn new(grid: GridConfig, style: SceneStyle, camera: CameraFraming) -> Self {
        Self {
            grid,
            style,
            camera,
            pending: None,
            last_structural_edit: None,
            debounce: DEFAULT_DEBOUNCE,
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Last committed grid configuration (excludes pending structural edits)
    pub fn grid(&self) -> &GridConfig {
        &self.grid
    }

    pub fn style(&self) -> &SceneStyle {
        &self.style
    }

    pub fn camera(&self) -> &CameraFraming {
        &self.camera
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Record one edit made at `now`.
    ///
    /// Returns a command for live, cosmetic, and camera edits; structural edits
    /// return `None` and surface later from [`poll`](Self::poll). An invalid edit
    /// is rejected and leaves every value unchanged.
    pub fn edit(
        &mut self,
        edit: ParamEdit,
        now: Instant,
    ) -> Result<Option<PanelCommand>, ConfigError> {
        match edit.kind() {
            EditKind::Structural => {
                let mut candidate = self.pending.clone().unwrap_or_else(|| self.grid.clone());
                edit.apply_grid(&mut candidate);
                candidate.validate()?;

                log::debug!("Structural edit pending: {:?}", edit);
                self.pending = Some(candidate);
                self.last_structural_edit = Some(now);
                Ok(None)
            }
            EditKind::Live => {
                let mut candidate = self.grid.clone();
                edit.apply_grid(&mut candidate);
                candidate.validate()?;

                // Keep the pending rebuild in step with the live value
                if let Some(pending) = &mut self.pending {
                    edit.apply_grid(pending);
                }
                self.grid = candidate;
                Ok(Some(PanelCommand::Live(self.grid.clone())))
            }
            EditKind::Cosmetic => {
                let mut candidate = self.style.clone();
                edit.apply_style(&mut candidate);
                candidate.validate()?;

                self.style = candidate;
                Ok(Some(PanelCommand::Cosmetic(self.style.clone())))
            }
            EditKind::Camera => {
                let mut candidate = self.camera.clone();
                edit.apply_camera(&mut candidate);
                candidate.validate()?;

                self.camera = candidate;
                Ok(Some(PanelCommand::Camera(self.camera.clone())))
            }
        }
    }

    /// Emit the pending rebuild once no structural edit has arrived for the
    /// debounce period.
    pub fn poll(&mut self, now: Instant) -> Option<PanelCommand> {
        let last = self.last_structural_edit?;
        if now.saturating_duration_since(last) < self.debounce {
            return None;
        }
        self.flush()
    }

    /// Emit the pending rebuild immediately, if it still changes the layout
    pub fn flush(&mut self) -> Option<PanelCommand> {
        self.last_structural_edit = None;
        let pending = self.pending.take()?;

        if self.grid.change_kind(&pending) != ConfigChange::Structural {
            log::debug!("Structural edits cancelled out, skipping rebuild");
            return None;
        }
        self.grid = pending;
        Some(PanelCommand::Rebuild(self.grid.clone()))
    }
}
