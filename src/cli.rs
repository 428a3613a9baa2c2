//! Command-line argument parsing.

use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;

use gridpulse::noise_field::NoiseKind;
use gridpulse::panel::ParamEdit;
use gridpulse::params::{ElementShape, RecordingConfig, RenderConfig};
use gridpulse::ConfigError;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "gridpulse")]
#[command(about = "Noise-driven animated grid of shapes", long_about = None)]
pub struct Args {
    /// Elements along X
    #[arg(long)]
    pub columns: Option<u32>,

    /// Elements along Y
    #[arg(long)]
    pub rows: Option<u32>,

    /// Element shape: box or sphere
    #[arg(long)]
    pub shape: Option<ElementShape>,

    /// Edge length (box) or radius (sphere)
    #[arg(long, value_name = "UNITS")]
    pub size: Option<f32>,

    /// Scale elements with the noise as well as displacing them
    #[arg(long)]
    pub pulse: bool,

    /// Noise time units per second
    #[arg(long)]
    pub speed: Option<f32>,

    /// Noise seed
    #[arg(long, default_value = "42")]
    pub seed: u32,

    /// Noise algorithm: simplex or perlin
    #[arg(long, default_value = "simplex")]
    pub noise: NoiseKind,

    /// Extra parameter, e.g. `--set fog_near=30` (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<ParamEdit>,

    /// Edit applied mid-run, e.g. `--edit-at 120:columns=40` (repeatable)
    #[arg(long = "edit-at", value_name = "FRAME:KEY=VALUE")]
    pub edit_at: Vec<ScheduledEdit>,

    /// Frames to simulate in headless mode
    #[arg(long, default_value = "600")]
    pub frames: u64,

    /// Frame rate for the fixed-step clock
    #[arg(long, default_value = "60")]
    pub fps: u32,

    /// Use wall-clock time instead of a fixed timestep (headless mode only)
    #[arg(long)]
    pub realtime: bool,

    /// Record preview frames to PNG (duration in seconds)
    #[arg(long, value_name = "SECONDS")]
    pub record: Option<f32>,

    /// Output directory for recordings
    #[arg(long, default_value = "recording")]
    pub output: PathBuf,

    /// Preview image width (pixels)
    #[arg(long, default_value = "1280")]
    pub width: u32,

    /// Preview image height (pixels)
    #[arg(long, default_value = "720")]
    pub height: u32,
}

/// A parameter edit applied at a given frame
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledEdit {
    pub frame: u64,
    pub edit: ParamEdit,
}

impl FromStr for ScheduledEdit {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (frame, edit) = s.split_once(':').ok_or_else(|| ConfigError::InvalidValue {
            key: "edit-at".to_string(),
            value: s.to_string(),
        })?;
        let frame = frame.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: "edit-at".to_string(),
            value: s.to_string(),
        })?;
        Ok(Self {
            frame,
            edit: edit.parse()?,
        })
    }
}

impl Args {
    /// Startup edits from the dedicated flags followed by every `--set`
    pub fn startup_edits(&self) -> Vec<ParamEdit> {
        let mut edits = Vec::new();
        if let Some(columns) = self.columns {
            edits.push(ParamEdit::Columns(columns));
        }
        if let Some(rows) = self.rows {
            edits.push(ParamEdit::Rows(rows));
        }
        if let Some(shape) = self.shape {
            edits.push(ParamEdit::Shape(shape));
        }
        if let Some(size) = self.size {
            edits.push(ParamEdit::ElementSize(size));
        }
        if self.pulse {
            edits.push(ParamEdit::PulseEnabled(true));
        }
        if let Some(speed) = self.speed {
            edits.push(ParamEdit::AnimationSpeed(speed));
        }
        edits.extend(self.set.iter().cloned());
        edits
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            width: self.width.max(1),
            height: self.height.max(1),
        }
    }

    /// Recording configuration if recording mode is enabled
    pub fn recording_config(&self) -> Option<RecordingConfig> {
        self.record.map(|duration| RecordingConfig {
            output_dir: self.output.clone(),
            fps: self.fps.max(1),
            ..RecordingConfig::new(duration)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_become_edits() {
        let args = Args::parse_from([
            "gridpulse",
            "--columns",
            "20",
            "--shape",
            "sphere",
            "--pulse",
            "--set",
            "fog_near=30",
        ]);

        assert_eq!(
            args.startup_edits(),
            vec![
                ParamEdit::Columns(20),
                ParamEdit::Shape(ElementShape::Sphere),
                ParamEdit::PulseEnabled(true),
                ParamEdit::FogNear(30.0),
            ]
        );
        assert!(args.recording_config().is_none());
    }

    #[test]
    fn test_unknown_shape_rejected_by_parser() {
        let result = Args::try_parse_from(["gridpulse", "--shape", "cone"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_scheduled_edit_parsing() {
        let edit: ScheduledEdit = "120:rows=8".parse().unwrap();
        assert_eq!(edit.frame, 120);
        assert_eq!(edit.edit, ParamEdit::Rows(8));

        assert!("rows=8".parse::<ScheduledEdit>().is_err());
        assert!("x:rows=8".parse::<ScheduledEdit>().is_err());
    }

    #[test]
    fn test_recording_config() {
        let args = Args::parse_from(["gridpulse", "--record", "2", "--fps", "30"]);
        let recording = args.recording_config().unwrap();
        assert_eq!(recording.total_frames(), 60);
        assert_eq!(recording.output_dir, PathBuf::from("recording"));
    }
}
