//! Gridpulse - a grid of shapes rippling over a 3D noise field
//!
//! Runs the animation headless (logging displacement statistics) or records
//! software-rendered preview frames to PNG.

mod cli;

use std::time::{Duration, Instant};

use clap::Parser;

use cli::{Args, ScheduledEdit};
use gridpulse::clock::FrameClock;
use gridpulse::grid::InstanceScene;
use gridpulse::noise_field::NoiseField;
use gridpulse::panel::ParamPanel;
use gridpulse::params::RecordingConfig;
use gridpulse::preview::PreviewRenderer;
use gridpulse::stage::Stage;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args = Args::parse();
    if let Err(err) = run(&args) {
        log::error!("{}", err);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> gridpulse::Result<()> {
    let recording = args.recording_config();
    if let Some(recording) = &recording {
        recording.validate()?;
    }

    // Panel epoch: scheduled edits are stamped with simulated time from here
    let epoch = Instant::now();

    let mut panel = ParamPanel::default();
    for edit in args.startup_edits() {
        panel.edit(edit, epoch)?;
    }
    // Startup values are committed here; the stage is built from them directly below
    let _ = panel.flush();

    let noise = NoiseField::with_kind(args.noise, args.seed);
    log::info!("Noise field: {} (seed {})", noise.kind(), noise.seed());

    let mut stage = Stage::new(
        noise,
        InstanceScene::new(),
        panel.style().clone(),
        panel.camera().clone(),
    )?;
    stage.rebuild(panel.grid().clone())?;

    match recording {
        Some(recording) => record(args, &mut stage, &mut panel, &recording, epoch),
        None => run_headless(args, &mut stage, &mut panel, epoch),
    }
}

/// Feed the edits scheduled for `frame` into the panel and apply whatever it emits
fn drive_panel(
    edits: &[ScheduledEdit],
    frame: u64,
    now: Instant,
    panel: &mut ParamPanel,
    stage: &mut Stage<InstanceScene>,
) -> gridpulse::Result<()> {
    for scheduled in edits.iter().filter(|e| e.frame == frame) {
        match panel.edit(scheduled.edit.clone(), now) {
            Ok(Some(command)) => stage.handle(command)?,
            Ok(None) => {}
            // A bad edit keeps the last valid grid on screen
            Err(err) => log::warn!("Ignoring edit at frame {}: {}", frame, err),
        }
    }
    if let Some(command) = panel.poll(now) {
        stage.handle(command)?;
    }
    Ok(())
}

fn run_headless(
    args: &Args,
    stage: &mut Stage<InstanceScene>,
    panel: &mut ParamPanel,
    epoch: Instant,
) -> gridpulse::Result<()> {
    let mut clock = if args.realtime {
        FrameClock::realtime()
    } else {
        FrameClock::fixed(args.fps)
    };
    let report_every = u64::from(args.fps.max(1));

    for frame in 0..args.frames {
        let elapsed_s = clock.tick();
        let now = epoch + Duration::from_secs_f32(elapsed_s);
        drive_panel(&args.edit_at, frame, now, panel, stage)?;
        stage.update(elapsed_s);

        if frame % report_every == 0 {
            let (min, max) = stage
                .animator()
                .elements()
                .iter()
                .map(|e| e.displacement_z)
                .fold((f32::MAX, f32::MIN), |(lo, hi), d| (lo.min(d), hi.max(d)));
            log::info!(
                "t={:.2}s frame {}: {} elements, displacement {:.3}..{:.3}",
                elapsed_s,
                frame,
                stage.animator().elements().len(),
                min,
                max
            );
        }
    }
    Ok(())
}

fn record(
    args: &Args,
    stage: &mut Stage<InstanceScene>,
    panel: &mut ParamPanel,
    recording: &RecordingConfig,
    epoch: Instant,
) -> gridpulse::Result<()> {
    std::fs::create_dir_all(recording.frames_dir())?;
    let renderer = PreviewRenderer::new(args.render_config());
    let mut clock = FrameClock::fixed(recording.fps);
    let total = recording.total_frames();

    log::info!(
        "Recording {} frames ({:.1}s @ {} fps) to {}",
        total,
        recording.duration_secs,
        recording.fps,
        recording.frames_dir().display()
    );

    for frame in 0..total {
        let elapsed_s = clock.tick();
        let now = epoch + Duration::from_secs_f32(elapsed_s);
        drive_panel(&args.edit_at, frame as u64, now, panel, stage)?;
        stage.update(elapsed_s);
        renderer.save_frame(stage, &recording.frame_path(frame))?;

        if frame % recording.fps as usize == 0 {
            log::info!("Captured frame {}/{}", frame + 1, total);
        }
    }
    log::info!("Recording complete");
    Ok(())
}
