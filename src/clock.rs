//! Frame timing: elapsed seconds since a single fixed epoch.

use std::time::Instant;

/// Source of the `elapsed_s` value passed to every update
#[derive(Debug, Clone)]
pub enum FrameClock {
    /// Wall-clock time since the clock was created
    Realtime { epoch: Instant },

    /// Fixed timestep, one frame per tick (recordings, headless runs)
    Fixed { fps: u32, frame: u64 },
}

impl FrameClock {
    pub fn realtime() -> Self {
        Self::Realtime {
            epoch: Instant::now(),
        }
    }

    /// Fixed-step clock; `fps` of zero is treated as one
    pub fn fixed(fps: u32) -> Self {
        Self::Fixed {
            fps: fps.max(1),
            frame: 0,
        }
    }

    /// Elapsed seconds for the next frame
    pub fn tick(&mut self) -> f32 {
        match self {
            Self::Realtime { epoch } => epoch.elapsed().as_secs_f32(),
            Self::Fixed { fps, frame } => {
                let elapsed = *frame as f64 / *fps as f64;
                *frame += 1;
                elapsed as f32
            }
        }
    }
}
