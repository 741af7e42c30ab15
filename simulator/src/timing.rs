//! Frame pacing for the simulator loop.

use std::thread;
use std::time::{Duration, Instant};

use skylink_grid::config::FRAME_TIME_MS;

/// Target frame time (~60 FPS). The loop sleeps if a frame completes early.
pub const FRAME_TIME: Duration = Duration::from_millis(FRAME_TIME_MS);

/// Frames between two FPS log events.
pub const REPORT_EVERY: u32 = 300;

/// Sleeps out each frame and keeps a smoothed frame time.
pub struct FrameClock {
    frame_start: Instant,
    avg_frame_us: f32,
    frames: u32,
}

impl FrameClock {
    const EMA_ALPHA: f32 = 0.1;

    pub fn new() -> Self {
        Self {
            frame_start: Instant::now(),
            avg_frame_us: 0.0,
            frames: 0,
        }
    }

    /// Mark the start of a frame.
    pub fn begin(&mut self) { self.frame_start = Instant::now(); }

    /// Sleep out the rest of the frame and fold its duration into the average.
    ///
    /// Returns the smoothed FPS every [`REPORT_EVERY`] frames.
    pub fn finish(&mut self) -> Option<f32> {
        let busy = self.frame_start.elapsed();
        if let Some(rest) = FRAME_TIME.checked_sub(busy) {
            thread::sleep(rest);
        }

        let frame_us = self.frame_start.elapsed().as_micros() as f32;
        self.avg_frame_us = if self.frames == 0 {
            frame_us
        } else {
            Self::EMA_ALPHA.mul_add(frame_us - self.avg_frame_us, self.avg_frame_us)
        };
        self.frames = self.frames.wrapping_add(1);

        (self.frames % REPORT_EVERY == 0 && self.avg_frame_us > 0.0).then(|| 1_000_000.0 / self.avg_frame_us)
    }
}
