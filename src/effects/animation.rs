//! Frame clock with an explicit start/stop switch
//!
//! The browser loop re-arms `requestAnimationFrame` only while the clock is
//! running. Headless code and tests drive it with `advance` instead of real time.

use crate::consts::FRAME_DT;

#[derive(Debug, Clone, Default)]
pub struct AnimationLoop {
    running: bool,
    frames: u64,
    /// Global time in seconds of the last frame
    time: f64,
}

impl AnimationLoop {
    /// A stopped clock at time zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        if !self.running {
            log::debug!("Animation loop started at frame {}", self.frames);
        }
        self.running = true;
    }

    pub fn stop(&mut self) {
        if self.running {
            log::debug!("Animation loop stopped after {} frames", self.frames);
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frames run so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Global time (seconds) of the last frame
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Record a display refresh at `timestamp_ms`.
    /// Returns the global time in seconds, or `None` when stopped.
    pub fn on_frame(&mut self, timestamp_ms: f64) -> Option<f64> {
        if !self.running {
            return None;
        }
        self.frames += 1;
        self.time = timestamp_ms / 1000.0;
        Some(self.time)
    }

    /// Run `frames` fixed 60 Hz frames, handing each frame's time to `frame`.
    /// Returns how many frames actually ran (zero when stopped).
    pub fn advance(&mut self, frames: u32, mut frame: impl FnMut(f64)) -> u32 {
        let mut ran = 0;
        for _ in 0..frames {
            if !self.running {
                break;
            }
            self.frames += 1;
            self.time += FRAME_DT;
            frame(self.time);
            ran += 1;
        }
        ran
    }
}
