use std::time::{Duration, Instant};

/// Frames-per-second counter, published once per averaging window.
#[derive(Debug, Clone)]
pub struct FrameStats {
    window: Duration,
    frames: u32,
    window_start: Instant,
    fps: f32,
}

impl FrameStats {
    pub fn new(window: Duration, now: Instant) -> Self {
        Self {
            window,
            frames: 0,
            window_start: now,
            fps: 0.0,
        }
    }

    /// Counts one frame. Returns the new value when a window just closed.
    pub fn tick(&mut self, now: Instant) -> Option<f32> {
        self.frames += 1;
        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed < self.window || elapsed.is_zero() {
            return None;
        }
        self.fps = self.frames as f32 / elapsed.as_secs_f32();
        self.frames = 0;
        self.window_start = now;
        Some(self.fps)
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}
