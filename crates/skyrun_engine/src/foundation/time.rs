//! Time management utilities

use std::time::Instant;

/// High-precision timer for frame timing
///
/// The frame loop owns the timer; the corridor core itself never reads the
/// clock. Deltas can grow arbitrarily large after the process was suspended,
/// so loops feed the simulation with [`Timer::clamped_delta`].
pub struct Timer {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Update the timer (should be called once per frame)
    pub fn update(&mut self) {
        let now = Instant::now();
        self.advance(now.duration_since(self.last_frame).as_secs_f32());
        self.last_frame = now;
    }

    fn advance(&mut self, elapsed: f32) {
        self.delta_time = elapsed;
        self.total_time += elapsed;
        self.frame_count += 1;
    }

    /// Get the time since the last frame in seconds
    pub const fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the time since the last frame, limited to `max_delta` seconds
    pub fn clamped_delta(&self, max_delta: f32) -> f32 {
        self.delta_time.clamp(0.0, max_delta.max(0.0))
    }

    /// Get the total elapsed time since timer creation
    pub const fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the average FPS since timer creation
    #[allow(clippy::cast_precision_loss)]
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }
}
