//! Simulated frame timing.
//!
//! Headless sessions advance time in fixed steps so runs are reproducible.

/// Default simulated frame rate.
pub const DEFAULT_FRAME_RATE: u32 = 60;

/// Fixed-step frame clock.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Seconds per frame
    frame_dt: f32,
    /// Seconds since start
    elapsed: f32,
    /// Frames stepped so far
    frame: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_RATE)
    }
}

impl FrameClock {
    /// Creates a clock ticking at `frame_rate` frames per second.
    #[must_use]
    pub fn new(frame_rate: u32) -> Self {
        let frame_rate = frame_rate.max(1);
        Self {
            frame_dt: 1.0 / frame_rate as f32,
            elapsed: 0.0,
            frame: 0,
        }
    }

    /// Advances one frame and returns the new elapsed time.
    pub fn tick(&mut self) -> f32 {
        self.frame += 1;
        // Derived from the frame count, not accumulated.
        self.elapsed = self.frame as f32 * self.frame_dt;
        self.elapsed
    }

    /// Seconds since start.
    #[must_use]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Frames stepped so far.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Seconds per frame.
    #[must_use]
    pub fn frame_dt(&self) -> f32 {
        self.frame_dt
    }
}
