//! Display aspect sampling.
//!
//! The HUD update hook fires every frame, but the display size is only read
//! once per [`ASPECT_POLL_INTERVAL`]. A sampled aspect counts as a change
//! only if it differs from the last applied one beyond floating-point noise.

use glam::Vec2;
use tracing::trace;
use ultrawide_common::AspectRatio;

/// Seconds between display size checks.
pub const ASPECT_POLL_INTERVAL: f32 = 1.0;

/// Result of one sampler call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleOutcome {
    /// The polling interval has not elapsed yet.
    NotDue,
    /// The host reported no usable display size this tick.
    Unavailable,
    /// Same aspect as the last applied one.
    Unchanged,
    /// A new aspect; apply it, then [`AspectSampler::commit`] it.
    Changed(AspectRatio),
}

/// Rate-limited aspect change detector.
#[derive(Debug, Clone)]
pub struct AspectSampler {
    /// Seconds between checks.
    interval: f32,
    /// Time of the last eligible tick.
    last_tick: f32,
    /// Last aspect handed to the layout pipeline.
    previous: Option<AspectRatio>,
}

impl Default for AspectSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl AspectSampler {
    /// Creates a sampler polling every [`ASPECT_POLL_INTERVAL`] seconds.
    #[must_use]
    pub fn new() -> Self {
        Self::with_interval(ASPECT_POLL_INTERVAL)
    }

    /// Creates a sampler with a custom polling interval.
    #[must_use]
    pub fn with_interval(interval: f32) -> Self {
        Self {
            interval: interval.max(0.0),
            last_tick: 0.0,
            previous: None,
        }
    }

    /// Last committed aspect.
    #[must_use]
    pub fn previous(&self) -> Option<AspectRatio> {
        self.previous
    }

    /// Forgets the last tick and the last applied aspect.
    ///
    /// Called when a HUD starts so a reloaded scene gets a fresh application.
    pub fn reset(&mut self) {
        self.last_tick = 0.0;
        self.previous = None;
    }

    /// Whether a tick at `now` is eligible.
    #[must_use]
    pub fn is_due(&self, now: f32) -> bool {
        now > self.last_tick + self.interval
    }

    /// Samples the display at time `now`.
    ///
    /// Every eligible tick restarts the interval, including ticks where the
    /// size was unusable; those are retried at the next eligible tick.
    pub fn sample(&mut self, now: f32, display_size: Option<Vec2>) -> SampleOutcome {
        if !self.is_due(now) {
            return SampleOutcome::NotDue;
        }
        self.last_tick = now;

        let Some(size) = display_size else {
            trace!("Display size unavailable");
            return SampleOutcome::Unavailable;
        };

        let current = match AspectRatio::from_size(size.x, size.y) {
            Ok(aspect) => aspect,
            Err(e) => {
                trace!("Skipping aspect sample: {e}");
                return SampleOutcome::Unavailable;
            },
        };

        match self.previous {
            Some(previous) if previous.approx_eq(current) => SampleOutcome::Unchanged,
            _ => SampleOutcome::Changed(current),
        }
    }

    /// Records `aspect` as applied.
    pub fn commit(&mut self, aspect: AspectRatio) {
        self.previous = Some(aspect);
    }
}
