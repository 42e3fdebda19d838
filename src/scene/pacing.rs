use std::time::{Duration, Instant};

use crate::foundation::clock::Clock;

/// Fixed-step frame deadlines.
///
/// Each frame's deadline is the previous one plus the period, never `now + period`, so a late
/// frame does not shift the ones after it.
#[derive(Clone, Copy, Debug)]
pub struct FramePacer {
    period: Option<Duration>,
    deadline: Instant,
}

impl FramePacer {
    /// Pacer whose first deadline is `start + period`. `None` disables sleeping.
    pub fn new(start: Instant, period: Option<Duration>) -> Self {
        Self {
            period,
            deadline: start,
        }
    }

    /// Move to the next deadline and return it.
    pub fn advance(&mut self) -> Instant {
        if let Some(period) = self.period {
            self.deadline += period;
        }
        self.deadline
    }

    /// Current deadline.
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Frame period, `None` when pacing is off.
    pub fn period(&self) -> Option<Duration> {
        self.period
    }

    /// Whether [`wait`](Self::wait) sleeps.
    pub fn is_active(&self) -> bool {
        self.period.is_some()
    }

    /// Block until the current deadline. Returns immediately when inactive or late.
    pub fn wait(&self, clock: &dyn Clock) {
        if self.is_active() {
            clock.sleep_until(self.deadline);
        }
    }
}

/// Instantaneous frame rate from the interval between two samples. Display only.
#[derive(Clone, Copy, Debug)]
pub struct FpsMeter {
    last: Instant,
    fps: f64,
}

impl FpsMeter {
    /// Meter counting from `start`.
    pub fn new(start: Instant) -> Self {
        Self {
            last: start,
            fps: 0.0,
        }
    }

    /// Record a frame at `now`. A zero interval keeps the previous reading.
    pub fn sample(&mut self, now: Instant) -> f64 {
        let delta = now.saturating_duration_since(self.last);
        if !delta.is_zero() {
            self.fps = 1.0 / delta.as_secs_f64();
        }
        self.last = now;
        self.fps
    }

    /// Last reading.
    pub fn fps(&self) -> f64 {
        self.fps
    }
}

/// Text of the FPS overlay.
pub fn format_fps(fps: f64) -> String {
    format!("{fps:6.1} FPS")
}

#[cfg(test)]
#[path = "../../tests/unit/scene/pacing.rs"]
mod tests;
