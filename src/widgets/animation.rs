use std::time::{Duration, Instant};

use crate::render::backend::Flip;
use crate::widgets::transform::Transform;

/// One timed interpolation target. Unset fields leave the property alone.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Step {
    /// Target scale factor, interpolated linearly.
    #[serde(default)]
    pub scaling: Option<f32>,
    /// Target rotation in degrees, interpolated linearly.
    #[serde(default)]
    pub rotation: Option<f64>,
    /// Mirroring set when the step is entered.
    #[serde(default)]
    pub flip: Option<Flip>,
    /// Step length. Zero completes on the tick after the step is entered.
    #[serde(with = "duration_ms")]
    pub duration: Duration,
}

impl Step {
    /// Step that only waits.
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            ..Self::default()
        }
    }

    /// Interpolate the scale factor towards `scaling`.
    pub fn scale_to(mut self, scaling: f32) -> Self {
        self.scaling = Some(scaling);
        self
    }

    /// Interpolate the rotation towards `degrees`.
    pub fn rotate_to(mut self, degrees: f64) -> Self {
        self.rotation = Some(degrees);
        self
    }

    /// Switch mirroring on entry.
    pub fn flip_to(mut self, flip: Flip) -> Self {
        self.flip = Some(flip);
        self
    }
}

/// Result of [`Animation::start`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartOutcome {
    /// The animation begins on the next `apply`.
    Started,
    /// It was already running; nothing changed.
    AlreadyRunning,
    /// No step left to play; `reset` first.
    Exhausted,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Baseline {
    scaling: f32,
    rotation: f64,
}

impl Baseline {
    fn of(t: &Transform) -> Self {
        Self {
            scaling: t.scaling(),
            rotation: t.rotation(),
        }
    }
}

/// Ordered, timed steps driving a [`Transform`].
///
/// Time starts on the first [`Animation::apply`] after [`Animation::start`]; that call snapshots
/// the transform as the baseline of the first step. Each tick performs at most one step
/// transition: the finished step's targets are written exactly, the cursor advances, and the
/// next step takes a fresh baseline and applies its flip.
#[derive(Clone, Debug, Default)]
pub struct Animation {
    steps: Vec<Step>,
    looping: bool,
    started: bool,
    restart: bool,
    cursor: usize,
    step_start: Option<Instant>,
    step_end: Option<Instant>,
    baseline: Baseline,
    transitions: u64,
}

impl Animation {
    /// Empty, non-looping animation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Animation over `steps`.
    pub fn with_steps(looping: bool, steps: Vec<Step>) -> Self {
        Self {
            steps,
            looping,
            ..Self::default()
        }
    }

    /// Append a step.
    pub fn push_step(&mut self, step: Step) {
        self.steps.push(step);
    }

    /// The steps.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Whether the cursor wraps after the last step.
    pub fn is_loop(&self) -> bool {
        self.looping
    }

    /// Enable or disable looping.
    pub fn set_loop(&mut self, looping: bool) {
        self.looping = looping;
    }

    /// Begin playing from the cursor.
    pub fn start(&mut self) -> StartOutcome {
        if self.started {
            return StartOutcome::AlreadyRunning;
        }
        if self.is_done() {
            return StartOutcome::Exhausted;
        }
        self.started = true;
        self.restart = true;
        StartOutcome::Started
    }

    /// Freeze at the current state. Returns whether it was running.
    pub fn stop(&mut self) -> bool {
        std::mem::replace(&mut self.started, false)
    }

    /// Move the cursor back to the first step. Does not start or stop.
    pub fn reset(&mut self) {
        self.cursor = 0;
        if self.started {
            self.restart = true;
        }
    }

    /// True while started and not finished.
    pub fn is_running(&self) -> bool {
        self.started
    }

    /// True when the cursor is past the last step.
    pub fn is_done(&self) -> bool {
        self.cursor >= self.steps.len()
    }

    /// Index of the active step.
    pub fn current_step(&self) -> Option<usize> {
        (!self.is_done()).then_some(self.cursor)
    }

    /// Step transitions performed since construction.
    pub fn transitions(&self) -> u64 {
        self.transitions
    }

    /// Advance to `now` and write the interpolated state into `transform`.
    pub fn apply(&mut self, transform: &mut Transform, now: Instant) {
        if !self.started {
            return;
        }

        if self.restart {
            self.restart = false;
            self.enter_step(transform, now);
        } else if self.step_end.is_some_and(|end| now >= end) {
            let done = &self.steps[self.cursor];
            if let Some(s) = done.scaling {
                transform.set_scaling(s);
            }
            if let Some(r) = done.rotation {
                transform.set_rotation(r);
            }

            self.cursor += 1;
            self.transitions += 1;
            if self.is_done() {
                if self.looping {
                    self.cursor = 0;
                } else {
                    self.started = false;
                }
            }
            if !self.is_done() {
                self.enter_step(transform, now);
            }
        }

        if !self.started || self.is_done() {
            return;
        }
        let step = &self.steps[self.cursor];
        if step.duration.is_zero() {
            return;
        }
        let Some(start) = self.step_start else {
            return;
        };
        let elapsed = now.saturating_duration_since(start);
        let progress = (elapsed.as_nanos() as f64 / step.duration.as_nanos() as f64).min(1.0);

        if let Some(target) = step.scaling {
            let base = self.baseline.scaling;
            transform.set_scaling(base + (progress as f32) * (target - base));
        }
        if let Some(target) = step.rotation {
            let base = self.baseline.rotation;
            transform.set_rotation(base + progress * (target - base));
        }
    }

    fn enter_step(&mut self, transform: &mut Transform, now: Instant) {
        let step = &self.steps[self.cursor];
        self.step_start = Some(now);
        self.step_end = Some(now + step.duration);
        self.baseline = Baseline::of(transform);
        if let Some(flip) = step.flip {
            transform.set_flip(flip);
        }
    }
}

mod duration_ms {
    use std::time::Duration;

    pub(super) fn serialize<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub(super) fn deserialize<'de, D: serde::Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let ms = <u64 as serde::Deserialize>::deserialize(d)?;
        Ok(Duration::from_millis(ms))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/widgets/animation.rs"]
mod tests;
