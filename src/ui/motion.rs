//! Easing presets and time-based transitions.

use std::time::{Duration, Instant};

pub type Easing = fn(f64) -> f64;

/// Banner slide-in.
pub const BANNER_ENTER: Duration = Duration::from_millis(300);
/// One sweep of the skeleton shimmer, in ticks.
pub const SHIMMER_PERIOD_TICKS: u64 = 30;

pub fn linear(t: f64) -> f64 {
    t
}

pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

pub fn ease_in_out(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Transition {
    start: Instant,
    duration: Duration,
    easing: Easing,
}

impl Transition {
    pub fn new(start: Instant, duration: Duration) -> Self {
        Self {
            start,
            duration,
            easing: ease_out_cubic,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Eased progress in `[0, 1]`.
    pub fn progress_at(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        let t = (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0);
        (self.easing)(t).clamp(0.0, 1.0)
    }

    pub fn progress(&self) -> f64 {
        self.progress_at(Instant::now())
    }

    pub fn is_done_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start) >= self.duration
    }
}
