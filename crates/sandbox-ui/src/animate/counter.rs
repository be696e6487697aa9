use std::time::{Duration, Instant};

use super::easing::{ease_out_cubic, progress};
use crate::env::Clock;

/// Default animation window for counters.
pub const DEFAULT_ANIMATION_DURATION: Duration = Duration::from_millis(420);

/// One sampled frame of a counter animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// The integer to display for this frame.
    pub value: i64,
    /// True for the final frame, which always equals the target.
    pub done: bool,
}

/// An eased transition of a displayed integer towards a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterAnimation {
    from: i64,
    to: i64,
    duration: Duration,
    start: Instant,
}

impl CounterAnimation {
    /// Creates an animation from `from` to `to` starting at `start`.
    ///
    /// A zero `duration` produces a single, final frame.
    pub fn new(from: i64, to: i64, duration: Duration, start: Instant) -> Self {
        Self {
            from,
            to,
            duration,
            start,
        }
    }

    /// The value the animation started from.
    pub fn from(&self) -> i64 {
        self.from
    }

    /// The value the animation converges to.
    pub fn target(&self) -> i64 {
        self.to
    }

    /// Length of the animation window.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// When the animation started.
    pub fn started_at(&self) -> Instant {
        self.start
    }

    /// Elapsed fraction of the window at `now`, in `[0, 1]`.
    pub fn progress(&self, now: Instant) -> f64 {
        progress(now.saturating_duration_since(self.start), self.duration)
    }

    /// Samples the frame to show at `now`.
    ///
    /// Once the window has elapsed the frame is the target exactly; the
    /// eased formula is never used for the last frame.
    pub fn sample(&self, now: Instant) -> Frame {
        let p = self.progress(now);
        if p >= 1.0 {
            return Frame {
                value: self.to,
                done: true,
            };
        }

        let from = self.from as f64;
        let span = self.to as f64 - from;
        let value = round_half_up(from + span * ease_out_cubic(p)) as i64;
        Frame { value, done: false }
    }

    /// Lazily yields frames read from `clock`, ending with the final frame.
    ///
    /// The sequence is not restartable: once the final frame has been
    /// yielded the iterator is exhausted.
    pub fn frames<C: Clock>(self, clock: &C) -> Frames<'_, C> {
        Frames {
            animation: self,
            clock,
            finished: false,
        }
    }
}

/// Frame sequence returned by [`CounterAnimation::frames`].
#[derive(Debug)]
pub struct Frames<'a, C: Clock> {
    animation: CounterAnimation,
    clock: &'a C,
    finished: bool,
}

impl<C: Clock> Iterator for Frames<'_, C> {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        if self.finished {
            return None;
        }
        let frame = self.animation.sample(self.clock.now());
        self.finished = frame.done;
        Some(frame)
    }
}

impl<C: Clock> std::iter::FusedIterator for Frames<'_, C> {}

/// Rounds to the nearest integer, halves going up (`-1.5` → `-1`).
pub(crate) fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Reads a counter's rendered text as an integer baseline.
///
/// Surrounding whitespace is ignored, fractional values are rounded, and
/// anything that is not a finite number reads as 0.
pub fn parse_displayed(text: &str) -> i64 {
    let trimmed = text.trim();
    if let Ok(n) = trimmed.parse::<i64>() {
        return n;
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => round_half_up(n) as i64,
        _ => 0,
    }
}
