//! Easing curve and elapsed-time fraction.

use std::time::Duration;

/// Cubic ease-out: fast start, decelerating into the target.
///
/// `p` is clamped to `[0, 1]`, so the result is too. The curve is
/// non-decreasing with `ease_out_cubic(0) == 0` and `ease_out_cubic(1) == 1`.
pub fn ease_out_cubic(p: f64) -> f64 {
    let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
    1.0 - (1.0 - p).powi(3)
}

/// Fraction of `duration` covered by `elapsed`, capped at 1.
///
/// A zero duration is already complete.
pub fn progress(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f64() / duration.as_secs_f64()).min(1.0)
}
