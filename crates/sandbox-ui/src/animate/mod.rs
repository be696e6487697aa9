//! Counter animation.
//!
//! A counter moves from the value it currently shows to a new target along a
//! cubic ease-out curve over a fixed window (420 ms by default). Sampling is
//! pull-based: the host asks for the frame at "now" once per rendered frame,
//! and the final frame always lands exactly on the target regardless of
//! rounding along the way.
//!
//! - [`ease_out_cubic`]: the curve itself
//! - [`CounterAnimation`]: one animation, sampled at arbitrary instants
//! - [`Frames`]: a lazy, finite frame sequence driven by a [`Clock`](crate::Clock)
//! - [`Animator`]: per-element registry with explicit cancellation
//!
//! ```rust
//! use std::time::Duration;
//! use sandbox_ui::{CounterAnimation, ManualClock, Clock};
//!
//! let clock = ManualClock::new();
//! let anim = CounterAnimation::new(0, 100, Duration::from_millis(400), clock.now());
//!
//! clock.advance(Duration::from_millis(200));
//! let mid = anim.sample(clock.now());
//! assert!(mid.value > 50 && !mid.done);
//!
//! clock.advance(Duration::from_millis(200));
//! assert_eq!(anim.sample(clock.now()).value, 100);
//! ```

mod counter;
mod easing;
mod registry;

pub(crate) use counter::round_half_up;
pub use counter::{parse_displayed, CounterAnimation, Frame, Frames, DEFAULT_ANIMATION_DURATION};
pub use easing::{ease_out_cubic, progress};
pub use registry::Animator;
