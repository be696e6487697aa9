//! Environment abstractions for testability.
//!
//! The dashboard reads two things from the outside world: environment
//! variables (for config and preference locations) and the current time
//! (for frame sampling and toast deadlines). Both sit behind traits so tests
//! can run without touching the real process environment or waiting on a
//! wall clock.

use std::cell::Cell;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Abstraction over environment variables.
pub trait EnvReader {
    /// Get an environment variable value.
    fn var(&self, name: &str) -> Option<String>;
}

/// Abstraction over the frame clock.
///
/// The host calls into the dashboard once per rendered frame; whatever it
/// considers "now" for that frame comes from here.
pub trait Clock {
    /// The current instant.
    fn now(&self) -> Instant;
}

// === Real implementations ===

/// Real environment variable reader.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealEnv;

impl EnvReader for RealEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Monotonic system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

// === Mock implementations for testing ===

/// Mock environment variable reader for testing.
#[derive(Debug, Clone, Default)]
pub struct MockEnv {
    vars: HashMap<String, String>,
}

impl MockEnv {
    /// Create an empty mock environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an environment variable.
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl EnvReader for MockEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

/// A clock that only moves when told to.
///
/// Every reading is `origin + offset`; tests advance the offset explicitly.
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    offset: Cell<Duration>,
}

impl ManualClock {
    /// Create a clock frozen at its origin.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Cell::new(Duration::ZERO),
        }
    }

    /// The instant this clock started at.
    pub fn origin(&self) -> Instant {
        self.origin
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get() + by);
    }

    /// Jump to a fixed offset from the origin.
    pub fn set_elapsed(&self, elapsed: Duration) {
        self.offset.set(elapsed);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.offset.get()
    }
}
