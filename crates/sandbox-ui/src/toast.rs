//! Transient notifications.
//!
//! One toast is visible at a time. Showing a new message replaces the text
//! and re-arms the hide deadline, which cancels the previous one; the host's
//! frame tick hides the toast once the deadline passes.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// How long a toast stays up by default.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(1400);

/// Visual weight of a toast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastLevel {
    /// Neutral information, e.g. a choice preview.
    #[default]
    Info,
    /// Confirmation of a user action, e.g. a theme switch.
    Success,
}

impl ToastLevel {
    /// Palette role used to style this level.
    pub fn role(self) -> &'static str {
        match self {
            ToastLevel::Info => "toast.info",
            ToastLevel::Success => "toast.success",
        }
    }
}

/// The toast slot and its hide timer.
#[derive(Debug, Clone)]
pub struct Toast {
    duration: Duration,
    message: Option<String>,
    level: ToastLevel,
    visible: bool,
    hide_at: Option<Instant>,
}

impl Toast {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            message: None,
            level: ToastLevel::Info,
            visible: false,
            hide_at: None,
        }
    }

    /// Shows `message` and arms the hide deadline at `now + duration`.
    ///
    /// Any earlier deadline is dropped.
    pub fn show(&mut self, message: impl Into<String>, level: ToastLevel, now: Instant) {
        let message = message.into();
        tracing::debug!(%message, ?level, "toast shown");
        self.message = Some(message);
        self.level = level;
        self.visible = true;
        self.hide_at = Some(now + self.duration);
    }

    /// Hides the toast if its deadline has passed. Returns true if this
    /// call hid it.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.hide_at {
            Some(deadline) if now >= deadline => {
                self.visible = false;
                self.hide_at = None;
                true
            }
            _ => false,
        }
    }

    /// Disarms the hide deadline without hiding the toast.
    pub fn cancel(&mut self) -> bool {
        self.hide_at.take().is_some()
    }

    /// Hides immediately.
    pub fn dismiss(&mut self) {
        self.visible = false;
        self.hide_at = None;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The last message shown. Stays readable after hiding, like the
    /// slot's text content.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn level(&self) -> ToastLevel {
        self.level
    }

    /// The armed hide deadline, if any.
    pub fn hide_at(&self) -> Option<Instant> {
        self.hide_at
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl Default for Toast {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_DURATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{Clock, ManualClock};

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_hides_exactly_at_deadline() {
        let clock = ManualClock::new();
        let mut toast = Toast::default();

        toast.show("hello", ToastLevel::Info, clock.now());
        assert!(toast.is_visible());

        clock.advance(ms(1399));
        assert!(!toast.tick(clock.now()));
        assert!(toast.is_visible());

        clock.advance(ms(1));
        assert!(toast.tick(clock.now()));
        assert!(!toast.is_visible());
        assert_eq!(toast.message(), Some("hello"));
    }

    #[test]
    fn test_reshow_postpones_hide() {
        let clock = ManualClock::new();
        let mut toast = Toast::new(ms(100));

        toast.show("first", ToastLevel::Info, clock.now());
        clock.advance(ms(80));
        toast.show("second", ToastLevel::Success, clock.now());

        clock.advance(ms(50));
        assert!(!toast.tick(clock.now()));
        assert_eq!(toast.message(), Some("second"));
        assert_eq!(toast.level(), ToastLevel::Success);

        clock.advance(ms(50));
        assert!(toast.tick(clock.now()));
    }

    #[test]
    fn test_cancel_keeps_visible() {
        let clock = ManualClock::new();
        let mut toast = Toast::new(ms(10));

        toast.show("sticky", ToastLevel::Info, clock.now());
        assert!(toast.cancel());
        assert!(!toast.cancel());

        clock.advance(ms(1000));
        assert!(!toast.tick(clock.now()));
        assert!(toast.is_visible());
    }

    #[test]
    fn test_dismiss() {
        let clock = ManualClock::new();
        let mut toast = Toast::default();
        toast.show("bye", ToastLevel::Info, clock.now());
        toast.dismiss();
        assert!(!toast.is_visible());
        assert_eq!(toast.hide_at(), None);
    }

    #[test]
    fn test_level_roles() {
        assert_eq!(ToastLevel::Info.role(), "toast.info");
        assert_eq!(ToastLevel::Success.role(), "toast.success");
    }
}
