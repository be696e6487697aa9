//! The dashboard controller.
//!
//! [`SandboxUi`] owns everything the page script used to keep in ambient
//! globals: the toast and its hide timer, the per-element animation
//! registry, the preference store, the current stat snapshot and the
//! callbacks interested in stat updates. The host drives it with explicit
//! calls and a per-frame [`tick`](SandboxUi::tick).
//!
//! ```rust
//! use std::time::Duration;
//! use sandbox_ui::{
//!     Clock, ManualClock, MemoryPreferences, SandboxConfig, SandboxUi, StatSnapshot,
//!     StatName, StatUpdate, Surface, ThemePreference,
//! };
//!
//! let clock = ManualClock::new();
//! let mut ui = SandboxUi::new(Surface::game_page(), MemoryPreferences::new(), &SandboxConfig::default());
//! ui.boot(StatSnapshot::new(1000.0, 80.0, 40.0));
//! assert_eq!(ui.fills().budget, 50.0);
//!
//! ui.cycle_theme(clock.now()).unwrap();
//! assert_eq!(ui.theme(), ThemePreference::Cyber);
//!
//! ui.bind_counter(StatName::Budget, "budget");
//! ui.update_stats(&StatUpdate { budget: Some(1500.0), ..Default::default() }, clock.now());
//! clock.advance(Duration::from_millis(420));
//! ui.tick(clock.now());
//! assert_eq!(ui.surface().counter(&"budget".into()).unwrap().text, "1500");
//! ```

use std::collections::BTreeMap;
use std::time::Instant;

use crate::animate::{round_half_up, Animator, Frame};
use crate::config::SandboxConfig;
use crate::error::Result;
use crate::prefs::PreferenceStore;
use crate::preview::preview_text;
use crate::stats::{FillMap, Normalizer, StatName, StatSnapshot, StatUpdate};
use crate::surface::{ElementId, Surface};
use crate::theme::{ThemePreference, THEME_KEY};
use crate::toast::{Toast, ToastLevel};

/// Callback run after every stat update.
pub type UpdateCallback = Box<dyn FnMut(&StatSnapshot, &FillMap)>;

/// What one [`tick`](SandboxUi::tick) changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Counter frames written this tick.
    pub frames: Vec<(ElementId, Frame)>,
    /// True if the toast was hidden this tick.
    pub toast_hidden: bool,
}

impl TickReport {
    /// True if nothing changed.
    pub fn is_idle(&self) -> bool {
        self.frames.is_empty() && !self.toast_hidden
    }
}

/// Dashboard state and behavior for one surface.
pub struct SandboxUi<P: PreferenceStore> {
    surface: Surface,
    prefs: P,
    theme: ThemePreference,
    toast: Option<Toast>,
    animator: Animator,
    normalizer: Normalizer,
    snapshot: StatSnapshot,
    score: Option<f64>,
    fills: FillMap,
    bindings: BTreeMap<StatName, ElementId>,
    callbacks: Vec<UpdateCallback>,
}

impl<P: PreferenceStore> SandboxUi<P> {
    /// Wraps a surface. Nothing is read or written until [`boot`](Self::boot).
    pub fn new(surface: Surface, prefs: P, config: &SandboxConfig) -> Self {
        let toast = surface.toast.then(|| Toast::new(config.toast_duration()));
        let normalizer = config.normalizer();
        let snapshot = StatSnapshot::default();
        Self {
            surface,
            prefs,
            theme: ThemePreference::Default,
            toast,
            animator: Animator::new(config.animation_duration()),
            fills: normalizer.normalize(&snapshot),
            normalizer,
            snapshot,
            score: None,
            bindings: BTreeMap::new(),
            callbacks: Vec::new(),
        }
    }

    /// Load-time setup: applies the stored theme (when a theme button
    /// exists), settles counter text, and fills bars from `initial`.
    pub fn boot(&mut self, initial: StatSnapshot) {
        if self.surface.theme_button {
            self.theme = ThemePreference::from_stored(self.prefs.get(THEME_KEY).as_deref());
            self.surface.theme = Some(self.theme);
        }

        for counter in &mut self.surface.counters {
            counter.text = counter.displayed().to_string();
        }

        self.snapshot = initial;
        self.refresh_bars();
        tracing::debug!(theme = %self.theme, ?initial, "dashboard booted");
    }

    /// The active theme.
    pub fn theme(&self) -> ThemePreference {
        self.theme
    }

    /// Switches to `theme`, persists it and announces it in the toast.
    ///
    /// # Errors
    ///
    /// Fails only if the preference store cannot persist the value; the
    /// theme is applied either way.
    pub fn set_theme(&mut self, theme: ThemePreference, now: Instant) -> Result<()> {
        self.theme = theme;
        self.surface.theme = Some(theme);
        self.show_toast(format!("Theme enabled: {}", theme), ToastLevel::Success, now);
        tracing::info!(%theme, "theme switched");
        self.prefs.set(THEME_KEY, theme.as_str())
    }

    /// Advances to the next theme in the cycle.
    pub fn cycle_theme(&mut self, now: Instant) -> Result<ThemePreference> {
        let next = self.theme.next();
        self.set_theme(next, now)?;
        Ok(next)
    }

    /// Shows a toast. No-op when the surface has no toast slot.
    pub fn show_toast(&mut self, message: impl Into<String>, level: ToastLevel, now: Instant) {
        if let Some(toast) = self.toast.as_mut() {
            toast.show(message, level, now);
        }
    }

    /// Handles the pointer entering a choice: previews its deltas in the
    /// toast. Returns the preview text, if any was shown.
    pub fn hover_choice(&mut self, id: &ElementId, now: Instant) -> Option<String> {
        let text = preview_text(&self.surface.choice(id)?.deltas)?;
        self.show_toast(text.clone(), ToastLevel::Info, now);
        Some(text)
    }

    /// Animates a counter towards `target`, starting from what it shows now.
    ///
    /// Any animation already running on the counter is cancelled. Returns
    /// false if the counter doesn't exist.
    pub fn animate_counter(&mut self, id: &ElementId, target: i64, now: Instant) -> bool {
        let Some(counter) = self.surface.counter(id) else {
            return false;
        };
        let from = counter.displayed();
        self.animator.start(id.clone(), from, target, now);
        true
    }

    /// Stops a counter animation, leaving the last frame on screen.
    pub fn cancel_animation(&mut self, id: &ElementId) -> bool {
        self.animator.cancel(id).is_some()
    }

    /// True while any counter is animating.
    pub fn is_animating(&self) -> bool {
        !self.animator.is_empty()
    }

    /// Per-frame update: writes counter frames and expires the toast.
    pub fn tick(&mut self, now: Instant) -> TickReport {
        let frames = self.animator.tick(now);
        for (id, frame) in &frames {
            self.surface.set_counter_value(id, frame.value);
        }
        let toast_hidden = self.toast.as_mut().is_some_and(|t| t.tick(now));
        TickReport {
            frames,
            toast_hidden,
        }
    }

    /// Binds a stat to the counter that displays it.
    ///
    /// Only bound counters follow [`update_stats`](Self::update_stats);
    /// nothing is inferred from labels.
    pub fn bind_counter(&mut self, stat: StatName, id: impl Into<ElementId>) {
        self.bindings.insert(stat, id.into());
    }

    /// Removes a stat binding.
    pub fn unbind_counter(&mut self, stat: StatName) -> Option<ElementId> {
        self.bindings.remove(&stat)
    }

    /// Registers a callback run after each stat update.
    pub fn on_update(&mut self, callback: impl FnMut(&StatSnapshot, &FillMap) + 'static) {
        self.callbacks.push(Box::new(callback));
    }

    /// External update entry point: merges `update`, refills the bars,
    /// animates bound counters and notifies callbacks.
    pub fn update_stats(&mut self, update: &StatUpdate, now: Instant) {
        self.snapshot.apply(update);
        if let Some(score) = update.score {
            self.score = Some(score);
        }
        self.refresh_bars();

        let targets: Vec<(ElementId, i64)> = self
            .bindings
            .iter()
            .filter_map(|(stat, id)| {
                update
                    .value(*stat)
                    .map(|v| (id.clone(), round_half_up(v) as i64))
            })
            .collect();
        for (id, target) in targets {
            self.animate_counter(&id, target, now);
        }

        for callback in &mut self.callbacks {
            callback(&self.snapshot, &self.fills);
        }
        tracing::debug!(snapshot = ?self.snapshot, fills = ?self.fills, "stats updated");
    }

    fn refresh_bars(&mut self) {
        self.fills = self.normalizer.normalize(&self.snapshot);
        self.surface.apply_fills(&self.fills);
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn snapshot(&self) -> &StatSnapshot {
        &self.snapshot
    }

    /// Last score pushed through an update.
    pub fn score(&self) -> Option<f64> {
        self.score
    }

    pub fn fills(&self) -> &FillMap {
        &self.fills
    }

    /// The toast slot, if the surface has one.
    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    pub fn preferences(&self) -> &P {
        &self.prefs
    }

    /// Consumes the controller, returning the surface and store.
    pub fn into_parts(self) -> (Surface, P) {
        (self.surface, self.prefs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{Clock, ManualClock};
    use crate::prefs::MemoryPreferences;
    use crate::preview::ChoiceDeltas;
    use crate::surface::Choice;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn game_ui(prefs: MemoryPreferences) -> SandboxUi<MemoryPreferences> {
        SandboxUi::new(Surface::game_page(), prefs, &SandboxConfig::default())
    }

    #[test]
    fn test_boot_applies_stored_theme_and_fills() {
        let mut ui = game_ui(MemoryPreferences::new().with(THEME_KEY, "minimal"));
        ui.boot(StatSnapshot::new(1000.0, 80.0, 40.0));

        assert_eq!(ui.theme(), ThemePreference::Minimal);
        assert_eq!(ui.surface().theme, Some(ThemePreference::Minimal));
        assert_eq!(ui.surface().bar(&"budget-bar".into()).unwrap().width, Some(50.0));
        assert_eq!(ui.surface().bar(&"rep-bar".into()).unwrap().width, Some(80.0));
        assert_eq!(ui.surface().bar(&"morale-bar".into()).unwrap().width, Some(40.0));
    }

    #[test]
    fn test_boot_without_theme_button_ignores_preference() {
        let surface = Surface {
            theme_button: false,
            ..Surface::game_page()
        };
        let mut ui = SandboxUi::new(
            surface,
            MemoryPreferences::new().with(THEME_KEY, "cyber"),
            &SandboxConfig::default(),
        );
        ui.boot(StatSnapshot::default());
        assert_eq!(ui.theme(), ThemePreference::Default);
        assert_eq!(ui.surface().theme, None);
    }

    #[test]
    fn test_cycle_theme_persists_and_toasts() {
        let clock = ManualClock::new();
        let mut ui = game_ui(MemoryPreferences::new());
        ui.boot(StatSnapshot::default());

        assert_eq!(ui.cycle_theme(clock.now()).unwrap(), ThemePreference::Cyber);
        assert_eq!(ui.preferences().get(THEME_KEY).as_deref(), Some("cyber"));

        let toast = ui.toast().unwrap();
        assert!(toast.is_visible());
        assert_eq!(toast.message(), Some("Theme enabled: cyber"));
        assert_eq!(toast.level(), ToastLevel::Success);

        ui.cycle_theme(clock.now()).unwrap();
        ui.cycle_theme(clock.now()).unwrap();
        assert_eq!(ui.theme(), ThemePreference::Default);
        assert_eq!(
            ui.toast().unwrap().message(),
            Some("Theme enabled: default")
        );
    }

    #[test]
    fn test_hover_choice_previews() {
        let clock = ManualClock::new();
        let mut surface = Surface::game_page();
        surface.choices.push(Choice {
            id: "launch".into(),
            text: "Launch early".to_string(),
            deltas: ChoiceDeltas::from_numbers(Some(-200), Some(15), None),
        });
        surface.choices.push(Choice {
            id: "wait".into(),
            text: "Wait".to_string(),
            deltas: ChoiceDeltas::default(),
        });
        let mut ui = SandboxUi::new(surface, MemoryPreferences::new(), &SandboxConfig::default());

        let shown = ui.hover_choice(&"launch".into(), clock.now());
        assert_eq!(shown.as_deref(), Some("Budget: -200  •  Reputation: +15"));
        assert_eq!(ui.toast().unwrap().level(), ToastLevel::Info);

        assert_eq!(ui.hover_choice(&"wait".into(), clock.now()), None);
        assert_eq!(ui.hover_choice(&"missing".into(), clock.now()), None);
    }

    #[test]
    fn test_toast_missing_slot_is_noop() {
        let clock = ManualClock::new();
        let surface = Surface {
            toast: false,
            ..Surface::game_page()
        };
        let mut ui = SandboxUi::new(surface, MemoryPreferences::new(), &SandboxConfig::default());
        ui.show_toast("nobody sees this", ToastLevel::Info, clock.now());
        assert!(ui.toast().is_none());
        ui.cycle_theme(clock.now()).unwrap();
        assert_eq!(ui.theme(), ThemePreference::Cyber);
    }

    #[test]
    fn test_tick_hides_toast() {
        let clock = ManualClock::new();
        let mut ui = game_ui(MemoryPreferences::new());
        ui.show_toast("hi", ToastLevel::Info, clock.now());

        clock.advance(ms(1400));
        let report = ui.tick(clock.now());
        assert!(report.toast_hidden);
        assert!(!ui.toast().unwrap().is_visible());
        assert!(ui.tick(clock.now()).is_idle());
    }

    #[test]
    fn test_animate_counter_writes_frames() {
        let clock = ManualClock::new();
        let mut ui = game_ui(MemoryPreferences::new());
        ui.boot(StatSnapshot::default());
        let id = ElementId::from("budget");

        assert!(ui.animate_counter(&id, 1000, clock.now()));
        clock.advance(ms(210));
        ui.tick(clock.now());
        let mid = ui.surface().counter(&id).unwrap().displayed();
        assert!(mid > 500 && mid < 1000, "mid-animation value {}", mid);

        clock.advance(ms(210));
        ui.tick(clock.now());
        assert_eq!(ui.surface().counter(&id).unwrap().text, "1000");
        assert!(!ui.is_animating());
    }

    #[test]
    fn test_restart_from_current_frame() {
        let clock = ManualClock::new();
        let mut ui = game_ui(MemoryPreferences::new());
        let id = ElementId::from("morale");

        ui.animate_counter(&id, 100, clock.now());
        clock.advance(ms(210));
        ui.tick(clock.now());
        let shown = ui.surface().counter(&id).unwrap().displayed();

        ui.animate_counter(&id, 20, clock.now());
        ui.tick(clock.now());
        assert_eq!(ui.surface().counter(&id).unwrap().displayed(), shown);

        clock.advance(ms(420));
        ui.tick(clock.now());
        assert_eq!(ui.surface().counter(&id).unwrap().displayed(), 20);
    }

    #[test]
    fn test_animate_missing_counter() {
        let clock = ManualClock::new();
        let mut ui = game_ui(MemoryPreferences::new());
        assert!(!ui.animate_counter(&"cash".into(), 5, clock.now()));
        assert!(!ui.is_animating());
    }

    #[test]
    fn test_cancel_animation_leaves_last_frame() {
        let clock = ManualClock::new();
        let mut ui = game_ui(MemoryPreferences::new());
        let id = ElementId::from("score");

        ui.animate_counter(&id, 300, clock.now());
        clock.advance(ms(100));
        ui.tick(clock.now());
        let shown = ui.surface().counter(&id).unwrap().text.clone();

        assert!(ui.cancel_animation(&id));
        clock.advance(ms(1000));
        ui.tick(clock.now());
        assert_eq!(ui.surface().counter(&id).unwrap().text, shown);
    }

    #[test]
    fn test_update_stats_refills_and_animates_bound_counters() {
        let clock = ManualClock::new();
        let mut ui = game_ui(MemoryPreferences::new());
        ui.boot(StatSnapshot::new(1000.0, 80.0, 40.0));
        ui.bind_counter(StatName::Reputation, "reputation");
        ui.bind_counter(StatName::Score, "score");

        let update = StatUpdate::from_json(r#"{"reputation": 120, "score": 42, "budget": 500}"#)
            .unwrap();
        ui.update_stats(&update, clock.now());

        assert_eq!(ui.fills().reputation, 100.0);
        assert_eq!(ui.fills().budget, 25.0);
        assert_eq!(ui.fills().morale, 40.0);
        assert_eq!(ui.score(), Some(42.0));

        clock.advance(ms(420));
        ui.tick(clock.now());
        assert_eq!(ui.surface().counter(&"reputation".into()).unwrap().text, "120");
        assert_eq!(ui.surface().counter(&"score".into()).unwrap().text, "42");
        // unbound
        assert_eq!(ui.surface().counter(&"budget".into()).unwrap().text, "0");
    }

    #[test]
    fn test_update_callbacks_receive_fills() {
        let clock = ManualClock::new();
        let mut ui = game_ui(MemoryPreferences::new());
        let seen: Rc<RefCell<Vec<f64>>> = Rc::default();

        let sink = Rc::clone(&seen);
        ui.on_update(move |_, fills| sink.borrow_mut().push(fills.morale));

        ui.update_stats(
            &StatUpdate {
                morale: Some(70.0),
                ..Default::default()
            },
            clock.now(),
        );
        ui.update_stats(
            &StatUpdate {
                morale: Some(-5.0),
                ..Default::default()
            },
            clock.now(),
        );

        assert_eq!(*seen.borrow(), vec![70.0, 0.0]);
    }

    #[test]
    fn test_unbind_counter() {
        let clock = ManualClock::new();
        let mut ui = game_ui(MemoryPreferences::new());
        ui.bind_counter(StatName::Morale, "morale");
        assert_eq!(ui.unbind_counter(StatName::Morale), Some(ElementId::from("morale")));

        ui.update_stats(
            &StatUpdate {
                morale: Some(10.0),
                ..Default::default()
            },
            clock.now(),
        );
        assert!(!ui.is_animating());
    }

    #[test]
    fn test_fractional_update_rounds_half_up() {
        let clock = ManualClock::new();
        let mut ui = game_ui(MemoryPreferences::new());
        ui.bind_counter(StatName::Score, "score");

        ui.update_stats(&StatUpdate::from_json(r#"{"score": -2.5}"#).unwrap(), clock.now());
        clock.advance(Duration::from_secs(1));
        ui.tick(clock.now());

        let shown = ui.surface().counter(&"score".into()).map(|c| c.text.clone());
        assert_eq!(shown.as_deref(), Some("-2"));
    }
}
