//! Integration tests for sandbox-ui.
//!
//! These drive the dashboard the way a host page would: boot with initial
//! stats, push updates, step the frame clock, toggle themes across reloads.

use std::time::Duration;

use sandbox_ui::{
    Clock, FilePreferences, ManualClock, MemoryPreferences, PreferenceStore, SandboxConfig,
    SandboxUi, StatName, StatSnapshot, StatUpdate, Surface, ThemePreference, THEME_KEY,
};
use tempfile::TempDir;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn game_ui() -> SandboxUi<MemoryPreferences> {
    SandboxUi::new(
        Surface::game_page(),
        MemoryPreferences::new(),
        &SandboxConfig::default(),
    )
}

fn bar_width(ui: &SandboxUi<impl PreferenceStore>, id: &str) -> Option<f64> {
    ui.surface().bar(&id.into()).and_then(|b| b.width)
}

fn counter_text(ui: &SandboxUi<impl PreferenceStore>, id: &str) -> String {
    ui.surface()
        .counter(&id.into())
        .map(|c| c.text.clone())
        .unwrap_or_default()
}

// ============================================================================
// Stats flow
// ============================================================================

#[test]
fn budget_drop_updates_bar_and_counter() {
    let clock = ManualClock::new();
    let mut ui = game_ui();
    ui.bind_counter(StatName::Budget, "budget");

    let initial: StatSnapshot =
        serde_json::from_str(r#"{"budget": 1000, "rep": 80, "morale": 40}"#).unwrap();
    ui.boot(initial);
    assert_eq!(bar_width(&ui, "budget-bar"), Some(50.0));

    ui.update_stats(&StatUpdate::from_json(r#"{"budget": 50}"#).unwrap(), clock.now());
    assert_eq!(bar_width(&ui, "budget-bar"), Some(2.5));
    assert_eq!(bar_width(&ui, "rep-bar"), Some(80.0));
    assert_eq!(bar_width(&ui, "morale-bar"), Some(40.0));

    // Counter starts from what it showed (0) and lands on the target.
    clock.advance(ms(420));
    ui.tick(clock.now());
    assert_eq!(counter_text(&ui, "budget"), "50");
}

#[test]
fn out_of_range_stats_clamp() {
    let mut ui = game_ui();
    ui.boot(
        serde_json::from_str(r#"{"budget": 5000, "reputation": -20, "morale": "lots"}"#).unwrap(),
    );
    assert_eq!(bar_width(&ui, "budget-bar"), Some(100.0));
    assert_eq!(bar_width(&ui, "rep-bar"), Some(0.0));
    assert_eq!(bar_width(&ui, "morale-bar"), Some(0.0));
}

#[test]
fn custom_budget_ceiling_from_config() {
    let config = SandboxConfig::from_yaml("budget-ceiling: 4000\n").unwrap();
    let mut ui = SandboxUi::new(Surface::game_page(), MemoryPreferences::new(), &config);
    ui.boot(StatSnapshot::new(1000.0, 0.0, 0.0));
    assert_eq!(bar_width(&ui, "budget-bar"), Some(25.0));
}

// ============================================================================
// Animation
// ============================================================================

#[test]
fn superseded_animation_converges_on_latest_target() {
    let clock = ManualClock::new();
    let mut ui = game_ui();
    ui.bind_counter(StatName::Score, "score");

    ui.update_stats(
        &StatUpdate {
            score: Some(1000.0),
            ..Default::default()
        },
        clock.now(),
    );
    let mut last = 0;
    for _ in 0..5 {
        clock.advance(ms(30));
        ui.tick(clock.now());
        let shown: i64 = counter_text(&ui, "score").parse().unwrap();
        assert!(shown >= last, "counter went backwards: {} -> {}", last, shown);
        last = shown;
    }

    ui.update_stats(
        &StatUpdate {
            score: Some(10.0),
            ..Default::default()
        },
        clock.now(),
    );
    for _ in 0..20 {
        clock.advance(ms(30));
        ui.tick(clock.now());
    }

    assert_eq!(counter_text(&ui, "score"), "10");
    assert!(!ui.is_animating());
}

#[test]
fn frames_settle_when_clock_jumps_past_end() {
    let clock = ManualClock::new();
    let mut ui = game_ui();
    ui.animate_counter(&"morale".into(), -35, clock.now());

    clock.advance(Duration::from_secs(10));
    let report = ui.tick(clock.now());
    assert_eq!(report.frames.len(), 1);
    assert!(report.frames[0].1.done);
    assert_eq!(counter_text(&ui, "morale"), "-35");
}

// ============================================================================
// Themes
// ============================================================================

#[test]
fn theme_cycles_through_all_three() {
    let clock = ManualClock::new();
    let mut ui = game_ui();
    ui.boot(StatSnapshot::default());

    let seen: Vec<ThemePreference> = (0..3).map(|_| ui.cycle_theme(clock.now()).unwrap()).collect();
    assert_eq!(
        seen,
        vec![
            ThemePreference::Cyber,
            ThemePreference::Minimal,
            ThemePreference::Default
        ]
    );
}

#[test]
fn theme_survives_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("preferences.json");
    let clock = ManualClock::new();

    {
        let prefs = FilePreferences::open(&path).unwrap();
        let mut ui = SandboxUi::new(Surface::game_page(), prefs, &SandboxConfig::default());
        ui.boot(StatSnapshot::default());
        assert_eq!(ui.theme(), ThemePreference::Default);
        ui.cycle_theme(clock.now()).unwrap();
        ui.cycle_theme(clock.now()).unwrap();
    }

    let prefs = FilePreferences::open(&path).unwrap();
    assert_eq!(prefs.get(THEME_KEY).as_deref(), Some("minimal"));

    let mut ui = SandboxUi::new(Surface::game_page(), prefs, &SandboxConfig::default());
    ui.boot(StatSnapshot::default());
    assert_eq!(ui.theme(), ThemePreference::Minimal);
    assert_eq!(ui.surface().theme, Some(ThemePreference::Minimal));
}

#[test]
fn unknown_stored_theme_falls_back() {
    let clock = ManualClock::new();
    let prefs = MemoryPreferences::new().with(THEME_KEY, "solarized");
    let mut ui = SandboxUi::new(Surface::game_page(), prefs, &SandboxConfig::default());
    ui.boot(StatSnapshot::default());

    assert_eq!(ui.theme(), ThemePreference::Default);
    assert_eq!(ui.cycle_theme(clock.now()).unwrap(), ThemePreference::Cyber);
}

// ============================================================================
// Toast and previews
// ============================================================================

#[test]
fn hover_replaces_theme_toast_and_rearms_timer() {
    let surface = Surface::from_yaml(
        r#"
choices:
  - { id: hire, text: Hire, delta-budget: "-300", delta-morale: "10" }
toast: true
theme-button: true
"#,
    )
    .unwrap();
    let clock = ManualClock::new();
    let mut ui = SandboxUi::new(surface, MemoryPreferences::new(), &SandboxConfig::default());

    ui.cycle_theme(clock.now()).unwrap();
    clock.advance(ms(1000));
    ui.hover_choice(&"hire".into(), clock.now());
    assert_eq!(
        ui.toast().unwrap().message(),
        Some("Budget: -300  •  Morale: +10")
    );

    // The first deadline (1400) has passed but the second (2400) has not.
    clock.advance(ms(600));
    assert!(!ui.tick(clock.now()).toast_hidden);
    assert!(ui.toast().unwrap().is_visible());

    clock.advance(ms(800));
    assert!(ui.tick(clock.now()).toast_hidden);
}

#[test]
fn empty_surface_tolerates_everything() {
    let clock = ManualClock::new();
    let mut ui = SandboxUi::new(
        Surface::new(),
        MemoryPreferences::new(),
        &SandboxConfig::default(),
    );
    ui.bind_counter(StatName::Budget, "budget");
    ui.boot(StatSnapshot::new(1.0, 2.0, 3.0));
    ui.update_stats(
        &StatUpdate {
            budget: Some(9.0),
            ..Default::default()
        },
        clock.now(),
    );

    assert!(ui.hover_choice(&"nothing".into(), clock.now()).is_none());
    assert!(ui.tick(clock.now()).is_idle());
    assert_eq!(ui.theme(), ThemePreference::Default);
}
