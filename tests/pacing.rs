// tests/pacing.rs
#![cfg(feature = "sim-pacing")]

use park_idle::pacing::{PacingConfig, simulate_pacing};
use park_idle::{Economy, RideCatalog, RideDefinition, Tuning};

#[test]
fn default_park_completes_with_unlocks_in_order() {
    let report = simulate_pacing(&Economy::default(), PacingConfig::default()).unwrap();
    assert!(report.all_unlocked(), "{report:?}");
    assert!(report.sessions < PacingConfig::default().max_sessions);

    let times: Vec<f64> = report
        .milestones
        .iter()
        .map(|m| m.unlocked_after_minutes.unwrap())
        .collect();
    assert_eq!(times[0], 0.0);
    for w in times.windows(2) {
        assert!(w[1] > w[0], "{times:?}");
    }
    assert_eq!(report.final_state.ride_levels.len(), 5);
    assert!(report.final_state.balance >= 0.0);
}

#[test]
fn same_seed_same_report() {
    let cfg = PacingConfig { seed: 99, ..PacingConfig::default() };
    let a = simulate_pacing(&Economy::default(), cfg).unwrap();
    let b = simulate_pacing(&Economy::default(), cfg).unwrap();
    assert_eq!(a, b);
}

#[test]
fn session_cap_is_respected() {
    let cfg = PacingConfig { max_sessions: 3, ..PacingConfig::default() };
    let r = simulate_pacing(&Economy::default(), cfg).unwrap();
    assert_eq!(r.sessions, 3);
    assert!(!r.all_unlocked());
    assert_eq!(r.milestones[4].unlocked_after_minutes, None);
}

#[test]
fn second_ride_lands_within_first_day() {
    // Two-hour check-ins with no spread: the Haunted House should take
    // hours, not days.
    let cfg = PacingConfig { afk_jitter: 0.0, ..PacingConfig::default() };
    let r = simulate_pacing(&Economy::default(), cfg).unwrap();
    let t = r.milestones[1].unlocked_after_minutes.unwrap();
    assert!((120.0..=24.0 * 60.0).contains(&t), "haunted house after {t} min");
}

#[test]
fn free_single_ride_park_needs_no_sessions() {
    let cat = RideCatalog::new(vec![RideDefinition::new("Carousel", 1.0, 0.0)]).unwrap();
    let eco = Economy::new(cat, Tuning::default());
    let r = simulate_pacing(&eco, PacingConfig::default()).unwrap();
    assert_eq!(r.sessions, 0);
    assert!(r.all_unlocked());
}
