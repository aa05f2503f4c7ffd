// src/pacing.rs
#![cfg(feature = "sim-pacing")]

//! Pacing simulation: a headless player driven through the real progression
//! operations, to measure how long each unlock takes under a catalogue.
//!
//! Each simulated session:
//! 1. advances a [`ManualClock`] by an AFK gap drawn around
//!    `mean_afk_minutes` (seeded `WyRand`, so runs are reproducible),
//! 2. applies accrual,
//! 3. buys every ride it can afford, in order,
//! 4. spends up to `upgrade_share` of what is left on the cheapest single
//!    upgrades, saving the rest toward the next unlock (all of it once the
//!    park is complete).
//!
//! The run stops when every ride is unlocked or after `max_sessions`.

use bevy_prng::WyRand;
use chrono::{NaiveDate, NaiveDateTime};
use log::debug;
use rand_core::SeedableRng;

use crate::economy::Economy;
use crate::error::ProgressionError;
use crate::mechanics::stoch;
use crate::progression::Session;
use crate::state::GameState;
use crate::store::{ManualClock, MemoryStore};

#[derive(Clone, Copy, Debug)]
pub struct PacingConfig {
    pub seed: u64,
    pub mean_afk_minutes: f64,
    /// Relative spread of AFK gaps (std-dev as a fraction of the mean).
    pub afk_jitter: f64,
    /// Fraction of post-purchase balance the player spends on upgrades.
    pub upgrade_share: f64,
    pub max_sessions: usize,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            seed: 0x5EED,
            mean_afk_minutes: 120.0,
            afk_jitter: 0.5,
            upgrade_share: 0.5,
            max_sessions: 20_000,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RideMilestone {
    pub index: usize,
    pub name: String,
    /// Simulated minutes from the start until the ride was bought;
    /// `Some(0.0)` for rides owned from the start.
    pub unlocked_after_minutes: Option<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PacingReport {
    pub milestones: Vec<RideMilestone>,
    pub sessions: usize,
    pub minutes_played: f64,
    pub final_state: GameState,
}

impl PacingReport {
    pub fn all_unlocked(&self) -> bool {
        self.milestones.iter().all(|m| m.unlocked_after_minutes.is_some())
    }
}

fn epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// Cheapest single upgrade among unlocked rides.
fn cheapest_upgrade(
    economy: &Economy,
    levels: &[u32],
) -> Result<Option<(usize, f64)>, ProgressionError> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &lvl) in levels.iter().enumerate() {
        let c = economy.compute_upgrade_cost(i, lvl)?;
        if best.is_none_or(|(_, b)| c < b) {
            best = Some((i, c));
        }
    }
    Ok(best)
}

pub fn simulate_pacing(
    economy: &Economy,
    cfg: PacingConfig,
) -> Result<PacingReport, ProgressionError> {
    let mut rng = WyRand::from_seed(cfg.seed.to_le_bytes());
    let clock = ManualClock::new(epoch());
    let mut session = Session::open(economy.clone(), MemoryStore::new(clock.clone()))?;

    let mut milestones: Vec<RideMilestone> = economy
        .catalog()
        .iter()
        .enumerate()
        .map(|(index, ride)| RideMilestone {
            index,
            name: ride.name.clone(),
            unlocked_after_minutes: (index < session.ride_levels().len()).then_some(0.0),
        })
        .collect();

    let mut minutes_played = 0.0;
    let mut sessions = 0;
    while sessions < cfg.max_sessions && session.next_unlock().is_some() {
        sessions += 1;
        let gap = stoch::afk_gap_minutes(&mut rng, cfg.mean_afk_minutes, cfg.afk_jitter, 1.0);
        let secs = (gap * 60.0).round() as i64;
        clock.advance_secs(secs);
        minutes_played += secs as f64 / 60.0;

        session.apply_accrual()?;

        loop {
            match session.purchase_next_ride() {
                Ok(p) => {
                    debug!("pacing: ride {} after {minutes_played:.0} min", p.index);
                    milestones[p.index].unlocked_after_minutes = Some(minutes_played);
                }
                Err(
                    ProgressionError::AllRidesUnlocked | ProgressionError::InsufficientFunds { .. },
                ) => break,
                Err(e) => return Err(e),
            }
        }

        let share = if session.next_unlock().is_some() {
            cfg.upgrade_share.clamp(0.0, 1.0)
        } else {
            1.0
        };
        let mut budget = session.balance() * share;
        while let Some((i, cost)) = cheapest_upgrade(session.economy(), session.ride_levels())? {
            if cost > budget {
                break;
            }
            session.upgrade_ride(i, 1)?;
            budget -= cost;
        }
    }

    let (_, _, final_state) = session.close()?;
    Ok(PacingReport { milestones, sessions, minutes_played, final_state })
}
