//! Progression Operations: accrual, ride purchases and upgrades.
//!
//! Every command follows the same shape: validate against the current state,
//! build the candidate next state, persist it, and only then write it back
//! into the caller's [`GameState`]. A rejected or failed command therefore
//! leaves both the caller's state and the store untouched.

use log::{debug, info};

use crate::catalog::{RideCatalog, RideDefinition};
use crate::economy::Economy;
use crate::error::{ProgressionError, StorageError};
use crate::mechanics::round2;
use crate::state::GameState;
use crate::store::StateStore;

/// Time away, split for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ElapsedBreakdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub total_seconds: i64,
}

impl ElapsedBreakdown {
    pub fn from_seconds(total_seconds: i64) -> Self {
        let s = total_seconds.max(0);
        Self {
            days: s / 86_400,
            hours: (s / 3_600) % 24,
            minutes: (s / 60) % 60,
            seconds: s % 60,
            total_seconds: s,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AccrualReport {
    pub earned: f64,
    pub elapsed: ElapsedBreakdown,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Purchase {
    pub index: usize,
    pub price: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Upgrade {
    pub index: usize,
    pub from_level: u32,
    pub to_level: u32,
    pub cost: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RideStatus {
    Unlocked { level: u32 },
    Locked,
}

/// A catalogue row paired with the player's progress on it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RideView<'a> {
    pub index: usize,
    pub ride: &'a RideDefinition,
    pub status: RideStatus,
}

fn commit<S: StateStore>(
    store: &mut S,
    state: &mut GameState,
    next: GameState,
) -> Result<(), StorageError> {
    store.save(&next)?;
    *state = next;
    Ok(())
}

/// Credit the payout for time since `last_played_at` and move the accrual
/// point to now. Calling it twice in a row earns nothing the second time.
pub fn apply_accrual<S: StateStore>(
    economy: &Economy,
    store: &mut S,
    state: &mut GameState,
) -> Result<AccrualReport, StorageError> {
    let now = store.now();
    let secs = now.signed_duration_since(state.last_played_at).num_seconds().max(0);
    let earned = economy.compute_offline_earnings(&state.ride_levels, secs as f64);

    let mut next = state.clone();
    next.balance = round2(next.balance + earned);
    next.last_played_at = now;
    commit(store, state, next)?;

    info!("accrued {earned:.2} over {secs}s; balance {:.2}", state.balance);
    Ok(AccrualReport { earned, elapsed: ElapsedBreakdown::from_seconds(secs) })
}

/// Unlock the next ride in catalogue order at level 1.
pub fn purchase_next_ride<S: StateStore>(
    economy: &Economy,
    store: &mut S,
    state: &mut GameState,
) -> Result<Purchase, ProgressionError> {
    let index = state.unlocked_count();
    if index >= economy.catalog().len() {
        debug!("purchase declined: all rides unlocked");
        return Err(ProgressionError::AllRidesUnlocked);
    }
    let price = economy.unlock_price_of(index)?;
    if state.balance < price {
        debug!("purchase of ride {index} declined: {:.2} < {price:.2}", state.balance);
        return Err(ProgressionError::InsufficientFunds { needed: price, available: state.balance });
    }

    let mut next = state.clone();
    next.balance = round2(next.balance - price);
    next.ride_levels.push(1);
    commit(store, state, next)?;

    info!("unlocked ride {index} for {price:.2}");
    Ok(Purchase { index, price })
}

/// Raise ride `index` by `count` levels as one transaction: the whole batch
/// is paid for, or nothing happens.
pub fn upgrade_ride<S: StateStore>(
    economy: &Economy,
    store: &mut S,
    state: &mut GameState,
    index: usize,
    count: u32,
) -> Result<Upgrade, ProgressionError> {
    let from_level = state.level_of(index).ok_or(ProgressionError::RideNotUnlocked(index))?;
    if count == 0 {
        return Err(ProgressionError::InvalidUpgradeCount);
    }
    let cost = economy.compute_batch_upgrade_cost(index, from_level, count)?;
    if state.balance < cost {
        debug!("upgrade of ride {index} x{count} declined: {:.2} < {cost:.2}", state.balance);
        return Err(ProgressionError::InsufficientFunds { needed: cost, available: state.balance });
    }

    let to_level = from_level.saturating_add(count);
    let mut next = state.clone();
    next.balance = round2(next.balance - cost);
    next.ride_levels[index] = to_level;
    commit(store, state, next)?;

    info!("upgraded ride {index} {from_level} -> {to_level} for {cost:.2}");
    Ok(Upgrade { index, from_level, to_level, cost })
}

/// Stamp the accrual point without crediting anything.
pub fn set_last_played<S: StateStore>(
    store: &mut S,
    state: &mut GameState,
) -> Result<(), StorageError> {
    let mut next = state.clone();
    next.last_played_at = store.now();
    commit(store, state, next)
}

/// Explicit save point: bank the accrual so far and persist.
pub fn save_session<S: StateStore>(
    economy: &Economy,
    store: &mut S,
    state: &mut GameState,
) -> Result<AccrualReport, StorageError> {
    apply_accrual(economy, store, state)
}

/// Every catalogue ride with its lock status.
pub fn rides<'a>(catalog: &'a RideCatalog, state: &GameState) -> Vec<RideView<'a>> {
    catalog
        .iter()
        .enumerate()
        .map(|(index, ride)| RideView {
            index,
            ride,
            status: match state.level_of(index) {
                Some(level) => RideStatus::Unlocked { level },
                None => RideStatus::Locked,
            },
        })
        .collect()
}

/// One player's session: the economy, the store, and the state loaded once
/// at [`Session::open`].
#[derive(Debug)]
pub struct Session<S: StateStore> {
    economy: Economy,
    store: S,
    state: GameState,
}

impl<S: StateStore> Session<S> {
    /// Load (or create) the save and check it against the catalogue.
    /// No accrual is applied; call [`Session::apply_accrual`] for the
    /// welcome-back payout.
    pub fn open(economy: Economy, mut store: S) -> Result<Self, StorageError> {
        let state = store.load()?;
        state.validate(economy.catalog())?;
        Ok(Self { economy, store, state })
    }

    pub fn economy(&self) -> &Economy {
        &self.economy
    }

    pub fn catalog(&self) -> &RideCatalog {
        self.economy.catalog()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn balance(&self) -> f64 {
        self.state.balance
    }

    pub fn ride_levels(&self) -> &[u32] {
        &self.state.ride_levels
    }

    pub fn rides(&self) -> Vec<RideView<'_>> {
        rides(self.economy.catalog(), &self.state)
    }

    /// Next locked ride, if any.
    pub fn next_unlock(&self) -> Option<(usize, &RideDefinition)> {
        let i = self.state.unlocked_count();
        self.catalog().get(i).map(|r| (i, r))
    }

    /// Price of `count` upgrades on an unlocked ride.
    pub fn upgrade_quote(&self, index: usize, count: u32) -> Result<f64, ProgressionError> {
        let level = self.state.level_of(index).ok_or(ProgressionError::RideNotUnlocked(index))?;
        self.economy.compute_batch_upgrade_cost(index, level, count)
    }

    /// How many upgrades on `index` the current balance covers.
    pub fn affordable_upgrades(&self, index: usize) -> Result<u32, ProgressionError> {
        let level = self.state.level_of(index).ok_or(ProgressionError::RideNotUnlocked(index))?;
        self.economy.max_affordable_upgrades(index, level, self.state.balance)
    }

    pub fn apply_accrual(&mut self) -> Result<AccrualReport, StorageError> {
        apply_accrual(&self.economy, &mut self.store, &mut self.state)
    }

    pub fn purchase_next_ride(&mut self) -> Result<Purchase, ProgressionError> {
        purchase_next_ride(&self.economy, &mut self.store, &mut self.state)
    }

    pub fn upgrade_ride(&mut self, index: usize, count: u32) -> Result<Upgrade, ProgressionError> {
        upgrade_ride(&self.economy, &mut self.store, &mut self.state, index, count)
    }

    pub fn set_last_played(&mut self) -> Result<(), StorageError> {
        set_last_played(&mut self.store, &mut self.state)
    }

    pub fn save(&mut self) -> Result<AccrualReport, StorageError> {
        save_session(&self.economy, &mut self.store, &mut self.state)
    }

    /// Final save; hands back the store and the persisted state.
    pub fn close(mut self) -> Result<(AccrualReport, S, GameState), StorageError> {
        let report = self.save()?;
        Ok((report, self.store, self.state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_breakdown_splits_units() {
        let b = ElapsedBreakdown::from_seconds(2 * 86_400 + 3 * 3_600 + 4 * 60 + 5);
        assert_eq!((b.days, b.hours, b.minutes, b.seconds), (2, 3, 4, 5));
        assert_eq!(ElapsedBreakdown::from_seconds(-10), ElapsedBreakdown::default());
    }
}
