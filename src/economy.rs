//! Economy Engine: pure accrual and cost calculations over a ride catalogue.
//!
//! Nothing here touches storage or the clock. Callers pass levels, elapsed
//! time and balances in; amounts come back rounded to 2 dp.

use crate::catalog::{RideCatalog, RideDefinition, Tuning};
use crate::error::ProgressionError;
use crate::mechanics::{accrual, cost, round2};

/// One ride's share of an offline payout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RideEarnings {
    pub index: usize,
    pub level: u32,
    pub level_multiplier: f64,
    pub time_multiplier: f64,
    /// Unrounded.
    pub earnings: f64,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct Economy {
    catalog: RideCatalog,
    tuning: Tuning,
}

impl Economy {
    /// `tuning` should pass [`Tuning::validate`]; a growth ratio at or below
    /// 1 or a zero cost base makes the upgrade quotes meaningless.
    pub fn new(catalog: RideCatalog, tuning: Tuning) -> Self {
        debug_assert!(tuning.validate().is_ok(), "invalid tuning {tuning:?}");
        Self { catalog, tuning }
    }

    pub fn catalog(&self) -> &RideCatalog {
        &self.catalog
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    fn ride(&self, index: usize) -> Result<&RideDefinition, ProgressionError> {
        self.catalog.get(index).ok_or(ProgressionError::InvalidRideIndex(index))
    }

    pub fn unlock_price_of(&self, index: usize) -> Result<f64, ProgressionError> {
        Ok(self.ride(index)?.unlock_price)
    }

    pub fn level_multiplier(&self, level: u32) -> f64 {
        let t = &self.tuning;
        accrual::level_multiplier(level, t.level_step, t.level_kink, t.post_kink_step)
    }

    /// Per-ride rows of an offline payout. Negative elapsed time counts as
    /// zero; levels past the end of the catalogue are skipped.
    pub fn ride_earnings_breakdown(
        &self,
        levels: &[u32],
        elapsed_seconds: f64,
    ) -> Vec<RideEarnings> {
        let minutes = elapsed_seconds.max(0.0) / 60.0;
        let time_mult = accrual::time_multiplier(minutes, self.tuning.time_damping);

        levels
            .iter()
            .zip(self.catalog.iter())
            .enumerate()
            .map(|(index, (&level, ride))| {
                let level_mult = self.level_multiplier(level);
                RideEarnings {
                    index,
                    level,
                    level_multiplier: level_mult,
                    time_multiplier: time_mult,
                    earnings: accrual::ride_earnings(
                        ride.base_earnings_per_minute,
                        level_mult,
                        time_mult,
                        minutes,
                    ),
                }
            })
            .collect()
    }

    /// Offline payout for `elapsed_seconds` away, summed over unlocked rides.
    pub fn compute_offline_earnings(&self, levels: &[u32], elapsed_seconds: f64) -> f64 {
        let total: f64 = self
            .ride_earnings_breakdown(levels, elapsed_seconds)
            .iter()
            .map(|r| r.earnings)
            .sum();
        round2(total)
    }

    /// Price of raising ride `index` from `current_level` to the next level.
    pub fn compute_upgrade_cost(
        &self,
        index: usize,
        current_level: u32,
    ) -> Result<f64, ProgressionError> {
        let t = &self.tuning;
        let price = self.ride(index)?.unlock_price;
        let base = cost::upgrade_base(price, t.upgrade_base_floor, t.upgrade_base_divisor);
        Ok(cost::upgrade_cost(base, t.upgrade_growth, current_level))
    }

    /// Quote for `count` consecutive upgrades starting at `current_level`.
    /// Stops summing once the total overflows to infinity.
    pub fn compute_batch_upgrade_cost(
        &self,
        index: usize,
        current_level: u32,
        count: u32,
    ) -> Result<f64, ProgressionError> {
        let mut total = 0.0;
        for k in 0..count {
            total += self.compute_upgrade_cost(index, current_level.saturating_add(k))?;
            if !total.is_finite() {
                return Ok(total);
            }
        }
        Ok(round2(total))
    }

    /// Largest number of consecutive upgrades whose batch total fits in
    /// `balance`. A quote only; the upgrade itself stays all-or-nothing.
    pub fn max_affordable_upgrades(
        &self,
        index: usize,
        current_level: u32,
        balance: f64,
    ) -> Result<u32, ProgressionError> {
        let mut count = 0u32;
        let mut total = 0.0;
        loop {
            let next = self.compute_upgrade_cost(index, current_level.saturating_add(count))?;
            if round2(total + next) > balance || count == u32::MAX {
                return Ok(count);
            }
            total += next;
            count += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eco() -> Economy {
        Economy::default()
    }

    #[test]
    fn ten_minutes_on_the_shooting_range() {
        // 2 * 1.5 * (1 + log10(11) * 0.5) * 10
        let e = eco().compute_offline_earnings(&[1], 600.0);
        assert_eq!(e, 45.62);
    }

    #[test]
    fn zero_elapsed_earns_nothing() {
        assert_eq!(eco().compute_offline_earnings(&[1, 7, 12, 3, 40], 0.0), 0.0);
        assert_eq!(eco().compute_offline_earnings(&[5], -3_600.0), 0.0);
    }

    #[test]
    fn earnings_never_decrease_with_time() {
        let e = eco();
        let levels = [4, 2, 11];
        let mut prev = 0.0;
        for secs in (0..200_000).step_by(997) {
            let cur = e.compute_offline_earnings(&levels, secs as f64);
            assert!(cur >= prev, "{cur} < {prev} at {secs}s");
            prev = cur;
        }
    }

    #[test]
    fn breakdown_shares_one_time_multiplier() {
        let rows = eco().ride_earnings_breakdown(&[1, 12], 3_600.0);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].time_multiplier, rows[1].time_multiplier);
        assert!((rows[1].level_multiplier - 6.2).abs() < 1e-12);
    }

    #[test]
    fn upgrade_costs_for_haunted_house() {
        let e = eco();
        assert_eq!(e.compute_upgrade_cost(1, 1).unwrap(), 100.0);
        assert_eq!(e.compute_upgrade_cost(1, 2).unwrap(), 130.0);
        assert_eq!(e.compute_upgrade_cost(2, 1).unwrap(), 1_000.0);
    }

    #[test]
    fn upgrade_cost_strictly_increasing() {
        let e = eco();
        for i in 0..e.catalog().len() {
            for lvl in 1..60 {
                let a = e.compute_upgrade_cost(i, lvl).unwrap();
                let b = e.compute_upgrade_cost(i, lvl + 1).unwrap();
                assert!(b > a, "ride {i} level {lvl}: {b} <= {a}");
            }
        }
    }

    #[test]
    fn batch_is_sum_of_steps() {
        let e = eco();
        assert_eq!(e.compute_batch_upgrade_cost(0, 1, 3).unwrap(), 399.0);
        assert_eq!(e.compute_batch_upgrade_cost(0, 4, 0).unwrap(), 0.0);
    }

    #[test]
    fn huge_batch_quote_saturates_to_infinity() {
        let e = eco();
        assert_eq!(e.compute_batch_upgrade_cost(0, 1, u32::MAX).unwrap(), f64::INFINITY);
        assert_eq!(e.compute_batch_upgrade_cost(4, 1_000, 200_000_000).unwrap(), f64::INFINITY);
    }

    #[test]
    fn out_of_range_ride_is_rejected() {
        let e = eco();
        assert!(matches!(e.unlock_price_of(5), Err(ProgressionError::InvalidRideIndex(5))));
        assert!(matches!(
            e.compute_upgrade_cost(9, 1),
            Err(ProgressionError::InvalidRideIndex(9))
        ));
        assert_eq!(e.unlock_price_of(4).unwrap(), 5_000_000.0);
    }

    #[test]
    fn affordable_count_matches_batch_quote() {
        let e = eco();
        assert_eq!(e.max_affordable_upgrades(0, 1, 99.99).unwrap(), 0);
        assert_eq!(e.max_affordable_upgrades(0, 1, 100.0).unwrap(), 1);
        assert_eq!(e.max_affordable_upgrades(0, 1, 399.0).unwrap(), 3);
        for balance in [250.0, 1_000.0, 12_345.0] {
            let n = e.max_affordable_upgrades(0, 2, balance).unwrap();
            assert!(e.compute_batch_upgrade_cost(0, 2, n).unwrap() <= balance);
            assert!(e.compute_batch_upgrade_cost(0, 2, n + 1).unwrap() > balance);
        }
    }

    #[test]
    fn custom_tuning_changes_growth() {
        let cat = RideCatalog::new(vec![RideDefinition::new("Carousel", 1.0, 0.0)]).unwrap();
        let e = Economy::new(cat, Tuning { upgrade_growth: 2.0, ..Tuning::default() });
        assert_eq!(e.compute_upgrade_cost(0, 3).unwrap(), 400.0);
    }
}
