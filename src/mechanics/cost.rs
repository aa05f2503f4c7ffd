//! Upgrade cost curve: floor-clamped base scaled from the unlock price,
//! exponential in the current level.

use super::money::round2;

/// Base upgrade cost: `max(floor, unlock_price / divisor)`.
#[inline]
pub fn upgrade_base(unlock_price: f64, floor: f64, divisor: f64) -> f64 {
    floor.max(unlock_price / divisor)
}

/// Cost to go from `level` to `level + 1`: `round2(base * growth^(level-1))`.
/// Levels below 1 are priced as level 1.
#[inline]
pub fn upgrade_cost(base: f64, growth: f64, level: u32) -> f64 {
    let exp = level.saturating_sub(1);
    round2(base * growth.powi(exp.min(i32::MAX as u32) as i32))
}
