/// Offline accrual mechanics: level and time multipliers.

/// Level multiplier with a kink: `1 + L*step` up to `kink`, then only
/// `post_step` per level beyond it.
#[inline]
pub fn level_multiplier(level: u32, step: f64, kink: u32, post_step: f64) -> f64 {
    if level <= kink {
        1.0 + level as f64 * step
    } else {
        1.0 + kink as f64 * step + (level - kink) as f64 * post_step
    }
}

/// Logarithmic time damping: `1 + log10(minutes + 1) * damping`.
#[inline]
pub fn time_multiplier(minutes: f64, damping: f64) -> f64 {
    1.0 + (minutes.max(0.0) + 1.0).log10() * damping
}

/// Earnings of one ride over `minutes`.
#[inline]
pub fn ride_earnings(base_per_minute: f64, level_mult: f64, time_mult: f64, minutes: f64) -> f64 {
    (base_per_minute * level_mult * time_mult * minutes.max(0.0)).max(0.0)
}
