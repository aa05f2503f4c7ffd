/// Stochastic mechanics for the pacing simulation.
/// Uses `bevy_prng::WyRand` so runs are reproducible from a seed.
use bevy_prng::WyRand;
use rand_core::RngCore;

/// Uniform [0, 1) from the top 53 bits.
#[inline]
fn unit(rng: &mut WyRand) -> f64 {
    ((rng.next_u64() >> 11) as f64) / ((1u64 << 53) as f64)
}

/// Gaussian(0,1) via Box-Muller using WyRand.
#[inline]
pub fn gaussian01(rng: &mut WyRand) -> f64 {
    // 1 - u keeps the log argument in (0, 1].
    let u1 = 1.0 - unit(rng);
    let u2 = unit(rng);
    let r = (-2.0 * u1.ln()).sqrt();
    let t = 2.0 * std::f64::consts::PI * u2;
    r * t.cos()
}

/// Multiplicative jitter: max(0, 1 + N(0,1)*jitter).
#[inline]
pub fn jitter_factor(rng: &mut WyRand, jitter: f64) -> f64 {
    (1.0 + gaussian01(rng) * jitter.max(0.0)).max(0.0)
}

/// AFK gap in minutes around `mean`, never shorter than `floor`.
#[inline]
pub fn afk_gap_minutes(rng: &mut WyRand, mean: f64, jitter: f64, floor: f64) -> f64 {
    (mean * jitter_factor(rng, jitter)).max(floor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_core::SeedableRng;

    #[test]
    fn same_seed_same_gaps() {
        let mut a = WyRand::from_seed(7u64.to_le_bytes());
        let mut b = WyRand::from_seed(7u64.to_le_bytes());
        for _ in 0..32 {
            assert_eq!(
                afk_gap_minutes(&mut a, 60.0, 0.5, 1.0),
                afk_gap_minutes(&mut b, 60.0, 0.5, 1.0)
            );
        }
    }

    #[test]
    fn gaps_respect_floor() {
        let mut rng = WyRand::from_seed(42u64.to_le_bytes());
        for _ in 0..256 {
            let g = afk_gap_minutes(&mut rng, 5.0, 3.0, 1.0);
            assert!(g >= 1.0 && g.is_finite());
        }
    }

    #[test]
    fn zero_jitter_is_mean() {
        let mut rng = WyRand::from_seed(1u64.to_le_bytes());
        assert_eq!(afk_gap_minutes(&mut rng, 90.0, 0.0, 1.0), 90.0);
    }
}
