//! Deterministic randomness for combat rolls.
//!
//! Rolls are pure functions of a seed so that a session replays identically
//! from the same `game_seed` and action sequence.

/// Seeded random source.
pub trait RngOracle: Send + Sync {
    /// Produces 32 random bits for `seed`.
    fn next_u32(&self, seed: u64) -> u32;

    /// Uniform integer in `[min, max]` inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        min + self.next_u32(seed) % (max - min + 1)
    }

    /// Scales `base` by a uniform percentage in `[min_percent, max_percent]`,
    /// rounding down.
    fn vary(&self, seed: u64, base: u32, min_percent: u32, max_percent: u32) -> u32 {
        let percent = self.range(seed, min_percent, max_percent);
        percent_of(base, percent)
    }
}

/// `base × percent / 100`, rounded down and saturating at `u32::MAX`.
pub fn percent_of(base: u32, percent: u32) -> u32 {
    u32::try_from(u64::from(base) * u64::from(percent) / 100).unwrap_or(u32::MAX)
}

/// Stateless PCG-XSH-RR generator: one LCG step followed by the XSH-RR
/// output permutation.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rotation = (state >> 59) as u32;
        xorshifted.rotate_right(rotation)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::output(Self::step(seed))
    }
}

/// Roll contexts so that one action can make several independent rolls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum RollContext {
    AttackVariance = 0,
}

/// Mixes the session seed, action nonce, encounter token, and roll context
/// into a single seed (SplitMix64-style avalanche).
pub fn compute_seed(game_seed: u64, nonce: u64, token: u64, context: RollContext) -> u64 {
    let mut hash = game_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= token.wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash
}
