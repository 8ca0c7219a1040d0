//! Injectable randomness.
//!
//! Generators never reach for a global random source: they take a
//! [`RandomSource`], so tests can replay a puzzle from a seed while the
//! browser build seeds from entropy.

/// Fallback seed used when no entropy source is compiled in.
pub const DEFAULT_SEED: u64 = 0x5EED_2520_1EC0_F011;

pub trait RandomSource {
    fn next_u64(&mut self) -> u64;

    /// Uniform value in `[0, 1)`.
    fn unit(&mut self) -> f64 {
        // 53 high bits -> exactly representable mantissa
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn range(&mut self, min: f64, max: f64) -> f64 {
        min + (max - min) * self.unit()
    }

    fn coin(&mut self) -> bool {
        self.next_u64() >> 63 == 1
    }

    /// Uniform index in `0..len`; `0` when `len == 0`.
    fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        (self.unit() * len as f64) as usize % len
    }
}

/// SplitMix64 generator: tiny, seedable and good enough for shuffles.
#[derive(Clone, Debug)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    pub fn seeded(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Seeds from the platform entropy source (`crypto.getRandomValues` in
    /// the browser). Falls back to [`DEFAULT_SEED`] when unavailable.
    pub fn from_entropy() -> Self {
        Self::seeded(entropy_seed())
    }
}

impl RandomSource for SplitMix64 {
    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
}

#[cfg(feature = "rng")]
fn entropy_seed() -> u64 {
    let mut buf = [0u8; 8];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => u64::from_le_bytes(buf),
        Err(err) => {
            tracing::warn!("entropy unavailable ({err}), using fixed seed");
            DEFAULT_SEED
        }
    }
}

#[cfg(not(feature = "rng"))]
fn entropy_seed() -> u64 {
    DEFAULT_SEED
}

/// In-place Fisher–Yates shuffle.
pub fn shuffle<T>(items: &mut [T], rng: &mut dyn RandomSource) {
    for i in (1..items.len()).rev() {
        let j = rng.index(i + 1);
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_streams_repeat() {
        let mut a = SplitMix64::seeded(42);
        let mut b = SplitMix64::seeded(42);
        for _ in 0..16 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn unit_stays_in_half_open_range() {
        let mut rng = SplitMix64::seeded(7);
        for _ in 0..1000 {
            let u = rng.unit();
            assert!((0.0..1.0).contains(&u));
        }
    }

    #[test]
    fn shuffle_keeps_every_element() {
        let mut rng = SplitMix64::seeded(3);
        let mut items: Vec<usize> = (0..25).collect();
        shuffle(&mut items, &mut rng);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..25).collect::<Vec<_>>());
    }

    #[test]
    fn index_of_empty_is_zero() {
        let mut rng = SplitMix64::seeded(1);
        assert_eq!(rng.index(0), 0);
    }
}
