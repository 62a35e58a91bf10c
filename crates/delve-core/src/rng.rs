//! Random number generation for dungeon layout
//!
//! Uses a seeded ChaCha RNG so a seed reproduces the same dungeon.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Dungeon random number generator
///
/// Wraps ChaCha8Rng. Every random decision made while generating a dungeon
/// goes through one of these.
/// Note: only the seed is serialized, so a restored RNG restarts its stream.
#[derive(Debug, Clone)]
pub struct DungeonRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl Serialize for DungeonRng {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.seed.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DungeonRng {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let seed = u64::deserialize(deserializer)?;
        Ok(DungeonRng::new(seed))
    }
}

impl DungeonRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a new RNG with a random seed
    pub fn from_entropy() -> Self {
        let seed = rand::random();
        Self::new(seed)
    }

    /// Get the seed used to create this RNG
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns 1..=n
    ///
    /// Returns 0 if n is 0.
    pub fn rnd(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(1..=n)
    }

    /// Returns true with probability `p`, clamped to [0, 1]
    pub fn chance(&mut self, p: f64) -> bool {
        if p.is_nan() || p <= 0.0 {
            return false;
        }
        if p >= 1.0 {
            return true;
        }
        self.rng.r#gen::<f64>() < p
    }

    /// Uniform index in 0..len
    ///
    /// Returns 0 if len is 0.
    pub fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.gen_range(0..len)
    }

    /// Choose a random element from a slice
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            Some(&items[self.index(items.len())])
        }
    }
}

impl Default for DungeonRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_bounds() {
        let mut rng = DungeonRng::new(42);
        for _ in 0..1000 {
            let n = rng.index(10);
            assert!(n < 10);
        }
    }

    #[test]
    fn test_rnd_bounds() {
        let mut rng = DungeonRng::new(42);
        for _ in 0..1000 {
            let n = rng.rnd(6);
            assert!((1..=6).contains(&n));
        }
    }

    #[test]
    fn test_reproducibility() {
        let mut rng1 = DungeonRng::new(42);
        let mut rng2 = DungeonRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.index(100), rng2.index(100));
            assert_eq!(rng1.chance(0.5), rng2.chance(0.5));
        }
    }

    #[test]
    fn test_zero_inputs() {
        let mut rng = DungeonRng::new(42);
        assert_eq!(rng.rnd(0), 0);
        assert_eq!(rng.index(0), 0);
        assert!(rng.choose::<u8>(&[]).is_none());
    }

    #[test]
    fn test_chance_extremes() {
        let mut rng = DungeonRng::new(7);
        for _ in 0..200 {
            assert!(!rng.chance(0.0));
            assert!(rng.chance(1.0));
            assert!(!rng.chance(-3.0));
            assert!(rng.chance(4.0));
            assert!(!rng.chance(f64::NAN));
        }
    }

    #[test]
    fn test_choose_covers_all() {
        let mut rng = DungeonRng::new(99);
        let items: [usize; 4] = [1, 2, 3, 4];
        let mut seen = [false; 4];
        for _ in 0..200 {
            let picked = *rng.choose(&items).unwrap();
            seen[picked - 1] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_serde_roundtrip_restarts_stream() {
        let mut rng = DungeonRng::new(1234);
        let first = rng.rnd(1000);
        let json = serde_json::to_string(&rng).unwrap();
        assert_eq!(json, "1234");
        let mut restored: DungeonRng = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.seed(), 1234);
        assert_eq!(restored.rnd(1000), first);
    }
}
