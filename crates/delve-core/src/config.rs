//! Generation parameters
//!
//! A `GenerationConfig` can be built in code or read from a JSON file; any
//! field missing from the file falls back to its default.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_EXTRA_EDGE_PROBABILITY, DEFAULT_HEIGHT, DEFAULT_MAX_WEIGHT, DEFAULT_ROOM_COUNT,
    DEFAULT_WIDTH, UNIFORM_WEIGHT,
};
use crate::error::DungeonError;
use crate::rng::DungeonRng;

/// How corridor travel costs are assigned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum WeightPolicy {
    /// Every corridor costs 1, so route cost is the corridor count
    #[default]
    Uniform,
    /// Each corridor draws a cost in 1..=max
    Random { max: u32 },
}

impl WeightPolicy {
    /// Random weighting with the default upper bound
    pub fn random() -> Self {
        WeightPolicy::Random {
            max: DEFAULT_MAX_WEIGHT,
        }
    }

    /// Draw the weight for one new corridor
    ///
    /// Never returns 0; a `Random { max: 0 }` policy behaves as uniform.
    pub fn draw(&self, rng: &mut DungeonRng) -> u32 {
        match *self {
            WeightPolicy::Uniform => UNIFORM_WEIGHT,
            WeightPolicy::Random { max } => rng.rnd(max).max(UNIFORM_WEIGHT),
        }
    }
}

/// Parameters for one generation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub width: usize,
    pub height: usize,
    pub room_count: usize,
    pub extra_edge_probability: f64,
    pub weights: WeightPolicy,
    /// Fixed seed; `None` draws one from entropy
    pub seed: Option<u64>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            room_count: DEFAULT_ROOM_COUNT,
            extra_edge_probability: DEFAULT_EXTRA_EDGE_PROBABILITY,
            weights: WeightPolicy::Uniform,
            seed: None,
        }
    }
}

impl GenerationConfig {
    pub fn from_json_str(json: &str) -> Result<Self, DungeonError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DungeonError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Number of cells, the upper bound on room count
    pub fn capacity(&self) -> usize {
        self.width.saturating_mul(self.height)
    }

    /// RNG for this config: seeded when `seed` is set, from entropy otherwise
    pub fn rng(&self) -> DungeonRng {
        self.seed.map_or_else(DungeonRng::from_entropy, DungeonRng::new)
    }

    /// Check every parameter
    pub fn validate(&self) -> Result<(), DungeonError> {
        if self.width == 0 || self.height == 0 {
            return Err(DungeonError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        let capacity = self
            .width
            .checked_mul(self.height)
            .ok_or(DungeonError::InvalidDimensions {
                width: self.width,
                height: self.height,
            })?;
        check_room_count(self.room_count, capacity)?;
        if !(0.0..=1.0).contains(&self.extra_edge_probability) {
            return Err(DungeonError::InvalidProbability(
                self.extra_edge_probability,
            ));
        }
        if let WeightPolicy::Random { max: 0 } = self.weights {
            return Err(DungeonError::InvalidWeight(0));
        }
        Ok(())
    }
}

/// Room count must lie in `1..=capacity`
pub(crate) fn check_room_count(requested: usize, capacity: usize) -> Result<(), DungeonError> {
    if requested < 1 || requested > capacity {
        return Err(DungeonError::InvalidRoomCount {
            requested,
            capacity,
        });
    }
    Ok(())
}
