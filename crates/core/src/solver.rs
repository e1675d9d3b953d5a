//! Solver trait and heuristic configuration.

use crate::error::{Error, Result};
use crate::geometry::{Boundary, Coord, Geometry};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tunable constants of the extreme-point heuristic and the bundle assignment
/// policy.
///
/// The defaults are tuned for parcel palletizing; changing any of them
/// changes the produced layouts.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Minimum fraction of a footprint that must rest on coplanar top faces.
    pub support_ratio: f64,

    /// Tolerance when matching a top face to a candidate z.
    pub support_epsilon: Coord,

    /// Leftover gaps to the far wall narrower than this are penalised.
    pub dead_space_gap: Coord,

    /// Score penalty per thin gap (x and y are counted separately).
    pub dead_space_penalty: f64,

    /// Score weight of the anchor z coordinate.
    pub layer_weight: f64,

    /// Score weight of the anchor y coordinate.
    pub row_weight: f64,

    /// Footprint area is divided by this before being subtracted from the score.
    pub area_divisor: f64,

    /// A floor placement scoring below this ends the candidate scan early.
    pub early_exit_score: f64,

    /// Bundles below this fill rate are preferred for new items.
    pub target_fill_rate: f64,

    /// Bundles at or above this fill rate are not offered new items.
    pub max_fill_rate: f64,

    /// Route items to tiers by size class; otherwise use the fallback tier.
    pub auto_tier: bool,

    /// Refuse bundles that would exceed the container's weight capacity.
    pub enforce_weight_capacity: bool,
}

impl Config {
    pub const DEFAULT_SUPPORT_RATIO: f64 = 0.60;
    pub const DEFAULT_SUPPORT_EPSILON: Coord = 1;
    pub const DEFAULT_DEAD_SPACE_GAP: Coord = 50;
    pub const DEFAULT_DEAD_SPACE_PENALTY: f64 = 100_000.0;
    pub const DEFAULT_LAYER_WEIGHT: f64 = 1_000_000.0;
    pub const DEFAULT_ROW_WEIGHT: f64 = 100.0;
    pub const DEFAULT_AREA_DIVISOR: f64 = 100.0;
    pub const DEFAULT_EARLY_EXIT_SCORE: f64 = -100.0;
    pub const DEFAULT_TARGET_FILL_RATE: f64 = 0.65;
    pub const DEFAULT_MAX_FILL_RATE: f64 = 0.95;

    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum support ratio.
    pub fn with_support_ratio(mut self, ratio: f64) -> Self {
        self.support_ratio = ratio;
        self
    }

    /// Sets the thin-gap threshold and its penalty.
    pub fn with_dead_space(mut self, gap: Coord, penalty: f64) -> Self {
        self.dead_space_gap = gap;
        self.dead_space_penalty = penalty;
        self
    }

    /// Sets the early-exit threshold.
    pub fn with_early_exit_score(mut self, score: f64) -> Self {
        self.early_exit_score = score;
        self
    }

    /// Sets the preferred and maximum bundle fill rates.
    pub fn with_fill_rates(mut self, target: f64, max: f64) -> Self {
        self.target_fill_rate = target;
        self.max_fill_rate = max;
        self
    }

    /// Enables or disables size-class tier routing.
    pub fn with_auto_tier(mut self, enabled: bool) -> Self {
        self.auto_tier = enabled;
        self
    }

    /// Enables or disables the container weight limit during loading.
    pub fn with_weight_capacity(mut self, enforced: bool) -> Self {
        self.enforce_weight_capacity = enforced;
        self
    }

    /// Checks that every value is in range.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.support_ratio) {
            return Err(Error::ConfigError(format!(
                "support_ratio must be within [0, 1], got {}",
                self.support_ratio
            )));
        }
        if self.support_epsilon < 1 {
            return Err(Error::ConfigError(
                "support_epsilon must be at least 1".into(),
            ));
        }
        if self.dead_space_gap < 0 {
            return Err(Error::ConfigError(
                "dead_space_gap cannot be negative".into(),
            ));
        }
        if self.area_divisor <= 0.0 {
            return Err(Error::ConfigError("area_divisor must be positive".into()));
        }
        if !(self.target_fill_rate > 0.0
            && self.target_fill_rate <= self.max_fill_rate
            && self.max_fill_rate <= 1.0)
        {
            return Err(Error::ConfigError(format!(
                "fill rates must satisfy 0 < target ({}) <= max ({}) <= 1",
                self.target_fill_rate, self.max_fill_rate
            )));
        }
        Ok(())
    }

    /// Parses a configuration from JSON. Missing fields keep their defaults.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            support_ratio: Self::DEFAULT_SUPPORT_RATIO,
            support_epsilon: Self::DEFAULT_SUPPORT_EPSILON,
            dead_space_gap: Self::DEFAULT_DEAD_SPACE_GAP,
            dead_space_penalty: Self::DEFAULT_DEAD_SPACE_PENALTY,
            layer_weight: Self::DEFAULT_LAYER_WEIGHT,
            row_weight: Self::DEFAULT_ROW_WEIGHT,
            area_divisor: Self::DEFAULT_AREA_DIVISOR,
            early_exit_score: Self::DEFAULT_EARLY_EXIT_SCORE,
            target_fill_rate: Self::DEFAULT_TARGET_FILL_RATE,
            max_fill_rate: Self::DEFAULT_MAX_FILL_RATE,
            auto_tier: true,
            enforce_weight_capacity: false,
        }
    }
}

/// Trait for packing solvers.
pub trait Solver {
    /// The item type this solver handles.
    type Geometry: Geometry;
    /// The container type this solver handles.
    type Boundary: Boundary;
    /// The result of a solve.
    type Output;

    /// Packs `geometries` into `boundary`.
    ///
    /// Returns an error only for invalid setup; items that cannot be placed are
    /// reported inside the output.
    fn solve(
        &self,
        geometries: &[Self::Geometry],
        boundary: &Self::Boundary,
    ) -> Result<Self::Output>;
}
