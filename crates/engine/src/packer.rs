//! Two-phase load planning solver.

use std::time::Instant;

use loadplan_core::geometry::{Boundary, Coord};
use loadplan_core::solver::{Config, Solver};
use loadplan_core::{EfficiencyMetrics, Result, SolveSummary};

use crate::boundary::Container;
use crate::bundle::{Bundle, BundleSummary};
use crate::geometry::ItemBox;
use crate::loading::{load_bundles, FailedBundle, LoadOutcome, LoadedBundle};
use crate::palletize::{Palletizer, UnpackedItem};
use crate::placement::Placement;
use crate::tiers::TierTable;

/// Result of a two-phase run.
#[derive(Debug, Clone)]
pub struct PackingOutcome {
    /// Bundles in creation order.
    pub bundles: Vec<Bundle>,
    /// Items that were not packed into any bundle.
    pub unpackable: Vec<UnpackedItem>,
    /// Container loading result.
    pub load: LoadOutcome,
    pub metrics: EfficiencyMetrics,
    /// Computation time in milliseconds.
    pub time_ms: u64,
    total_items: usize,
}

impl PackingOutcome {
    /// Returns the container placements of the loaded bundle boxes.
    pub fn container_placements(&self) -> &[Placement] {
        self.load.placements()
    }

    /// Returns the loaded bundles in loading order.
    pub fn loaded(&self) -> &[LoadedBundle] {
        &self.load.loaded
    }

    /// Returns the bundles that did not fit the container.
    pub fn failed(&self) -> &[FailedBundle] {
        &self.load.failed
    }

    /// Returns a reporting snapshot of every bundle.
    pub fn bundle_summaries(&self) -> Vec<BundleSummary> {
        self.bundles.iter().map(Bundle::summary).collect()
    }

    /// Returns the number of items packed into bundles.
    pub fn packed_items(&self) -> usize {
        self.bundles.iter().map(|b| b.items().len()).sum()
    }

    /// Condenses the outcome into counts and metrics.
    pub fn summary(&self) -> SolveSummary {
        SolveSummary {
            total_items: self.total_items,
            packed_items: self.packed_items(),
            unpackable_items: self.unpackable.len(),
            bundles_created: self.bundles.len(),
            bundles_loaded: self.load.loaded.len(),
            bundles_failed: self.load.failed.len(),
            metrics: self.metrics,
            time_ms: self.time_ms,
        }
    }
}

/// Palletizes items into tiered bundles, then loads the bundles into a
/// container.
#[derive(Debug, Clone, Default)]
pub struct TwoPhasePacker {
    config: Config,
    tiers: TierTable,
}

impl TwoPhasePacker {
    /// Creates a packer with the default tier table.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            tiers: TierTable::default(),
        }
    }

    /// Replaces the tier table.
    pub fn with_tiers(mut self, tiers: TierTable) -> Self {
        self.tiers = tiers;
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the tier table.
    pub fn tiers(&self) -> &TierTable {
        &self.tiers
    }

    fn metrics(bundles: &[Bundle], load: &LoadOutcome, container: &Container) -> EfficiencyMetrics {
        let capacity = container.measure() as f64;
        let floor = container.floor_area() as f64;

        let loaded_item_volume: Coord = load
            .loaded
            .iter()
            .map(|l| bundles[l.bundle].current_volume())
            .sum();

        let floor_footprint: Coord = load
            .placements()
            .iter()
            .filter(|p| p.z() == 0)
            .map(|p| p.item().base_area())
            .sum();

        let packed_volume: Coord = bundles.iter().map(Bundle::current_volume).sum();
        let nominal_volume: Coord = bundles.iter().map(Bundle::nominal_volume).sum();

        EfficiencyMetrics {
            volume_efficiency: loaded_item_volume as f64 / capacity,
            bundle_volume_efficiency: load.engine.occupied_volume() as f64 / capacity,
            floor_efficiency: (floor_footprint as f64 / floor).min(1.0),
            weight_utilization: container
                .max_weight()
                .map(|max| load.loaded_weight / max),
            bundle_fill_rate: if nominal_volume > 0 {
                packed_volume as f64 / nominal_volume as f64
            } else {
                0.0
            },
        }
    }
}

impl Solver for TwoPhasePacker {
    type Geometry = ItemBox;
    type Boundary = Container;
    type Output = PackingOutcome;

    fn solve(&self, geometries: &[ItemBox], boundary: &Container) -> Result<PackingOutcome> {
        boundary.validate()?;
        self.config.validate()?;
        self.tiers.validate()?;

        let start = Instant::now();

        log::debug!(
            "Planning {} items for a {}x{}x{} container",
            geometries.len(),
            boundary.length(),
            boundary.width(),
            boundary.height()
        );

        let phase1 = Palletizer::new(self.tiers.clone(), self.config).run(geometries);
        let load = load_bundles(&phase1.bundles, boundary, self.config);
        let metrics = Self::metrics(&phase1.bundles, &load, boundary);

        let outcome = PackingOutcome {
            bundles: phase1.bundles,
            unpackable: phase1.unpackable,
            load,
            metrics,
            time_ms: start.elapsed().as_millis() as u64,
            total_items: geometries.len(),
        };

        log::info!(
            "Load plan: {}/{} bundles loaded, volume {}, floor {}",
            outcome.load.loaded.len(),
            outcome.bundles.len(),
            metrics.volume_percent(),
            metrics.floor_percent()
        );

        Ok(outcome)
    }
}
