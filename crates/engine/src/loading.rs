//! Phase 2: load bundles into a container.

use rayon::prelude::*;

use loadplan_core::geometry::Geometry;
use loadplan_core::{Capacity, Config, Rejection};

use crate::boundary::Container;
use crate::bundle::Bundle;
use crate::extreme_point::PackerEngine;
use crate::geometry::ItemBox;
use crate::placement::Placement;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A bundle placed in the container.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LoadedBundle {
    /// Index of the bundle in the Phase 1 list.
    pub bundle: usize,
    pub placement: Placement,
}

/// A bundle that could not be loaded.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FailedBundle {
    /// Index of the bundle in the Phase 1 list.
    pub bundle: usize,
    /// The summary box that was offered.
    pub summary: ItemBox,
    pub reason: Rejection,
}

/// Result of Phase 2.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    /// The container-level engine after loading.
    pub engine: PackerEngine,
    /// Loaded bundles in loading order.
    pub loaded: Vec<LoadedBundle>,
    /// Failed bundles in loading order.
    pub failed: Vec<FailedBundle>,
    /// Total weight of the loaded bundles.
    pub loaded_weight: f64,
}

impl LoadOutcome {
    /// Returns the container placements in loading order.
    pub fn placements(&self) -> &[Placement] {
        self.engine.placements()
    }
}

/// Loads bundle summary boxes into a fresh engine for `container`.
///
/// Bundles go in tallest first, then largest footprint first; ties keep the
/// bundle order. A bundle that does not fit is recorded and loading continues.
pub fn load_bundles(bundles: &[Bundle], container: &Container, config: Config) -> LoadOutcome {
    let summaries: Vec<ItemBox> = bundles.par_iter().map(Bundle::as_box).collect();

    let mut order: Vec<usize> = (0..summaries.len()).collect();
    order.sort_by(|&a, &b| {
        let (a, b) = (&summaries[a], &summaries[b]);
        b.height()
            .cmp(&a.height())
            .then_with(|| b.base_area().cmp(&a.base_area()))
    });

    let mut outcome = LoadOutcome {
        engine: PackerEngine::new(container, config),
        loaded: Vec::new(),
        failed: Vec::new(),
        loaded_weight: 0.0,
    };

    let weight_limit = container
        .max_weight()
        .filter(|_| config.enforce_weight_capacity);

    for index in order {
        let summary = &summaries[index];

        if let Some(limit) = weight_limit {
            if outcome.loaded_weight + summary.weight() > limit {
                log::warn!("Bundle {} exceeds the container weight capacity", summary.id());
                outcome.failed.push(FailedBundle {
                    bundle: index,
                    summary: summary.clone(),
                    reason: Rejection::ContainerOverflow(Capacity::Weight),
                });
                continue;
            }
        }

        match outcome.engine.add_item(summary) {
            Ok(placement) => {
                outcome.loaded_weight += summary.weight();
                outcome.loaded.push(LoadedBundle {
                    bundle: index,
                    placement: placement.clone(),
                });
            }
            Err(_) => {
                log::warn!("Bundle {} does not fit in the container", summary.id());
                outcome.failed.push(FailedBundle {
                    bundle: index,
                    summary: summary.clone(),
                    reason: Rejection::ContainerOverflow(Capacity::Space),
                });
            }
        }
    }

    log::info!(
        "Phase 2: loaded {}/{} bundles ({:.1}% of container volume)",
        outcome.loaded.len(),
        bundles.len(),
        outcome.engine.fill_rate() * 100.0
    );

    outcome
}
