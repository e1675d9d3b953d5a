//! Phase 1: aggregate items into bundles.
//!
//! Items are routed to a preferred tier by size class, then offered to
//! existing bundles before a new one is opened:
//!
//! 1. preferred-tier bundles below the target fill rate, fullest first;
//! 2. any preferred-tier bundle below the maximum fill rate;
//! 3. bundles of each larger tier below the maximum fill rate;
//! 4. a new bundle of the preferred tier, then of each larger tier.
//!
//! Items too large for every tier get a dedicated oversized bundle each.

use loadplan_core::geometry::Geometry;
use loadplan_core::{Config, Rejection};

use crate::bundle::{Bundle, BundleKind};
use crate::geometry::ItemBox;
use crate::tiers::{TierKind, TierSpec, TierTable};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An item that could not be packed, with the reason.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnpackedItem {
    pub item: ItemBox,
    pub reason: Rejection,
}

/// Result of Phase 1.
#[derive(Debug, Clone, Default)]
pub struct PalletizeOutcome {
    /// Bundles in creation order; a bundle's ID is its index.
    pub bundles: Vec<Bundle>,
    pub unpackable: Vec<UnpackedItem>,
}

impl PalletizeOutcome {
    /// Returns the number of packed items.
    pub fn packed_count(&self) -> usize {
        self.bundles.iter().map(|b| b.items().len()).sum()
    }

    /// Returns the number of bundles of a given kind.
    pub fn count_of(&self, kind: BundleKind) -> usize {
        self.bundles.iter().filter(|b| b.kind() == kind).count()
    }
}

/// Assigns items to bundles.
#[derive(Debug, Clone)]
pub struct Palletizer {
    tiers: TierTable,
    config: Config,
}

impl Palletizer {
    /// Creates a palletizer.
    pub fn new(tiers: TierTable, config: Config) -> Self {
        Self { tiers, config }
    }

    /// Returns the tier table.
    pub fn tiers(&self) -> &TierTable {
        &self.tiers
    }

    /// Packs `items` into bundles.
    ///
    /// Never fails; items that fit nowhere are listed with their last rejection.
    pub fn run(&self, items: &[ItemBox]) -> PalletizeOutcome {
        let mut outcome = PalletizeOutcome::default();
        let mut regular: Vec<&ItemBox> = Vec::with_capacity(items.len());

        for item in items {
            if let Err(e) = item.validate() {
                log::warn!("Skipping invalid item: {}", e);
                outcome.unpackable.push(UnpackedItem {
                    item: item.clone(),
                    reason: Rejection::InvalidItem,
                });
            } else if self.tiers.is_oversized(item) {
                self.pack_oversized(item, &mut outcome);
            } else {
                regular.push(item);
            }
        }

        regular.sort_by(|a, b| b.volume().cmp(&a.volume()));

        for item in regular {
            let preferred = self.tiers.preferred_tier(item, self.config.auto_tier);
            if let Err(reason) = self.place(item, preferred, &mut outcome.bundles) {
                log::warn!("Item '{}' could not be bundled: {}", item.id(), reason);
                outcome.unpackable.push(UnpackedItem {
                    item: item.clone(),
                    reason,
                });
            }
        }

        log::info!(
            "Phase 1: {} items in {} bundles (small {}, medium {}, large {}, oversized {}), {} unpackable",
            outcome.packed_count(),
            outcome.bundles.len(),
            outcome.count_of(BundleKind::Tier(TierKind::Small)),
            outcome.count_of(BundleKind::Tier(TierKind::Medium)),
            outcome.count_of(BundleKind::Tier(TierKind::Large)),
            outcome.count_of(BundleKind::Oversized),
            outcome.unpackable.len()
        );

        outcome
    }

    fn pack_oversized(&self, item: &ItemBox, outcome: &mut PalletizeOutcome) {
        let id = outcome.bundles.len();
        let mut bundle = Bundle::oversized(id, item, self.tiers.oversized_pallet_height, self.config);

        match bundle.add_item(item, item.weight()) {
            Ok(_) => {
                log::warn!(
                    "Item '{}' exceeds every tier, using oversized bundle {}",
                    item.id(),
                    id
                );
                outcome.bundles.push(bundle);
            }
            Err(reason) => outcome.unpackable.push(UnpackedItem {
                item: item.clone(),
                reason,
            }),
        }
    }

    fn place(
        &self,
        item: &ItemBox,
        preferred: TierKind,
        bundles: &mut Vec<Bundle>,
    ) -> Result<(), Rejection> {
        let weight = item.weight();
        let mut last = Rejection::ItemUnplaceable;

        // Preferred tier, partly filled bundles first, fullest first.
        let mut candidates: Vec<usize> = bundles
            .iter()
            .enumerate()
            .filter(|(_, b)| {
                b.kind() == BundleKind::Tier(preferred)
                    && b.fill_rate() < self.config.target_fill_rate
            })
            .map(|(i, _)| i)
            .collect();
        candidates.sort_by(|&a, &b| bundles[b].fill_rate().total_cmp(&bundles[a].fill_rate()));

        // Then any bundle of the preferred tier, then of each larger tier.
        let mut escalation = vec![preferred];
        escalation.extend(self.tiers.larger_tiers(preferred).map(|t| t.kind));

        for kind in &escalation {
            candidates.extend(
                bundles
                    .iter()
                    .enumerate()
                    .filter(|(_, b)| {
                        b.kind() == BundleKind::Tier(*kind)
                            && b.fill_rate() < self.config.max_fill_rate
                    })
                    .map(|(i, _)| i),
            );
        }

        for index in candidates {
            match bundles[index].add_item(item, weight) {
                Ok(_) => return Ok(()),
                Err(reason) => last = reason,
            }
        }

        for kind in escalation {
            let Some(spec) = self.tiers.tier(kind) else {
                continue;
            };
            match self.open_bundle(item, spec, bundles) {
                Ok(()) => return Ok(()),
                Err(reason) => last = reason,
            }
        }

        Err(last)
    }

    fn open_bundle(
        &self,
        item: &ItemBox,
        spec: &TierSpec,
        bundles: &mut Vec<Bundle>,
    ) -> Result<(), Rejection> {
        let id = bundles.len();
        let mut bundle = Bundle::new(id, spec, self.config);
        bundle.add_item(item, item.weight())?;

        log::debug!("Opened {} bundle {} for item '{}'", spec.kind, id, item.id());
        bundles.push(bundle);
        Ok(())
    }
}
