//! Intermediate bundles (pallets) packed in Phase 1.

use loadplan_core::geometry::Coord;
use loadplan_core::{Capacity, Config, Rejection};
use nalgebra::Vector3;

use crate::extreme_point::PackerEngine;
use crate::geometry::ItemBox;
use crate::placement::Placement;
use crate::tiers::{TierKind, TierSpec};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What a bundle was created as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BundleKind {
    /// A standard tier.
    Tier(TierKind),
    /// A dedicated bundle sized to a single item too large for any tier.
    Oversized,
}

impl BundleKind {
    /// Returns the display name.
    pub fn name(self) -> &'static str {
        match self {
            BundleKind::Tier(kind) => kind.name(),
            BundleKind::Oversized => "OVERSIZED",
        }
    }

    /// Returns the tier, if this is a tiered bundle.
    pub fn tier(self) -> Option<TierKind> {
        match self {
            BundleKind::Tier(kind) => Some(kind),
            BundleKind::Oversized => None,
        }
    }
}

impl std::fmt::Display for BundleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A secondary container that packs items on a pallet base.
#[derive(Debug, Clone)]
pub struct Bundle {
    id: usize,
    kind: BundleKind,
    dimensions: Vector3<Coord>,
    pallet_height: Coord,
    max_weight: Option<f64>,
    current_weight: f64,
    items: Vec<ItemBox>,
    packer: PackerEngine,
}

impl Bundle {
    /// Creates an empty bundle of a tier.
    pub fn new(id: usize, tier: &TierSpec, config: Config) -> Self {
        Self {
            id,
            kind: BundleKind::Tier(tier.kind),
            dimensions: tier.dimensions,
            pallet_height: tier.pallet_height,
            max_weight: Some(tier.max_weight),
            current_weight: 0.0,
            items: Vec::new(),
            packer: PackerEngine::with_dimensions(tier.dimensions, config),
        }
    }

    /// Creates an empty bundle sized exactly to `item`, with no weight limit.
    pub fn oversized(id: usize, item: &ItemBox, pallet_height: Coord, config: Config) -> Self {
        let dimensions = *item.dimensions();
        Self {
            id,
            kind: BundleKind::Oversized,
            dimensions,
            pallet_height,
            max_weight: None,
            current_weight: 0.0,
            items: Vec::new(),
            packer: PackerEngine::with_dimensions(dimensions, config),
        }
    }

    /// Adds an item if the weight limit and the packing space allow it.
    ///
    /// Nothing changes on rejection.
    pub fn add_item(&mut self, item: &ItemBox, weight: f64) -> Result<&Placement, Rejection> {
        if let Some(max) = self.max_weight {
            if self.current_weight + weight > max {
                return Err(Rejection::BundleCapacityExceeded(Capacity::Weight));
            }
        }

        if self.packer.add_item(item).is_err() {
            return Err(Rejection::BundleCapacityExceeded(Capacity::Space));
        }

        self.items.push(item.clone());
        self.current_weight += weight;

        // The engine committed exactly one placement above.
        let last = self.packer.placed_count() - 1;
        Ok(&self.packer.placements()[last])
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn kind(&self) -> BundleKind {
        self.kind
    }

    /// Returns the packing space extents, pallet excluded.
    pub fn dimensions(&self) -> &Vector3<Coord> {
        &self.dimensions
    }

    pub fn pallet_height(&self) -> Coord {
        self.pallet_height
    }

    pub fn max_weight(&self) -> Option<f64> {
        self.max_weight
    }

    pub fn current_weight(&self) -> f64 {
        self.current_weight
    }

    /// Returns the items in the order they were added.
    pub fn items(&self) -> &[ItemBox] {
        &self.items
    }

    /// Returns the placements of the packed items.
    pub fn placements(&self) -> &[Placement] {
        self.packer.placements()
    }

    /// Returns the bundle's engine.
    pub fn packer(&self) -> &PackerEngine {
        &self.packer
    }

    /// Returns the packed item volume.
    pub fn current_volume(&self) -> Coord {
        self.packer.occupied_volume()
    }

    /// Returns the volume of the packing space.
    pub fn nominal_volume(&self) -> Coord {
        self.dimensions.x * self.dimensions.y * self.dimensions.z
    }

    /// Returns packed volume over packing space volume.
    pub fn fill_rate(&self) -> f64 {
        self.packer.fill_rate()
    }

    /// Returns true if nothing has been packed.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Summarises the bundle as a single box for container loading.
    ///
    /// The footprint is the full packing space; the height is the tallest
    /// stack plus the pallet, capped at the packing height plus the pallet.
    pub fn as_box(&self) -> ItemBox {
        let height = if self.is_empty() {
            self.pallet_height
        } else {
            (self.packer.max_height() + self.pallet_height)
                .min(self.dimensions.z + self.pallet_height)
        };

        ItemBox::new(
            format!("B{}", self.id),
            self.dimensions.x,
            self.dimensions.y,
            height,
        )
        .with_tag(self.kind.name())
        .with_weight(self.current_weight)
    }

    /// Returns a reporting snapshot.
    pub fn summary(&self) -> BundleSummary {
        BundleSummary {
            id: self.id,
            kind: self.kind,
            item_count: self.items.len(),
            fill_rate: self.fill_rate(),
            weight: self.current_weight,
            dimensions: self.dimensions,
            pallet_height: self.pallet_height,
            placements: self.placements().to_vec(),
        }
    }
}

/// Reporting snapshot of a bundle.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BundleSummary {
    pub id: usize,
    pub kind: BundleKind,
    pub item_count: usize,
    pub fill_rate: f64,
    /// Total weight in kilograms.
    pub weight: f64,
    /// Packing space extents, pallet excluded.
    pub dimensions: Vector3<Coord>,
    pub pallet_height: Coord,
    /// Item placements inside the bundle.
    pub placements: Vec<Placement>,
}

impl BundleSummary {
    /// Returns the placed item IDs in placement order.
    pub fn item_ids(&self) -> Vec<&str> {
        self.placements.iter().map(|p| p.id().as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiers::TierTable;
    use approx::assert_relative_eq;
    use loadplan_core::geometry::Geometry;
    use nalgebra::Point3;

    fn small_bundle() -> Bundle {
        let table = TierTable::default();
        Bundle::new(0, table.tier(TierKind::Small).unwrap(), Config::default())
    }

    #[test]
    fn test_empty_bundle_box_is_pallet_only() {
        let bundle = small_bundle();
        let summary = bundle.as_box();
        assert_eq!(summary.extents(), [450, 300, 50]);
        assert_eq!(summary.id(), "B0");
        assert_eq!(summary.tag(), Some("SMALL"));
        assert_eq!(summary.weight(), 0.0);
    }

    #[test]
    fn test_as_box_tracks_tallest_stack() {
        let mut bundle = small_bundle();
        bundle
            .add_item(&ItemBox::new("A", 200, 150, 150), 1.0)
            .unwrap();
        assert_eq!(bundle.as_box().extents(), [450, 300, 200]);
        assert_eq!(bundle.as_box().weight(), 1.0);
    }

    #[test]
    fn test_weight_limit() {
        let mut bundle = small_bundle();
        bundle.add_item(&ItemBox::new("A", 10, 10, 10), 39.0).unwrap();

        let err = bundle
            .add_item(&ItemBox::new("B", 10, 10, 10), 2.0)
            .unwrap_err();
        assert_eq!(err, Rejection::BundleCapacityExceeded(Capacity::Weight));
        assert_eq!(bundle.items().len(), 1);
        assert_eq!(bundle.current_weight(), 39.0);
        assert_eq!(bundle.placements().len(), 1);
    }

    #[test]
    fn test_space_limit() {
        let mut bundle = small_bundle();
        let err = bundle
            .add_item(&ItemBox::new("A", 500, 500, 500), 1.0)
            .unwrap_err();
        assert_eq!(err, Rejection::BundleCapacityExceeded(Capacity::Space));
        assert!(bundle.is_empty());
        assert_eq!(bundle.current_weight(), 0.0);
    }

    #[test]
    fn test_fill_rate_after_one_layer() {
        let mut bundle = small_bundle();
        for i in 0..4 {
            let placement = bundle
                .add_item(&ItemBox::new(format!("I{}", i), 200, 150, 150), 1.0)
                .unwrap();
            assert_eq!(placement.z(), 0);
        }

        let positions: Vec<_> = bundle.placements().iter().map(|p| *p.position()).collect();
        assert_eq!(
            positions,
            vec![
                Point3::new(0, 0, 0),
                Point3::new(200, 0, 0),
                Point3::new(0, 150, 0),
                Point3::new(200, 150, 0)
            ]
        );
        assert_relative_eq!(bundle.fill_rate(), 18_000_000.0 / 47_250_000.0);
    }

    #[test]
    fn test_oversized_bundle() {
        let item = ItemBox::new("big", 2000, 2000, 2000);
        let mut bundle = Bundle::oversized(3, &item, 150, Config::default());
        bundle.add_item(&item, 500.0).unwrap();

        assert_eq!(bundle.kind(), BundleKind::Oversized);
        assert_eq!(bundle.max_weight(), None);
        assert_eq!(bundle.as_box().extents(), [2000, 2000, 2150]);
        assert_eq!(bundle.as_box().tag(), Some("OVERSIZED"));
        assert_relative_eq!(bundle.fill_rate(), 1.0);
    }

    #[test]
    fn test_summary() {
        let mut bundle = small_bundle();
        bundle.add_item(&ItemBox::new("A", 100, 100, 100), 2.0).unwrap();
        bundle.add_item(&ItemBox::new("B", 100, 100, 100), 3.0).unwrap();

        let summary = bundle.summary();
        assert_eq!(summary.item_count, 2);
        assert_eq!(summary.weight, 5.0);
        assert_eq!(summary.kind, BundleKind::Tier(TierKind::Small));
        assert_eq!(summary.item_ids(), vec!["A", "B"]);
    }
}
