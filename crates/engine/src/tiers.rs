//! Bundle tiers, item size classes and vehicle compatibility.
//!
//! A [`TierTable`] is an immutable value describing the standard bundle sizes
//! available for palletizing, the size classes used to route items to a
//! preferred tier, and the pallet base height given to oversized bundles.
//! [`TierTable::default`] reproduces the postal presets.

use loadplan_core::geometry::{Boundary, Coord};
use loadplan_core::{Error, Result};
use nalgebra::Vector3;

use crate::boundary::Container;
use crate::geometry::ItemBox;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Standard bundle tier, ordered from smallest to largest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TierKind {
    Small,
    Medium,
    Large,
}

impl TierKind {
    /// Returns the preset name.
    pub fn name(self) -> &'static str {
        match self {
            TierKind::Small => "SMALL",
            TierKind::Medium => "MEDIUM",
            TierKind::Large => "LARGE",
        }
    }
}

impl std::fmt::Display for TierKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Packing space and limits of one bundle tier.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TierSpec {
    pub kind: TierKind,
    /// Packing space (length, width, height), pallet excluded.
    pub dimensions: Vector3<Coord>,
    /// Height of the pallet base added under the load.
    pub pallet_height: Coord,
    /// Maximum load weight in kilograms.
    pub max_weight: f64,
}

impl TierSpec {
    /// Creates a tier spec.
    pub fn new(
        kind: TierKind,
        length: Coord,
        width: Coord,
        height: Coord,
        pallet_height: Coord,
        max_weight: f64,
    ) -> Self {
        Self {
            kind,
            dimensions: Vector3::new(length, width, height),
            pallet_height,
            max_weight,
        }
    }

    /// Returns the nominal packing volume.
    pub fn volume(&self) -> Coord {
        self.dimensions.x * self.dimensions.y * self.dimensions.z
    }
}

/// Item size class code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SizeCode {
    XS,
    S,
    M,
    L,
    XL,
    XXL,
}

/// Upper bounds of a size class and the tier its items prefer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SizeClass {
    pub code: SizeCode,
    /// Largest extents, in any order.
    pub max_dimensions: Vector3<Coord>,
    /// Nominal weight in kilograms. Not used for routing.
    pub max_weight: f64,
    pub preferred: TierKind,
}

impl SizeClass {
    /// Creates a size class.
    pub fn new(
        code: SizeCode,
        max_dimensions: [Coord; 3],
        max_weight: f64,
        preferred: TierKind,
    ) -> Self {
        Self {
            code,
            max_dimensions: Vector3::from(max_dimensions),
            max_weight,
            preferred,
        }
    }

    /// Returns true if `item` falls within this class.
    ///
    /// Only extents are compared, after sorting both sides. Weight is
    /// enforced by the bundle the item lands in.
    pub fn admits(&self, item: &ItemBox) -> bool {
        item.fits_within(&self.max_dimensions)
    }
}

/// How many bundles of one tier fit in a container.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TierFit {
    pub tier: TierKind,
    /// Bundles on one floor layer, best of the two floor rotations.
    pub per_layer: Coord,
    /// Stacked layers, pallet included.
    pub layers: Coord,
    /// Total bundles.
    pub total: Coord,
    /// Fraction of the floor covered by one layer.
    pub floor_efficiency: f64,
}

/// Tiers, size classes and oversized handling.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TierTable {
    /// Tiers, smallest volume first.
    pub tiers: Vec<TierSpec>,
    /// Size classes, checked in order.
    pub size_classes: Vec<SizeClass>,
    /// Pallet height for dedicated oversized bundles.
    pub oversized_pallet_height: Coord,
    /// Tier used when size-class routing is disabled.
    pub fallback_tier: TierKind,
}

impl Default for TierTable {
    fn default() -> Self {
        use SizeCode::*;
        use TierKind::*;

        Self {
            tiers: vec![
                TierSpec::new(Small, 450, 300, 350, 50, 40.0),
                TierSpec::new(Medium, 675, 500, 400, 50, 100.0),
                TierSpec::new(Large, 900, 750, 450, 50, 200.0),
            ],
            size_classes: vec![
                SizeClass::new(XS, [220, 150, 50], 1.0, Small),
                SizeClass::new(S, [300, 200, 150], 3.0, Small),
                SizeClass::new(M, [400, 300, 200], 10.0, Medium),
                SizeClass::new(L, [500, 400, 300], 20.0, Medium),
                SizeClass::new(XL, [600, 500, 350], 35.0, Large),
                SizeClass::new(XXL, [800, 650, 500], 60.0, Large),
            ],
            oversized_pallet_height: 150,
            fallback_tier: Medium,
        }
    }
}

impl TierTable {
    /// Returns the spec of a tier, if defined.
    pub fn tier(&self, kind: TierKind) -> Option<&TierSpec> {
        self.tiers.iter().find(|t| t.kind == kind)
    }

    /// Returns the largest tier.
    pub fn largest(&self) -> Option<&TierSpec> {
        self.tiers.last()
    }

    /// Returns the first size class admitting `item`, or the last class.
    pub fn classify(&self, item: &ItemBox) -> Option<&SizeClass> {
        self.size_classes
            .iter()
            .find(|class| class.admits(item))
            .or_else(|| self.size_classes.last())
    }

    /// Returns the tier an item should start in.
    pub fn preferred_tier(&self, item: &ItemBox, auto_tier: bool) -> TierKind {
        if !auto_tier {
            return self.fallback_tier;
        }
        self.classify(item)
            .map(|class| class.preferred)
            .unwrap_or(self.fallback_tier)
    }

    /// Returns true if `item`, as given and without rotation, exceeds the
    /// largest tier on some axis.
    pub fn is_oversized(&self, item: &ItemBox) -> bool {
        match self.largest() {
            Some(largest) => {
                let d = &largest.dimensions;
                !(item.length() <= d.x && item.width() <= d.y && item.height() <= d.z)
            }
            None => true,
        }
    }

    /// Returns the tiers strictly larger than `kind`, in table order.
    pub fn larger_tiers(&self, kind: TierKind) -> impl Iterator<Item = &TierSpec> {
        let start = self
            .tiers
            .iter()
            .position(|t| t.kind == kind)
            .map_or(self.tiers.len(), |i| i + 1);
        self.tiers[start..].iter()
    }

    /// Checks that the table is usable.
    pub fn validate(&self) -> Result<()> {
        if self.tiers.is_empty() {
            return Err(Error::ConfigError("at least one tier is required".into()));
        }

        for tier in &self.tiers {
            if tier.dimensions.iter().any(|&d| d <= 0) {
                return Err(Error::ConfigError(format!(
                    "tier {} must have positive dimensions",
                    tier.kind
                )));
            }
            if tier.pallet_height < 0 {
                return Err(Error::ConfigError(format!(
                    "tier {} pallet height cannot be negative",
                    tier.kind
                )));
            }
            if tier.max_weight <= 0.0 || tier.max_weight.is_nan() {
                return Err(Error::ConfigError(format!(
                    "tier {} max weight must be positive",
                    tier.kind
                )));
            }
        }

        if self
            .tiers
            .windows(2)
            .any(|pair| pair[0].volume() > pair[1].volume() || pair[0].kind >= pair[1].kind)
        {
            return Err(Error::ConfigError(
                "tiers must be listed smallest first".into(),
            ));
        }

        if self.oversized_pallet_height < 0 {
            return Err(Error::ConfigError(
                "oversized pallet height cannot be negative".into(),
            ));
        }

        if self.tier(self.fallback_tier).is_none() {
            return Err(Error::ConfigError(format!(
                "fallback tier {} is not defined",
                self.fallback_tier
            )));
        }

        for class in &self.size_classes {
            if class.max_dimensions.iter().any(|&d| d <= 0) {
                return Err(Error::ConfigError(format!(
                    "size class {:?} must have positive dimensions",
                    class.code
                )));
            }
            if self.tier(class.preferred).is_none() {
                return Err(Error::ConfigError(format!(
                    "size class {:?} points at undefined tier {}",
                    class.code, class.preferred
                )));
            }
        }

        Ok(())
    }

    /// Parses a tier table from JSON and validates it.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self> {
        let table: Self = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    /// Computes how many bundles of each tier a container holds.
    pub fn vehicle_fit(&self, container: &Container) -> Vec<TierFit> {
        let floor = container.floor_area();

        self.tiers
            .iter()
            .map(|tier| {
                let (l, w) = (tier.dimensions.x, tier.dimensions.y);
                let straight = (container.length() / l) * (container.width() / w);
                let rotated = (container.length() / w) * (container.width() / l);
                let per_layer = straight.max(rotated);
                let layers = container.height() / (tier.dimensions.z + tier.pallet_height);

                TierFit {
                    tier: tier.kind,
                    per_layer,
                    layers,
                    total: per_layer * layers,
                    floor_efficiency: if floor > 0 {
                        (per_layer * l * w) as f64 / floor as f64
                    } else {
                        0.0
                    },
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::VehicleClass;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults_are_valid() {
        let table = TierTable::default();
        assert!(table.validate().is_ok());
        assert_eq!(table.largest().unwrap().kind, TierKind::Large);
        assert_eq!(table.tier(TierKind::Small).unwrap().max_weight, 40.0);
    }

    #[test]
    fn test_classify_by_sorted_extents() {
        let table = TierTable::default();

        // 150x220x40 sorts to 220x150x40: XS.
        let item = ItemBox::new("A", 150, 220, 40).with_weight(0.5);
        assert_eq!(table.classify(&item).unwrap().code, SizeCode::XS);

        let item = ItemBox::new("B", 200, 150, 150).with_weight(1.0);
        assert_eq!(table.classify(&item).unwrap().code, SizeCode::S);
        assert_eq!(table.preferred_tier(&item, true), TierKind::Small);
    }

    #[test]
    fn test_classify_ignores_weight() {
        let table = TierTable::default();
        let heavy = ItemBox::new("A", 100, 100, 40).with_weight(15.0);
        let unweighted = ItemBox::new("B", 100, 100, 40);
        assert_eq!(table.classify(&heavy).unwrap().code, SizeCode::XS);
        assert_eq!(table.classify(&unweighted).unwrap().code, SizeCode::XS);

        let cube = ItemBox::new("C", 100, 100, 100).with_weight(12.0);
        assert_eq!(table.classify(&cube).unwrap().code, SizeCode::S);
        assert_eq!(table.preferred_tier(&cube, true), TierKind::Small);
    }

    #[test]
    fn test_classify_falls_back_to_last_class() {
        let table = TierTable::default();
        let item = ItemBox::new("A", 850, 100, 100).with_weight(90.0);
        assert_eq!(table.classify(&item).unwrap().code, SizeCode::XXL);
        assert_eq!(table.preferred_tier(&item, true), TierKind::Large);
    }

    #[test]
    fn test_fallback_tier_without_auto_tier() {
        let table = TierTable::default();
        let item = ItemBox::new("A", 10, 10, 10);
        assert_eq!(table.preferred_tier(&item, false), TierKind::Medium);
    }

    #[test]
    fn test_oversized_compares_unrotated_axes() {
        let table = TierTable::default();
        assert!(table.is_oversized(&ItemBox::new("big", 2000, 2000, 2000)));
        assert!(table.is_oversized(&ItemBox::new("long", 1000, 10, 10)));
        assert!(!table.is_oversized(&ItemBox::new("fits", 880, 400, 100)));
        assert!(!table.is_oversized(&ItemBox::new("exact", 900, 750, 450)));

        // Would fit LARGE once rotated, but each axis is checked as given.
        assert!(table.is_oversized(&ItemBox::new("flat", 100, 880, 400)));
        assert!(table.is_oversized(&ItemBox::new("wide", 400, 900, 300)));
        assert!(table.is_oversized(&ItemBox::new("tall", 400, 300, 500)));
    }

    #[test]
    fn test_larger_tiers() {
        let table = TierTable::default();
        let kinds: Vec<_> = table.larger_tiers(TierKind::Small).map(|t| t.kind).collect();
        assert_eq!(kinds, vec![TierKind::Medium, TierKind::Large]);
        assert_eq!(table.larger_tiers(TierKind::Large).count(), 0);
    }

    #[test]
    fn test_validate_rejects_bad_tables() {
        let mut table = TierTable::default();
        table.tiers.swap(0, 2);
        assert!(table.validate().is_err());

        let mut table = TierTable::default();
        table.tiers.truncate(1);
        assert!(matches!(table.validate(), Err(Error::ConfigError(_))));

        let mut table = TierTable::default();
        table.tiers.clear();
        assert!(table.validate().is_err());
    }

    #[test]
    fn test_vehicle_fit_collection() {
        let table = TierTable::default();
        let fits = table.vehicle_fit(&Container::vehicle(VehicleClass::Collection));

        let small = fits.iter().find(|f| f.tier == TierKind::Small).unwrap();
        assert_eq!(small.per_layer, 30);
        assert_eq!(small.layers, 3);
        assert_eq!(small.total, 90);
        assert_relative_eq!(small.floor_efficiency, 1.0);

        let large = fits.iter().find(|f| f.tier == TierKind::Large).unwrap();
        assert_eq!(large.per_layer, 6);
        assert_eq!(large.layers, 2);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_from_json_round_trip() {
        let json = serde_json::to_string(&TierTable::default()).unwrap();
        let table = TierTable::from_json(&json).unwrap();
        assert_eq!(table, TierTable::default());
    }
}
