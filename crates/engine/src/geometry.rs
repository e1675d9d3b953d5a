//! Item box geometry.

use loadplan_core::geometry::{Coord, Geometry, GeometryId};
use loadplan_core::{Error, Result};
use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Axis permutations in enumeration order: (l,w,h), (l,h,w), (w,l,h),
/// (w,h,l), (h,l,w), (h,w,l).
const ORIENTATIONS: [(usize, usize, usize); 6] = [
    (0, 1, 2),
    (0, 2, 1),
    (1, 0, 2),
    (1, 2, 0),
    (2, 0, 1),
    (2, 1, 0),
];

/// An immutable rectangular item.
///
/// Reorienting never mutates a box; [`ItemBox::orientations`] returns new
/// values that share identity, tag and weight.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ItemBox {
    /// Unique identifier.
    id: GeometryId,

    /// Extents (length, width, height).
    dimensions: Vector3<Coord>,

    /// Free-form metadata carried through to placements.
    tag: Option<String>,

    /// Weight in kilograms.
    weight: Option<f64>,
}

impl ItemBox {
    /// Creates a new box with the given ID and extents.
    pub fn new(id: impl Into<GeometryId>, length: Coord, width: Coord, height: Coord) -> Self {
        Self {
            id: id.into(),
            dimensions: Vector3::new(length, width, height),
            tag: None,
            weight: None,
        }
    }

    /// Sets the metadata tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Sets the weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Returns the extents (length, width, height).
    pub fn dimensions(&self) -> &Vector3<Coord> {
        &self.dimensions
    }

    /// Returns the length (x extent).
    pub fn length(&self) -> Coord {
        self.dimensions.x
    }

    /// Returns the width (y extent).
    pub fn width(&self) -> Coord {
        self.dimensions.y
    }

    /// Returns the height (z extent).
    pub fn height(&self) -> Coord {
        self.dimensions.z
    }

    /// Returns the metadata tag.
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Returns the weight, or zero if none was given.
    pub fn weight(&self) -> f64 {
        self.weight.unwrap_or(0.0)
    }

    /// Returns the volume.
    pub fn volume(&self) -> Coord {
        self.dimensions.x * self.dimensions.y * self.dimensions.z
    }

    /// Returns the footprint area (length by width).
    pub fn base_area(&self) -> Coord {
        self.dimensions.x * self.dimensions.y
    }

    /// Returns the extents sorted from largest to smallest.
    pub fn sorted_extents(&self) -> [Coord; 3] {
        let mut dims = [self.dimensions.x, self.dimensions.y, self.dimensions.z];
        dims.sort_unstable_by(|a, b| b.cmp(a));
        dims
    }

    /// Returns true if some orientation of this box fits inside `bounds`.
    pub fn fits_within(&self, bounds: &Vector3<Coord>) -> bool {
        let mut limits = [bounds.x, bounds.y, bounds.z];
        limits.sort_unstable_by(|a, b| b.cmp(a));
        self.sorted_extents()
            .iter()
            .zip(limits.iter())
            .all(|(d, l)| d <= l)
    }

    /// Returns the distinct axis permutations of this box.
    ///
    /// Duplicates are dropped by first occurrence, so a cube yields one
    /// orientation, a box with two equal extents three, and any other box six.
    pub fn orientations(&self) -> Vec<ItemBox> {
        let mut result: Vec<ItemBox> = Vec::with_capacity(ORIENTATIONS.len());
        for &(a, b, c) in ORIENTATIONS.iter() {
            let dims = Vector3::new(self.dimensions[a], self.dimensions[b], self.dimensions[c]);
            if result.iter().any(|o| o.dimensions == dims) {
                continue;
            }
            result.push(ItemBox {
                dimensions: dims,
                ..self.clone()
            });
        }
        result
    }
}

impl Geometry for ItemBox {
    fn id(&self) -> &GeometryId {
        &self.id
    }

    fn measure(&self) -> Coord {
        self.volume()
    }

    fn extents(&self) -> [Coord; 3] {
        [self.dimensions.x, self.dimensions.y, self.dimensions.z]
    }

    fn validate(&self) -> Result<()> {
        if self.dimensions.x <= 0 || self.dimensions.y <= 0 || self.dimensions.z <= 0 {
            return Err(Error::InvalidGeometry(format!(
                "All dimensions for '{}' must be positive",
                self.id
            )));
        }

        if let Some(weight) = self.weight {
            if weight < 0.0 || weight.is_nan() {
                return Err(Error::InvalidGeometry(format!(
                    "Weight for '{}' cannot be negative",
                    self.id
                )));
            }
        }

        Ok(())
    }
}
