//! Placed items.

use loadplan_core::geometry::{Coord, Geometry, GeometryId};
use loadplan_core::Aabb3;
use nalgebra::{Point3, Vector3};

use crate::geometry::ItemBox;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An oriented item anchored at its minimum corner.
///
/// Placements are created by a `PackerEngine` and never change afterwards.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Placement {
    /// Anchor (min corner).
    position: Point3<Coord>,
    /// The item in the orientation it was placed with.
    item: ItemBox,
}

impl Placement {
    pub(crate) fn new(position: Point3<Coord>, item: ItemBox) -> Self {
        Self { position, item }
    }

    /// Returns the anchor point.
    pub fn position(&self) -> &Point3<Coord> {
        &self.position
    }

    /// Returns the oriented item.
    pub fn item(&self) -> &ItemBox {
        &self.item
    }

    /// Returns the placed item's ID.
    pub fn id(&self) -> &GeometryId {
        self.item.id()
    }

    /// Returns the oriented extents.
    pub fn dimensions(&self) -> &Vector3<Coord> {
        self.item.dimensions()
    }

    pub fn x(&self) -> Coord {
        self.position.x
    }

    pub fn y(&self) -> Coord {
        self.position.y
    }

    pub fn z(&self) -> Coord {
        self.position.z
    }

    /// Returns the z coordinate of the top face.
    pub fn top(&self) -> Coord {
        self.position.z + self.item.height()
    }

    /// Returns the max corner.
    pub fn max_corner(&self) -> Point3<Coord> {
        self.position + self.item.dimensions()
    }

    /// Returns the occupied volume as a half-open box.
    pub fn aabb(&self) -> Aabb3 {
        Aabb3::from_corner(&self.position, self.item.dimensions())
    }

    /// Returns the placed volume.
    pub fn volume(&self) -> Coord {
        self.item.volume()
    }

    /// Checks if this placement overlaps with another one.
    pub fn overlaps(&self, other: &Placement) -> bool {
        self.aabb().intersects(&other.aabb())
    }
}
