//! Integer axis-aligned bounding boxes.
//!
//! Boxes are half-open on every axis: a box spans `[min, max)`, so two boxes
//! that only share a face do not intersect.

use nalgebra::{Point3, Vector3};

use crate::geometry::Coord;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in 3D.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb3 {
    /// Minimum x coordinate.
    pub min_x: Coord,
    /// Minimum y coordinate.
    pub min_y: Coord,
    /// Minimum z coordinate.
    pub min_z: Coord,
    /// Maximum x coordinate (exclusive).
    pub max_x: Coord,
    /// Maximum y coordinate (exclusive).
    pub max_y: Coord,
    /// Maximum z coordinate (exclusive).
    pub max_z: Coord,
}

impl Aabb3 {
    /// Creates a new AABB from min/max coordinates.
    pub fn new(
        min_x: Coord,
        min_y: Coord,
        min_z: Coord,
        max_x: Coord,
        max_y: Coord,
        max_z: Coord,
    ) -> Self {
        Self {
            min_x,
            min_y,
            min_z,
            max_x,
            max_y,
            max_z,
        }
    }

    /// Creates an AABB from its minimum corner and extents.
    pub fn from_corner(corner: &Point3<Coord>, extents: &Vector3<Coord>) -> Self {
        let max = corner + extents;
        Self::new(corner.x, corner.y, corner.z, max.x, max.y, max.z)
    }

    /// Returns the minimum corner.
    pub fn min_corner(&self) -> Point3<Coord> {
        Point3::new(self.min_x, self.min_y, self.min_z)
    }

    /// Returns the maximum corner.
    pub fn max_corner(&self) -> Point3<Coord> {
        Point3::new(self.max_x, self.max_y, self.max_z)
    }

    /// Returns the width (x dimension) of the AABB.
    pub fn width(&self) -> Coord {
        self.max_x - self.min_x
    }

    /// Returns the depth (y dimension) of the AABB.
    pub fn depth(&self) -> Coord {
        self.max_y - self.min_y
    }

    /// Returns the height (z dimension) of the AABB.
    pub fn height(&self) -> Coord {
        self.max_z - self.min_z
    }

    /// Returns the volume of the AABB.
    pub fn volume(&self) -> Coord {
        self.width() * self.depth() * self.height()
    }

    /// Returns the area of the bottom face.
    pub fn base_area(&self) -> Coord {
        self.width() * self.depth()
    }

    /// Checks if this AABB contains a point, using half-open intervals.
    pub fn contains_point(&self, point: &Point3<Coord>) -> bool {
        point.x >= self.min_x
            && point.x < self.max_x
            && point.y >= self.min_y
            && point.y < self.max_y
            && point.z >= self.min_z
            && point.z < self.max_z
    }

    /// Checks if this AABB lies within `[0, extents]` on every axis.
    pub fn within(&self, extents: &Vector3<Coord>) -> bool {
        self.min_x >= 0
            && self.min_y >= 0
            && self.min_z >= 0
            && self.max_x <= extents.x
            && self.max_y <= extents.y
            && self.max_z <= extents.z
    }

    /// Checks if this AABB shares interior volume with another AABB.
    pub fn intersects(&self, other: &Self) -> bool {
        self.min_x < other.max_x
            && self.max_x > other.min_x
            && self.min_y < other.max_y
            && self.max_y > other.min_y
            && self.min_z < other.max_z
            && self.max_z > other.min_z
    }

    /// Returns the area shared by the xy projections of two AABBs.
    pub fn footprint_overlap(&self, other: &Self) -> Coord {
        let dx = self.max_x.min(other.max_x) - self.min_x.max(other.min_x);
        let dy = self.max_y.min(other.max_y) - self.min_y.max(other.min_y);
        if dx > 0 && dy > 0 {
            dx * dy
        } else {
            0
        }
    }
}
