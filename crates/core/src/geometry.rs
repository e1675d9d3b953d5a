//! Core geometry traits and types.

use crate::aabb::Aabb3;
use crate::Result;

/// Unique identifier for an item or bundle.
pub type GeometryId = String;

/// Integer coordinate type. All lengths are millimetres.
pub type Coord = i64;

/// Trait for rectangular items that can be packed.
pub trait Geometry: Clone + Send + Sync {
    /// Returns the unique identifier for this geometry.
    fn id(&self) -> &GeometryId;

    /// Returns the volume of this geometry.
    fn measure(&self) -> Coord;

    /// Returns the extents along x, y and z.
    fn extents(&self) -> [Coord; 3];

    /// Returns the bounding box anchored at the origin.
    fn aabb(&self) -> Aabb3 {
        let [l, w, h] = self.extents();
        Aabb3::new(0, 0, 0, l, w, h)
    }

    /// Validates the geometry and returns an error if invalid.
    fn validate(&self) -> Result<()>;
}

/// Trait for containers that geometries are packed into.
pub trait Boundary: Clone + Send + Sync {
    /// Returns the volume of the container.
    fn measure(&self) -> Coord;

    /// Returns the inner extents along x, y and z.
    fn extents(&self) -> [Coord; 3];

    /// Returns the floor area (x by y).
    fn floor_area(&self) -> Coord {
        let [l, w, _] = self.extents();
        l * w
    }

    /// Validates the boundary and returns an error if invalid.
    fn validate(&self) -> Result<()>;
}
