//! Container (vehicle) boundary types.

use loadplan_core::geometry::{Boundary, Coord};
use loadplan_core::{Error, Result};
use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Standard vehicle body sizes of the postal transport chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum VehicleClass {
    /// 0.5-1 t van collecting from wards to the district hub.
    Collection,
    /// 2-3 t truck between district and province hubs.
    InterDistrict,
    /// 5-10 t truck between province and regional hubs.
    InterRegion,
}

impl VehicleClass {
    /// All vehicle classes, smallest first.
    pub const ALL: [VehicleClass; 3] = [
        VehicleClass::Collection,
        VehicleClass::InterDistrict,
        VehicleClass::InterRegion,
    ];

    /// Returns the cargo body extents (length, width, height).
    pub fn dimensions(self) -> [Coord; 3] {
        match self {
            VehicleClass::Collection => [2700, 1500, 1400],
            VehicleClass::InterDistrict => [4200, 1900, 1800],
            VehicleClass::InterRegion => [6200, 2400, 2400],
        }
    }

    /// Returns the payload capacity in kilograms.
    pub fn capacity_kg(self) -> f64 {
        match self {
            VehicleClass::Collection => 800.0,
            VehicleClass::InterDistrict => 2500.0,
            VehicleClass::InterRegion => 8000.0,
        }
    }

    /// Returns the preset name.
    pub fn name(self) -> &'static str {
        match self {
            VehicleClass::Collection => "COLLECTION",
            VehicleClass::InterDistrict => "INTER_DISTRICT",
            VehicleClass::InterRegion => "INTER_REGION",
        }
    }
}

/// A rectangular container: a vehicle body or a bundle's packing space.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Container {
    /// Extents (length, width, height).
    dimensions: Vector3<Coord>,

    /// Maximum total weight allowed.
    max_weight: Option<f64>,

    /// Display name.
    name: Option<String>,
}

impl Container {
    /// Creates a new container with the given extents.
    pub fn new(length: Coord, width: Coord, height: Coord) -> Self {
        Self {
            dimensions: Vector3::new(length, width, height),
            max_weight: None,
            name: None,
        }
    }

    /// Creates a container from a vehicle preset.
    pub fn vehicle(class: VehicleClass) -> Self {
        let [l, w, h] = class.dimensions();
        Self::new(l, w, h)
            .with_max_weight(class.capacity_kg())
            .with_name(class.name())
    }

    /// Sets the maximum allowed weight.
    pub fn with_max_weight(mut self, weight: f64) -> Self {
        self.max_weight = Some(weight);
        self
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns the extents (length, width, height).
    pub fn dimensions(&self) -> &Vector3<Coord> {
        &self.dimensions
    }

    /// Returns the length.
    pub fn length(&self) -> Coord {
        self.dimensions.x
    }

    /// Returns the width.
    pub fn width(&self) -> Coord {
        self.dimensions.y
    }

    /// Returns the height.
    pub fn height(&self) -> Coord {
        self.dimensions.z
    }

    /// Returns the maximum weight.
    pub fn max_weight(&self) -> Option<f64> {
        self.max_weight
    }

    /// Returns the display name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl Boundary for Container {
    fn measure(&self) -> Coord {
        self.dimensions.x * self.dimensions.y * self.dimensions.z
    }

    fn extents(&self) -> [Coord; 3] {
        [self.dimensions.x, self.dimensions.y, self.dimensions.z]
    }

    fn validate(&self) -> Result<()> {
        if self.dimensions.x <= 0 || self.dimensions.y <= 0 || self.dimensions.z <= 0 {
            return Err(Error::InvalidBoundary(
                "All dimensions must be positive".into(),
            ));
        }

        if let Some(weight) = self.max_weight {
            if weight <= 0.0 || weight.is_nan() {
                return Err(Error::InvalidBoundary(
                    "Maximum weight must be positive".into(),
                ));
            }
        }

        Ok(())
    }
}
