//! Structural support and layout validation.
//!
//! A placement above the floor must rest on the top faces of earlier
//! placements. Support is measured as the fraction of its footprint that
//! overlaps top faces lying (within a tolerance) in the plane of its bottom
//! face. The floor (z = 0) always counts as full support.
//!
//! [`check_layout`] re-derives every geometric invariant of a placement list
//! from scratch, independent of the engine that produced it.

use loadplan_core::geometry::Coord;
use loadplan_core::{Aabb3, Config};
use nalgebra::Vector3;

use crate::placement::Placement;

/// Returns the fraction of `footprint` resting on coplanar top faces.
///
/// `footprint` is the candidate's volume; only its xy projection and its
/// `min_z` are used. Overlaps from different supporters are summed.
pub fn support_ratio(placements: &[Placement], footprint: &Aabb3, epsilon: Coord) -> f64 {
    if footprint.min_z == 0 {
        return 1.0;
    }

    let base_area = footprint.base_area();
    if base_area <= 0 {
        return 0.0;
    }

    let supported: Coord = placements
        .iter()
        .filter(|p| (p.top() - footprint.min_z).abs() < epsilon)
        .map(|p| footprint.footprint_overlap(&p.aabb()))
        .sum();

    supported as f64 / base_area as f64
}

/// Returns true if `footprint` meets the configured support ratio.
pub fn is_supported(placements: &[Placement], footprint: &Aabb3, config: &Config) -> bool {
    support_ratio(placements, footprint, config.support_epsilon) >= config.support_ratio
}

/// A broken layout invariant.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutViolation {
    /// Two placements share interior volume.
    Overlap {
        /// Index of the earlier placement.
        first: usize,
        /// Index of the later placement.
        second: usize,
    },
    /// A placement leaves the container or has a negative anchor.
    OutOfBounds {
        /// Index of the placement.
        index: usize,
    },
    /// A placement above the floor lacks enough support.
    Unsupported {
        /// Index of the placement.
        index: usize,
        /// Measured support ratio.
        ratio: f64,
    },
}

/// Checks containment, overlap and support for a placement list.
///
/// Support for placement `i` is measured against placements `0..i` only,
/// matching the order in which they were committed.
pub fn check_layout(
    placements: &[Placement],
    container: &Vector3<Coord>,
    config: &Config,
) -> Vec<LayoutViolation> {
    let mut violations = Vec::new();

    for (i, p) in placements.iter().enumerate() {
        let aabb = p.aabb();
        if !aabb.within(container) {
            violations.push(LayoutViolation::OutOfBounds { index: i });
        }

        for (j, earlier) in placements[..i].iter().enumerate() {
            if earlier.overlaps(p) {
                violations.push(LayoutViolation::Overlap {
                    first: j,
                    second: i,
                });
            }
        }

        let ratio = support_ratio(&placements[..i], &aabb, config.support_epsilon);
        if ratio < config.support_ratio {
            violations.push(LayoutViolation::Unsupported { index: i, ratio });
        }
    }

    violations
}
