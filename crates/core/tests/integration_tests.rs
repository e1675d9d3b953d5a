//! Integration tests for loadplan-core.

use approx::assert_relative_eq;
use loadplan_core::aabb::Aabb3;
use loadplan_core::error::{Capacity, Rejection};
use loadplan_core::geometry::{Boundary, Coord, Geometry, GeometryId};
use loadplan_core::result::{EfficiencyMetrics, SolveSummary};
use loadplan_core::solver::Config;
use loadplan_core::Result;

#[derive(Clone)]
struct Crate {
    id: GeometryId,
    extents: [Coord; 3],
}

impl Geometry for Crate {
    fn id(&self) -> &GeometryId {
        &self.id
    }

    fn measure(&self) -> Coord {
        self.extents.iter().product()
    }

    fn extents(&self) -> [Coord; 3] {
        self.extents
    }

    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

#[derive(Clone)]
struct Hold([Coord; 3]);

impl Boundary for Hold {
    fn measure(&self) -> Coord {
        self.0.iter().product()
    }

    fn extents(&self) -> [Coord; 3] {
        self.0
    }

    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

mod geometry_tests {
    use super::*;

    #[test]
    fn test_default_aabb_is_anchored_at_origin() {
        let c = Crate {
            id: "C1".into(),
            extents: [10, 20, 30],
        };
        assert_eq!(c.aabb(), Aabb3::new(0, 0, 0, 10, 20, 30));
        assert_eq!(c.aabb().volume(), c.measure());
    }

    #[test]
    fn test_boundary_defaults() {
        let hold = Hold([100, 50, 40]);
        assert_eq!(hold.floor_area(), 5000);
    }
}

mod aabb_tests {
    use super::*;

    #[test]
    fn test_stacked_boxes_share_footprint_not_volume() {
        let lower = Aabb3::new(0, 0, 0, 300, 200, 100);
        let upper = Aabb3::new(0, 0, 100, 300, 300, 200);

        assert!(!lower.intersects(&upper));
        assert_eq!(upper.footprint_overlap(&lower), 60_000);
    }

    #[test]
    fn test_unit_probe_on_face_is_outside() {
        let placed = Aabb3::new(0, 0, 0, 500, 500, 500);
        let probe = Aabb3::new(500, 0, 0, 501, 1, 1);
        assert!(!placed.intersects(&probe));

        let inside = Aabb3::new(499, 0, 0, 500, 1, 1);
        assert!(placed.intersects(&inside));
    }
}

mod config_tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        let config = Config::new()
            .with_support_ratio(0.75)
            .with_dead_space(30, 50_000.0)
            .with_fill_rates(0.5, 0.9)
            .with_auto_tier(false)
            .with_weight_capacity(true);

        assert!(config.validate().is_ok());
        assert_eq!(config.support_ratio, 0.75);
        assert_eq!(config.dead_space_gap, 30);
        assert!(!config.auto_tier);
        assert!(config.enforce_weight_capacity);
    }

    #[test]
    fn test_rejections_are_comparable() {
        let a = Rejection::ContainerOverflow(Capacity::Weight);
        let b = Rejection::ContainerOverflow(Capacity::Space);
        assert_ne!(a, b);
        assert_eq!(a, Rejection::ContainerOverflow(Capacity::Weight));
    }
}

mod result_tests {
    use super::*;

    #[test]
    fn test_metrics_from_volumes() {
        let hold = Hold([1000, 1000, 1000]);
        let packed = Aabb3::new(0, 0, 0, 450, 300, 200);

        let metrics = EfficiencyMetrics {
            bundle_volume_efficiency: packed.volume() as f64 / hold.measure() as f64,
            floor_efficiency: packed.base_area() as f64 / hold.floor_area() as f64,
            ..Default::default()
        };
        assert_relative_eq!(metrics.bundle_volume_efficiency, 0.027);
        assert_relative_eq!(metrics.floor_efficiency, 0.135);
        assert_eq!(metrics.floor_percent(), "13.5%");

        let summary = SolveSummary {
            metrics,
            ..Default::default()
        };
        assert!(summary.is_complete());
    }
}
