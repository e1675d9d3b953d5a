//! Extreme Point heuristic for 3D bin packing.
//!
//! # Algorithm Overview
//!
//! Extreme points are open corners where the minimum corner of a new box may
//! be anchored. The engine starts with the container origin; each committed
//! box spawns candidates at its three far corners along x, y and z, and
//! removes every candidate that ends up inside it.
//!
//! Placement is greedy and never backtracks. For each item the frontier is
//! scanned bottom-up, back-to-front, left-to-right, every orientation is tried
//! at every point, and the feasible pair with the lowest score wins. A floor
//! placement that is already good enough ends the scan early.
//!
//! # References
//!
//! - Crainic, T. G., Perboli, G., & Tadei, R. (2008). Extreme point-based heuristics
//!   for three-dimensional bin packing.

use loadplan_core::geometry::{Boundary, Coord};
use loadplan_core::{Aabb3, Config, Rejection};
use nalgebra::{Point3, Vector3};

use crate::boundary::Container;
use crate::geometry::ItemBox;
use crate::placement::Placement;
use crate::support;

/// Best candidate found while scanning the frontier.
struct Candidate {
    point: Point3<Coord>,
    item: ItemBox,
    score: f64,
}

/// Spatial state of one container: placements, frontier and occupied volume.
///
/// Mutated only through [`PackerEngine::add_item`]; a rejected item leaves
/// every part of the state untouched.
#[derive(Debug, Clone)]
pub struct PackerEngine {
    /// Container extents.
    container: Vector3<Coord>,
    /// Committed placements, in commit order.
    placements: Vec<Placement>,
    /// Candidate anchor points.
    frontier: Vec<Point3<Coord>>,
    /// Sum of placed volumes.
    occupied_volume: Coord,
    /// Heuristic constants.
    config: Config,
}

impl PackerEngine {
    /// Creates an empty engine for a container.
    pub fn new(container: &Container, config: Config) -> Self {
        Self::with_dimensions(*container.dimensions(), config)
    }

    /// Creates an empty engine for raw container extents.
    pub fn with_dimensions(container: Vector3<Coord>, config: Config) -> Self {
        Self {
            container,
            placements: Vec::new(),
            frontier: vec![Point3::origin()],
            occupied_volume: 0,
            config,
        }
    }

    /// Returns the container extents.
    pub fn container(&self) -> &Vector3<Coord> {
        &self.container
    }

    /// Returns the committed placements in commit order.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Returns the current candidate points, unsorted.
    pub fn frontier(&self) -> &[Point3<Coord>] {
        &self.frontier
    }

    /// Returns the sum of placed volumes.
    pub fn occupied_volume(&self) -> Coord {
        self.occupied_volume
    }

    /// Returns the container volume.
    pub fn capacity(&self) -> Coord {
        self.container.x * self.container.y * self.container.z
    }

    /// Returns occupied volume over container volume.
    pub fn fill_rate(&self) -> f64 {
        let capacity = self.capacity();
        if capacity > 0 {
            self.occupied_volume as f64 / capacity as f64
        } else {
            0.0
        }
    }

    /// Returns the highest top face, or zero when empty.
    pub fn max_height(&self) -> Coord {
        self.placements.iter().map(Placement::top).max().unwrap_or(0)
    }

    /// Returns the number of placements.
    pub fn placed_count(&self) -> usize {
        self.placements.len()
    }

    /// Returns true if nothing has been placed yet.
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Returns the heuristic constants in use.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Places an item at the best scoring point and orientation.
    ///
    /// Returns [`Rejection::ItemUnplaceable`] if no combination is feasible.
    pub fn add_item(&mut self, item: &ItemBox) -> Result<&Placement, Rejection> {
        let best = self.find_best(item).ok_or(Rejection::ItemUnplaceable)?;
        Ok(self.commit(best.point, best.item))
    }

    /// Checks bounds, collisions and support for an oriented item at `point`.
    pub fn can_place(&self, point: &Point3<Coord>, item: &ItemBox) -> bool {
        let aabb = Aabb3::from_corner(point, item.dimensions());
        if !aabb.within(&self.container) {
            return false;
        }

        if self.placements.iter().any(|p| p.aabb().intersects(&aabb)) {
            return false;
        }

        support::is_supported(&self.placements, &aabb, &self.config)
    }

    /// Scores an oriented item at `point`. Lower is better.
    pub fn score(&self, point: &Point3<Coord>, item: &ItemBox) -> f64 {
        let gap_x = self.container.x - (point.x + item.length());
        let gap_y = self.container.y - (point.y + item.width());

        let mut penalty = 0.0;
        if self.is_thin_gap(gap_x) {
            penalty += self.config.dead_space_penalty;
        }
        if self.is_thin_gap(gap_y) {
            penalty += self.config.dead_space_penalty;
        }

        point.z as f64 * self.config.layer_weight
            + point.y as f64 * self.config.row_weight
            + point.x as f64
            + penalty
            - item.base_area() as f64 / self.config.area_divisor
    }

    fn is_thin_gap(&self, gap: Coord) -> bool {
        gap > 0 && gap < self.config.dead_space_gap
    }

    fn find_best(&self, item: &ItemBox) -> Option<Candidate> {
        let mut points = self.frontier.clone();
        points.sort_by_key(|p| (p.z, p.y, p.x));

        let orientations = item.orientations();
        let mut best: Option<Candidate> = None;

        for point in points {
            for oriented in &orientations {
                if !self.can_place(&point, oriented) {
                    continue;
                }

                let score = self.score(&point, oriented);
                if best.as_ref().map_or(true, |b| score < b.score) {
                    best = Some(Candidate {
                        point,
                        item: oriented.clone(),
                        score,
                    });
                }
            }

            if let Some(b) = &best {
                if b.point.z == 0 && b.score < self.config.early_exit_score {
                    break;
                }
            }
        }

        best
    }

    fn commit(&mut self, point: Point3<Coord>, item: ItemBox) -> &Placement {
        self.occupied_volume += item.volume();
        self.placements.push(Placement::new(point, item));
        self.update_frontier();

        // Just pushed above.
        &self.placements[self.placements.len() - 1]
    }

    /// Spawns candidates at the far corners of the newest placement and purges
    /// points it now covers.
    fn update_frontier(&mut self) {
        let Some(placed) = self.placements.last() else {
            return;
        };
        let origin = *placed.position();
        let dims = *placed.dimensions();
        let covered = placed.aabb();

        let candidates = [
            Point3::new(origin.x + dims.x, origin.y, origin.z),
            Point3::new(origin.x, origin.y + dims.y, origin.z),
            Point3::new(origin.x, origin.y, origin.z + dims.z),
        ];

        for candidate in candidates {
            if self.is_open(&candidate) && !self.frontier.contains(&candidate) {
                self.frontier.push(candidate);
            }
        }

        self.frontier.retain(|p| !covered.contains_point(p));
    }

    /// A point is open if it lies strictly inside the container and a unit
    /// probe anchored there touches no placement.
    fn is_open(&self, point: &Point3<Coord>) -> bool {
        if point.x >= self.container.x || point.y >= self.container.y || point.z >= self.container.z
        {
            return false;
        }

        let probe = Aabb3::from_corner(point, &Vector3::new(1, 1, 1));
        !self.placements.iter().any(|p| p.aabb().intersects(&probe))
    }
}

impl From<&Container> for PackerEngine {
    fn from(container: &Container) -> Self {
        Self::new(container, Config::default())
    }
}

/// Feeds `items` in order into a fresh engine for `container`.
///
/// Returns the engine and the items that were rejected.
pub fn pack_in_order(
    items: &[ItemBox],
    container: &Container,
    config: Config,
) -> (PackerEngine, Vec<ItemBox>) {
    let mut engine = PackerEngine::new(container, config);
    let mut rejected = Vec::new();

    for item in items {
        if engine.add_item(item).is_err() {
            rejected.push(item.clone());
        }
    }

    log::debug!(
        "Packed {}/{} items into {}x{}x{} ({:.1}% full)",
        engine.placed_count(),
        items.len(),
        container.length(),
        container.width(),
        container.height(),
        engine.fill_rate() * 100.0
    );
    debug_assert!(engine.occupied_volume() <= container.measure());

    (engine, rejected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::support::check_layout;

    fn engine(l: Coord, w: Coord, h: Coord) -> PackerEngine {
        PackerEngine::from(&Container::new(l, w, h))
    }

    #[test]
    fn test_early_exit_keeps_first_good_floor_point() {
        let container = Container::new(10000, 9990, 1000);
        let rail = ItemBox::new("rail", 10, 10, 10);
        let slab = ItemBox::new("slab", 9950, 2000, 10);

        // (10, 0, 0) leaves a 40 mm strip along x but still scores -98990.
        let mut eager = PackerEngine::new(&container, Config::default());
        eager.add_item(&rail).unwrap();
        let placed = eager.add_item(&slab).unwrap();
        assert_eq!(*placed.position(), Point3::new(10, 0, 0));

        // Scanning on reaches (0, 10, 0) at -198000.
        let config = Config::default().with_early_exit_score(f64::NEG_INFINITY);
        let mut full = PackerEngine::new(&container, config);
        full.add_item(&rail).unwrap();
        let placed = full.add_item(&slab).unwrap();
        assert_eq!(*placed.position(), Point3::new(0, 10, 0));
        assert_eq!(placed.dimensions(), &Vector3::new(9950, 2000, 10));
    }

    #[test]
    fn test_initial_frontier_is_origin() {
        let engine = engine(100, 100, 100);
        assert_eq!(engine.frontier(), &[Point3::origin()]);
        assert!(engine.is_empty());
        assert_eq!(engine.occupied_volume(), 0);
    }

    #[test]
    fn test_single_box_at_origin() {
        let mut engine = engine(100, 100, 100);
        let placement = engine.add_item(&ItemBox::new("B1", 20, 20, 20)).unwrap();
        assert_eq!(*placement.position(), Point3::origin());

        let mut frontier = engine.frontier().to_vec();
        frontier.sort_by_key(|p| (p.z, p.y, p.x));
        assert_eq!(
            frontier,
            vec![
                Point3::new(20, 0, 0),
                Point3::new(0, 20, 0),
                Point3::new(0, 0, 20)
            ]
        );
        assert_eq!(engine.occupied_volume(), 8000);
    }

    #[test]
    fn test_two_cubes_share_the_floor() {
        let mut engine = engine(1000, 1000, 1000);
        let cube = ItemBox::new("C", 500, 500, 500);
        engine.add_item(&cube).unwrap();
        engine.add_item(&cube).unwrap();

        let positions: Vec<_> = engine.placements().iter().map(|p| *p.position()).collect();
        assert_eq!(positions, vec![Point3::new(0, 0, 0), Point3::new(500, 0, 0)]);
    }

    #[test]
    fn test_rejection_leaves_state_untouched() {
        let mut engine = engine(100, 100, 100);
        assert_eq!(
            engine.add_item(&ItemBox::new("long", 200, 50, 50)).unwrap_err(),
            Rejection::ItemUnplaceable
        );
        assert_eq!(engine.frontier(), &[Point3::origin()]);
        assert!(engine.placements().is_empty());

        engine.add_item(&ItemBox::new("B1", 60, 60, 60)).unwrap();
        let frontier = engine.frontier().to_vec();
        let volume = engine.occupied_volume();

        assert!(engine.add_item(&ItemBox::new("B2", 60, 60, 60)).is_err());
        assert_eq!(engine.frontier(), frontier.as_slice());
        assert_eq!(engine.occupied_volume(), volume);
        assert_eq!(engine.placed_count(), 1);
    }

    #[test]
    fn test_container_sized_box_fits_once() {
        let mut engine = engine(100, 80, 60);
        let full = ItemBox::new("full", 100, 80, 60);
        assert!(engine.add_item(&full).is_ok());
        assert!(engine.frontier().is_empty());
        assert!(engine.add_item(&full).is_err());
        assert_eq!(engine.fill_rate(), 1.0);
    }

    #[test]
    fn test_rotation_makes_long_box_fit() {
        let mut engine = engine(100, 100, 30);
        let placement = engine.add_item(&ItemBox::new("tall", 20, 20, 80)).unwrap();
        assert!(placement.item().height() <= 30);
    }

    #[test]
    fn test_score_prefers_large_floor_area() {
        let engine = engine(1000, 1000, 1000);
        let origin = Point3::origin();
        let flat = ItemBox::new("flat", 400, 300, 100);
        let upright = ItemBox::new("upright", 100, 300, 400);
        assert!(engine.score(&origin, &flat) < engine.score(&origin, &upright));
    }

    #[test]
    fn test_thin_gap_penalty() {
        let engine = engine(1000, 1000, 1000);
        let origin = Point3::origin();

        // 970 leaves a 30 mm gap along x: penalised.
        let thin = engine.score(&origin, &ItemBox::new("thin", 970, 100, 100));
        assert_eq!(thin, 100_000.0 - 970.0);

        // A flush fit and a wide gap are not.
        let flush = engine.score(&origin, &ItemBox::new("flush", 1000, 100, 100));
        assert_eq!(flush, -1000.0);
        let wide = engine.score(&origin, &ItemBox::new("wide", 950, 100, 100));
        assert_eq!(wide, -950.0);
    }

    #[test]
    fn test_unsupported_anchor_is_infeasible() {
        let mut engine = engine(1000, 1000, 1000);
        engine.add_item(&ItemBox::new("base", 300, 150, 100)).unwrap();
        assert_eq!(engine.placements()[0].dimensions(), &Vector3::new(300, 150, 100));

        let top = ItemBox::new("top", 300, 300, 100);
        assert!(!engine.can_place(&Point3::new(0, 0, 100), &top));
    }

    #[test]
    fn test_stacking_keeps_layout_valid() {
        let mut engine = engine(300, 300, 300);
        for i in 0..30 {
            let _ = engine.add_item(&ItemBox::new(format!("B{}", i), 100, 100, 100));
        }

        assert_eq!(engine.placed_count(), 27);
        assert_eq!(engine.occupied_volume(), engine.capacity());
        assert!(check_layout(engine.placements(), engine.container(), engine.config()).is_empty());
    }

    #[test]
    fn test_frontier_points_are_open() {
        let mut engine = engine(500, 400, 300);
        for (i, dims) in [(200, 150, 100), (120, 300, 80), (90, 90, 90), (250, 100, 60)]
            .iter()
            .enumerate()
        {
            let _ = engine.add_item(&ItemBox::new(format!("B{}", i), dims.0, dims.1, dims.2));
        }

        for point in engine.frontier() {
            assert!(point.x < 500 && point.y < 400 && point.z < 300);
            assert!(engine
                .placements()
                .iter()
                .all(|p| !p.aabb().contains_point(point)));
        }
    }

    #[test]
    fn test_pack_in_order_reports_rejects() {
        let items = vec![
            ItemBox::new("fits", 50, 50, 50),
            ItemBox::new("huge", 500, 50, 50),
        ];
        let (engine, rejected) = pack_in_order(&items, &Container::new(100, 100, 100), Config::default());
        assert_eq!(engine.placed_count(), 1);
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].length(), 500);
    }
}
