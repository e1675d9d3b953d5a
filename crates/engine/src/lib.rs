//! # loadplan engine
//!
//! Extreme-point 3D bin packing and two-phase load planning.
//!
//! Items are first palletized into standard bundle tiers (Phase 1), each
//! bundle packed by its own [`PackerEngine`]. Bundles are then summarised as
//! boxes and loaded into a vehicle container by a container-level engine
//! (Phase 2).
//!
//! ## Quick Start
//!
//! ```rust
//! use loadplan_engine::{Container, ItemBox, Solver, TwoPhasePacker, VehicleClass};
//!
//! let items = vec![
//!     ItemBox::new("P1", 300, 200, 150).with_weight(2.5),
//!     ItemBox::new("P2", 400, 300, 200).with_weight(8.0),
//! ];
//! let truck = Container::vehicle(VehicleClass::Collection);
//!
//! let outcome = TwoPhasePacker::default().solve(&items, &truck).unwrap();
//! assert_eq!(outcome.summary().packed_items, 2);
//! ```

pub mod boundary;
pub mod bundle;
pub mod extreme_point;
pub mod geometry;
pub mod loading;
pub mod packer;
pub mod palletize;
pub mod placement;
pub mod support;
pub mod tiers;

// Re-exports
pub use boundary::{Container, VehicleClass};
pub use bundle::{Bundle, BundleKind, BundleSummary};
pub use extreme_point::{pack_in_order, PackerEngine};
pub use geometry::ItemBox;
pub use loading::{load_bundles, FailedBundle, LoadOutcome, LoadedBundle};
pub use packer::{PackingOutcome, TwoPhasePacker};
pub use palletize::{PalletizeOutcome, Palletizer, UnpackedItem};
pub use placement::Placement;
pub use support::{check_layout, support_ratio, LayoutViolation};
pub use tiers::{SizeClass, SizeCode, TierFit, TierKind, TierSpec, TierTable};
pub use loadplan_core::{
    Capacity, Config, EfficiencyMetrics, Error, Rejection, Result, SolveSummary, Solver,
};
