//! # loadplan
//!
//! Deterministic two-phase 3D load planning.
//!
//! This crate provides:
//! - **Bundle packing**: parcels are palletized into standard bundle tiers
//! - **Vehicle loading**: bundles are loaded into a vehicle body
//!
//! Both phases use the same extreme-point placement engine with structural
//! support checks.
//!
//! ## Quick Start
//!
//! ```rust
//! use loadplan::{Container, ItemBox, Solver, TwoPhasePacker, VehicleClass};
//!
//! let parcels = vec![
//!     ItemBox::new("P1", 220, 150, 50).with_weight(0.8),
//!     ItemBox::new("P2", 600, 500, 350).with_weight(30.0),
//! ];
//! let truck = Container::vehicle(VehicleClass::InterDistrict);
//!
//! let outcome = TwoPhasePacker::default().solve(&parcels, &truck).unwrap();
//! for bundle in outcome.bundle_summaries() {
//!     println!("{} {}: {:.0}% full", bundle.kind, bundle.id, bundle.fill_rate * 100.0);
//! }
//! println!("volume used: {}", outcome.metrics.volume_percent());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Serialization support and JSON configuration loading

/// Core traits, configuration and metrics.
pub use loadplan_core as core;

/// Packing engine, bundles and the two-phase solver.
pub use loadplan_engine as engine;

// Re-export commonly used types at root level
pub use loadplan_core::{Config, EfficiencyMetrics, Error, Rejection, Result, SolveSummary, Solver};
pub use loadplan_engine::{
    Container, ItemBox, PackingOutcome, Placement, TierKind, TierTable, TwoPhasePacker,
    VehicleClass,
};
