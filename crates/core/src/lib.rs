//! # loadplan core
//!
//! Core traits and value types for the loadplan packing engine.
//!
//! This crate holds what the packing engine and its callers share: the error
//! taxonomy, the `Geometry`/`Boundary`/`Solver` traits, the tunable heuristic
//! configuration, integer bounding boxes and result metrics.
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support and JSON
//!   configuration loading

pub mod aabb;
pub mod error;
pub mod geometry;
pub mod result;
pub mod solver;

// Re-exports
pub use aabb::Aabb3;
pub use error::{Capacity, Error, Rejection, Result};
pub use geometry::{Boundary, Coord, Geometry, GeometryId};
pub use result::{EfficiencyMetrics, SolveSummary};
pub use solver::{Config, Solver};
