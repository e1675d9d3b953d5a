//! Error types for loadplan.
//!
//! Two layers are kept apart:
//!
//! - [`Error`] reports caller mistakes (bad extents, bad configuration) and is
//!   returned before any packing starts.
//! - [`Rejection`] is the non-fatal outcome of a single placement attempt. It
//!   is returned by `add_item` style calls and recorded in result lists; a run
//!   never aborts because of one.

use std::fmt;

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Result type alias for loadplan operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when setting up a packing run.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid item geometry provided.
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Invalid container provided.
    #[error("Invalid boundary: {0}")]
    InvalidBoundary(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Serialization error.
    #[cfg(feature = "serde")]
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SerializationError(err.to_string())
    }
}

/// The capacity that ran out when a placement was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Capacity {
    /// No feasible anchor point and orientation was left.
    Space,
    /// The weight limit would have been exceeded.
    Weight,
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capacity::Space => f.write_str("space"),
            Capacity::Weight => f.write_str("weight"),
        }
    }
}

/// Why a single item or bundle could not be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Rejection {
    /// No candidate point and orientation combination is feasible.
    #[error("no feasible anchor point and orientation")]
    ItemUnplaceable,

    /// A bundle's weight or space limit was reached.
    #[error("bundle {0} capacity exceeded")]
    BundleCapacityExceeded(Capacity),

    /// A bundle could not be loaded into the outer container.
    #[error("container {0} capacity exceeded")]
    ContainerOverflow(Capacity),

    /// The item failed validation and was never attempted.
    #[error("item has invalid extents or weight")]
    InvalidItem,
}
