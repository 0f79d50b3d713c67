//! Error types for geometric queries.

use thiserror::Error;

use crate::vector::Vector3;

/// Errors raised by the few geometric operations that are not total.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A direction was requested between two points that coincide.
    #[error("no direction between coincident points at {0}")]
    CoincidentPoints(Vector3),
}

/// Result type for geometric operations.
pub type Result<T> = std::result::Result<T, GeometryError>;
