//! Error types for asset loading and boundary validation.

use thiserror::Error;

/// Errors surfaced while loading or validating element/rule registries,
/// or while servicing a boundary request such as a placement.
#[derive(Debug, Error)]
pub enum TerraspielError {
    /// An element or rule asset was malformed or missing required fields.
    #[error("invalid asset: {0}")]
    InvalidAsset(String),

    /// A rule or placement referenced an element name not in the registry.
    #[error("unknown element: {0}")]
    UnknownElement(String),

    /// An internal consistency check failed; this indicates a defect in a
    /// behaviour or pass rather than bad input.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

pub type Result<T> = std::result::Result<T, TerraspielError>;
