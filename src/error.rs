//! Error types for the hydrotools library.

use thiserror::Error;

/// Result type alias for metric operations.
pub type Result<T> = std::result::Result<T, MetricsError>;

/// Errors that can occur while evaluating metrics or converting units.
///
/// Numeric degeneracy (zero denominators, NaN inputs) is never reported
/// here; those cases surface as NaN in the returned value.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetricsError {
    /// Input is not exactly one-dimensional.
    #[error("expected a one-dimensional input, got shape {shape:?}")]
    Shape { shape: Vec<usize> },

    /// Paired inputs have different shapes.
    #[error("shape mismatch: {left:?} vs {right:?}")]
    ShapeMismatch { left: Vec<usize>, right: Vec<usize> },

    /// Requested contingency-table label is absent from the mapping.
    #[error("missing key: {0}")]
    MissingKey(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Unit symbol not present in the registry.
    #[error("unknown unit: {0}")]
    UnknownUnit(String),

    /// Units describe different physical dimensions.
    #[error("cannot convert from '{from}' to '{to}'")]
    IncompatibleUnits { from: String, to: String },
}
