//! Error types for sampling and camera operations.
//!
//! Every precondition failure is reported through [`WarpError`] and returned
//! to the caller immediately; no operation produces a partial result.

use thiserror::Error;

/// Main error type for depthwarp operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WarpError {
    /// Rank or dimension mismatch among inputs.
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Non floating point input where a float tensor is required.
    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    /// Argument outside its valid domain.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type for depthwarp operations.
pub type Result<T> = std::result::Result<T, WarpError>;

impl WarpError {
    /// Create a shape mismatch error.
    pub fn shape_mismatch(msg: impl Into<String>) -> Self {
        Self::ShapeMismatch(msg.into())
    }

    /// Create a type mismatch error.
    pub fn type_mismatch(msg: impl Into<String>) -> Self {
        Self::TypeMismatch(msg.into())
    }

    /// Create an invalid argument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = WarpError::shape_mismatch("grid must have 2 channels");
        assert!(matches!(err, WarpError::ShapeMismatch(_)));

        let err = WarpError::type_mismatch("x is Int");
        assert!(matches!(err, WarpError::TypeMismatch(_)));
    }

    #[test]
    fn test_error_display() {
        let err = WarpError::invalid_argument("max_scale < min_scale");
        assert_eq!(err.to_string(), "Invalid argument: max_scale < min_scale");
    }
}
