//! Error types for the similarity engine

use thiserror::Error;

/// Errors raised while resolving options or preparing inputs.
///
/// Every failure happens before any scoring work begins; the numeric
/// algorithm bodies never fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimilarityError {
    /// An argument or option value was rejected
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl SimilarityError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        SimilarityError::InvalidArgument(msg.into())
    }

    /// Returns true for [`SimilarityError::InvalidArgument`]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, SimilarityError::InvalidArgument(_))
    }
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, SimilarityError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_display() {
        let err = SimilarityError::invalid("granularity 'paragraph'");
        assert!(err.is_invalid_argument());
        assert_eq!(err.to_string(), "Invalid argument: granularity 'paragraph'");
    }
}
