//! Error types for test plan item validation

use thiserror::Error;

/// Result type alias for tpi operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for tpi operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Test plan item rejected by the parser
    #[error(transparent)]
    TestPlan(#[from] ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Reasons a test plan item body is rejected.
///
/// The display strings are posted verbatim on the offending issue, so they
/// are phrased for the issue author rather than for a log.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No horizontal rule separates the header from the description
    #[error("Test plan item should have header")]
    MissingHeader,

    /// Complexity field outside `1..=5`
    #[error("Test plan item complexity should be between 1 to 5")]
    ComplexityOutOfRange(u8),

    /// Header has no recognized platform checkbox
    #[error("Test plan item should have assignments")]
    NoAssignments,

    /// A checkbox names something that is not a known platform
    #[error("Test plan item has invalid assignments - {0}")]
    InvalidAssignment(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_messages() {
        assert_eq!(
            ParseError::MissingHeader.to_string(),
            "Test plan item should have header"
        );
        assert_eq!(
            ParseError::ComplexityOutOfRange(7).to_string(),
            "Test plan item complexity should be between 1 to 5"
        );
        assert_eq!(
            ParseError::InvalidAssignment("[x] solaris".to_string()).to_string(),
            "Test plan item has invalid assignments - [x] solaris"
        );
    }

    #[test]
    fn test_parse_error_is_transparent() {
        let err: Error = ParseError::NoAssignments.into();
        assert_eq!(err.to_string(), "Test plan item should have assignments");
    }
}
