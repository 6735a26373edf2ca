//! Error types for user data construction.

use std::io;

/// Result type alias for user data operations.
pub type Result<T> = std::result::Result<T, Error>;

/// User data error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Boundary token does not satisfy the RFC 2046 boundary grammar.
    #[error("invalid boundary: {0:?}")]
    InvalidBoundary(String),

    /// Writing to the output sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Returns true if this error was caused by a rejected boundary token.
    #[must_use]
    pub const fn is_invalid_boundary(&self) -> bool {
        matches!(self, Self::InvalidBoundary(_))
    }

    /// Returns true if this error came from the output sink.
    #[must_use]
    pub const fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_boundary_display() {
        let err = Error::InvalidBoundary("bad boundary ".into());
        assert_eq!(err.to_string(), "invalid boundary: \"bad boundary \"");
        assert!(err.is_invalid_boundary());
        assert!(!err.is_io());
    }

    #[test]
    fn test_io_from() {
        let err: Error = io::Error::new(io::ErrorKind::BrokenPipe, "closed").into();
        assert!(err.is_io());
        assert!(!err.is_invalid_boundary());
        assert_eq!(err.to_string(), "I/O error: closed");
    }
}
