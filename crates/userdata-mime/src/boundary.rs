//! Multipart boundary tokens.

use crate::error::{Error, Result};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// RFC 2046 boundary grammar: 1 to 70 `bchars`, not ending in a space.
#[allow(clippy::unwrap_used)] // Literal pattern, covered by tests
static BOUNDARY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9A-Za-z'()+_,\-./:=? ]{0,69}[0-9A-Za-z'()+_,\-./:=?]$").unwrap()
});

/// Validated multipart boundary token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Boundary(String);

impl Boundary {
    /// Boundary used when none is supplied.
    pub const DEFAULT: &'static str = "+Go+User+Data+Boundary==";

    /// Creates a boundary from a string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBoundary`] if the token is empty, longer than
    /// 70 characters, ends with a space, or contains a character outside the
    /// RFC 2046 `bchars` set.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if Self::is_valid(&token) {
            Ok(Self(token))
        } else {
            Err(Error::InvalidBoundary(token))
        }
    }

    /// Checks a token against the boundary grammar.
    #[must_use]
    pub fn is_valid(token: &str) -> bool {
        BOUNDARY_RE.is_match(token)
    }

    /// Returns the token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the line that opens each part (`--boundary`).
    #[must_use]
    pub fn delimiter(&self) -> String {
        format!("--{}", self.0)
    }

    /// Returns the line that closes the document (`--boundary--`).
    #[must_use]
    pub fn close_delimiter(&self) -> String {
        format!("--{}--", self.0)
    }
}

impl Default for Boundary {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Boundary {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Boundary::is_valid(Boundary::DEFAULT));
        assert_eq!(Boundary::default().as_str(), "+Go+User+Data+Boundary==");
    }

    #[test]
    fn test_all_allowed_characters() {
        assert!(Boundary::new("0-9a-zA-Z'()+_,-./:=?").is_ok());
    }

    #[test]
    fn test_inner_spaces_allowed() {
        assert!(Boundary::new(" Go User Data Boundary==").is_ok());
    }

    #[test]
    fn test_empty_rejected() {
        assert!(Boundary::new("").unwrap_err().is_invalid_boundary());
    }

    #[test]
    fn test_trailing_space_rejected() {
        assert!(Boundary::new("+Go+User+Data+Boundary ").is_err());
        assert!(Boundary::new(" ").is_err());
    }

    #[test]
    fn test_length_limit() {
        assert!(Boundary::new("a".repeat(70)).is_ok());
        assert!(Boundary::new("a".repeat(71)).is_err());
        assert!(
            Boundary::new(
                "+Go+User+Data+Boundary==+Go+User+Data+Boundary==+Go+User+Data+Boundary=="
            )
            .is_err()
        );
    }

    #[test]
    fn test_invalid_character_rejected() {
        assert!(Boundary::new("!Go+User+Data+Boundary==").is_err());
        assert!(Boundary::new("Go\r\nUser").is_err());
        assert!(Boundary::new("Grüße").is_err());
    }

    #[test]
    fn test_delimiters() {
        let b = Boundary::new("abc").unwrap();
        assert_eq!(b.delimiter(), "--abc");
        assert_eq!(b.close_delimiter(), "--abc--");
    }

    proptest! {
        #[test]
        fn prop_grammar_accepts_bchars(token in "[0-9A-Za-z'()+_,./:=? -]{0,69}[0-9A-Za-z'()+_,./:=?-]") {
            prop_assert!(Boundary::is_valid(&token));
        }

        #[test]
        fn prop_trailing_space_rejected(token in "[0-9A-Za-z]{0,69}") {
            let with_space = format!("{token} ");
            prop_assert!(!Boundary::is_valid(&with_space));
        }
    }
}
