//! MIME content type formatting.

use std::collections::BTreeMap;
use std::fmt;

/// Characters that force a parameter value to be quoted (RFC 2045 tspecials).
const TSPECIALS: &str = "()<>@,;:\\\"/[]?=";

/// MIME content type with parameters.
///
/// Formats the way a standard media-type formatter does: the type is
/// lower-cased, parameters follow in name order, and each value is written as
/// a bare token when possible, a quoted-string otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentType {
    media_type: String,
    parameters: BTreeMap<String, String>,
}

impl ContentType {
    /// Creates a new content type without parameters.
    #[must_use]
    pub fn new(media_type: impl AsRef<str>) -> Self {
        Self {
            media_type: media_type.as_ref().to_ascii_lowercase(),
            parameters: BTreeMap::new(),
        }
    }

    /// Creates a multipart/mixed content type with boundary.
    #[must_use]
    pub fn multipart_mixed(boundary: impl Into<String>) -> Self {
        Self::new("multipart/mixed").with_parameter("boundary", boundary)
    }

    /// Adds a parameter. Parameter names are case-insensitive.
    #[must_use]
    pub fn with_parameter(mut self, key: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.parameters
            .insert(key.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    /// Returns the `type/subtype` part.
    #[must_use]
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// Returns a parameter value if present.
    #[must_use]
    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.parameters
            .get(&key.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Returns the charset parameter if present.
    #[must_use]
    pub fn charset(&self) -> Option<&str> {
        self.parameter("charset")
    }

    /// Returns the boundary parameter if present.
    #[must_use]
    pub fn boundary(&self) -> Option<&str> {
        self.parameter("boundary")
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.media_type)?;

        for (key, value) in &self.parameters {
            if !value.is_ascii() {
                // RFC 2231 extended notation
                write!(f, "; {key}*=utf-8''")?;
                for byte in value.bytes() {
                    if is_attribute_char(byte) {
                        write!(f, "{}", char::from(byte))?;
                    } else {
                        write!(f, "%{byte:02X}")?;
                    }
                }
            } else if is_token(value) {
                write!(f, "; {key}={value}")?;
            } else {
                write!(f, "; {key}=\"")?;
                for c in value.chars() {
                    if c == '"' || c == '\\' {
                        f.write_str("\\")?;
                    }
                    write!(f, "{c}")?;
                }
                f.write_str("\"")?;
            }
        }

        Ok(())
    }
}

fn is_token(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(is_token_char)
}

fn is_token_char(byte: u8) -> bool {
    byte > b' ' && byte < 0x7F && !TSPECIALS.as_bytes().contains(&byte)
}

fn is_attribute_char(byte: u8) -> bool {
    is_token_char(byte) && !matches!(byte, b'*' | b'\'' | b'%')
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_new() {
        let ct = ContentType::new("Text/X-Shellscript");
        assert_eq!(ct.media_type(), "text/x-shellscript");
        assert_eq!(ct.to_string(), "text/x-shellscript");
        assert!(ct.charset().is_none());
    }

    #[test]
    fn test_charset_parameter() {
        let ct = ContentType::new("text/cloud-config").with_parameter("Charset", "us-ascii");
        assert_eq!(ct.charset(), Some("us-ascii"));
        assert_eq!(ct.to_string(), "text/cloud-config; charset=us-ascii");
    }

    #[test]
    fn test_multipart_boundary_quoted() {
        let ct = ContentType::multipart_mixed("+Go+User+Data+Boundary==");
        assert_eq!(ct.boundary(), Some("+Go+User+Data+Boundary=="));
        assert_eq!(
            ct.to_string(),
            "multipart/mixed; boundary=\"+Go+User+Data+Boundary==\""
        );
    }

    #[test]
    fn test_multipart_boundary_bare() {
        let ct = ContentType::multipart_mixed("+Custom+User+Data+Boundary+");
        assert_eq!(
            ct.to_string(),
            "multipart/mixed; boundary=+Custom+User+Data+Boundary+"
        );
    }

    #[test]
    fn test_boundary_with_spaces_quoted() {
        let ct = ContentType::multipart_mixed(" Go User Data Boundary==");
        assert_eq!(
            ct.to_string(),
            "multipart/mixed; boundary=\" Go User Data Boundary==\""
        );
    }

    #[test]
    fn test_quoted_string_escapes() {
        let ct = ContentType::new("text/plain").with_parameter("name", "a\"b\\c");
        assert_eq!(ct.to_string(), "text/plain; name=\"a\\\"b\\\\c\"");
    }

    #[test]
    fn test_empty_value_quoted() {
        let ct = ContentType::new("text/plain").with_parameter("name", "");
        assert_eq!(ct.to_string(), "text/plain; name=\"\"");
    }

    #[test]
    fn test_non_ascii_value_extended() {
        let ct = ContentType::new("text/plain").with_parameter("name", "día 1");
        assert_eq!(ct.to_string(), "text/plain; name*=utf-8''d%C3%ADa%201");
    }

    #[test]
    fn test_parameters_in_name_order() {
        let ct = ContentType::new("text/plain")
            .with_parameter("format", "flowed")
            .with_parameter("charset", "utf-8");
        assert_eq!(ct.to_string(), "text/plain; charset=utf-8; format=flowed");
    }
}
