//! MIME header handling.

use crate::error::Result;
use std::collections::HashMap;
use std::fmt;
use std::io::Write;

/// Collection of MIME header fields.
///
/// Field names are case-insensitive and stored in canonical form
/// (`content-type` becomes `Content-Type`). A field may carry several values.
///
/// Rendering is deterministic: fields are emitted in name order and, within a
/// field, in value order, so the output depends only on the set of
/// `(name, value)` pairs and never on the sequence of `set`/`add` calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    headers: HashMap<String, Vec<String>>,
}

impl Headers {
    /// Creates a new empty header collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a header value.
    pub fn add(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        let name = canonical_name(name.as_ref());
        self.headers.entry(name).or_default().push(value.into());
    }

    /// Sets a header value, replacing any existing values.
    pub fn set(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        let name = canonical_name(name.as_ref());
        self.headers.insert(name, vec![value.into()]);
    }

    /// Gets the first value for a header.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&canonical_name(name))
            .and_then(|v| v.first().map(String::as_str))
    }

    /// Gets all values for a header, in insertion order.
    #[must_use]
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.headers
            .get(&canonical_name(name))
            .map(|v| v.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Returns true if the header is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.headers.contains_key(&canonical_name(name))
    }

    /// Removes all values for a header.
    pub fn remove(&mut self, name: &str) {
        self.headers.remove(&canonical_name(name));
    }

    /// Returns the number of distinct field names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    /// Returns true if no fields are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Returns an iterator over all `(name, value)` pairs in render order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        let mut names: Vec<&String> = self.headers.keys().collect();
        names.sort();

        names.into_iter().flat_map(move |name| {
            let mut values: Vec<&str> = self.headers[name].iter().map(String::as_str).collect();
            values.sort_unstable();
            values.into_iter().map(move |v| (name.as_str(), v))
        })
    }

    /// Writes every field as a `Name: Value\r\n` line.
    ///
    /// Names and values are written verbatim; no folding or escaping is done.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `w` fails.
    pub fn render<W: Write + ?Sized>(&self, w: &mut W) -> Result<()> {
        for (name, value) in self.iter() {
            write!(w, "{name}: {value}\r\n")?;
        }

        Ok(())
    }
}

impl fmt::Display for Headers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in self.iter() {
            write!(f, "{name}: {value}\r\n")?;
        }

        Ok(())
    }
}

/// Returns the canonical form of a header field name.
///
/// The first letter and any letter following a hyphen are upper-cased, the
/// rest lower-cased. Names containing characters outside the header token set
/// are returned unchanged.
fn canonical_name(name: &str) -> String {
    if !name.bytes().all(is_token_byte) {
        return name.to_string();
    }

    let mut upper = true;
    name.chars()
        .map(|c| {
            let out = if upper {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            };
            upper = c == '-';
            out
        })
        .collect()
}

const fn is_token_byte(b: u8) -> bool {
    matches!(b,
        b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*' | b'+' | b'-' | b'.'
        | b'^' | b'_' | b'`' | b'|' | b'~'
        | b'0'..=b'9' | b'a'..=b'z' | b'A'..=b'Z')
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::redundant_clone,
    clippy::needless_collect
)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rendered(headers: &Headers) -> String {
        let mut buf = Vec::new();
        headers.render(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_headers_new() {
        let headers = Headers::new();
        assert!(headers.is_empty());
        assert_eq!(rendered(&headers), "");
    }

    #[test]
    fn test_headers_add_get() {
        let mut headers = Headers::new();
        headers.add("Content-Type", "text/plain");
        assert_eq!(headers.get("Content-Type"), Some("text/plain"));
        assert_eq!(headers.get("content-type"), Some("text/plain")); // Case insensitive
        assert_eq!(headers.get("Missing"), None);
    }

    #[test]
    fn test_headers_set() {
        let mut headers = Headers::new();
        headers.add("Key", "a");
        headers.add("key", "b");
        assert_eq!(headers.get_all("KEY"), vec!["a", "b"]);

        headers.set("Key", "c");
        assert_eq!(headers.get_all("Key"), vec!["c"]);
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn test_headers_remove() {
        let mut headers = Headers::new();
        headers.add("Subject", "Test");
        assert!(headers.contains("subject"));

        headers.remove("SUBJECT");
        assert!(!headers.contains("Subject"));
        assert!(headers.get_all("Subject").is_empty());
    }

    #[test]
    fn test_canonical_name() {
        assert_eq!(canonical_name("content-transfer-encoding"), "Content-Transfer-Encoding");
        assert_eq!(canonical_name("MIME-VERSION"), "Mime-Version");
        assert_eq!(canonical_name("x-y"), "X-Y");
        // Not a token, kept verbatim
        assert_eq!(canonical_name("bad name"), "bad name");
    }

    #[test]
    fn test_render_sorted_by_name() {
        let mut headers = Headers::new();
        headers.set("Key3", "Value3");
        headers.set("Key1", "Value1");
        headers.set("Key2", "Value2");

        assert_eq!(
            rendered(&headers),
            "Key1: Value1\r\nKey2: Value2\r\nKey3: Value3\r\n"
        );
    }

    #[test]
    fn test_render_sorted_by_value() {
        let mut headers = Headers::new();
        headers.add("Key1", "Value1");
        headers.add("Key2", "B");
        headers.add("Key2", "A");

        assert_eq!(rendered(&headers), "Key1: Value1\r\nKey2: A\r\nKey2: B\r\n");
        // Rendering does not reorder the stored values.
        assert_eq!(headers.get_all("Key2"), vec!["B", "A"]);
    }

    #[test]
    fn test_display_matches_render() {
        let mut headers = Headers::new();
        headers.set("Mime-Version", "1.0");
        headers.set("Content-Type", "multipart/mixed");

        assert_eq!(headers.to_string(), rendered(&headers));
    }

    #[test]
    fn test_value_written_verbatim() {
        let mut headers = Headers::new();
        headers.set("X-Raw", "a\tb;c=\"d\"");
        assert_eq!(rendered(&headers), "X-Raw: a\tb;c=\"d\"\r\n");
    }

    proptest! {
        #[test]
        fn prop_render_ignores_insertion_order(
            pairs in prop::collection::vec(("[A-Za-z][A-Za-z0-9-]{0,8}", "[ -~]{0,16}"), 0..12)
        ) {
            let mut forward = Headers::new();
            for (name, value) in &pairs {
                forward.add(name, value.clone());
            }

            let mut backward = Headers::new();
            for (name, value) in pairs.iter().rev() {
                backward.add(name, value.clone());
            }

            prop_assert_eq!(rendered(&forward), rendered(&backward));
        }
    }
}
