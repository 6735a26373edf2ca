//! Multipart user data documents.

use crate::boundary::Boundary;
use crate::content_type::ContentType;
use crate::error::Result;
use crate::header::Headers;
use crate::media_type::MediaType;
use crate::part::Part;
use std::io::Write;

/// Value of the document's `Mime-Version` header.
const MIME_VERSION: &str = "1.0";

/// A `multipart/mixed` user data document.
///
/// Parts render in the order they were added. Rendering does not consume or
/// modify the document, and the same state always renders to the same bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Multipart {
    headers: Headers,
    parts: Vec<Part>,
    boundary: Boundary,
}

impl Multipart {
    /// Creates an empty document with the default boundary.
    #[must_use]
    pub fn new() -> Self {
        Self::from_boundary(Boundary::default())
    }

    /// Creates an empty document with an explicit boundary.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBoundary`](crate::Error::InvalidBoundary) if
    /// the token does not satisfy the boundary grammar.
    pub fn with_boundary(boundary: impl Into<String>) -> Result<Self> {
        Ok(Self::from_boundary(Boundary::new(boundary)?))
    }

    fn from_boundary(boundary: Boundary) -> Self {
        let mut headers = Headers::new();
        headers.set(
            "Content-Type",
            ContentType::multipart_mixed(boundary.as_str()).to_string(),
        );
        headers.set("Mime-Version", MIME_VERSION);

        Self {
            headers,
            parts: Vec::new(),
            boundary,
        }
    }

    /// Returns the current boundary token.
    #[must_use]
    pub fn boundary(&self) -> &str {
        self.boundary.as_str()
    }

    /// Replaces the boundary and updates the `Content-Type` header.
    ///
    /// On error the document is left exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBoundary`](crate::Error::InvalidBoundary) if
    /// the token does not satisfy the boundary grammar.
    pub fn set_boundary(&mut self, boundary: impl Into<String>) -> Result<()> {
        let boundary = Boundary::new(boundary).inspect_err(|e| {
            tracing::warn!(error = %e, "Rejected boundary");
        })?;

        self.headers.set(
            "Content-Type",
            ContentType::multipart_mixed(boundary.as_str()).to_string(),
        );
        tracing::debug!(old = %self.boundary, new = %boundary, "Boundary changed");
        self.boundary = boundary;

        Ok(())
    }

    /// Returns the document headers.
    #[must_use]
    pub const fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Returns the parts in render order.
    #[must_use]
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Returns the number of parts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Returns true if the document has no parts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Builds a part from a media type and raw body and appends it.
    pub fn add_part(&mut self, media_type: impl Into<MediaType>, body: impl Into<Vec<u8>>) {
        self.append_part(Part::new(media_type, body));
    }

    /// Appends an already built part.
    pub fn append_part(&mut self, part: Part) {
        self.parts.push(part);
    }

    /// Writes the complete document.
    ///
    /// The output is the document headers, a blank line, each part framed by
    /// `--boundary` and followed by a blank line, then `--boundary--`.
    ///
    /// # Errors
    ///
    /// Returns an error as soon as a write to `w` fails. Whatever was written
    /// before the failure is incomplete and should be discarded.
    pub fn render<W: Write + ?Sized>(&self, w: &mut W) -> Result<()> {
        self.headers.render(w)?;
        w.write_all(b"\r\n")?;

        let delimiter = self.boundary.delimiter();
        for part in &self.parts {
            write!(w, "{delimiter}\r\n")?;
            part.render(w)?;
            w.write_all(b"\r\n")?;
        }

        write!(w, "{}\r\n", self.boundary.close_delimiter())?;

        tracing::trace!(parts = self.parts.len(), boundary = %self.boundary, "Rendered document");
        Ok(())
    }

    /// Renders the document into a new buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.render(&mut buf)?;
        Ok(buf)
    }
}

impl Default for Multipart {
    fn default() -> Self {
        Self::new()
    }
}
