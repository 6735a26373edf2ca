//! A single user data part.

use crate::content_type::ContentType;
use crate::encoding::{Charset, TransferEncoding, classify};
use crate::error::Result;
use crate::header::Headers;
use crate::media_type::MediaType;
use std::io::Write;

/// One body segment of a multipart user data document.
///
/// The charset, the `Content-Transfer-Encoding` header and the stored body
/// are all derived from the raw input in one step, so they always agree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    headers: Headers,
    body: Vec<u8>,
    media_type: MediaType,
    charset: Charset,
    transfer_encoding: TransferEncoding,
}

impl Part {
    /// Creates a part from a media type and a raw body.
    ///
    /// ASCII bodies are kept as-is (`7bit`, `us-ascii`); any other body is
    /// base64-encoded (`base64`, `utf-8`).
    #[must_use]
    pub fn new(media_type: impl Into<MediaType>, body: impl Into<Vec<u8>>) -> Self {
        let mut part = Self {
            headers: Headers::new(),
            body: Vec::new(),
            media_type: MediaType::Other(String::new()),
            charset: Charset::UsAscii,
            transfer_encoding: TransferEncoding::SevenBit,
        };
        part.set_body(media_type, body);
        part
    }

    /// Replaces the media type and body, recomputing headers and encoding.
    pub fn set_body(&mut self, media_type: impl Into<MediaType>, body: impl Into<Vec<u8>>) {
        let media_type = media_type.into();
        let body = body.into();
        let raw_len = body.len();

        let (charset, transfer_encoding) = classify(&body);
        let content_type =
            ContentType::new(media_type.as_str()).with_parameter("charset", charset.as_str());

        self.headers
            .set("Content-Transfer-Encoding", transfer_encoding.as_str());
        self.headers.set("Content-Type", content_type.to_string());
        self.body = transfer_encoding.encode(body);
        self.media_type = media_type;
        self.charset = charset;
        self.transfer_encoding = transfer_encoding;

        tracing::debug!(
            media_type = %self.media_type,
            %charset,
            encoding = %transfer_encoding,
            raw_len,
            encoded_len = self.body.len(),
            "Part body set"
        );
    }

    /// Returns the media type.
    #[must_use]
    pub const fn media_type(&self) -> &MediaType {
        &self.media_type
    }

    /// Returns the part headers.
    #[must_use]
    pub const fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Returns the stored (possibly base64-encoded) body.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Returns the declared charset.
    #[must_use]
    pub const fn charset(&self) -> Charset {
        self.charset
    }

    /// Returns the transfer encoding applied to the body.
    #[must_use]
    pub const fn transfer_encoding(&self) -> TransferEncoding {
        self.transfer_encoding
    }

    /// Writes headers, a blank line, the body and a trailing CRLF.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `w` fails.
    pub fn render<W: Write + ?Sized>(&self, w: &mut W) -> Result<()> {
        self.headers.render(w)?;
        w.write_all(b"\r\n")?;
        w.write_all(&self.body)?;
        w.write_all(b"\r\n")?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::redundant_clone)]
mod tests {
    use super::*;

    fn rendered(part: &Part) -> String {
        let mut buf = Vec::new();
        part.render(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_part_ascii() {
        let body = "#!/bin/bash\necho 'Hello World'";
        let part = Part::new(MediaType::Shellscript, body);

        assert_eq!(part.charset(), Charset::UsAscii);
        assert_eq!(part.transfer_encoding(), TransferEncoding::SevenBit);
        assert_eq!(part.body(), body.as_bytes());
        assert_eq!(part.headers().get("Content-Transfer-Encoding"), Some("7bit"));
        assert_eq!(
            part.headers().get("Content-Type"),
            Some("text/x-shellscript; charset=us-ascii")
        );
    }

    #[test]
    fn test_part_utf8() {
        let part = Part::new(MediaType::Shellscript, "#!/bin/bash\necho 'こんにちは世界'");

        assert_eq!(part.charset(), Charset::Utf8);
        assert_eq!(part.transfer_encoding(), TransferEncoding::Base64);
        assert_eq!(
            part.body(),
            b"IyEvYmluL2Jhc2gKZWNobyAn44GT44KT44Gr44Gh44Gv5LiW55WMJw=="
        );
        assert_eq!(part.headers().get("Content-Transfer-Encoding"), Some("base64"));
        assert_eq!(
            part.headers().get("Content-Type"),
            Some("text/x-shellscript; charset=utf-8")
        );
    }

    #[test]
    fn test_set_body_recomputes_everything() {
        let mut part = Part::new(MediaType::Shellscript, "echo 'こんにちは'");
        part.set_body(MediaType::CloudConfig, "#cloud-config\ntimezone: Asia/Tokyo");

        assert_eq!(part.media_type(), &MediaType::CloudConfig);
        assert_eq!(part.transfer_encoding(), TransferEncoding::SevenBit);
        assert_eq!(part.body(), b"#cloud-config\ntimezone: Asia/Tokyo");
        assert_eq!(part.headers().get_all("Content-Type").len(), 1);
        assert_eq!(
            part.headers().get("Content-Type"),
            Some("text/cloud-config; charset=us-ascii")
        );
    }

    #[test]
    fn test_unrecognized_media_type() {
        let part = Part::new("application/x-custom", "data");
        assert_eq!(part.media_type().as_str(), "application/x-custom");
        assert_eq!(
            part.headers().get("Content-Type"),
            Some("application/x-custom; charset=us-ascii")
        );
    }

    #[test]
    fn test_render_ascii() {
        let part = Part::new(MediaType::CloudConfig, "#cloud-config\ntimezone: Europe/London");
        assert_eq!(
            rendered(&part),
            "Content-Transfer-Encoding: 7bit\r\n\
             Content-Type: text/cloud-config; charset=us-ascii\r\n\
             \r\n\
             #cloud-config\ntimezone: Europe/London\r\n"
        );
    }

    #[test]
    fn test_render_base64() {
        let part = Part::new(MediaType::Shellscript, "#!/bin/bash\necho 'こんにちは世界'");
        assert_eq!(
            rendered(&part),
            "Content-Transfer-Encoding: base64\r\n\
             Content-Type: text/x-shellscript; charset=utf-8\r\n\
             \r\n\
             IyEvYmluL2Jhc2gKZWNobyAn44GT44KT44Gr44Gh44Gv5LiW55WMJw==\r\n"
        );
    }

    #[test]
    fn test_render_empty_body() {
        let part = Part::new(MediaType::IncludeUrl, Vec::new());
        assert!(rendered(&part).ends_with("charset=us-ascii\r\n\r\n\r\n"));
    }
}
