//! Body charset and transfer-encoding selection.
//!
//! A body made only of 7-bit ASCII travels unchanged as `7bit`/`us-ascii`.
//! Anything else is treated as UTF-8 and carried as unwrapped `base64`.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fmt;

/// Character set declared on a part's `Content-Type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Charset {
    /// 7-bit ASCII.
    UsAscii,
    /// UTF-8.
    Utf8,
}

impl Charset {
    /// Returns the charset label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UsAscii => "us-ascii",
            Self::Utf8 => "utf-8",
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transfer encodings produced for user data parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransferEncoding {
    /// 7-bit ASCII, body unchanged.
    SevenBit,
    /// Base64 encoding.
    Base64,
}

impl TransferEncoding {
    /// Returns the `Content-Transfer-Encoding` value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SevenBit => "7bit",
            Self::Base64 => "base64",
        }
    }

    /// Applies this encoding to a raw body.
    #[must_use]
    pub fn encode(self, body: Vec<u8>) -> Vec<u8> {
        match self {
            Self::SevenBit => body,
            Self::Base64 => encode_base64(&body).into_bytes(),
        }
    }
}

impl fmt::Display for TransferEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Picks the charset and transfer encoding for a raw body.
#[must_use]
pub fn classify(body: &[u8]) -> (Charset, TransferEncoding) {
    if body.is_ascii() {
        (Charset::UsAscii, TransferEncoding::SevenBit)
    } else {
        (Charset::Utf8, TransferEncoding::Base64)
    }
}

/// Encodes data as Base64 (standard alphabet, padded, no line wrapping).
#[must_use]
pub fn encode_base64(data: &[u8]) -> String {
    STANDARD.encode(data)
}
