//! # userdata-mime
//!
//! Builds cloud-init user data as a MIME `multipart/mixed` document.
//!
//! ## Features
//!
//! - **Deterministic output**: headers render sorted by name then value, parts
//!   render in append order, nothing depends on the clock
//! - **Automatic encoding**: ASCII bodies go out as `7bit`/`us-ascii`, anything
//!   else as unwrapped `base64`/`utf-8`
//! - **Validated boundaries**: RFC 2046 boundary grammar, checked before any
//!   state changes
//! - **Media types**: constants for every part type cloud-init understands
//!
//! ## Quick Start
//!
//! ```
//! use userdata_mime::{MediaType, Multipart};
//!
//! let mut doc = Multipart::new();
//! doc.add_part(MediaType::CloudConfig, "#cloud-config\ntimezone: Europe/London");
//! doc.add_part(MediaType::Shellscript, "#!/bin/bash\necho 'Hello World'");
//!
//! let bytes = doc.to_bytes()?;
//! assert!(bytes.starts_with(b"Content-Type: multipart/mixed; boundary=\"+Go+User+Data+Boundary==\"\r\n"));
//! assert!(bytes.ends_with(b"--+Go+User+Data+Boundary==--\r\n"));
//! # Ok::<(), userdata_mime::Error>(())
//! ```
//!
//! ### Custom Boundaries
//!
//! ```
//! use userdata_mime::Multipart;
//!
//! let mut doc = Multipart::new();
//! doc.set_boundary("+Custom+User+Data+Boundary+")?;
//!
//! // Invalid tokens are rejected and the previous boundary stays in place.
//! assert!(doc.set_boundary("ends with space ").is_err());
//! assert_eq!(doc.boundary(), "+Custom+User+Data+Boundary+");
//! # Ok::<(), userdata_mime::Error>(())
//! ```
//!
//! ### Rendering to a Writer
//!
//! ```no_run
//! use std::io::stdout;
//! use userdata_mime::{MediaType, Multipart};
//!
//! let mut doc = Multipart::new();
//! doc.add_part(MediaType::CloudBoothook, "#cloud-boothook\necho booted");
//! doc.render(&mut stdout().lock())?;
//! # Ok::<(), userdata_mime::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod boundary;
mod content_type;
mod error;
mod header;
mod media_type;
mod multipart;
mod part;

pub mod encoding;

pub use boundary::Boundary;
pub use content_type::ContentType;
pub use encoding::{Charset, TransferEncoding};
pub use error::{Error, Result};
pub use header::Headers;
pub use media_type::MediaType;
pub use multipart::Multipart;
pub use part::Part;
