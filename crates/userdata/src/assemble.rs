//! Loads part files and assembles the document.

use anyhow::{Context, anyhow};
use tracing::{debug, info};
use userdata_mime::{MediaType, Multipart};

use crate::cli::PartSpec;

/// Builds a document from part specs, reading each body from disk.
///
/// Parts keep the order of `specs`. A spec without a media type is detected
/// from the body's first line.
pub fn assemble(boundary: Option<&str>, specs: &[PartSpec]) -> anyhow::Result<Multipart> {
    let mut doc = match boundary {
        Some(b) => Multipart::with_boundary(b).context("cannot use boundary")?,
        None => Multipart::new(),
    };

    for spec in specs {
        let body = std::fs::read(&spec.path)
            .with_context(|| format!("failed to read part {}", spec.path.display()))?;

        let media_type = match &spec.media_type {
            Some(t) => t.clone(),
            None => MediaType::detect(&body).ok_or_else(|| {
                anyhow!(
                    "cannot detect media type of {}; pass it as TYPE={}",
                    spec.path.display(),
                    spec.path.display()
                )
            })?,
        };

        if !media_type.is_recognized() {
            debug!(%media_type, "Using media type not known to cloud-init");
        }
        info!(path = %spec.path.display(), %media_type, bytes = body.len(), "Adding part");
        doc.add_part(media_type, body);
    }

    Ok(doc)
}
