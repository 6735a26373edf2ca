//! JSON manifest describing a user data document.
//!
//! ```json
//! {
//!   "boundary": "+Custom+User+Data+Boundary+",
//!   "parts": [
//!     { "type": "cloud-config", "path": "cloud.yaml" },
//!     { "path": "setup.sh" }
//!   ]
//! }
//! ```
//!
//! Relative part paths are resolved against the manifest's directory. A part
//! without a `type` has its media type detected from its first line.

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};

use crate::cli::PartSpec;

/// Top-level manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Manifest {
    /// Boundary token; the library default is used when absent.
    pub boundary: Option<String>,
    /// Parts in document order.
    pub parts: Vec<ManifestPart>,
}

/// One manifest entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestPart {
    /// Short or full media type name.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    /// Body file.
    pub path: PathBuf,
}

impl Manifest {
    /// Reads and parses a manifest file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest {}", path.display()))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse manifest {}", path.display()))
    }

    /// Turns manifest entries into part specs, resolving paths against `base`.
    pub fn part_specs(&self, base: &Path) -> anyhow::Result<Vec<PartSpec>> {
        self.parts
            .iter()
            .map(|entry| -> anyhow::Result<PartSpec> {
                let media_type = match entry.media_type.as_deref() {
                    Some(name) => match PartSpec::parse_media_type(name) {
                        Some(t) => Some(t),
                        None => bail!("unknown media type {name:?} for {}", entry.path.display()),
                    },
                    None => None,
                };

                Ok(PartSpec {
                    media_type,
                    path: base.join(&entry.path),
                })
            })
            .collect()
    }
}
