//! Command-line arguments.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use userdata_mime::MediaType;

/// Build cloud-init multipart user data from local files.
#[derive(Debug, Parser)]
#[command(name = "userdata", version, args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Parts to include, as TYPE=PATH or PATH (type detected from the first line)
    #[arg(value_name = "PART")]
    pub parts: Vec<PartSpec>,

    /// JSON manifest listing the boundary and parts
    #[arg(short, long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Boundary token (overrides the manifest)
    #[arg(short, long, env = "USERDATA_BOUNDARY")]
    pub boundary: Option<String>,

    /// Write the document here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Verbose logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the media types cloud-init recognizes
    ListTypes,
}

const TOP_LEVEL_TYPES: [&str; 9] = [
    "application",
    "audio",
    "font",
    "image",
    "message",
    "model",
    "multipart",
    "text",
    "video",
];

/// A part requested on the command line or in a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartSpec {
    /// Explicit media type, or `None` to detect it from the content.
    pub media_type: Option<MediaType>,
    /// File holding the part body.
    pub path: PathBuf,
}

impl PartSpec {
    /// Resolves a media type name: a short cloud-init name (`cloud-config`)
    /// or a full `type/subtype` under a registered top-level type.
    pub fn parse_media_type(name: &str) -> Option<MediaType> {
        MediaType::from_short_name(name).or_else(|| {
            let (main, sub) = name.split_once('/')?;
            let is_subtype = !sub.is_empty()
                && sub
                    .bytes()
                    .all(|b| b.is_ascii_alphanumeric() || b"!#$&-^_.+".contains(&b));
            (TOP_LEVEL_TYPES.contains(&main.to_ascii_lowercase().as_str()) && is_subtype)
                .then(|| MediaType::from(name))
        })
    }
}

impl FromStr for PartSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err("part must not be empty".to_string());
        }

        // Only treat the prefix as a type when it names one; paths may contain '='.
        if let Some((name, path)) = s.split_once('=') {
            if let Some(media_type) = Self::parse_media_type(name) {
                if path.is_empty() {
                    return Err(format!("missing path after '{name}='"));
                }
                return Ok(Self {
                    media_type: Some(media_type),
                    path: PathBuf::from(path),
                });
            }
        }

        Ok(Self {
            media_type: None,
            path: PathBuf::from(s),
        })
    }
}
