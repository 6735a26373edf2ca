//! Media types understood by cloud-init.

use std::fmt;

/// Media type of a user data part.
///
/// The named variants are the types cloud-init recognizes. Any other string
/// is carried verbatim in [`MediaType::Other`]; nothing is validated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MediaType {
    /// `text/cloud-boothook`
    CloudBoothook,
    /// `text/cloud-config`
    CloudConfig,
    /// `text/cloud-config-archive`
    CloudConfigArchive,
    /// `text/cloud-config-jsonp`
    CloudConfigJsonp,
    /// `text/jinja2`
    Jinja2,
    /// `text/part-handler`
    PartHandler,
    /// `text/x-include-once-url`
    IncludeOnceUrl,
    /// `text/x-include-url`
    IncludeUrl,
    /// `text/x-shellscript`
    Shellscript,
    /// `text/x-shellscript-per-boot`
    ShellscriptPerBoot,
    /// `text/x-shellscript-per-instance`
    ShellscriptPerInstance,
    /// `text/x-shellscript-per-once`
    ShellscriptPerOnce,
    /// Any other media type.
    Other(String),
}

impl MediaType {
    /// All recognized media types.
    pub const ALL: [Self; 12] = [
        Self::CloudBoothook,
        Self::CloudConfig,
        Self::CloudConfigArchive,
        Self::CloudConfigJsonp,
        Self::Jinja2,
        Self::PartHandler,
        Self::IncludeOnceUrl,
        Self::IncludeUrl,
        Self::Shellscript,
        Self::ShellscriptPerBoot,
        Self::ShellscriptPerInstance,
        Self::ShellscriptPerOnce,
    ];

    /// Returns the media type string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::CloudBoothook => "text/cloud-boothook",
            Self::CloudConfig => "text/cloud-config",
            Self::CloudConfigArchive => "text/cloud-config-archive",
            Self::CloudConfigJsonp => "text/cloud-config-jsonp",
            Self::Jinja2 => "text/jinja2",
            Self::PartHandler => "text/part-handler",
            Self::IncludeOnceUrl => "text/x-include-once-url",
            Self::IncludeUrl => "text/x-include-url",
            Self::Shellscript => "text/x-shellscript",
            Self::ShellscriptPerBoot => "text/x-shellscript-per-boot",
            Self::ShellscriptPerInstance => "text/x-shellscript-per-instance",
            Self::ShellscriptPerOnce => "text/x-shellscript-per-once",
            Self::Other(s) => s,
        }
    }

    /// Returns true for the types cloud-init recognizes.
    #[must_use]
    pub const fn is_recognized(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// Resolves a short name such as `cloud-config` or `x-shellscript`.
    ///
    /// The `text/` prefix is optional and matching is case-insensitive.
    /// Returns `None` for names that are not recognized.
    #[must_use]
    pub fn from_short_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        let full = if name.contains('/') {
            name
        } else {
            format!("text/{name}")
        };

        Self::ALL.into_iter().find(|t| t.as_str() == full)
    }

    /// Infers the media type from the first line of a body.
    ///
    /// Follows the start-of-content markers cloud-init itself looks for.
    /// Returns `None` if the body carries no known marker.
    #[must_use]
    pub fn detect(body: &[u8]) -> Option<Self> {
        let first = body.split(|&b| b == b'\n').next().unwrap_or_default();
        let first = String::from_utf8_lossy(first);
        let first = first.trim_end_matches('\r');
        let lower = first.to_ascii_lowercase();

        // Longest prefixes first
        let detected = if lower.starts_with("## template: jinja") {
            Self::Jinja2
        } else if lower.starts_with("#cloud-config-archive") {
            Self::CloudConfigArchive
        } else if lower.starts_with("#cloud-config-jsonp") {
            Self::CloudConfigJsonp
        } else if lower.starts_with("#cloud-config") {
            Self::CloudConfig
        } else if lower.starts_with("#cloud-boothook") {
            Self::CloudBoothook
        } else if lower.starts_with("#include-once") {
            Self::IncludeOnceUrl
        } else if lower.starts_with("#include") {
            Self::IncludeUrl
        } else if lower.starts_with("#part-handler") {
            Self::PartHandler
        } else if first.starts_with("#!") {
            Self::Shellscript
        } else {
            return None;
        };

        Some(detected)
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for MediaType {
    fn from(s: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .unwrap_or_else(|| Self::Other(s.to_string()))
    }
}

impl From<String> for MediaType {
    fn from(s: String) -> Self {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .unwrap_or(Self::Other(s))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_strings() {
        for t in MediaType::ALL {
            assert!(t.is_recognized());
            assert_eq!(MediaType::from(t.as_str()), t);
        }
    }

    #[test]
    fn test_other_kept_verbatim() {
        let t = MediaType::from("application/x-Custom");
        assert_eq!(t, MediaType::Other("application/x-Custom".into()));
        assert_eq!(t.as_str(), "application/x-Custom");
        assert!(!t.is_recognized());
    }

    #[test]
    fn test_from_short_name() {
        assert_eq!(
            MediaType::from_short_name("cloud-config"),
            Some(MediaType::CloudConfig)
        );
        assert_eq!(
            MediaType::from_short_name("X-Shellscript-Per-Boot"),
            Some(MediaType::ShellscriptPerBoot)
        );
        assert_eq!(
            MediaType::from_short_name("text/jinja2"),
            Some(MediaType::Jinja2)
        );
        assert_eq!(MediaType::from_short_name("yaml"), None);
    }

    #[test]
    fn test_detect() {
        assert_eq!(
            MediaType::detect(b"#cloud-config\ntimezone: Europe/London"),
            Some(MediaType::CloudConfig)
        );
        assert_eq!(
            MediaType::detect(b"#!/bin/bash\necho hi"),
            Some(MediaType::Shellscript)
        );
        assert_eq!(
            MediaType::detect(b"## template: jinja\n#!/bin/sh"),
            Some(MediaType::Jinja2)
        );
        assert_eq!(
            MediaType::detect(b"#include-once\nhttps://example.com/a"),
            Some(MediaType::IncludeOnceUrl)
        );
        assert_eq!(
            MediaType::detect(b"#include\r\nhttps://example.com/a"),
            Some(MediaType::IncludeUrl)
        );
        assert_eq!(
            MediaType::detect(b"#cloud-config-archive\n- type: foo"),
            Some(MediaType::CloudConfigArchive)
        );
        assert_eq!(MediaType::detect(b"timezone: UTC"), None);
        assert_eq!(MediaType::detect(b""), None);
    }
}
