use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration document.
///
/// ```yaml
/// Folders:
///   - path: /srv/sync/photos
///     size: "1920x1080"
///     thumb: "320x240"
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(rename = "Folders", default)]
    pub folders: Vec<FolderConfig>,
}

/// One configured folder, exactly as written in the file.
///
/// Dimension strings are kept raw here; they are parsed and validated when
/// the rule store is built.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FolderConfig {
    /// Root directory the rule governs.
    pub path: PathBuf,

    /// Resize the source image in place to `"WIDTHxHEIGHT"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    /// Write a `_thumb` copy at `"WIDTHxHEIGHT"` next to the source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumb: Option<String>,
}

impl FolderConfig {
    /// Resize spec, with an empty string treated as unset.
    pub fn size_spec(&self) -> Option<&str> {
        non_empty(self.size.as_deref())
    }

    /// Thumbnail spec, with an empty string treated as unset.
    pub fn thumb_spec(&self) -> Option<&str> {
        non_empty(self.thumb.as_deref())
    }
}

fn non_empty(spec: Option<&str>) -> Option<&str> {
    spec.filter(|s| !s.trim().is_empty())
}
