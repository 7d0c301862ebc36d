//! Path utilities for deciding which files the pipeline touches.
//!
//! Source images are recognised by a fixed, case-sensitive extension
//! allow-list. Files the pipeline generates itself carry the
//! [`DERIVED_MARKER`] infix and are never treated as sources, otherwise a
//! freshly written thumbnail would be fed straight back into the queue.

use std::path::{Path, PathBuf};

/// List of supported raster image extensions (matched case-sensitively).
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Infix inserted before the extension of generated thumbnails.
pub const DERIVED_MARKER: &str = "_thumb";

/// How the pipeline should treat a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathClass {
    /// A source image that may be processed.
    Eligible,
    /// Output generated by the pipeline itself.
    DerivedArtifact,
    /// Anything else.
    Ineligible,
}

/// Classify a path.
///
/// The derived marker is checked against the whole path, so a directory
/// named e.g. `old_thumbs/` excludes everything below it.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use imgforged_common::paths::{classify, PathClass};
///
/// assert_eq!(classify(Path::new("a/photo.png")), PathClass::Eligible);
/// assert_eq!(classify(Path::new("a/photo_thumb.png")), PathClass::DerivedArtifact);
/// assert_eq!(classify(Path::new("a/notes.txt")), PathClass::Ineligible);
/// assert_eq!(classify(Path::new("a/photo.PNG")), PathClass::Ineligible);
/// ```
pub fn classify(path: &Path) -> PathClass {
    if is_derived_artifact(path) {
        return PathClass::DerivedArtifact;
    }

    if has_image_extension(path) {
        PathClass::Eligible
    } else {
        PathClass::Ineligible
    }
}

/// Check if a path contains the derived-file marker anywhere.
pub fn is_derived_artifact(path: &Path) -> bool {
    path.to_string_lossy().contains(DERIVED_MARKER)
}

/// Check if a path has one of the allowed raster image extensions.
pub fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

/// Get the path the thumbnail for `path` is written to.
///
/// The marker goes immediately before the last extension separator of the
/// file name: `a/b/img.png` becomes `a/b/img_thumb.png`. A file name with
/// no extension (including dot-files such as `.hidden`) is returned
/// unchanged. That degenerate case means the thumbnail path equals the
/// source path; such files are never [`PathClass::Eligible`] so the
/// pipeline does not hit it, but callers of this function must.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use imgforged_common::paths::thumb_name_for;
///
/// assert_eq!(thumb_name_for(Path::new("a/b/img.png")), Path::new("a/b/img_thumb.png"));
/// assert_eq!(thumb_name_for(Path::new("noext")), Path::new("noext"));
/// ```
#[must_use]
pub fn thumb_name_for(path: &Path) -> PathBuf {
    match (path.file_stem(), path.extension()) {
        (Some(stem), Some(ext)) => {
            let mut name = stem.to_os_string();
            name.push(DERIVED_MARKER);
            name.push(".");
            name.push(ext);
            path.with_file_name(name)
        }
        _ => path.to_path_buf(),
    }
}
