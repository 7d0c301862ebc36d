//! Initial directory scan.

use std::path::Path;

use imgforged_common::paths::{classify, PathClass};
use walkdir::WalkDir;

use crate::queue::JobSender;

/// Walk `root` recursively and queue every eligible image found.
///
/// Symlinked image files are queued; symlinked directories are not
/// descended into. Unreadable entries are logged and skipped. Returns the
/// number of jobs queued.
pub fn scan_root(root: &Path, jobs: &JobSender) -> usize {
    tracing::info!("Processing folder {:?}", root);

    let mut queued = 0;
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Failed to read entry under {:?}: {}", root, e);
                continue;
            }
        };

        // Skip directories, following file symlinks to their target
        if !entry.path().is_file() {
            continue;
        }

        if classify(entry.path()) != PathClass::Eligible {
            continue;
        }

        if !jobs.submit(entry.into_path()) {
            break;
        }
        queued += 1;
    }

    tracing::info!("Queued {} images from {:?}", queued, root);
    queued
}
