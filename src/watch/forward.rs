//! Filtering of raw watcher events into jobs.

use std::path::PathBuf;
use std::sync::Arc;

use imgforged_common::paths::{classify, PathClass};
use notify::event::{AccessKind, AccessMode, ModifyKind};
use notify::{Event, EventKind};

use crate::rules::RuleStore;

/// Turns raw filesystem events into job paths.
///
/// Only completed writes to eligible images under a configured root get
/// through. A write to the same path as the completed write immediately
/// before it is dropped: editors often emit several writes per save. This
/// is not a time window, so the same path reappearing after a write to any
/// other path produces a second job.
pub struct EventForwarder {
    rules: Arc<RuleStore>,
    /// Path of the most recent completed write
    last_written: Option<PathBuf>,
}

impl EventForwarder {
    pub fn new(rules: Arc<RuleStore>) -> Self {
        Self {
            rules,
            last_written: None,
        }
    }

    /// Paths from `event` that should become jobs, in event order.
    pub fn admit(&mut self, event: &Event) -> Vec<PathBuf> {
        if !is_write_completed(&event.kind) {
            return Vec::new();
        }

        event
            .paths
            .iter()
            .filter_map(|path| self.admit_path(path.clone()))
            .collect()
    }

    /// Apply last-seen suppression and the path filters to one written path.
    ///
    /// Every completed write counts as the previous notification, whether
    /// or not it becomes a job, so a write to `notes.txt` or to a
    /// thumbnail between two writes to `a.jpg` lets the second one through.
    pub fn admit_path(&mut self, path: PathBuf) -> Option<PathBuf> {
        if self.last_written.as_ref() == Some(&path) {
            tracing::debug!("Suppressing repeated write for {:?}", path);
            return None;
        }
        self.last_written = Some(path.clone());

        if classify(&path) != PathClass::Eligible {
            return None;
        }

        if self.rules.rule_for(&path).is_none() {
            return None;
        }

        Some(path)
    }
}

/// Whether an event kind means a file finished being written.
///
/// Linux reports close-after-write, which is used there. Other platforms
/// have no close notification, so data modifications stand in for it.
pub fn is_write_completed(kind: &EventKind) -> bool {
    match kind {
        EventKind::Access(AccessKind::Close(AccessMode::Write)) => true,
        EventKind::Modify(ModifyKind::Data(_)) | EventKind::Modify(ModifyKind::Any) => {
            !cfg!(target_os = "linux")
        }
        _ => false,
    }
}
