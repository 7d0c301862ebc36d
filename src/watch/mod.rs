//! Change source: the initial directory scan plus the live filesystem watch.
//!
//! Both producers push paths into the same [`JobSender`].

mod forward;
mod scan;

pub use forward::{is_write_completed, EventForwarder};
pub use scan::scan_root;

use crate::queue::JobSender;
use crate::rules::RuleStore;
use anyhow::{Context, Result};
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Live watch over the configured rule roots
pub struct ChangeSource {
    watcher: RecommendedWatcher,
    forwarder: JoinHandle<()>,
    watched: Vec<PathBuf>,
}

impl ChangeSource {
    /// Create the watcher and spawn the forwarding task.
    ///
    /// No directory is watched until [`watch_root`](Self::watch_root) is
    /// called. Must be called from within a tokio runtime.
    pub fn start(rules: Arc<RuleStore>, jobs: JobSender) -> Result<Self> {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();

        let watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    let _ = event_tx.send(event);
                }
                Err(e) => tracing::warn!("File watcher error: {}", e),
            },
            Config::default(),
        )
        .context("Failed to create file watcher")?;

        let mut filter = EventForwarder::new(rules);
        let forwarder = tokio::spawn(async move {
            while let Some(event) = event_rx.recv().await {
                for path in filter.admit(&event) {
                    tracing::debug!("File written: {:?}", path);
                    if !jobs.submit(path) {
                        return;
                    }
                }
            }
        });

        Ok(Self {
            watcher,
            forwarder,
            watched: Vec::new(),
        })
    }

    /// Subscribe to changes anywhere below `root`
    pub fn watch_root(&mut self, root: &Path) -> Result<()> {
        self.watcher
            .watch(root, RecursiveMode::Recursive)
            .with_context(|| format!("Failed to watch path: {:?}", root))?;
        tracing::info!("Watching directory: {:?}", root);
        self.watched.push(root.to_path_buf());
        Ok(())
    }

    pub fn watched(&self) -> &[PathBuf] {
        &self.watched
    }

    /// Release every subscription and stop forwarding
    pub fn stop(mut self) {
        for path in &self.watched {
            if let Err(e) = self.watcher.unwatch(path) {
                tracing::debug!("Failed to unwatch {:?}: {}", path, e);
            }
        }
        self.forwarder.abort();
        tracing::info!("File watcher stopped");
    }
}
