//! Job queue between the change producers and the processing worker.
//!
//! A job is just the path of a file to look at. The queue is unbounded and
//! FIFO: producers never wait, so a stalled worker lets jobs pile up in
//! memory.

use std::path::PathBuf;
use tokio::sync::mpsc;

/// Create a connected sender/receiver pair.
pub fn job_queue() -> (JobSender, JobReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (JobSender { tx }, JobReceiver { rx })
}

/// Producer handle. Cheap to clone; the scan and the watch each hold one.
#[derive(Debug, Clone)]
pub struct JobSender {
    tx: mpsc::UnboundedSender<PathBuf>,
}

impl JobSender {
    /// Enqueue a path. Returns `false` once the worker has gone away.
    pub fn submit(&self, path: PathBuf) -> bool {
        match self.tx.send(path) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Job queue closed, dropping {:?}", e.0);
                false
            }
        }
    }
}

/// Consumer handle, owned by the single processing worker.
#[derive(Debug)]
pub struct JobReceiver {
    rx: mpsc::UnboundedReceiver<PathBuf>,
}

impl JobReceiver {
    /// Wait for the next job. `None` when every sender has been dropped.
    pub async fn next(&mut self) -> Option<PathBuf> {
        self.rx.recv().await
    }

    /// Take the next job if one is already queued.
    pub fn try_next(&mut self) -> Option<PathBuf> {
        self.rx.try_recv().ok()
    }
}
