//! Lifecycle: wires the rule store, change source, queue and worker
//! together and tears them down on a termination signal.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tokio::task::JoinHandle;

use crate::images::Transformer;
use crate::processor::Processor;
use crate::queue::job_queue;
use crate::rules::RuleStore;
use crate::watch::{scan_root, ChangeSource};

/// A configured but not yet started service.
pub struct Service {
    rules: Arc<RuleStore>,
    transformer: Arc<dyn Transformer>,
}

impl Service {
    pub fn new(rules: RuleStore, transformer: Arc<dyn Transformer>) -> Self {
        Self {
            rules: Arc::new(rules),
            transformer,
        }
    }

    /// Start everything, in order: the watch forwarder, the worker, a
    /// validation pass over every rule, then per root the initial scan and
    /// the watch subscription.
    ///
    /// Returns once every root is scanned and watched. Jobs from the scan
    /// may still be in the queue at that point.
    pub async fn start(self) -> Result<RunningService> {
        let (jobs, receiver) = job_queue();

        let mut source = ChangeSource::start(Arc::clone(&self.rules), jobs.clone())?;

        let processor = Arc::new(Processor::new(Arc::clone(&self.rules), self.transformer));
        let worker = tokio::spawn(processor.run(receiver));

        for rule in self.rules.rules() {
            rule.validate()?;
        }

        for rule in self.rules.rules() {
            let root = rule.root.clone();
            let scan_jobs = jobs.clone();
            tokio::task::spawn_blocking(move || scan_root(&root, &scan_jobs))
                .await
                .context("Initial scan task failed")?;

            source.watch_root(&rule.root)?;
        }

        tracing::info!("Watching {} folders", source.watched().len());

        Ok(RunningService { source, worker })
    }
}

/// Handle to a started service.
pub struct RunningService {
    source: ChangeSource,
    worker: JoinHandle<()>,
}

impl RunningService {
    /// Block until SIGINT or SIGTERM, then shut down.
    pub async fn run_until_signal(self) {
        tracing::info!("Waiting for changes");
        shutdown_signal().await;
        self.shutdown();
    }

    /// Stop watching and abandon whatever the worker is doing.
    pub fn shutdown(self) {
        tracing::info!("Terminating");
        self.source.stop();
        self.worker.abort();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
