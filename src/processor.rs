//! Processing worker: the single consumer of the job queue.
//!
//! Jobs are handled strictly one at a time. For each path the worker
//! resolves the governing rule, applies the idempotency gate and runs the
//! resize and thumbnail steps. Failures are logged and confined to the step
//! that failed; nothing here propagates to the caller.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use imgforged_common::paths::{classify, thumb_name_for, PathClass};
use imgforged_common::{Dimensions, Result};

use crate::images::{write_atomic, Transformer};
use crate::queue::JobReceiver;
use crate::rules::{Rule, RuleStore};

/// Result of one step of a job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The rule does not ask for this step.
    Skipped,
    /// Output written to the given path.
    Written(PathBuf),
    /// Read, transform or write failed.
    Failed(String),
}

impl StepOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// What happened to a job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    /// The path is a generated thumbnail.
    DerivedArtifact,
    /// The path is not a supported image.
    Ineligible,
    /// No rule covers the path.
    NoRule,
    /// A thumbnail already exists, so the source counts as processed.
    AlreadyProcessed,
    /// The steps ran.
    Processed {
        resized: StepOutcome,
        thumbnail: StepOutcome,
    },
}

/// Whether a path will be worked on, decided before touching its contents.
#[derive(Debug)]
pub enum Decision<'a> {
    Skip(JobOutcome),
    Process {
        rule: &'a Rule,
        thumbnail_path: PathBuf,
    },
}

/// Applies folder rules to queued paths.
pub struct Processor {
    rules: Arc<RuleStore>,
    transformer: Arc<dyn Transformer>,
}

impl Processor {
    pub fn new(rules: Arc<RuleStore>, transformer: Arc<dyn Transformer>) -> Self {
        Self { rules, transformer }
    }

    /// Classify the path, find its rule and check the idempotency gate.
    ///
    /// The gate is the thumbnail file itself: if `thumb_name_for(path)`
    /// exists the source is assumed fully processed. A rule without a
    /// thumbnail spec never creates that file, so sources under it are
    /// resized again on every job.
    pub fn decide(&self, path: &Path) -> Decision<'_> {
        match classify(path) {
            PathClass::DerivedArtifact => return Decision::Skip(JobOutcome::DerivedArtifact),
            PathClass::Ineligible => return Decision::Skip(JobOutcome::Ineligible),
            PathClass::Eligible => {}
        }

        let rule = match self.rules.rule_for(path) {
            Some(rule) => rule,
            None => return Decision::Skip(JobOutcome::NoRule),
        };

        let thumbnail_path = thumb_name_for(path);
        if thumbnail_path.exists() {
            return Decision::Skip(JobOutcome::AlreadyProcessed);
        }

        Decision::Process {
            rule,
            thumbnail_path,
        }
    }

    /// Run one job to completion. Blocking.
    pub fn process(&self, path: &Path) -> JobOutcome {
        let (rule, thumbnail_path) = match self.decide(path) {
            Decision::Skip(outcome) => {
                tracing::debug!("Skipping {:?}: {:?}", path, outcome);
                return outcome;
            }
            Decision::Process {
                rule,
                thumbnail_path,
            } => (rule, thumbnail_path),
        };

        tracing::info!("Processing {:?}", path);

        let resized = match rule.resize {
            Some(target) => match self.render(path, path, target) {
                Ok(()) => {
                    tracing::info!("Resized {:?} to {}", path, target);
                    StepOutcome::Written(path.to_path_buf())
                }
                Err(e) => {
                    tracing::warn!("Failed to resize {:?}: {}", path, e);
                    StepOutcome::Failed(e.to_string())
                }
            },
            None => StepOutcome::Skipped,
        };

        // Reads the source again so it runs whether or not the resize did.
        let thumbnail = match rule.thumbnail {
            Some(target) => match self.render(path, &thumbnail_path, target) {
                Ok(()) => {
                    tracing::info!("Generated thumbnail {:?}", thumbnail_path);
                    StepOutcome::Written(thumbnail_path)
                }
                Err(e) => {
                    tracing::warn!("Failed to generate thumbnail for {:?}: {}", path, e);
                    StepOutcome::Failed(e.to_string())
                }
            },
            None => StepOutcome::Skipped,
        };

        JobOutcome::Processed { resized, thumbnail }
    }

    /// Read `source`, transform it to `target` and write the result to `dest`.
    fn render(&self, source: &Path, dest: &Path, target: Dimensions) -> Result<()> {
        let data = fs::read(source)?;
        let permissions = fs::metadata(source)?.permissions();
        let output = self.transformer.transform(&data, target)?;
        write_atomic(dest, &output, Some(permissions))
    }

    /// Consume jobs until the queue closes.
    ///
    /// Each job runs on the blocking pool and is awaited before the next is
    /// taken, so at most one image is processed at any time.
    pub async fn run(self: Arc<Self>, mut jobs: JobReceiver) {
        tracing::info!("Processing worker started");

        while let Some(path) = jobs.next().await {
            let processor = Arc::clone(&self);
            let result = tokio::task::spawn_blocking(move || processor.process(&path)).await;

            if let Err(e) = result {
                tracing::error!("Processing task failed: {}", e);
            }
        }

        tracing::info!("Processing worker stopped");
    }
}
