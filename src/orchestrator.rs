//! Check orchestrator coordinating a whole run
//!
//! This module provides:
//! - Workflow coordination: declarations → skip rules → remote queries → decisions
//! - Parallel remote queries bounded by a semaphore
//! - Outcomes assembled in declaration order
//! - Error handling with partial continuation

use crate::config::Settings;
use crate::domain::{CheckOutcome, CheckSummary, Report, RepositoryUrl, SkipReason};
use crate::error::CheckError;
use crate::manifest::{DeclaredPackage, ProjectManifest};
use crate::progress::Progress;
use crate::remote::{GitRemote, RemoteSource};
use crate::update::UpdateChecker;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, warn};

type EvaluationHandle = JoinHandle<Result<Result<Vec<Report>, CheckError>, JoinError>>;

/// A dependency whose outcome is known or still being computed
enum Pending {
    Done(CheckOutcome),
    Running {
        url: RepositoryUrl,
        name: String,
        handle: EvaluationHandle,
    },
}

/// Orchestrator for coordinating a check run
pub struct Orchestrator {
    /// Update checker shared by every evaluation
    checker: Arc<UpdateChecker>,
    /// Where versions and branch heads come from
    remote: Arc<dyn RemoteSource>,
    /// Bounds the number of concurrent remote queries
    semaphore: Arc<Semaphore>,
}

impl Orchestrator {
    /// Create a new orchestrator querying remotes with git
    pub fn new(settings: Settings) -> Self {
        Self::with_remote(settings, Arc::new(GitRemote::new()))
    }

    /// Create an orchestrator with a custom remote source (for testing)
    pub fn with_remote(settings: Settings, remote: Arc<dyn RemoteSource>) -> Self {
        Self {
            checker: Arc::new(UpdateChecker::new(settings.policy)),
            remote,
            semaphore: Arc::new(Semaphore::new(settings.concurrency.max(1))),
        }
    }

    /// Check every declared dependency of a project
    pub async fn run(&self, manifest: &ProjectManifest, show_progress: bool) -> CheckSummary {
        let mut progress = Progress::new(show_progress);
        debug!(
            "Checking {} packages with {} remote",
            manifest.packages.len(),
            self.remote.source_name()
        );

        let pending: Vec<Pending> = manifest
            .packages
            .iter()
            .map(|(url, declared)| self.schedule(url, declared, manifest))
            .collect();

        progress.checking(pending.len());

        let mut summary = CheckSummary::new();
        for entry in pending {
            let outcome = match entry {
                Pending::Done(outcome) => outcome,
                Pending::Running { url, name, handle } => {
                    progress.waiting_on(&name);
                    collect(url, &name, handle).await
                }
            };
            progress.checked(&outcome);
            summary.add_outcome(outcome);
        }
        progress.finish();

        summary
    }

    /// Apply skip rules and start the evaluation of one dependency
    fn schedule(
        &self,
        url: &RepositoryUrl,
        declared: &DeclaredPackage,
        manifest: &ProjectManifest,
    ) -> Pending {
        // Ignored repositories are skipped even when their declaration is invalid
        if self.checker.policy().is_ignored(url) {
            return Pending::Done(CheckOutcome::skipped(url.clone(), SkipReason::Ignored));
        }

        let dependency = match declared.dependency() {
            Ok(dependency) => dependency,
            Err(e) => {
                return Pending::Done(CheckOutcome::failed(
                    url.clone(),
                    format!("invalid requirement: {}", e),
                ))
            }
        };

        let resolved = manifest.resolved.get(url).map(str::to_string);
        if let Some(reason) = self.checker.should_skip(&dependency, resolved.as_deref()) {
            if reason == SkipReason::MissingResolution {
                warn!("Unable to locate the current version for {}", dependency.name());
            }
            return Pending::Done(CheckOutcome::skipped(url.clone(), reason));
        }

        let name = dependency.name().to_string();
        let checker = Arc::clone(&self.checker);
        let remote = Arc::clone(&self.remote);
        let semaphore = Arc::clone(&self.semaphore);

        let handle = tokio::spawn(async move {
            let _permit = semaphore.acquire_owned().await.ok();
            tokio::task::spawn_blocking(move || {
                checker.evaluate(&dependency, resolved.as_deref(), &*remote)
            })
            .await
        });

        Pending::Running {
            url: url.clone(),
            name,
            handle,
        }
    }
}

/// Wait for an evaluation and turn its result into an outcome
async fn collect(url: RepositoryUrl, name: &str, handle: EvaluationHandle) -> CheckOutcome {
    match handle.await {
        Ok(Ok(Ok(reports))) => CheckOutcome::evaluated(url, reports),
        Ok(Ok(Err(e))) => {
            warn!("Failed to check {}: {}", name, e);
            CheckOutcome::failed(url, e)
        }
        Ok(Err(e)) | Err(e) => {
            warn!("Check of {} did not complete: {}", name, e);
            CheckOutcome::failed(url, e)
        }
    }
}
