//! Per-dependency check outcomes and the batch summary

use super::{Report, RepositoryUrl};
use serde::Serialize;
use std::fmt;

/// Reason why a dependency was not evaluated
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Pinned to a revision, never checked
    CommitPinned,
    /// Listed in the ignored repositories
    Ignored,
    /// Package.resolved has no entry for it
    MissingResolution,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::CommitPinned => write!(f, "pinned to a revision"),
            SkipReason::Ignored => write!(f, "ignored"),
            SkipReason::MissingResolution => write!(f, "no resolved version"),
        }
    }
}

/// Result of checking a single declared dependency
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckOutcome {
    /// Evaluated and produced at least one report
    Reported {
        url: RepositoryUrl,
        reports: Vec<Report>,
    },
    /// Evaluated, nothing to report
    UpToDate { url: RepositoryUrl },
    /// Not evaluated
    Skipped {
        url: RepositoryUrl,
        reason: SkipReason,
    },
    /// Evaluation failed; the rest of the batch continued
    Failed { url: RepositoryUrl, error: String },
}

impl CheckOutcome {
    /// Wraps evaluated reports, collapsing an empty list to UpToDate
    pub fn evaluated(url: RepositoryUrl, reports: Vec<Report>) -> Self {
        if reports.is_empty() {
            CheckOutcome::UpToDate { url }
        } else {
            CheckOutcome::Reported { url, reports }
        }
    }

    /// Creates a Skipped outcome
    pub fn skipped(url: RepositoryUrl, reason: SkipReason) -> Self {
        CheckOutcome::Skipped { url, reason }
    }

    /// Creates a Failed outcome
    pub fn failed(url: RepositoryUrl, error: impl fmt::Display) -> Self {
        CheckOutcome::Failed {
            url,
            error: error.to_string(),
        }
    }

    pub fn url(&self) -> &RepositoryUrl {
        match self {
            CheckOutcome::Reported { url, .. }
            | CheckOutcome::UpToDate { url }
            | CheckOutcome::Skipped { url, .. }
            | CheckOutcome::Failed { url, .. } => url,
        }
    }

    pub fn reports(&self) -> &[Report] {
        match self {
            CheckOutcome::Reported { reports, .. } => reports,
            _ => &[],
        }
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, CheckOutcome::Skipped { .. })
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, CheckOutcome::Failed { .. })
    }
}

/// All outcomes of one run, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckSummary {
    pub outcomes: Vec<CheckOutcome>,
}

impl CheckSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_outcome(&mut self, outcome: CheckOutcome) {
        self.outcomes.push(outcome);
    }

    /// Every report in declaration order
    pub fn reports(&self) -> impl Iterator<Item = &Report> {
        self.outcomes.iter().flat_map(|o| o.reports())
    }

    pub fn skips(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.outcomes.iter().filter(|o| o.is_skip())
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.outcomes.iter().filter(|o| o.is_failure())
    }

    pub fn total_dependencies(&self) -> usize {
        self.outcomes.len()
    }

    pub fn total_reports(&self) -> usize {
        self.reports().count()
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }
}
