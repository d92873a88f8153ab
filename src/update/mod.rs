//! Update decision logic for declared packages
//!
//! This module provides:
//! - Policy configuration shared by every evaluation
//! - The available-versions sequence fetched from a remote
//! - The update checker that turns a requirement and a resolved value into reports

mod available;
mod policy;

pub use available::AvailableVersions;
pub use policy::PolicyConfig;

use crate::domain::{Bound, BoundField, Dependency, Report, Requirement, SemanticVersion, SkipReason};
use crate::error::CheckError;
use crate::remote::RemoteSource;

/// Decision engine that decides what to report for a dependency
#[derive(Debug, Clone, Default)]
pub struct UpdateChecker {
    policy: PolicyConfig,
}

impl UpdateChecker {
    /// Create a new UpdateChecker with the given policy
    pub fn new(policy: PolicyConfig) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    /// Check if a dependency should be evaluated at all
    /// Returns Some(SkipReason) if it should be skipped, None if it should be evaluated
    pub fn should_skip(&self, dependency: &Dependency, resolved: Option<&str>) -> Option<SkipReason> {
        if dependency.requirement.is_commit() {
            return Some(SkipReason::CommitPinned);
        }
        if self.policy.is_ignored(&dependency.url) {
            return Some(SkipReason::Ignored);
        }
        if resolved.is_none() {
            return Some(SkipReason::MissingResolution);
        }
        None
    }

    /// Evaluate one dependency against its resolved value
    ///
    /// The remote is queried at most once. Skipped dependencies produce no reports.
    pub fn evaluate(
        &self,
        dependency: &Dependency,
        resolved: Option<&str>,
        remote: &dyn RemoteSource,
    ) -> Result<Vec<Report>, CheckError> {
        if self.should_skip(dependency, resolved).is_some() {
            return Ok(Vec::new());
        }
        let Some(resolved) = resolved else {
            return Ok(Vec::new());
        };
        let name = dependency.name();

        if let Requirement::Branch { name: branch } = &dependency.requirement {
            let commit = remote.fetch_branch_head(&dependency.location, branch)?;
            if commit == resolved {
                return Ok(Vec::new());
            }
            return Ok(vec![Report::BranchUpdate {
                name: name.to_string(),
                branch: branch.clone(),
                commit,
            }]);
        }

        let available = remote.fetch_versions(&dependency.location)?;
        let Some(newest) = available.first() else {
            return Ok(Vec::new());
        };
        if newest.text() == resolved {
            return Ok(Vec::new());
        }

        match &dependency.requirement {
            Requirement::ExactVersion { .. } => Ok(self.check_exact(name, &available, resolved)),
            Requirement::UpToNextMajorVersion { .. } => {
                self.check_bounded(name, BoundField::Major, &available, resolved)
            }
            Requirement::UpToNextMinorVersion { .. } => {
                self.check_bounded(name, BoundField::Minor, &available, resolved)
            }
            Requirement::VersionRange { max_version, .. } => {
                Ok(self.check_range(name, max_version, &available, resolved))
            }
            Requirement::Branch { .. } | Requirement::Commit { .. } => Ok(Vec::new()),
        }
    }

    fn check_exact(&self, name: &str, available: &AvailableVersions, resolved: &str) -> Vec<Report> {
        if !self.policy.check_when_exact {
            return Vec::new();
        }
        match available.newest_where(|v| self.policy.allows(v)) {
            Some(candidate) if candidate.text() != resolved => vec![Report::ExactUpdate {
                name: name.to_string(),
                candidate: candidate.clone(),
                pinned: resolved.to_string(),
            }],
            _ => Vec::new(),
        }
    }

    fn check_bounded(
        &self,
        name: &str,
        field: BoundField,
        available: &AvailableVersions,
        resolved: &str,
    ) -> Result<Vec<Report>, CheckError> {
        let current = SemanticVersion::parse(resolved)?;
        let mut reports = Vec::new();

        let candidate =
            available.newest_where(|v| field.of(v) == field.of(&current) && self.policy.allows(v));
        if let Some(candidate) = candidate {
            if candidate.text() != resolved {
                reports.push(Report::BoundedUpdate {
                    name: name.to_string(),
                    candidate: candidate.clone(),
                });
            }
        }

        if self.policy.report_above_maximum {
            if let Some(newest_allowed) = available.newest_where(|v| self.policy.allows(v)) {
                let within_bound = candidate == Some(newest_allowed);
                if !within_bound && newest_allowed.text() != resolved {
                    reports.extend(self.above_bound(name, available, Bound::Field(field)));
                }
            }
        }

        Ok(reports)
    }

    fn check_range(
        &self,
        name: &str,
        max_version: &SemanticVersion,
        available: &AvailableVersions,
        resolved: &str,
    ) -> Vec<Report> {
        let mut reports = Vec::new();
        let below_max = available.newest_where(|v| *v < max_version && self.policy.allows(v));
        if let Some(candidate) = below_max {
            if candidate.text() != resolved {
                reports.push(Report::RangeUpdate {
                    name: name.to_string(),
                    candidate: candidate.clone(),
                });
            }
        }

        // The notice is not compared against the candidate here, unlike bounded kinds
        let exceeds_max = available.first().is_some_and(|newest| newest >= max_version);
        if exceeds_max && self.policy.report_above_maximum {
            reports.extend(self.above_bound(
                name,
                available,
                Bound::MaxVersion(max_version.clone()),
            ));
        }
        reports
    }

    fn above_bound(&self, name: &str, available: &AvailableVersions, bound: Bound) -> Option<Report> {
        available.first().map(|newest| Report::AboveBoundNotice {
            name: name.to_string(),
            newest_overall: newest.clone(),
            bound,
        })
    }
}
