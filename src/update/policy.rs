//! Policy configuration for update checks
//!
//! This module provides the PolicyConfig struct that encapsulates
//! the options shared by every evaluation in a run.

use crate::domain::{RepositoryUrl, SemanticVersion};
use indexmap::IndexSet;

/// Options governing which updates are reported
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyConfig {
    /// Report newer versions for exact-version requirements
    pub check_when_exact: bool,
    /// Report versions beyond the major/minor bound or range maximum
    pub report_above_maximum: bool,
    /// Allow pre-release versions as candidates
    pub report_pre_releases: bool,
    /// Repositories never checked, normalized
    pub ignored_repositories: IndexSet<RepositoryUrl>,
}

impl PolicyConfig {
    /// Create a new PolicyConfig with all options off
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_check_when_exact(mut self, enabled: bool) -> Self {
        self.check_when_exact = enabled;
        self
    }

    pub fn with_report_above_maximum(mut self, enabled: bool) -> Self {
        self.report_above_maximum = enabled;
        self
    }

    pub fn with_report_pre_releases(mut self, enabled: bool) -> Self {
        self.report_pre_releases = enabled;
        self
    }

    /// Add repositories to ignore. Each entry is normalized first.
    pub fn with_ignored<I, S>(mut self, repositories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.ignored_repositories.extend(
            repositories
                .into_iter()
                .map(|raw| RepositoryUrl::normalize(raw.as_ref())),
        );
        self
    }

    /// Check if a repository is ignored
    pub fn is_ignored(&self, url: &RepositoryUrl) -> bool {
        self.ignored_repositories.contains(url)
    }

    /// Pre-release filter shared by every candidate selection
    pub fn allows(&self, version: &SemanticVersion) -> bool {
        self.report_pre_releases || !version.is_prerelease()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = PolicyConfig::new();
        assert!(!policy.check_when_exact);
        assert!(!policy.report_above_maximum);
        assert!(!policy.report_pre_releases);
        assert!(policy.ignored_repositories.is_empty());
    }

    #[test]
    fn test_ignored_are_normalized() {
        let policy = PolicyConfig::new().with_ignored(["https://github.com/kean/Nuke.git"]);
        assert!(policy.is_ignored(&RepositoryUrl::normalize("ssh://github.com/kean/Nuke")));
        assert!(!policy.is_ignored(&RepositoryUrl::normalize("https://github.com/kean/Pulse")));
    }

    #[test]
    fn test_with_ignored_appends() {
        let policy = PolicyConfig::new()
            .with_ignored(["https://github.com/a/one"])
            .with_ignored(vec!["https://github.com/b/two".to_string()]);
        assert_eq!(policy.ignored_repositories.len(), 2);
    }

    #[test]
    fn test_allows_prerelease() {
        let beta = SemanticVersion::parse("2.0.0-beta.1").unwrap();
        let stable = SemanticVersion::new(2, 0, 0);

        let policy = PolicyConfig::new();
        assert!(policy.allows(&stable));
        assert!(!policy.allows(&beta));

        let policy = policy.with_report_pre_releases(true);
        assert!(policy.allows(&beta));
    }
}
