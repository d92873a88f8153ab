//! Remote sources for published versions and branch heads
//!
//! This module provides:
//! - The RemoteSource trait the update checker queries
//! - A git adapter backed by `git ls-remote`

mod git;

pub use git::{parse_branch_head, parse_tag_listing, GitRemote};

use crate::error::RemoteError;
use crate::update::AvailableVersions;

/// Trait for sources that can list a repository's versions and branch heads
pub trait RemoteSource: Send + Sync {
    /// Get the source name
    fn source_name(&self) -> &'static str;

    /// Fetch every parsable version tag, newest first
    fn fetch_versions(&self, location: &str) -> Result<AvailableVersions, RemoteError>;

    /// Fetch the commit hash at the head of a branch
    fn fetch_branch_head(&self, location: &str, branch: &str) -> Result<String, RemoteError>;
}
