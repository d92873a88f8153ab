//! git adapter
//!
//! Lists tags with `git ls-remote -t <location>` and branch heads with
//! `git ls-remote -h <location>`. Output lines look like
//! `<sha>\trefs/tags/<name>` and `<sha>\trefs/heads/<name>`.

use super::RemoteSource;
use crate::error::RemoteError;
use crate::update::AvailableVersions;
use std::process::Command;
use tracing::debug;

const HEADS_SEPARATOR: &str = "\trefs/heads/";

/// Remote source that shells out to the git executable
#[derive(Debug, Clone)]
pub struct GitRemote {
    program: String,
}

impl GitRemote {
    /// Create a new GitRemote using `git` from PATH
    pub fn new() -> Self {
        Self::with_program("git")
    }

    /// Create a GitRemote using a specific git executable
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn ls_remote(&self, flag: &str, location: &str) -> Result<String, RemoteError> {
        debug!("Running {} ls-remote {} {}", self.program, flag, location);

        let output = Command::new(&self.program)
            .args(["ls-remote", flag, location])
            .env("GIT_TERMINAL_PROMPT", "0")
            .output()
            .map_err(|source| RemoteError::Spawn {
                location: location.to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(RemoteError::CommandFailed {
                location: location.to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for GitRemote {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoteSource for GitRemote {
    fn source_name(&self) -> &'static str {
        "git"
    }

    fn fetch_versions(&self, location: &str) -> Result<AvailableVersions, RemoteError> {
        let listing = self.ls_remote("-t", location)?;
        let versions = parse_tag_listing(&listing);
        debug!("{} versions found for {}", versions.len(), location);
        Ok(versions)
    }

    fn fetch_branch_head(&self, location: &str, branch: &str) -> Result<String, RemoteError> {
        let listing = self.ls_remote("-h", location)?;
        parse_branch_head(&listing, branch)
            .map(str::to_string)
            .ok_or_else(|| RemoteError::branch_not_found(location, branch))
    }
}

/// Parse `git ls-remote -t` output into available versions
///
/// The tag name is whatever follows the last `/tags/`. Peeled entries
/// (`^{}`) and non-version tags do not parse and are dropped.
pub fn parse_tag_listing(listing: &str) -> AvailableVersions {
    AvailableVersions::from_tags(
        listing
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .filter_map(|line| line.rsplit("/tags/").next()),
    )
}

/// Find the commit of a branch in `git ls-remote -h` output
pub fn parse_branch_head<'a>(listing: &'a str, branch: &str) -> Option<&'a str> {
    listing.lines().find_map(|line| {
        let (commit, name) = line.split_once(HEADS_SEPARATOR)?;
        (name.trim_end() == branch).then_some(commit)
    })
}
