//! Repository URL normalization
//!
//! The project file, Package.resolved and the ignore list may spell the same
//! repository differently (`https://…`, `ssh://…`, with or without `.git`).
//! All lookups go through [`RepositoryUrl`] so they compare equal.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

// org/repo at the end of the URL
static DISPLAY_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([\w-]+/[\w-]+)$").unwrap());

/// A repository location with scheme and `.git` suffix removed
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct RepositoryUrl(String);

impl RepositoryUrl {
    /// Normalize a raw repository location
    pub fn normalize(raw: &str) -> Self {
        let without_scheme = match raw.rfind("://") {
            Some(index) => &raw[index + 3..],
            None => raw,
        };

        let mut trimmed = without_scheme;
        while let Some(stripped) = trimmed.strip_suffix(".git") {
            trimmed = stripped;
        }

        Self(trimmed.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-readable name, generally `org/repo`
    pub fn display_name(&self) -> &str {
        DISPLAY_NAME_RE
            .captures(&self.0)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .unwrap_or(&self.0)
    }
}

impl From<String> for RepositoryUrl {
    fn from(raw: String) -> Self {
        Self::normalize(&raw)
    }
}

impl From<&str> for RepositoryUrl {
    fn from(raw: &str) -> Self {
        Self::normalize(raw)
    }
}

impl From<RepositoryUrl> for String {
    fn from(url: RepositoryUrl) -> Self {
        url.0
    }
}

impl fmt::Display for RepositoryUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
