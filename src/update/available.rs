//! Published versions of a remote repository
//!
//! This module provides the AvailableVersions sequence, newest first.

use crate::domain::SemanticVersion;
use tracing::trace;

/// Parsed tag versions sorted in descending precedence order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailableVersions {
    versions: Vec<SemanticVersion>,
}

impl AvailableVersions {
    /// Build from already parsed versions, sorting them newest first
    pub fn new(mut versions: Vec<SemanticVersion>) -> Self {
        versions.sort_by(|a, b| b.cmp(a));
        Self { versions }
    }

    /// Build from raw tag bodies, dropping the ones that do not parse
    pub fn from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let versions = tags
            .into_iter()
            .filter_map(|tag| {
                let tag = tag.as_ref();
                match SemanticVersion::parse(tag) {
                    Ok(version) => Some(version),
                    Err(e) => {
                        trace!("Dropping tag {}: {}", tag, e);
                        None
                    }
                }
            })
            .collect();
        Self::new(versions)
    }

    /// The newest version
    pub fn first(&self) -> Option<&SemanticVersion> {
        self.versions.first()
    }

    /// Newest version satisfying the predicate
    pub fn newest_where<F>(&self, predicate: F) -> Option<&SemanticVersion>
    where
        F: FnMut(&&SemanticVersion) -> bool,
    {
        self.versions.iter().find(predicate)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SemanticVersion> {
        self.versions.iter()
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}
