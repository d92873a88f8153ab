//! Declared package dependency

use super::{Requirement, RepositoryUrl};
use serde::Serialize;
use std::fmt;

/// A remote Swift package declared by the project
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dependency {
    /// Normalized repository URL, used as the lookup key
    pub url: RepositoryUrl,
    /// Repository location exactly as written in the project, passed to git
    pub location: String,
    /// Version policy
    pub requirement: Requirement,
}

impl Dependency {
    /// Creates a new dependency from a raw repository location
    pub fn new(location: impl Into<String>, requirement: Requirement) -> Self {
        let location = location.into();
        Self {
            url: RepositoryUrl::normalize(&location),
            location,
            requirement,
        }
    }

    /// Name used in reports, generally `org/repo`
    pub fn name(&self) -> &str {
        self.url.display_name()
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.requirement)
    }
}
