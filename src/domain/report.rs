//! Decision records produced by the update checker
//!
//! A report carries only data; the message text is produced by
//! [`crate::output::report_message`].

use super::{BoundField, SemanticVersion};
use serde::Serialize;
use std::fmt;

/// The limit a bounded or ranged requirement stops at
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Bound {
    /// Up to the next major or minor version
    Field(BoundField),
    /// Up to (excluding) an explicit maximum version
    MaxVersion(SemanticVersion),
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Field(field) => write!(f, "{}", field),
            Bound::MaxVersion(version) => write!(f, "{}", version),
        }
    }
}

/// Something worth telling the user about one dependency
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Report {
    /// A newer version exists but the dependency is pinned exactly
    ExactUpdate {
        name: String,
        candidate: SemanticVersion,
        pinned: String,
    },
    /// A newer version exists within the major/minor bound
    BoundedUpdate {
        name: String,
        candidate: SemanticVersion,
    },
    /// The newest version lies beyond what the requirement allows
    AboveBoundNotice {
        name: String,
        newest_overall: SemanticVersion,
        bound: Bound,
    },
    /// A newer version exists below the range maximum
    RangeUpdate {
        name: String,
        candidate: SemanticVersion,
    },
    /// The tracked branch has moved
    BranchUpdate {
        name: String,
        branch: String,
        commit: String,
    },
}

impl Report {
    /// The dependency display name this report is about
    pub fn name(&self) -> &str {
        match self {
            Report::ExactUpdate { name, .. }
            | Report::BoundedUpdate { name, .. }
            | Report::AboveBoundNotice { name, .. }
            | Report::RangeUpdate { name, .. }
            | Report::BranchUpdate { name, .. } => name,
        }
    }

    /// Returns true for notices about versions the requirement excludes
    pub fn is_notice(&self) -> bool {
        matches!(self, Report::AboveBoundNotice { .. })
    }
}
