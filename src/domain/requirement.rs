//! Declared package requirement kinds
//!
//! Mirrors the `requirement` dictionary of an `XCRemoteSwiftPackageReference`:
//! - `exactVersion`: `version = 1.2.3;`
//! - `upToNextMajorVersion` / `upToNextMinorVersion`: `minimumVersion = 1.2.3;`
//! - `versionRange`: `minimumVersion` and `maximumVersion`
//! - `branch`: `branch = main;`
//! - `revision`: `revision = <sha>;`

use super::SemanticVersion;
use crate::error::RequirementError;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Which version component a bounded requirement keeps fixed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundField {
    Major,
    Minor,
}

impl BoundField {
    /// Extract this component from a version
    pub fn of(&self, version: &SemanticVersion) -> u64 {
        match self {
            BoundField::Major => version.major(),
            BoundField::Minor => version.minor(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BoundField::Major => "major",
            BoundField::Minor => "minor",
        }
    }
}

impl fmt::Display for BoundField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The policy governing how far a dependency may drift
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Requirement {
    ExactVersion {
        version: SemanticVersion,
    },
    UpToNextMajorVersion {
        min_version: SemanticVersion,
    },
    UpToNextMinorVersion {
        min_version: SemanticVersion,
    },
    /// `min_version < max_version` is assumed, not checked
    VersionRange {
        min_version: SemanticVersion,
        max_version: SemanticVersion,
    },
    Branch {
        name: String,
    },
    Commit {
        revision: Option<String>,
    },
}

impl Requirement {
    /// Build a requirement from the raw key/value pairs of a project file
    pub fn from_fields(fields: &BTreeMap<String, String>) -> Result<Self, RequirementError> {
        let kind = fields
            .get("kind")
            .ok_or_else(|| RequirementError::MissingField {
                kind: String::new(),
                field: "kind",
            })?;

        let text = |field| required_field(fields, kind, field);
        let version = |field| version_field(fields, kind, field);

        match kind.as_str() {
            "exactVersion" => Ok(Requirement::ExactVersion {
                version: version("version")?,
            }),
            "upToNextMajorVersion" => Ok(Requirement::UpToNextMajorVersion {
                min_version: version("minimumVersion")?,
            }),
            "upToNextMinorVersion" => Ok(Requirement::UpToNextMinorVersion {
                min_version: version("minimumVersion")?,
            }),
            "versionRange" | "range" => Ok(Requirement::VersionRange {
                min_version: version("minimumVersion")?,
                max_version: version("maximumVersion")?,
            }),
            "branch" => Ok(Requirement::Branch {
                name: text("branch")?.to_string(),
            }),
            "revision" | "commit" => Ok(Requirement::Commit {
                revision: fields.get("revision").cloned(),
            }),
            other => Err(RequirementError::UnknownKind {
                kind: other.to_string(),
            }),
        }
    }

    /// The project-file spelling of this kind
    pub fn kind_name(&self) -> &'static str {
        match self {
            Requirement::ExactVersion { .. } => "exactVersion",
            Requirement::UpToNextMajorVersion { .. } => "upToNextMajorVersion",
            Requirement::UpToNextMinorVersion { .. } => "upToNextMinorVersion",
            Requirement::VersionRange { .. } => "versionRange",
            Requirement::Branch { .. } => "branch",
            Requirement::Commit { .. } => "revision",
        }
    }

    /// Returns true for commit-pinned requirements, which are never checked
    pub fn is_commit(&self) -> bool {
        matches!(self, Requirement::Commit { .. })
    }
}

fn required_field<'a>(
    fields: &'a BTreeMap<String, String>,
    kind: &str,
    field: &'static str,
) -> Result<&'a str, RequirementError> {
    fields
        .get(field)
        .map(String::as_str)
        .ok_or_else(|| RequirementError::MissingField {
            kind: kind.to_string(),
            field,
        })
}

fn version_field(
    fields: &BTreeMap<String, String>,
    kind: &str,
    field: &'static str,
) -> Result<SemanticVersion, RequirementError> {
    SemanticVersion::parse(required_field(fields, kind, field)?)
        .map_err(|source| RequirementError::InvalidVersion { field, source })
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Requirement::ExactVersion { version } => write!(f, "exactly {}", version),
            Requirement::UpToNextMajorVersion { min_version } => {
                write!(f, "up to next major from {}", min_version)
            }
            Requirement::UpToNextMinorVersion { min_version } => {
                write!(f, "up to next minor from {}", min_version)
            }
            Requirement::VersionRange {
                min_version,
                max_version,
            } => write!(f, "{}..<{}", min_version, max_version),
            Requirement::Branch { name } => write!(f, "branch {}", name),
            Requirement::Commit { revision } => match revision {
                Some(revision) => write!(f, "revision {}", revision),
                None => write!(f, "revision"),
            },
        }
    }
}
