//! Package.resolved lookup and parsing
//!
//! Two layouts exist:
//! - version 1: `{"object": {"pins": [{"repositoryURL": ..., "state": {...}}]}}`
//! - version 2 and 3: `{"pins": [{"location": ..., "state": {...}}]}`
//!
//! The resolved value of a pin is `state.version`, falling back to `state.revision`.

use crate::domain::RepositoryUrl;
use crate::error::ManifestError;
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

const RESOLVED_SUBPATH: [&str; 3] = ["xcshareddata", "swiftpm", "Package.resolved"];

#[derive(Debug, Deserialize)]
struct ResolvedFile {
    #[serde(default)]
    pins: Option<Vec<Pin>>,
    #[serde(default)]
    object: Option<ResolvedObject>,
}

#[derive(Debug, Deserialize)]
struct ResolvedObject {
    pins: Vec<Pin>,
}

#[derive(Debug, Deserialize)]
struct Pin {
    #[serde(alias = "repositoryURL")]
    location: String,
    state: PinState,
}

#[derive(Debug, Deserialize)]
struct PinState {
    version: Option<String>,
    revision: Option<String>,
}

/// Resolved values keyed by normalized URL
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedVersions {
    entries: IndexMap<RepositoryUrl, String>,
}

impl ResolvedVersions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, url: RepositoryUrl, value: impl Into<String>) {
        self.entries.insert(url, value.into());
    }

    /// Resolved version or revision for a repository
    pub fn get(&self, url: &RepositoryUrl) -> Option<&str> {
        self.entries.get(url).map(String::as_str)
    }

    /// Merge another set of resolutions, its entries win
    pub fn merge(&mut self, other: ResolvedVersions) {
        self.entries.extend(other.entries);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Candidate Package.resolved locations for a project, in search order
///
/// The sibling workspace (`Foo.xcworkspace` next to `Foo.xcodeproj`) is only
/// considered when it exists.
pub fn resolved_file_candidates(xcodeproj: &Path) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    let workspace = xcodeproj.with_extension("xcworkspace");
    if workspace.as_path() != xcodeproj && workspace.is_dir() {
        candidates.push(RESOLVED_SUBPATH.iter().fold(workspace, |p, s| p.join(s)));
    }

    let embedded = xcodeproj.join("project.xcworkspace");
    candidates.push(RESOLVED_SUBPATH.iter().fold(embedded, |p, s| p.join(s)));

    candidates
}

/// Find and merge every Package.resolved belonging to the project
pub fn load_resolved(xcodeproj: &Path) -> Result<ResolvedVersions, ManifestError> {
    let mut resolved = ResolvedVersions::new();
    let mut found = false;

    for candidate in resolved_file_candidates(xcodeproj) {
        if !candidate.is_file() {
            debug!("No resolved file at {}", candidate.display());
            continue;
        }
        debug!("Reading {}", candidate.display());

        let content = std::fs::read_to_string(&candidate)
            .map_err(|e| ManifestError::read_error(&candidate, e))?;
        resolved.merge(parse_resolved(&content, &candidate)?);
        found = true;
    }

    if !found {
        return Err(ManifestError::CouldNotFindResolvedFile {
            path: xcodeproj.to_path_buf(),
        });
    }
    Ok(resolved)
}

/// Parse the contents of a Package.resolved file
pub fn parse_resolved(content: &str, path: &Path) -> Result<ResolvedVersions, ManifestError> {
    let file: ResolvedFile = serde_json::from_str(content)
        .map_err(|e| ManifestError::resolved_parse_error(path, e.to_string()))?;

    let pins = match (file.pins, file.object) {
        (Some(pins), _) => pins,
        (None, Some(object)) => object.pins,
        (None, None) => {
            return Err(ManifestError::resolved_parse_error(
                path,
                "no 'pins' or 'object.pins' entry",
            ));
        }
    };

    let mut resolved = ResolvedVersions::new();
    for pin in pins {
        match pin.state.version.or(pin.state.revision) {
            Some(value) => resolved.insert(RepositoryUrl::normalize(&pin.location), value),
            None => debug!("Pin {} has neither version nor revision", pin.location),
        }
    }
    Ok(resolved)
}
