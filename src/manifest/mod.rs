//! Xcode project and Package.resolved loading
//!
//! This module provides functionality to:
//! - Read the Swift package references declared in an `.xcodeproj`
//! - Locate and merge the project's Package.resolved files
//! - Parse the OpenStep property list format of `project.pbxproj`

mod plist;
mod resolved;
mod xcodeproj;

pub use plist::{PlistError, PlistValue};
pub use resolved::{load_resolved, parse_resolved, resolved_file_candidates, ResolvedVersions};
pub use xcodeproj::{load_project, parse_project, DeclaredPackage, ProjectPackages};

use crate::error::ManifestError;
use std::path::{Path, PathBuf};

/// Declarations and resolutions of one project
#[derive(Debug, Clone, Default)]
pub struct ProjectManifest {
    /// Path to the `.xcodeproj` bundle
    pub path: PathBuf,
    /// Declared packages in declaration order
    pub packages: ProjectPackages,
    /// Resolved values from Package.resolved
    pub resolved: ResolvedVersions,
}

impl ProjectManifest {
    /// Load both the project file and its resolved files
    pub fn load(xcodeproj: &Path) -> Result<Self, ManifestError> {
        if xcodeproj.as_os_str().is_empty() {
            return Err(ManifestError::XcodeprojPathMustBeSet);
        }

        let packages = load_project(xcodeproj)?;
        let resolved = load_resolved(xcodeproj)?;

        Ok(Self {
            path: xcodeproj.to_path_buf(),
            packages,
            resolved,
        })
    }

    /// Directory containing the `.xcodeproj` bundle
    pub fn project_dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}
