//! Declared Swift packages of an Xcode project
//!
//! Reads `<project>.xcodeproj/project.pbxproj` and collects every
//! `XCRemoteSwiftPackageReference` object in file order.

use super::plist::{self, PlistValue};
use crate::domain::{Dependency, RepositoryUrl, Requirement};
use crate::error::{ManifestError, RequirementError};
use indexmap::IndexMap;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

const REMOTE_PACKAGE_ISA: &str = "XCRemoteSwiftPackageReference";

/// A package reference as declared in the project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredPackage {
    /// Repository location exactly as written
    pub location: String,
    /// The requirement, or why it could not be understood
    pub requirement: Result<Requirement, RequirementError>,
}

impl DeclaredPackage {
    /// The dependency this declaration describes, if its requirement is valid
    pub fn dependency(&self) -> Result<Dependency, RequirementError> {
        self.requirement
            .clone()
            .map(|requirement| Dependency::new(self.location.clone(), requirement))
    }
}

/// Declared packages keyed by normalized URL, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPackages {
    packages: IndexMap<RepositoryUrl, DeclaredPackage>,
}

impl ProjectPackages {
    /// Add a declaration. A repeated URL replaces the earlier value but keeps its position.
    pub fn insert(&mut self, package: DeclaredPackage) {
        let url = RepositoryUrl::normalize(&package.location);
        self.packages.insert(url, package);
    }

    pub fn get(&self, url: &RepositoryUrl) -> Option<&DeclaredPackage> {
        self.packages.get(url)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RepositoryUrl, &DeclaredPackage)> {
        self.packages.iter()
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

/// Load the declared packages of an `.xcodeproj` bundle
pub fn load_project(xcodeproj: &Path) -> Result<ProjectPackages, ManifestError> {
    let pbxproj = xcodeproj.join("project.pbxproj");
    debug!("Reading {}", pbxproj.display());

    let content = std::fs::read_to_string(&pbxproj)
        .map_err(|e| ManifestError::read_error(&pbxproj, e))?;
    parse_project(&content, &pbxproj)
}

/// Parse the contents of a `project.pbxproj` file
pub fn parse_project(content: &str, path: &Path) -> Result<ProjectPackages, ManifestError> {
    let root = plist::parse(content)
        .map_err(|e| ManifestError::project_parse_error(path, e.to_string()))?;

    let objects = root
        .get("objects")
        .and_then(PlistValue::as_dict)
        .ok_or_else(|| ManifestError::project_parse_error(path, "missing 'objects' dictionary"))?;

    let mut packages = ProjectPackages::default();
    for (id, object) in objects {
        if object.get("isa").and_then(PlistValue::as_str) != Some(REMOTE_PACKAGE_ISA) {
            continue;
        }

        let Some(location) = object.get("repositoryURL").and_then(PlistValue::as_str) else {
            warn!("Package reference {} has no repositoryURL, ignoring", id);
            continue;
        };

        let requirement = Requirement::from_fields(&requirement_fields(object.get("requirement")));
        if let Err(e) = &requirement {
            warn!("Invalid requirement for {}: {}", location, e);
        }

        packages.insert(DeclaredPackage {
            location: location.to_string(),
            requirement,
        });
    }

    debug!("{} package references declared", packages.len());
    Ok(packages)
}

/// Flatten the string entries of a requirement dictionary
fn requirement_fields(requirement: Option<&PlistValue>) -> BTreeMap<String, String> {
    requirement
        .and_then(PlistValue::as_dict)
        .map(|dict| {
            dict.iter()
                .filter_map(|(key, value)| value.as_str().map(|v| (key.clone(), v.to_string())))
                .collect()
        })
        .unwrap_or_default()
}
