//! Application error types using thiserror
//!
//! Error hierarchy:
//! - VersionError: Unparsable version text (recoverable per dependency)
//! - RequirementError: Invalid requirement declaration in the project file
//! - RemoteError: Failures of the remote (git) collaborator
//! - CheckError: Evaluation failure of a single dependency
//! - ManifestError: Issues locating or parsing the project and resolved files
//! - ConfigError: Issues with the configuration file or CLI values

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Project / lockfile related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Error raised when text is not a `MAJOR.MINOR.PATCH[-prerelease][+build]` version
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    /// The text could not be parsed as a semantic version
    #[error("invalid version format '{version}'")]
    InvalidVersionFormat { version: String },
}

impl VersionError {
    /// Creates a new InvalidVersionFormat error
    pub fn invalid_format(version: impl Into<String>) -> Self {
        VersionError::InvalidVersionFormat {
            version: version.into(),
        }
    }
}

/// Errors in a declared package requirement
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequirementError {
    /// The requirement kind is not one SwiftPM knows about
    #[error("unknown requirement kind '{kind}'")]
    UnknownKind { kind: String },

    /// A field required by the kind is absent
    #[error("requirement kind '{kind}' is missing field '{field}'")]
    MissingField { kind: String, field: &'static str },

    /// A version field did not parse
    #[error("requirement field '{field}': {source}")]
    InvalidVersion {
        field: &'static str,
        #[source]
        source: VersionError,
    },
}

/// Errors raised by a remote source while listing tags or branch heads
#[derive(Error, Debug)]
pub enum RemoteError {
    /// The git executable could not be started
    #[error("failed to run git for '{location}': {source}")]
    Spawn {
        location: String,
        #[source]
        source: std::io::Error,
    },

    /// git exited unsuccessfully
    #[error("git ls-remote failed for '{location}' ({status}): {stderr}")]
    CommandFailed {
        location: String,
        status: String,
        stderr: String,
    },

    /// The requested branch does not exist on the remote
    #[error("branch '{branch}' not found on '{location}'")]
    BranchNotFound { location: String, branch: String },
}

impl RemoteError {
    /// Creates a new BranchNotFound error
    pub fn branch_not_found(location: impl Into<String>, branch: impl Into<String>) -> Self {
        RemoteError::BranchNotFound {
            location: location.into(),
            branch: branch.into(),
        }
    }
}

/// Failure while evaluating a single dependency
#[derive(Error, Debug)]
pub enum CheckError {
    /// The resolved value or a bound was not a valid version
    #[error(transparent)]
    Version(#[from] VersionError),

    /// The remote collaborator failed; passed through unchanged
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// Errors related to the Xcode project and Package.resolved files
#[derive(Error, Debug)]
pub enum ManifestError {
    /// No project path was provided
    #[error("the path to the .xcodeproj must be set")]
    XcodeprojPathMustBeSet,

    /// No Package.resolved could be found next to the project
    #[error("could not find a Package.resolved file for {path}")]
    CouldNotFindResolvedFile { path: PathBuf },

    /// Failed to read a file
    #[error("failed to read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// project.pbxproj is not a valid property list
    #[error("failed to parse project file {path}: {message}")]
    ProjectParseError { path: PathBuf, message: String },

    /// Package.resolved is not valid JSON of a known layout
    #[error("failed to parse {path}: {message}")]
    ResolvedParseError { path: PathBuf, message: String },
}

impl ManifestError {
    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new ProjectParseError
    pub fn project_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::ProjectParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new ResolvedParseError
    pub fn resolved_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::ResolvedParseError {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for the expected schema
    #[error("invalid config file {path}: {message}")]
    InvalidFile { path: PathBuf, message: String },

    /// Concurrency must be at least one
    #[error("invalid concurrency '{value}': must be at least 1")]
    InvalidConcurrency { value: usize },
}
