//! Configuration file loading and merging with CLI arguments
//!
//! The file is TOML:
//!
//! ```toml
//! check_when_exact = true
//! report_above_maximum = false
//! report_pre_releases = false
//! ignore_repos = ["https://github.com/kean/Nuke"]
//! concurrency = 4
//! ```

use crate::cli::CliArgs;
use crate::error::ConfigError;
use crate::update::PolicyConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File looked up next to the project when `--config` is not given
pub const CONFIG_FILE_NAME: &str = ".spm-updates.toml";

/// Default number of repositories queried at once
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Contents of a configuration file
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub check_when_exact: bool,
    pub report_above_maximum: bool,
    pub report_pre_releases: bool,
    pub ignore_repos: Vec<String>,
    pub concurrency: Option<usize>,
}

impl FileConfig {
    /// Parse configuration text
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::InvalidFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Read and parse a configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content, path)
    }

    /// Load the explicit file, or the default file in `project_dir` if present
    pub fn discover(explicit: Option<&Path>, project_dir: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            debug!("Using config file {}", path.display());
            return Self::load(path);
        }

        let default_path: PathBuf = project_dir.join(CONFIG_FILE_NAME);
        if default_path.is_file() {
            debug!("Using config file {}", default_path.display());
            Self::load(&default_path)
        } else {
            Ok(Self::default())
        }
    }
}

/// Effective settings of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub policy: PolicyConfig,
    pub concurrency: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            policy: PolicyConfig::default(),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl Settings {
    /// Combine file values with CLI arguments
    ///
    /// CLI flags can only turn options on; ignored repositories are appended.
    /// `--concurrency` replaces the file value.
    pub fn resolve(file: FileConfig, args: &CliArgs) -> Result<Self, ConfigError> {
        let concurrency = args
            .concurrency
            .or(file.concurrency)
            .unwrap_or(DEFAULT_CONCURRENCY);
        if concurrency == 0 {
            return Err(ConfigError::InvalidConcurrency { value: concurrency });
        }

        let policy = PolicyConfig::new()
            .with_check_when_exact(file.check_when_exact || args.check_when_exact)
            .with_report_above_maximum(file.report_above_maximum || args.report_above_maximum)
            .with_report_pre_releases(file.report_pre_releases || args.report_pre_releases)
            .with_ignored(&file.ignore_repos)
            .with_ignored(&args.ignore_repos);

        Ok(Self {
            policy,
            concurrency,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RepositoryUrl;
    use clap::Parser;
    use std::fs;

    fn args(extra: &[&str]) -> CliArgs {
        let mut argv = vec!["spm-updates", "App.xcodeproj"];
        argv.extend_from_slice(extra);
        CliArgs::parse_from(argv)
    }

    #[test]
    fn test_parse_partial_uses_defaults() {
        let config = FileConfig::parse("check_when_exact = true", Path::new("c.toml")).unwrap();
        assert!(config.check_when_exact);
        assert!(!config.report_above_maximum);
        assert!(config.ignore_repos.is_empty());
        assert_eq!(config.concurrency, None);
    }

    #[test]
    fn test_parse_full() {
        let config = FileConfig::parse(
            r#"
check_when_exact = true
report_above_maximum = true
report_pre_releases = true
ignore_repos = ["https://github.com/kean/Nuke"]
concurrency = 2
"#,
            Path::new("c.toml"),
        )
        .unwrap();
        assert!(config.report_above_maximum);
        assert!(config.report_pre_releases);
        assert_eq!(config.ignore_repos, vec!["https://github.com/kean/Nuke"]);
        assert_eq!(config.concurrency, Some(2));
    }

    #[test]
    fn test_parse_rejects_unknown_keys() {
        let err = FileConfig::parse("quiet_above_maximum = true", Path::new("c.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFile { .. }));
    }

    #[test]
    fn test_discover_default_file() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            FileConfig::discover(None, dir.path()).unwrap(),
            FileConfig::default()
        );

        fs::write(dir.path().join(CONFIG_FILE_NAME), "report_pre_releases = true").unwrap();
        let config = FileConfig::discover(None, dir.path()).unwrap();
        assert!(config.report_pre_releases);
    }

    #[test]
    fn test_discover_explicit_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let err = FileConfig::discover(Some(&missing), dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }

    #[test]
    fn test_resolve_defaults() {
        let settings = Settings::resolve(FileConfig::default(), &args(&[])).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.concurrency, DEFAULT_CONCURRENCY);
    }

    #[test]
    fn test_resolve_flags_only_turn_on() {
        let file = FileConfig {
            check_when_exact: true,
            ..Default::default()
        };
        let settings = Settings::resolve(file, &args(&["--report-above-maximum"])).unwrap();
        assert!(settings.policy.check_when_exact);
        assert!(settings.policy.report_above_maximum);
        assert!(!settings.policy.report_pre_releases);
    }

    #[test]
    fn test_resolve_appends_ignored() {
        let file = FileConfig {
            ignore_repos: vec!["https://github.com/kean/Nuke.git".to_string()],
            ..Default::default()
        };
        let settings = Settings::resolve(
            file,
            &args(&["--ignore-repo", "https://github.com/kean/Pulse"]),
        )
        .unwrap();
        assert!(settings
            .policy
            .is_ignored(&RepositoryUrl::normalize("https://github.com/kean/Nuke")));
        assert!(settings
            .policy
            .is_ignored(&RepositoryUrl::normalize("https://github.com/kean/Pulse")));
    }

    #[test]
    fn test_resolve_concurrency() {
        let file = FileConfig {
            concurrency: Some(3),
            ..Default::default()
        };
        let settings = Settings::resolve(file.clone(), &args(&[])).unwrap();
        assert_eq!(settings.concurrency, 3);

        let settings = Settings::resolve(file, &args(&["--concurrency", "5"])).unwrap();
        assert_eq!(settings.concurrency, 5);

        let file = FileConfig {
            concurrency: Some(0),
            ..Default::default()
        };
        let err = Settings::resolve(file, &args(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConcurrency { value: 0 }));
    }
}
