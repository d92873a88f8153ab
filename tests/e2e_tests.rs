//! End-to-end tests for the spm-updates CLI
//!
//! These tests verify:
//! - Argument validation and help output
//! - Exit codes for fatal errors and clean runs
//! - JSON output schema
//!
//! Only projects whose packages are all skipped are used, so no test
//! reaches the network.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Command for the compiled binary with a clean logging environment
fn spm_updates() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_spm-updates"));
    cmd.env_remove("RUST_LOG");
    cmd
}

const PBXPROJ: &str = r#"// !$*UTF8*$!
{
	archiveVersion = 1;
	classes = {
	};
	objectVersion = 56;
	objects = {

/* Begin XCRemoteSwiftPackageReference section */
		0C0000000000000000000001 /* XCRemoteSwiftPackageReference "SwiftLint" */ = {
			isa = XCRemoteSwiftPackageReference;
			repositoryURL = "https://github.com/realm/SwiftLint";
			requirement = {
				kind = revision;
				revision = 1111111111111111111111111111111111111111;
			};
		};
		0C0000000000000000000002 /* XCRemoteSwiftPackageReference "Nuke" */ = {
			isa = XCRemoteSwiftPackageReference;
			repositoryURL = "https://github.com/kean/Nuke.git";
			requirement = {
				kind = upToNextMajorVersion;
				minimumVersion = 12.0.0;
			};
		};
		0C0000000000000000000003 /* XCRemoteSwiftPackageReference "Pulse" */ = {
			isa = XCRemoteSwiftPackageReference;
			repositoryURL = "https://github.com/kean/Pulse";
			requirement = {
				kind = upToNextMajorVersion;
				minimumVersion = 4.0.0;
			};
		};
/* End XCRemoteSwiftPackageReference section */
	};
	rootObject = 0C0000000000000000000000 /* Project object */;
}
"#;

// Pulse is deliberately left unresolved
const RESOLVED: &str = r#"{
  "pins" : [
    {
      "identity" : "swiftlint",
      "kind" : "remoteSourceControl",
      "location" : "https://github.com/realm/SwiftLint",
      "state" : {
        "revision" : "1111111111111111111111111111111111111111"
      }
    },
    {
      "identity" : "nuke",
      "kind" : "remoteSourceControl",
      "location" : "https://github.com/kean/Nuke",
      "state" : {
        "revision" : "a002b7fd786f2df2ed4333fe73a9727499fd9d97",
        "version" : "12.1.6"
      }
    }
  ],
  "version" : 2
}"#;

const IGNORE_NUKE: &[&str] = &["--ignore-repo", "https://github.com/kean/Nuke"];

/// Create `App.xcodeproj`, optionally with its Package.resolved
fn create_test_project(with_resolved: bool) -> (TempDir, PathBuf) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let xcodeproj = temp_dir.path().join("App.xcodeproj");
    fs::create_dir_all(&xcodeproj).unwrap();
    fs::write(xcodeproj.join("project.pbxproj"), PBXPROJ).unwrap();

    if with_resolved {
        write_resolved(&xcodeproj, RESOLVED);
    }
    (temp_dir, xcodeproj)
}

fn write_resolved(xcodeproj: &Path, content: &str) {
    let dir = xcodeproj
        .join("project.xcworkspace")
        .join("xcshareddata")
        .join("swiftpm");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("Package.resolved"), content).unwrap();
}

mod arguments {
    use super::*;

    #[test]
    fn test_help() {
        spm_updates()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage"))
            .stdout(predicate::str::contains("--report-above-maximum"))
            .stdout(predicate::str::contains("--ignore-repo"));
    }

    #[test]
    fn test_version() {
        spm_updates()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_project_argument_is_required() {
        spm_updates()
            .assert()
            .failure()
            .stderr(predicate::str::contains("<XCODEPROJ>"));
    }

    #[test]
    fn test_zero_concurrency_is_rejected() {
        let (_dir, xcodeproj) = create_test_project(true);
        spm_updates()
            .arg(&xcodeproj)
            .args(["--concurrency", "0"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("at least 1"));
    }
}

mod fatal_errors {
    use super::*;

    #[test]
    fn test_missing_project_exits_1() {
        let temp_dir = tempfile::tempdir().unwrap();
        spm_updates()
            .arg(temp_dir.path().join("Missing.xcodeproj"))
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Error:"))
            .stderr(predicate::str::contains("project.pbxproj"));
    }

    #[test]
    fn test_missing_resolved_file_exits_1() {
        let (_dir, xcodeproj) = create_test_project(false);
        spm_updates()
            .arg(&xcodeproj)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("could not find a Package.resolved file"));
    }

    #[test]
    fn test_malformed_resolved_file_exits_1() {
        let (_dir, xcodeproj) = create_test_project(false);
        write_resolved(&xcodeproj, "{ not json");
        spm_updates()
            .arg(&xcodeproj)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("failed to parse"));
    }

    #[test]
    fn test_invalid_config_file_exits_1() {
        let (dir, xcodeproj) = create_test_project(true);
        let config = dir.path().join("ci.toml");
        fs::write(&config, "unknown_option = true\n").unwrap();

        spm_updates()
            .arg(&xcodeproj)
            .arg("--config")
            .arg(&config)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("invalid config file"));
    }
}

mod clean_runs {
    use super::*;

    #[test]
    fn test_all_skipped_is_up_to_date() {
        let (_dir, xcodeproj) = create_test_project(true);
        spm_updates()
            .arg(&xcodeproj)
            .args(IGNORE_NUKE)
            .assert()
            .success()
            .stdout(predicate::str::contains("All packages are up to date"))
            .stderr(predicate::str::contains(
                "Unable to locate the current version for kean/Pulse",
            ));
    }

    #[test]
    fn test_quiet_prints_nothing() {
        let (_dir, xcodeproj) = create_test_project(true);
        spm_updates()
            .arg(&xcodeproj)
            .args(IGNORE_NUKE)
            .arg("--quiet")
            .assert()
            .success()
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::is_empty());
    }

    #[test]
    fn test_verbose_lists_skipped_packages() {
        let (_dir, xcodeproj) = create_test_project(true);
        spm_updates()
            .arg(&xcodeproj)
            .args(IGNORE_NUKE)
            .arg("--verbose")
            .assert()
            .success()
            .stdout(predicate::str::contains("Skipped:"))
            .stdout(predicate::str::contains("realm/SwiftLint (pinned to a revision)"))
            .stdout(predicate::str::contains("kean/Nuke       (ignored)"))
            .stdout(predicate::str::contains("kean/Pulse      (no resolved version)"));
    }

    #[test]
    fn test_config_file_next_to_project() {
        let (dir, xcodeproj) = create_test_project(true);
        fs::write(
            dir.path().join(".spm-updates.toml"),
            "ignore_repos = [\"https://github.com/kean/Nuke.git\"]\n",
        )
        .unwrap();

        spm_updates()
            .arg(&xcodeproj)
            .assert()
            .success()
            .stdout(predicate::str::contains("All packages are up to date"));
    }

    #[test]
    fn test_json_output_schema() {
        let (_dir, xcodeproj) = create_test_project(true);
        let output = spm_updates()
            .arg(&xcodeproj)
            .args(IGNORE_NUKE)
            .arg("--json")
            .output()
            .unwrap();
        assert!(output.status.success());

        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["summary"]["packages"], 3);
        assert_eq!(json["summary"]["reports"], 0);
        assert_eq!(json["summary"]["failed"], 0);
        assert!(json["reports"].as_array().unwrap().is_empty());

        let reasons: Vec<_> = json["skipped"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["reason"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(
            reasons,
            vec!["commit_pinned", "ignored", "missing_resolution"]
        );
    }
}
