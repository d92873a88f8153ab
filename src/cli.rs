//! CLI argument parsing module for spm-updates

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Parse a concurrency limit, which must be at least 1
fn parse_concurrency(s: &str) -> Result<usize, String> {
    let value: usize = s
        .trim()
        .parse()
        .map_err(|_| format!("invalid number: {}", s))?;
    if value == 0 {
        return Err("concurrency must be at least 1".to_string());
    }
    Ok(value)
}

/// Swift Package Manager dependency update checker
#[derive(Parser, Debug, Clone)]
#[command(
    name = "spm-updates",
    version,
    about = "Check the Swift packages of an Xcode project for newer versions"
)]
pub struct CliArgs {
    /// Path to the .xcodeproj bundle
    pub xcodeproj: PathBuf,

    // Policy options
    /// Also report newer versions for packages pinned to an exact version
    #[arg(long)]
    pub check_when_exact: bool,

    /// Report versions beyond the configured major/minor bound or range maximum
    #[arg(long)]
    pub report_above_maximum: bool,

    /// Consider pre-release versions as update candidates
    #[arg(long)]
    pub report_pre_releases: bool,

    /// Repository URL to skip entirely (can be specified multiple times)
    #[arg(long = "ignore-repo", value_name = "URL", action = ArgAction::Append)]
    pub ignore_repos: Vec<String>,

    // Configuration
    /// Configuration file (default: .spm-updates.toml next to the project)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Maximum number of repositories queried at once
    #[arg(long, value_name = "N", value_parser = parse_concurrency)]
    pub concurrency: Option<usize>,

    // Output options
    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long)]
    pub quiet: bool,
}

impl CliArgs {
    /// Whether a progress indicator may be drawn
    pub fn show_progress(&self) -> bool {
        !self.quiet && !self.json
    }
}
