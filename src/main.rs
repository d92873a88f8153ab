//! spm-updates - Swift package update checker CLI tool
//!
//! Reads the Swift packages declared in an Xcode project, compares the
//! versions pinned in Package.resolved with the tags published by each
//! repository, and prints what could be updated.

use clap::Parser;
use spm_updates::cli::CliArgs;
use spm_updates::config::{FileConfig, Settings};
use spm_updates::error::AppError;
use spm_updates::manifest::ProjectManifest;
use spm_updates::orchestrator::Orchestrator;
use spm_updates::output::{create_formatter, OutputConfig};
use spm_updates::progress::Progress;
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(&args);

    // Run the main logic and handle errors
    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr; RUST_LOG takes precedence over the verbosity flags
fn init_tracing(args: &CliArgs) {
    let default_level = if args.verbose {
        "debug"
    } else if args.quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .init();
}

/// Load the project files and the effective settings
fn load(args: &CliArgs) -> Result<(ProjectManifest, Settings), AppError> {
    let manifest = ProjectManifest::load(&args.xcodeproj)?;
    debug!(
        "Found {} packages and {} resolved entries",
        manifest.packages.len(),
        manifest.resolved.len()
    );

    let file_config = FileConfig::discover(args.config.as_deref(), manifest.project_dir())?;
    let settings = Settings::resolve(file_config, args)?;
    Ok((manifest, settings))
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    debug!("spm-updates v{}", env!("CARGO_PKG_VERSION"));
    debug!("Project: {}", args.xcodeproj.display());

    let mut progress = Progress::new(args.show_progress());
    progress.reading(&args.xcodeproj);
    let loaded = load(&args);
    progress.finish();
    let (manifest, settings) = loaded?;

    let orchestrator = Orchestrator::new(settings);
    let summary = orchestrator.run(&manifest, args.show_progress()).await;

    // Create output formatter based on CLI options
    let output_config = OutputConfig::from_cli(args.json, args.verbose, args.quiet)
        .with_color(io::stdout().is_terminal());
    let formatter = create_formatter(output_config);

    let mut stdout = io::stdout().lock();
    formatter.format(&summary, &mut stdout)?;
    stdout.flush()?;

    // Partial success: some packages could not be checked
    if summary.has_failures() {
        Ok(ExitCode::from(2))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
