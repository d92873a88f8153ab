//! Progress display while a project is read and its packages are checked
//!
//! Draws on stderr with indicatif. Nothing is drawn when disabled or when
//! stderr is not a terminal.

use crate::domain::CheckOutcome;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::path::Path;
use std::time::Duration;

const TICKS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// Progress of one run
pub struct Progress {
    enabled: bool,
    bar: Option<ProgressBar>,
    /// Reports seen so far, shown next to the bar
    reports: usize,
}

impl Progress {
    /// Create a progress display, active only on an interactive stderr
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: enabled && std::io::stderr().is_terminal(),
            bar: None,
            reports: 0,
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            bar: None,
            reports: 0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Spinner while the project and its resolved files are read
    pub fn reading(&mut self, xcodeproj: &Path) {
        if !self.enabled {
            return;
        }

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .tick_chars(TICKS)
                .template("{spinner:.cyan} Reading {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        let name = xcodeproj
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| xcodeproj.display().to_string());
        spinner.set_message(name);
        spinner.enable_steady_tick(Duration::from_millis(80));
        self.bar = Some(spinner);
    }

    /// Bar over the packages about to be checked
    pub fn checking(&mut self, packages: usize) {
        self.finish();
        if !self.enabled || packages == 0 {
            return;
        }

        let bar = ProgressBar::new(packages as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .tick_chars(TICKS)
                .template("{spinner:.cyan} Checking packages [{bar:30.cyan/blue}] {pos}/{len} {prefix} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓▒░"),
        );
        bar.enable_steady_tick(Duration::from_millis(100));
        self.bar = Some(bar);
    }

    /// Show which package is being waited on
    pub fn waiting_on(&self, name: &str) {
        if let Some(bar) = &self.bar {
            bar.set_message(name.to_string());
        }
    }

    /// Record a finished package
    pub fn checked(&mut self, outcome: &CheckOutcome) {
        self.reports += outcome.reports().len();
        if let Some(bar) = &self.bar {
            if self.reports > 0 {
                bar.set_prefix(format!("({} found)", self.reports));
            }
            bar.inc(1);
        }
    }

    /// Number of reports recorded through `checked`
    pub fn reports(&self) -> usize {
        self.reports
    }

    /// Remove whatever is drawn
    pub fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}
