//! Text output formatter for human-readable display
//!
//! This module provides:
//! - Report messages, updates and notices marked differently
//! - Failed package display with the error
//! - Skipped package display with reasons (verbose)
//! - Summary line with counts

use super::message::report_message;
use crate::domain::{CheckOutcome, CheckSummary, Report};
use crate::output::{OutputFormatter, Verbosity};
use colored::Colorize;
use std::io::Write;

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            color: true,
        }
    }

    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    /// Write one report line; the message's own trailing newline is not doubled
    fn format_report_line(&self, report: &Report, writer: &mut dyn Write) -> std::io::Result<()> {
        let message = report_message(report);
        let message = message.trim_end_matches('\n');

        if self.verbosity == Verbosity::Quiet {
            return writeln!(writer, "{}", message);
        }

        if self.color {
            let marker = if report.is_notice() {
                "ℹ".blue()
            } else {
                "↑".green().bold()
            };
            writeln!(writer, "  {} {}", marker, message)
        } else {
            let marker = if report.is_notice() { "i" } else { "^" };
            writeln!(writer, "  {} {}", marker, message)
        }
    }

    fn format_failures(&self, summary: &CheckSummary, writer: &mut dyn Write) -> std::io::Result<()> {
        let failures: Vec<_> = summary.failures().collect();
        if failures.is_empty() {
            return Ok(());
        }

        writeln!(writer)?;
        if self.color {
            writeln!(writer, "{}:", "Failed".red().bold())?;
        } else {
            writeln!(writer, "Failed:")?;
        }
        for outcome in failures {
            if let CheckOutcome::Failed { url, error } = outcome {
                if self.color {
                    writeln!(writer, "  {} {}: {}", "✗".red(), url.display_name(), error)?;
                } else {
                    writeln!(writer, "  - {}: {}", url.display_name(), error)?;
                }
            }
        }
        Ok(())
    }

    fn format_skips(&self, summary: &CheckSummary, writer: &mut dyn Write) -> std::io::Result<()> {
        let skips: Vec<_> = summary.skips().collect();
        if skips.is_empty() {
            return Ok(());
        }

        writeln!(writer)?;
        if self.color {
            writeln!(writer, "{}", "Skipped:".dimmed())?;
        } else {
            writeln!(writer, "Skipped:")?;
        }
        let width = skips
            .iter()
            .map(|o| o.url().display_name().len())
            .max()
            .unwrap_or(0);
        for outcome in skips {
            if let CheckOutcome::Skipped { url, reason } = outcome {
                let line = format!("  {:width$} ({})", url.display_name(), reason, width = width);
                if self.color {
                    writeln!(writer, "{}", line.dimmed())?;
                } else {
                    writeln!(writer, "{}", line)?;
                }
            }
        }
        Ok(())
    }

    fn format_summary(&self, summary: &CheckSummary, writer: &mut dyn Write) -> std::io::Result<()> {
        let notices = summary.reports().filter(|r| r.is_notice()).count();
        let updates = summary.total_reports() - notices;
        let skipped = summary.skips().count();
        let failed = summary.failures().count();

        writeln!(writer)?;
        if updates == 0 && notices == 0 && failed == 0 {
            let text = "All packages are up to date";
            if self.color {
                writeln!(writer, "{} {}", "✓".green(), text.green())?;
            } else {
                writeln!(writer, "{}", text)?;
            }
            return Ok(());
        }

        let text = format!(
            "{} {}, {} {}, {} skipped, {} failed",
            updates,
            if updates == 1 { "update" } else { "updates" },
            notices,
            if notices == 1 { "notice" } else { "notices" },
            skipped,
            failed
        );
        if self.color {
            writeln!(writer, "{} {}", "Summary:".bold(), text)
        } else {
            writeln!(writer, "Summary: {}", text)
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, summary: &CheckSummary, writer: &mut dyn Write) -> std::io::Result<()> {
        // Quiet mode prints the bare messages and nothing else
        if self.verbosity == Verbosity::Quiet {
            for report in summary.reports() {
                self.format_report_line(report, writer)?;
            }
            return Ok(());
        }

        if summary.total_reports() > 0 {
            if self.color {
                writeln!(writer, "{}", "Package updates".bold())?;
            } else {
                writeln!(writer, "Package updates")?;
            }
            for report in summary.reports() {
                self.format_report_line(report, writer)?;
            }
        }

        self.format_failures(summary, writer)?;
        if self.verbosity == Verbosity::Verbose {
            self.format_skips(summary, writer)?;
        }
        self.format_summary(summary, writer)
    }
}
