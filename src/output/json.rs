//! JSON output formatter for machine processing
//!
//! This module provides:
//! - JSON serialization of every report with its rendered message
//! - Skipped and failed packages with their reasons

use super::message::report_message;
use crate::domain::{CheckOutcome, CheckSummary, Report, SkipReason};
use crate::output::OutputFormatter;
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
#[derive(Debug, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self
    }
}

/// JSON representation of the full result
#[derive(Serialize)]
struct JsonOutput<'a> {
    /// Summary statistics
    summary: JsonSummary,
    /// Reports in declaration order
    reports: Vec<JsonReport<'a>>,
    /// Packages that were not evaluated
    skipped: Vec<JsonSkip<'a>>,
    /// Packages whose check failed
    failed: Vec<JsonFailure<'a>>,
}

/// JSON representation of summary statistics
#[derive(Serialize)]
struct JsonSummary {
    packages: usize,
    reports: usize,
    skipped: usize,
    failed: usize,
}

/// A report with its message text
#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    report: &'a Report,
    message: String,
}

#[derive(Serialize)]
struct JsonSkip<'a> {
    url: &'a str,
    name: &'a str,
    reason: &'a SkipReason,
}

#[derive(Serialize)]
struct JsonFailure<'a> {
    url: &'a str,
    name: &'a str,
    error: &'a str,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, summary: &CheckSummary, writer: &mut dyn Write) -> std::io::Result<()> {
        let reports: Vec<JsonReport> = summary
            .reports()
            .map(|report| JsonReport {
                report,
                message: report_message(report).trim_end().to_string(),
            })
            .collect();

        let skipped: Vec<JsonSkip> = summary
            .outcomes
            .iter()
            .filter_map(|outcome| match outcome {
                CheckOutcome::Skipped { url, reason } => Some(JsonSkip {
                    url: url.as_str(),
                    name: url.display_name(),
                    reason,
                }),
                _ => None,
            })
            .collect();

        let failed: Vec<JsonFailure> = summary
            .outcomes
            .iter()
            .filter_map(|outcome| match outcome {
                CheckOutcome::Failed { url, error } => Some(JsonFailure {
                    url: url.as_str(),
                    name: url.display_name(),
                    error,
                }),
                _ => None,
            })
            .collect();

        let output = JsonOutput {
            summary: JsonSummary {
                packages: summary.total_dependencies(),
                reports: reports.len(),
                skipped: skipped.len(),
                failed: failed.len(),
            },
            reports,
            skipped,
            failed,
        };

        let json = serde_json::to_string_pretty(&output)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        writeln!(writer, "{}", json)
    }
}
