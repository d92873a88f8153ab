//! Report messages
//!
//! One fixed template per report kind. Notice and exact-version messages end
//! with a newline, the others do not.

use crate::domain::Report;

/// Render the message for a report
pub fn report_message(report: &Report) -> String {
    match report {
        Report::ExactUpdate {
            name,
            candidate,
            pinned,
        } => format!(
            "Newer version of {}: {} (but this package is set to exact version {})\n",
            name, candidate, pinned
        ),
        Report::BoundedUpdate { name, candidate } | Report::RangeUpdate { name, candidate } => {
            format!("Newer version of {}: {}", name, candidate)
        }
        Report::AboveBoundNotice {
            name,
            newest_overall,
            bound,
        } => format!(
            "Newest version of {}: {} (but this package is configured up to the next {} version)\n",
            name, newest_overall, bound
        ),
        Report::BranchUpdate {
            name,
            branch,
            commit,
        } => format!("Newer commit available for {} ({}): {}", name, branch, commit),
    }
}
