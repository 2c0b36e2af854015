//! Pure formatting functions for UI output.
//!
//! Functions here either build strings or print them; they never read input.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::cli::CheckOutcome;
use crate::domain::{BranchRule, SnapshotConvention, Verdict};

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Build the one-line summary of a check outcome.
///
/// # Example
/// ```ignore
/// // "Branch 'main' (rule 'main') is consistent with version '2.3.0'"
/// ```
pub fn format_outcome(outcome: &CheckOutcome) -> String {
    let version = outcome.version.as_deref().unwrap_or("unknown");
    match (&outcome.verdict, &outcome.branch) {
        (Verdict::Invalid(violation), _) => violation.to_string(),
        (Verdict::Valid, Some(branch)) => match &outcome.matched_rule {
            Some(rule) => format!(
                "Branch '{}' (rule '{}') is consistent with version '{}'",
                branch, rule, version
            ),
            None => format!(
                "Branch '{}' is a non-release branch with snapshot version '{}'",
                branch, version
            ),
        },
        (Verdict::Valid, None) | (Verdict::Skipped, _) => match &outcome.version {
            Some(version) => format!("Skipped branch version check for version '{}'", version),
            None => "Skipped branch version check".to_string(),
        },
    }
}

/// Print the outcome of a check: warnings first, then the verdict.
pub fn display_outcome(outcome: &CheckOutcome) {
    for warning in &outcome.warnings {
        display_boundary_warning(warning);
    }

    let summary = format_outcome(outcome);
    match outcome.verdict {
        Verdict::Invalid(_) => display_error(&summary),
        Verdict::Valid => display_success(&summary),
        Verdict::Skipped => display_status(&summary),
    }
}

/// Display the effective rules in evaluation order.
///
/// # Arguments
/// * `rules` - Rules in priority order
/// * `snapshot` - Active snapshot convention
pub fn display_rules(rules: &[BranchRule], snapshot: &SnapshotConvention) {
    println!("{}", style("Release branch rules (first match wins):").bold());
    if rules.is_empty() {
        println!("  (none)");
    }
    for (i, rule) in rules.iter().enumerate() {
        println!("  {}. {:<10} {}", i + 1, rule.name, style(&rule.pattern).cyan());
    }
    println!("{} {}", style("Snapshot convention:").bold(), snapshot.describe());
}
