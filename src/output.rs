//! Output formatting for human and JSON modes
//!
//! Every result type renders either as human-readable text or as pretty JSON,
//! selected by [`OutputMode`].

use colored::Colorize;
use serde::Serialize;

use crate::core::ErrorKind;
use crate::core::models::{Assignment, BulkOperationResult, Warning};
use crate::core::services::ReconcileReport;

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// A result that can be printed in either mode
pub trait Render: Serialize {
    /// Print as human-readable text
    fn render_human(&self);

    /// Render the result based on output mode
    fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => {
                println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
            },
        }
    }
}

fn print_warnings(warnings: &[Warning]) {
    for w in warnings {
        println!("  {} {w}", "warning:".yellow());
    }
}

/// Result of a bulk command
#[derive(Debug, Serialize)]
pub struct BulkReport {
    /// Operation name (e.g. "setStatus")
    pub operation: String,
    /// The executor's result
    #[serde(flatten)]
    pub result: BulkOperationResult,
}

impl BulkReport {
    /// One-line summary without colors
    #[must_use]
    pub fn summary_line(&self) -> String {
        let r = &self.result;
        if r.error_count == 0 {
            format!("{}: {} processed ({})", self.operation, r.processed_count, r.strategy)
        } else {
            format!(
                "{}: {} processed, {} failed ({})",
                self.operation, r.processed_count, r.error_count, r.strategy
            )
        }
    }
}

impl Render for BulkReport {
    fn render_human(&self) {
        let marker = if self.result.success {
            "OK".green().bold()
        } else {
            "PARTIAL".red().bold()
        };
        println!("{marker} {}", self.summary_line());
        for e in &self.result.errors {
            println!("  {} {e}", "error:".red());
        }
        print_warnings(&self.result.warnings);
    }
}

/// Result of a single assignment mutation
#[derive(Debug, Serialize)]
pub struct AssignmentReport {
    /// What was done ("created", "updated", "deleted")
    pub action: String,
    /// The assignment (as it was before deletion, for "deleted")
    pub assignment: Assignment,
    /// Set when the follow-up asset status write failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<Warning>,
}

impl Render for AssignmentReport {
    fn render_human(&self) {
        let a = &self.assignment;
        println!(
            "{} assignment {} ({}): asset {} -> {}",
            self.action.green(),
            a.id,
            a.status,
            a.asset_id,
            a.assigned_to_id
        );
        print_warnings(self.warning.as_slice());
    }
}

/// Result of listing assignments
#[derive(Debug, Serialize)]
pub struct AssignmentList {
    /// Matching assignments
    pub assignments: Vec<Assignment>,
}

impl Render for AssignmentList {
    fn render_human(&self) {
        if self.assignments.is_empty() {
            println!("No assignments found.");
            return;
        }

        for a in &self.assignments {
            let urgent = if a.is_urgent { " [URGENT]" } else { "" };
            println!(
                "  [{}] {} asset {} -> {} (since {}){urgent}",
                a.status,
                a.id,
                a.asset_id,
                a.assigned_to_id,
                a.assignment_date.format("%Y-%m-%d")
            );
        }
    }
}

impl Render for ReconcileReport {
    fn render_human(&self) {
        println!(
            "Checked {} asset(s), repaired {}, {} failed",
            self.checked,
            self.repaired.len(),
            self.errors.len()
        );
        for r in &self.repaired {
            println!("  {} {}: {} -> {}", "repaired".green(), r.asset_id, r.from, r.to);
        }
        for e in &self.errors {
            println!("  {} {e}", "error:".red());
        }
        print_warnings(&self.warnings);
    }
}

/// Generic operation result for simple commands
#[derive(Debug, Serialize)]
pub struct OperationResult {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable message
    pub message: String,
}

impl Render for OperationResult {
    fn render_human(&self) {
        println!("{}", self.message);
    }
}

/// Error details for JSON output
#[derive(Debug, Serialize)]
pub struct ErrorReport {
    /// Always false
    pub success: bool,
    /// Error code string (e.g. "CONFLICT")
    pub code: String,
    /// HTTP-style status for the error class
    pub status: u16,
    /// Human-readable message
    pub message: String,
}

impl ErrorReport {
    /// Build a report for an error of the given kind
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            success: false,
            code: kind.as_str().to_string(),
            status: kind.status_code(),
            message: message.into(),
        }
    }
}

impl Render for ErrorReport {
    fn render_human(&self) {
        eprintln!("{} {}", "error:".red().bold(), self.message);
    }

    /// Errors go to stderr in both modes so stdout holds at most one report
    fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => {
                eprintln!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
            },
        }
    }
}
