//! Output formatting and styling module.
//!
//! Provides a centralized interface for all CLI output, so that styling can
//! be changed in one place. Colors are turned off when stdout is not a
//! terminal.

use crate::report::{ArchiveFailure, SortReport};
use colored::*;
use std::io::IsTerminal;

/// Manages all CLI output with consistent styling and formatting.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Disables colors unless stdout is a terminal.
    pub fn init() {
        if !std::io::stdout().is_terminal() {
            colored::control::set_override(false);
        }
    }

    /// Prints a success message in green with a checkmark.
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    ///
    /// ```no_run
    /// use clean_folder::output::OutputFormatter;
    /// OutputFormatter::error("Failed to sort directory");
    /// ```
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints a regular message without styling.
    pub fn plain(message: &str) {
        println!("{}", message);
    }

    /// Prints the line for an archive that could not be unpacked.
    pub fn archive_failure(failure: &ArchiveFailure) {
        Self::warning(&format!("Archive is broken: {}", failure.path.display()));
    }

    /// Prints the end-of-run report.
    pub fn report(report: &SortReport) {
        Self::plain("");
        Self::plain(&report.render());
        if report.archive_failures.is_empty() {
            Self::success(&format!("Sorted {} files", report.total_files()));
        } else {
            Self::warning(&format!(
                "Sorted {} files, discarded {} broken {}",
                report.total_files(),
                report.archive_failures.len(),
                if report.archive_failures.len() == 1 {
                    "archive"
                } else {
                    "archives"
                }
            ));
        }
    }
}
