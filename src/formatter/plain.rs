//! Plain text formatter.

use crate::checks::{Diagnostic, Severity};
use colored::Colorize;

/// Format diagnostics as one line each, followed by a summary line.
pub fn format(diagnostics: &[Diagnostic], colors: bool) -> String {
    let mut output = String::new();

    for diagnostic in diagnostics {
        let label = format!("[{}]", diagnostic.severity);
        output.push_str(&format!(
            "{} {} {}: {}",
            paint(&label, diagnostic.severity, colors),
            diagnostic.kind,
            diagnostic.object,
            diagnostic.message,
        ));
        if !diagnostic.check.is_empty() {
            output.push_str(&format!(" ({})", diagnostic.check));
        }
        output.push('\n');
    }

    if diagnostics.is_empty() {
        output.push_str("No problems found.\n");
    } else {
        output.push_str(&format!("\nFound {} problem(s).\n", diagnostics.len()));
    }

    output
}

fn paint(text: &str, severity: Severity, colors: bool) -> String {
    if !colors {
        return text.to_string();
    }
    match severity {
        Severity::Error => text.red().bold().to_string(),
        Severity::Warning => text.yellow().bold().to_string(),
        Severity::Suggestion => text.blue().to_string(),
    }
}
