//! JSON formatter.

use crate::checks::Diagnostic;

/// Format diagnostics as a pretty-printed JSON array.
pub fn format(diagnostics: &[Diagnostic]) -> String {
    let mut output = serde_json::to_string_pretty(diagnostics).unwrap_or_else(|_| "[]".to_string());
    output.push('\n');
    output
}
