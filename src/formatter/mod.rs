//! Output formatters for diagnostics.

pub mod json;
pub mod plain;

use crate::checks::Diagnostic;
use std::io::{self, Write};

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One line per diagnostic, coloured by severity.
    #[default]
    Text,
    /// A JSON array of diagnostics.
    Json,
}

/// Format diagnostics to a string.
pub fn format_to_string(diagnostics: &[Diagnostic], format: OutputFormat, colors: bool) -> String {
    match format {
        OutputFormat::Text => plain::format(diagnostics, colors),
        OutputFormat::Json => json::format(diagnostics),
    }
}

/// Write formatted diagnostics to `writer`.
pub fn write_diagnostics<W: Write>(
    writer: &mut W,
    diagnostics: &[Diagnostic],
    format: OutputFormat,
    colors: bool,
) -> io::Result<()> {
    writer.write_all(format_to_string(diagnostics, format, colors).as_bytes())?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_names() {
        use clap::ValueEnum;
        assert_eq!(OutputFormat::from_str("json", true), Ok(OutputFormat::Json));
        assert_eq!(OutputFormat::from_str("TEXT", true), Ok(OutputFormat::Text));
        assert!(OutputFormat::from_str("sarif", true).is_err());
    }

    #[test]
    fn test_write_empty_json() {
        let mut out = Vec::new();
        write_diagnostics(&mut out, &[], OutputFormat::Json, false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().trim(), "[]");
    }
}
