//! Output formatting: raw bodies, pretty JSON, and config tables.

use std::io::{self, Write};

use tabled::{Table, Tabled, settings::Style};

use crate::cli::OutputFormat;

/// Render a response body in the chosen format.
///
/// `json` pretty-prints bodies that parse as JSON and falls back to the
/// raw text for anything else (HTML error pages, plain text).
pub fn render_body(format: OutputFormat, body: &str) -> String {
    match format {
        OutputFormat::Raw => body.to_owned(),
        OutputFormat::Json => serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| serde_json::to_string_pretty(&v).ok())
            .unwrap_or_else(|| body.to_owned()),
    }
}

/// Render rows as a rounded table.
pub fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}
