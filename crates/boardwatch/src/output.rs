//! Output selection for the `boardwatch` commands.
//!
//! Each command builds its own human-readable views (a rounded table or a
//! detail block, plus a scripting-friendly line form); this module picks
//! between those and the serde-backed formats, and owns the stdout, quiet,
//! and color plumbing.

use std::io::{self, IsTerminal, Write};

use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

use crate::cli::{ColorMode, OutputFormat};

/// The human-facing renderings of one payload.
///
/// `human` is what `--output table` shows (a table or detail text);
/// `plain` is one value per line for shell pipelines.
pub struct View {
    pub human: String,
    pub plain: String,
}

/// Choose the output text for `data` in the requested format.
///
/// The structured formats serialize the payload itself, so they always
/// carry the full document including fields the human views omit.
pub fn render<T: Serialize>(format: &OutputFormat, data: &T, view: View) -> String {
    match format {
        OutputFormat::Table => view.human,
        OutputFormat::Plain => view.plain,
        OutputFormat::Json => {
            serde_json::to_string_pretty(data).expect("payloads are always serializable")
        }
        OutputFormat::JsonCompact => {
            serde_json::to_string(data).expect("payloads are always serializable")
        }
        OutputFormat::Yaml => {
            serde_yaml::to_string(data).expect("payloads are always serializable")
        }
    }
}

/// Rounded table over derived rows, shared by the table views.
pub fn table<R: Tabled>(rows: impl IntoIterator<Item = R>) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Whether the human views should use color.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

/// Write one rendered payload to stdout. Quiet mode drops it entirely.
pub fn emit(text: &str, quiet: bool) {
    if quiet || text.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{text}");
}
