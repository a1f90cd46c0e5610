//! Output formatting: table, JSON, YAML, plain.
//!
//! Records carry server-defined fields, so tables are built dynamically
//! from the column list. Structured formats serialize via serde, plain
//! emits one identifier per line.

use std::io::{self, IsTerminal, Write};
use std::sync::Arc;

use owo_colors::OwoColorize;
use tabled::builder::Builder;
use tabled::settings::Style;

use hotelops_core::{ListState, Record, display_value};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stderr().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a page of records.
///
/// `columns` picks and orders table columns; empty means every field of
/// the first record. Structured formats always carry every field.
pub fn render_records(
    format: &OutputFormat,
    records: &[Arc<Record>],
    columns: &[String],
) -> Result<String, CliError> {
    let plain: Vec<&Record> = records.iter().map(AsRef::as_ref).collect();
    match format {
        OutputFormat::Table => Ok(render_table(&plain, columns)),
        OutputFormat::Json => render_json(&plain, false),
        OutputFormat::JsonCompact => render_json(&plain, true),
        OutputFormat::Yaml => render_yaml(&plain),
        OutputFormat::Plain => Ok(plain
            .iter()
            .map(|r| r.id.to_string())
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

/// Render one record. Tables become a two-column field/value listing.
pub fn render_record(format: &OutputFormat, record: &Record) -> Result<String, CliError> {
    match format {
        OutputFormat::Table => {
            let mut builder = Builder::default();
            builder.push_record(["Field", "Value"]);
            builder.push_record(["id".to_owned(), record.id.to_string()]);
            for (key, value) in &record.fields {
                builder.push_record([key.clone(), display_value(value)]);
            }
            Ok(builder.build().with(Style::rounded()).to_string())
        }
        OutputFormat::Json => render_json(record, false),
        OutputFormat::JsonCompact => render_json(record, true),
        OutputFormat::Yaml => render_yaml(record),
        OutputFormat::Plain => Ok(record.id.to_string()),
    }
}

/// Render any serializable value; tables fall back to pretty JSON.
pub fn render_value<T: serde::Serialize + ?Sized>(
    format: &OutputFormat,
    data: &T,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Table | OutputFormat::Json | OutputFormat::Plain => render_json(data, false),
    }
}

/// One-line description of a loaded list, for stderr.
pub fn summary<T>(state: &ListState<T>, color: bool) -> String {
    let shown = state.len();
    let mut line = match state.total_items {
        Some(total) => format!("{shown} of {total} records"),
        None => format!("{shown} records"),
    };
    line.push_str(&format!(", {} page(s) loaded", state.current_page));
    if state.has_more {
        line.push_str(", more available");
    }
    if color {
        line.dimmed().to_string()
    } else {
        line
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_table(records: &[&Record], columns: &[String]) -> String {
    let columns: Vec<String> = if columns.is_empty() {
        records.first().map(|r| r.field_names()).unwrap_or_default()
    } else {
        columns.to_vec()
    };
    if columns.is_empty() {
        return String::new();
    }

    let mut builder = Builder::default();
    builder.push_record(columns.iter().map(|c| header(c)));
    for record in records {
        builder.push_record(columns.iter().map(|c| record.display_field(c)));
    }
    builder.build().with(Style::rounded()).to_string()
}

/// `paid_amount` → `Paid Amount`.
fn header(key: &str) -> String {
    key.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> Result<String, CliError> {
    let out = if compact {
        serde_json::to_string(data)?
    } else {
        serde_json::to_string_pretty(data)?
    };
    Ok(out)
}

fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    serde_yaml::to_string(data).map_err(|e| CliError::Validation {
        field: "output".into(),
        reason: format!("YAML serialization failed: {e}"),
    })
}
