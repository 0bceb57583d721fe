// crates/i2pctl-cli/src/output.rs
//
// Output formatting utilities for the i2pctl CLI.
// Supports table and JSON output modes.

use serde::Serialize;
use serde_json::{Map, Value};
use tabled::{Table, Tabled};

use i2pctl_core::{to_markup, SlotDocument};

/// Output format for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed table output (default).
    Table,
    /// JSON output for machine consumption.
    Json,
}

/// A labelled value row.
#[derive(Debug, Tabled)]
pub struct FieldRow {
    #[tabled(rename = "Field")]
    pub field: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

/// Format a slice of Tabled items as a table string.
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    Table::new(data).to_string()
}

/// Format a serializable value as a pretty-printed JSON string.
pub fn format_json<T: Serialize>(data: &T) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|e| format!("JSON serialization error: {}", e))
}

/// Render a filled document: label/content rows, or an id → content object.
pub fn render_document(doc: &SlotDocument, format: OutputFormat) -> String {
    match format {
        OutputFormat::Table => {
            let rows: Vec<FieldRow> = doc
                .slots()
                .iter()
                .map(|s| FieldRow {
                    field: s.label.clone(),
                    value: s.content.clone(),
                })
                .collect();
            format_table(&rows)
        }
        OutputFormat::Json => {
            let object: Map<String, Value> = doc
                .slots()
                .iter()
                .map(|s| (s.id.clone(), Value::String(s.content.clone())))
                .collect();
            format_json(&object)
        }
    }
}

/// Render a raw result map: key/value rows, or the map itself.
pub fn render_result(result: &Map<String, Value>, format: OutputFormat) -> String {
    match format {
        OutputFormat::Table => {
            let rows: Vec<FieldRow> = result
                .iter()
                .map(|(k, v)| FieldRow {
                    field: k.clone(),
                    value: to_markup(v),
                })
                .collect();
            format_table(&rows)
        }
        OutputFormat::Json => format_json(result),
    }
}
