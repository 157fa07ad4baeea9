//! Output formatting utilities for the CLI.

use comfy_table::{presets, Cell, CellAlignment, ContentArrangement, Table};
use serde::Serialize;

pub trait CommandOutput: Serialize {
    fn to_human(&self) -> String;

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn output<T: CommandOutput>(result: &T, json_mode: bool) {
    if json_mode {
        println!("{}", serde_json::to_string_pretty(&result.to_json()).unwrap_or_default());
    } else {
        println!("{}", result.to_human());
    }
}

/// Borderless list table with upper-cased headers.
pub fn list_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            headers
                .iter()
                .map(|h| Cell::new(h.to_uppercase()).set_alignment(CellAlignment::Left)),
        );
    table
}

/// Renders `table` under a count line, or a "No ... found." message.
pub fn render_list(singular: &str, plural: &str, table: &Table, total: usize) -> String {
    match total {
        0 => format!("No {plural} found."),
        1 => format!("1 {singular}:\n{table}"),
        _ => format!("{total} {plural}:\n{table}"),
    }
}

/// First eight characters of an id, enough to tell rows apart.
pub fn short_id(id: &uuid::Uuid) -> String {
    id.to_string()[..8].to_string()
}
