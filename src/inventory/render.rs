//! Text and JSON rendering for the inventory report.

use comfy_table::presets::ASCII_FULL_CONDENSED;
use comfy_table::Table;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::io::Write;

use super::report::ReportRow;
use crate::constants::REPORT_HEADERS;
use crate::error::Result;

/// Pretty-printed JSON array with four-space indentation
pub fn render_json(out: &mut dyn Write, rows: &[ReportRow]) -> Result<()> {
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut *out, formatter);
    rows.serialize(&mut serializer)?;
    writeln!(out)?;
    Ok(())
}

pub fn render_table(out: &mut dyn Write, rows: &[ReportRow]) -> Result<()> {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL_CONDENSED).set_header(REPORT_HEADERS);

    for row in rows {
        table.add_row(vec![
            row.queue.clone(),
            row.transport_queue.clone(),
            row.processor.clone(),
            row.messages.to_string(),
        ]);
    }

    writeln!(out, "{table}")?;
    Ok(())
}

/// Highlighted note line
pub fn write_note(out: &mut dyn Write, text: &str) -> Result<()> {
    writeln!(out)?;
    writeln!(out, " ! [NOTE] {text}")?;
    writeln!(out)?;
    Ok(())
}
