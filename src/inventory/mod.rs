//! # Inventory
//!
//! Joins destination metadata with pending message counts and renders the
//! result for the `list` command.

pub mod render;
pub mod report;

pub use render::{render_json, render_table, write_note};
pub use report::{build_report, matches_filter, total_messages, ReportRow};
