//! Inventory of destinations, processors and pending message counts.

use chrono::Utc;
use std::io::Write;
use tracing::debug;

use super::CommandStatus;
use crate::constants::notes;
use crate::database::{MessageCounts, QueueStorageReader};
use crate::error::Result;
use crate::inventory::{build_report, render_json, render_table, total_messages, write_note};
use crate::registry::DestinationRegistry;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Case-insensitive substring of the destination name
    pub queue_filter: Option<String>,
    pub json: bool,
}

/// Print the inventory. Storage failures read as zero counts, so the command
/// only fails when the output cannot be written.
pub async fn execute(
    registry: &dyn DestinationRegistry,
    storage: &dyn QueueStorageReader,
    options: &ListOptions,
    out: &mut dyn Write,
) -> Result<CommandStatus> {
    let counts = MessageCounts::collect(storage, Utc::now().timestamp()).await;
    let destinations = registry.list_destinations();
    let rows = build_report(&destinations, &counts, options.queue_filter.as_deref());

    debug!(
        destinations = destinations.len(),
        rows = rows.len(),
        filter = options.queue_filter.as_deref().unwrap_or_default(),
        "Built queue inventory"
    );

    if options.json {
        render_json(out, &rows)?;
        return Ok(CommandStatus::Success);
    }

    if rows.is_empty() {
        write_note(out, notes::NO_DESTINATIONS)?;
        return Ok(CommandStatus::Success);
    }

    render_table(out, &rows)?;

    let total = total_messages(&rows);
    if total > 0 {
        write_note(out, &format!("{} {total}", notes::TOTAL_MESSAGES_PREFIX))?;
    }

    Ok(CommandStatus::Success)
}
