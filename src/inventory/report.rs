use serde::{Deserialize, Serialize};

use crate::constants::NO_PROCESSOR;
use crate::database::MessageCounts;
use crate::registry::DestinationMeta;

/// One line of the inventory: a destination paired with one of its processors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub queue: String,
    pub transport_queue: String,
    pub processor: String,
    pub messages: i64,
}

/// Case-insensitive substring match on the destination name; an empty or
/// absent filter matches everything
pub fn matches_filter(name: &str, filter: Option<&str>) -> bool {
    match filter {
        None | Some("") => true,
        Some(filter) => name.to_lowercase().contains(&filter.to_lowercase()),
    }
}

/// Expand destinations into report rows, filtering before expansion.
///
/// Every destination that passes the filter yields at least one row; one
/// without processors yields a single `(none)` row.
pub fn build_report(
    destinations: &[DestinationMeta],
    counts: &MessageCounts,
    filter: Option<&str>,
) -> Vec<ReportRow> {
    let mut rows = Vec::new();

    for destination in destinations {
        if !matches_filter(&destination.name, filter) {
            continue;
        }

        let messages = counts.get(&destination.transport_queue_name);
        let row = |processor: &str| ReportRow {
            queue: destination.name.clone(),
            transport_queue: destination.transport_queue_name.clone(),
            processor: processor.to_string(),
            messages,
        };

        if destination.processors.is_empty() {
            rows.push(row(NO_PROCESSOR));
        } else {
            rows.extend(destination.processors.iter().map(|p| row(p)));
        }
    }

    rows
}

/// Sum of the `messages` column, row by row
pub fn total_messages(rows: &[ReportRow]) -> i64 {
    rows.iter().map(|row| row.messages).sum()
}
