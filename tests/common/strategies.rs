//! Proptest strategies for inventory properties.

use mq_debug::database::MessageCountRow;
use mq_debug::registry::DestinationMeta;
use proptest::prelude::*;

/// Destination names as applications declare them
pub fn destination_name_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9_]{0,15}"
}

pub fn processor_names_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z][a-z0-9_.]{0,24}", 0..4)
}

/// Destinations with unique names and `oro.<name>` transport queues
pub fn destinations_strategy() -> impl Strategy<Value = Vec<DestinationMeta>> {
    prop::collection::btree_map(destination_name_strategy(), processor_names_strategy(), 0..8)
        .prop_map(|destinations| {
            destinations
                .into_iter()
                .map(|(name, processors)| {
                    let transport_queue = format!("oro.{name}");
                    DestinationMeta::new(name, transport_queue, processors)
                })
                .collect()
        })
}

/// Counts for a subset of the given destinations
pub fn counts_for(destinations: &[DestinationMeta]) -> impl Strategy<Value = Vec<MessageCountRow>> {
    let queues: Vec<String> = destinations
        .iter()
        .map(|d| d.transport_queue_name.clone())
        .collect();
    prop::collection::vec(0i64..1000, queues.len()).prop_map(move |counts| {
        queues
            .iter()
            .zip(counts)
            .filter(|(_, count)| *count % 3 != 0)
            .map(|(queue, count)| MessageCountRow::new(queue.clone(), count))
            .collect()
    })
}
