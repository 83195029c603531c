//! Bounded single-shot consumption for debugging.
//!
//! Destinations are bound before the time limit is parsed. An invalid time
//! limit therefore leaves bindings on the consumer, but consume is never
//! called for them. Consumption events are written to the command's output
//! stream by [`LoggingExtension`].

use chrono::Utc;
use std::io::Write;
use tracing::debug;

use super::CommandStatus;
use crate::consumption::{
    parse_time_limit, run_consumption, ChainExtension, ConsumerState, Extension,
    LimitConsumedMessagesExtension, LimitConsumptionTimeExtension, LoggingExtension, QueueConsumer,
};
use crate::error::Result;
use crate::registry::DestinationRegistry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOptions {
    /// Destination to consume from; all destinations when absent
    pub queue: Option<String>,
    /// Processor to restrict consumption to; empty means no restriction
    pub processor: Option<String>,
    /// Messages to process before exiting; `<= 0` disables the limit
    pub message_limit: i64,
    /// Deadline expression, see [`parse_time_limit`]
    pub time_limit: Option<String>,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            queue: None,
            processor: None,
            message_limit: 1,
            time_limit: None,
        }
    }
}

pub async fn execute<C>(
    registry: &dyn DestinationRegistry,
    consumer: &mut C,
    state: &ConsumerState,
    options: &ProcessOptions,
    out: &mut (dyn Write + Send),
) -> Result<CommandStatus>
where
    C: QueueConsumer + ?Sized,
{
    let processor = options.processor.as_deref().unwrap_or_default();

    match options.queue.as_deref().filter(|name| !name.is_empty()) {
        Some(name) => {
            let destination = registry.get_destination(name)?;
            consumer.bind(&destination.transport_queue_name, processor);
        }
        None => {
            for destination in registry.list_destinations() {
                consumer.bind(&destination.transport_queue_name, processor);
            }
        }
    }

    let deadline = match options.time_limit.as_deref().filter(|limit| !limit.is_empty()) {
        Some(limit) => match parse_time_limit(limit, Utc::now()) {
            Ok(deadline) => Some(deadline),
            Err(e) => {
                writeln!(out, "Invalid time-limit: {e}")?;
                return Ok(CommandStatus::Failure);
            }
        },
        None => None,
    };

    let mut extensions: Vec<Box<dyn Extension + '_>> = vec![Box::new(LoggingExtension::new(out))];
    if options.message_limit > 0 {
        extensions.push(Box::new(LimitConsumedMessagesExtension::new(
            options.message_limit.unsigned_abs(),
        )));
    }
    if let Some(deadline) = deadline {
        extensions.push(Box::new(LimitConsumptionTimeExtension::new(deadline)));
    }

    let mut chain = ChainExtension::new(extensions, state.clone());
    debug!(extensions = ?chain.names(), "Extension chain built");
    debug!(
        queue = options.queue.as_deref().unwrap_or("(all)"),
        processor,
        message_limit = options.message_limit,
        deadline = deadline.map(|d| d.to_rfc3339()).unwrap_or_default(),
        "Processing messages"
    );

    run_consumption(consumer, &mut chain).await?;
    Ok(CommandStatus::Success)
}
