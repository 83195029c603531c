//! # Constants
//!
//! Names and defaults shared between the inventory reporter and the consumer.

/// Processor column value for destinations with no bound processor
pub const NO_PROCESSOR: &str = "(none)";

/// Default name of the table backing the DBAL transport
pub const DEFAULT_TABLE_NAME: &str = "oro_message_queue";

/// Default prefix joined with a destination name to form its transport queue
pub const DEFAULT_QUEUE_PREFIX: &str = "oro";

/// Default database URL when neither config nor `DATABASE_URL` provide one
pub const DEFAULT_DATABASE_URL: &str = "postgresql://localhost/oro_development";

/// Message property holding the processor chosen by the producer
pub const PROCESSOR_NAME_PROPERTY: &str = "oro.message_queue.client.processor_name";

/// Built-in processor names
pub mod processors {
    /// Logs the message and acknowledges it
    pub const INSPECT: &str = "mq_debug.inspect";
    /// Logs the message and puts it back on the queue
    pub const PEEK: &str = "mq_debug.peek";
}

/// Notes printed by the list command
pub mod notes {
    pub const NO_DESTINATIONS: &str = "No destinations found.";
    pub const TOTAL_MESSAGES_PREFIX: &str = "Total messages in queue:";
}

/// Table header for the list command, in column order
pub const REPORT_HEADERS: [&str; 4] = ["Queue", "Transport Queue", "Processor", "Messages"];
