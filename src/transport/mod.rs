//! # Transport
//!
//! Consume engines implementing [`QueueConsumer`](crate::consumption::QueueConsumer).

pub mod dbal_consumer;

pub use dbal_consumer::{DbalQueueConsumer, QueueBinding};
