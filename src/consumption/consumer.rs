use async_trait::async_trait;
use futures::FutureExt;
use std::panic::{resume_unwind, AssertUnwindSafe};
use tracing::debug;

use super::extension::ChainExtension;
use crate::error::Result;

/// A consume engine bound to one or more transport queues
#[async_trait]
pub trait QueueConsumer: Send {
    /// Subscribe to `transport_queue`; an empty `processor_name` lets the
    /// engine pick the processor per message
    fn bind(&mut self, transport_queue: &str, processor_name: &str);

    /// Run until an extension interrupts the loop
    async fn consume(&mut self, extension: &mut ChainExtension<'_>) -> Result<()>;

    async fn close_connection(&mut self);
}

/// Run one consume call, then mark consumption stopped and close the
/// connection on every exit path. Panics are re-raised after cleanup.
pub async fn run_consumption<C>(consumer: &mut C, extension: &mut ChainExtension<'_>) -> Result<()>
where
    C: QueueConsumer + ?Sized,
{
    let guard = extension.state().start_consumption();

    let outcome = AssertUnwindSafe(consumer.consume(extension))
        .catch_unwind()
        .await;

    drop(guard);
    consumer.close_connection().await;
    debug!(panicked = outcome.is_err(), "Consumer connection closed");

    match outcome {
        Ok(result) => result,
        Err(panic) => resume_unwind(panic),
    }
}
