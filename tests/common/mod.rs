//! Shared fakes for the command integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use mq_debug::consumption::{ChainExtension, ConsumptionContext, Extension, QueueConsumer};
use mq_debug::database::{MessageCountRow, QueueStorageReader};
use mq_debug::error::{MqDebugError, Result};
use mq_debug::messaging::{ProcessorStatus, TransportMessage};
use mq_debug::registry::{DestinationMeta, StaticDestinationRegistry};

pub mod strategies;

/// Storage returning fixed counts
#[derive(Debug, Clone, Default)]
pub struct FixedStorage {
    pub table_present: bool,
    pub rows: Vec<MessageCountRow>,
}

impl FixedStorage {
    pub fn with_counts(counts: &[(&str, i64)]) -> Self {
        Self {
            table_present: true,
            rows: counts
                .iter()
                .map(|(queue, count)| MessageCountRow::new(*queue, *count))
                .collect(),
        }
    }

    pub fn missing_table() -> Self {
        Self {
            table_present: false,
            rows: vec![MessageCountRow::new("oro.default", 99)],
        }
    }
}

#[async_trait]
impl QueueStorageReader for FixedStorage {
    async fn table_exists(&self) -> Result<bool> {
        Ok(self.table_present)
    }

    async fn count_pending_by_queue(&self, _now: i64) -> Result<Vec<MessageCountRow>> {
        Ok(self.rows.clone())
    }
}

/// Storage whose count query fails after the table check succeeds
#[derive(Debug, Clone, Default)]
pub struct FailingQueryStorage;

#[async_trait]
impl QueueStorageReader for FailingQueryStorage {
    async fn table_exists(&self) -> Result<bool> {
        Ok(true)
    }

    async fn count_pending_by_queue(&self, _now: i64) -> Result<Vec<MessageCountRow>> {
        Err(MqDebugError::Database(sqlx::Error::PoolTimedOut))
    }
}

/// Registry from `(name, transport_queue, processors)` triples
pub fn registry(destinations: Vec<(&str, &str, Vec<&str>)>) -> StaticDestinationRegistry {
    StaticDestinationRegistry::new(
        destinations
            .into_iter()
            .map(|(name, transport_queue, processors)| {
                DestinationMeta::new(
                    name,
                    transport_queue,
                    processors.into_iter().map(str::to_string).collect(),
                )
            })
            .collect(),
    )
}

pub fn run_output(buffer: Vec<u8>) -> String {
    String::from_utf8(buffer).unwrap()
}

/// What the fake engine does when consume is called
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsumeBehavior {
    /// Deliver up to `available` messages, then idle
    Drain { available: usize },
    Fail,
    Panic,
}

/// Idle cycles after which the fake stops on its own
pub const IDLE_BUDGET: usize = 3;

/// Consumer that records every call and simulates the engine loop
#[derive(Debug)]
pub struct RecordingConsumer {
    pub behavior: ConsumeBehavior,
    pub bindings: Vec<(String, String)>,
    pub consume_calls: usize,
    pub close_calls: usize,
    pub processed: usize,
    pub idle_cycles: usize,
    pub started_during_consume: Option<bool>,
    pub interrupted_reason: Option<String>,
}

impl RecordingConsumer {
    pub fn new(behavior: ConsumeBehavior) -> Self {
        Self {
            behavior,
            bindings: Vec::new(),
            consume_calls: 0,
            close_calls: 0,
            processed: 0,
            idle_cycles: 0,
            started_during_consume: None,
            interrupted_reason: None,
        }
    }

    pub fn draining(available: usize) -> Self {
        Self::new(ConsumeBehavior::Drain { available })
    }

    fn drain(&mut self, available: usize, extension: &mut ChainExtension<'_>) {
        let queue = self
            .bindings
            .first()
            .map(|(queue, _)| queue.clone())
            .unwrap_or_default();

        let mut context = ConsumptionContext::new();
        extension.on_start(&mut context);

        while !context.is_interrupted() {
            context.reset_for_next_message();
            extension.on_before_receive(&mut context);
            if context.is_interrupted() {
                break;
            }

            if self.processed < available {
                self.processed += 1;
                let id = i64::try_from(self.processed).unwrap();
                context.set_message(TransportMessage::new(id, queue.clone(), "{}"));
                context.set_processor_name("recording");
                extension.on_pre_received(&mut context);
                context.set_status(ProcessorStatus::Ack);
                extension.on_post_received(&mut context);
            } else {
                self.idle_cycles += 1;
                extension.on_idle(&mut context);
                if self.idle_cycles >= IDLE_BUDGET {
                    context.interrupt("queue drained");
                }
            }
        }

        extension.on_interrupted(&mut context);
        self.interrupted_reason = context.interrupted_reason().map(str::to_string);
    }
}

#[async_trait]
impl QueueConsumer for RecordingConsumer {
    fn bind(&mut self, transport_queue: &str, processor_name: &str) {
        self.bindings
            .push((transport_queue.to_string(), processor_name.to_string()));
    }

    async fn consume(&mut self, extension: &mut ChainExtension<'_>) -> Result<()> {
        self.consume_calls += 1;
        self.started_during_consume = Some(extension.state().is_consumption_started());

        match self.behavior {
            ConsumeBehavior::Drain { available } => {
                self.drain(available, extension);
                Ok(())
            }
            ConsumeBehavior::Fail => Err(MqDebugError::consumption("transport went away")),
            ConsumeBehavior::Panic => panic!("processor exploded"),
        }
    }

    async fn close_connection(&mut self) {
        self.close_calls += 1;
    }
}
