//! # DBAL Queue Consumer
//!
//! Minimal consume engine over the DBAL transport table.
//!
//! One row is claimed at a time by stamping it with this consumer's id. The
//! claimed message is dispatched to a processor and settled: acked and rejected
//! rows are deleted, requeued rows are released and flagged as redelivered.
//! There is no retry, scheduling or heartbeat logic.

use async_trait::async_trait;
use chrono::Utc;
use futures::FutureExt;
use std::panic::{resume_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::MqDebugConfig;
use crate::consumption::{ChainExtension, ConsumptionContext, Extension, QueueConsumer};
use crate::database::{quote_identifier, DatabaseConnection};
use crate::error::{MqDebugError, Result};
use crate::logging::{log_error, log_queue_operation};
use crate::messaging::{MessageProcessor, ProcessorRegistry, ProcessorStatus, TransportMessage};

/// A transport queue subscribed to by the consumer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueBinding {
    pub transport_queue: String,
    /// Empty when the processor is chosen per message
    pub processor_name: String,
}

type ClaimedRow = (
    i64,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<bool>,
    String,
    Option<i32>,
);

#[derive(Debug)]
pub struct DbalQueueConsumer {
    connection: DatabaseConnection,
    table_name: String,
    polling_interval: Duration,
    processors: ProcessorRegistry,
    bindings: Vec<QueueBinding>,
    consumer_id: String,
}

impl DbalQueueConsumer {
    pub fn new(
        connection: DatabaseConnection,
        table_name: impl Into<String>,
        polling_interval: Duration,
        processors: ProcessorRegistry,
    ) -> Self {
        Self {
            connection,
            table_name: table_name.into(),
            polling_interval,
            processors,
            bindings: Vec::new(),
            consumer_id: Uuid::new_v4().to_string(),
        }
    }

    /// Consumer with the built-in processors and the configured fallback
    pub fn from_config(connection: DatabaseConnection, config: &MqDebugConfig) -> Self {
        let processors = ProcessorRegistry::with_builtin()
            .with_fallback(config.consumer.fallback_processor.clone());
        Self::new(
            connection,
            config.transport.table_name.clone(),
            config.transport.polling_interval(),
            processors,
        )
    }

    /// Consumer over a lazily connected pool; the database is first contacted
    /// by `consume`
    pub fn connect_lazy(config: &MqDebugConfig) -> Result<Self> {
        let connection = DatabaseConnection::connect_lazy(&config.database)?;
        Ok(Self::from_config(connection, config))
    }

    pub fn bindings(&self) -> &[QueueBinding] {
        &self.bindings
    }

    pub fn consumer_id(&self) -> &str {
        &self.consumer_id
    }

    /// Processor name to resolve for `message`: the bound one, else the
    /// producer's choice
    pub fn requested_processor<'a>(&'a self, message: &'a TransportMessage) -> Option<&'a str> {
        self.bindings
            .iter()
            .find(|binding| binding.transport_queue == message.queue && !binding.processor_name.is_empty())
            .map(|binding| binding.processor_name.as_str())
            .or_else(|| message.processor_name())
    }

    fn bound_queues(&self) -> Vec<String> {
        let mut queues: Vec<String> = Vec::with_capacity(self.bindings.len());
        for binding in &self.bindings {
            if !queues.contains(&binding.transport_queue) {
                queues.push(binding.transport_queue.clone());
            }
        }
        queues
    }

    fn claim_sql(&self) -> String {
        let table = quote_identifier(&self.table_name);
        format!(
            "UPDATE {table} SET consumer_id = $1 \
             WHERE id = (\
                 SELECT id FROM {table} \
                 WHERE queue = ANY($2) AND consumer_id IS NULL \
                   AND (delayed_until IS NULL OR delayed_until <= $3) \
                 ORDER BY priority DESC, id ASC \
                 LIMIT 1 \
                 FOR UPDATE SKIP LOCKED\
             ) \
             RETURNING id, body, headers, properties, redelivered, queue, priority"
        )
    }

    async fn claim(&self, queues: &[String]) -> Result<Option<TransportMessage>> {
        let row: Option<ClaimedRow> = sqlx::query_as(&self.claim_sql())
            .bind(&self.consumer_id)
            .bind(queues)
            .bind(Utc::now().timestamp())
            .fetch_optional(self.connection.pool())
            .await?;

        Ok(row.map(
            |(id, body, headers, properties, redelivered, queue, priority)| TransportMessage {
                id,
                body: body.unwrap_or_default(),
                headers: TransportMessage::parse_json_map(headers.as_deref()),
                properties: TransportMessage::parse_json_map(properties.as_deref()),
                redelivered: redelivered.unwrap_or(false),
                queue,
                priority: priority.unwrap_or(0),
            },
        ))
    }

    async fn settle(&self, message: &TransportMessage, status: ProcessorStatus) -> Result<()> {
        let table = quote_identifier(&self.table_name);
        let sql = if status.removes_message() {
            format!("DELETE FROM {table} WHERE id = $1 AND consumer_id = $2")
        } else {
            format!(
                "UPDATE {table} SET consumer_id = NULL, redelivered = TRUE \
                 WHERE id = $1 AND consumer_id = $2"
            )
        };

        sqlx::query(&sql)
            .bind(message.id)
            .bind(&self.consumer_id)
            .execute(self.connection.pool())
            .await?;

        log_queue_operation(
            "settle",
            Some(&message.queue),
            Some(message.id),
            &status.to_string(),
            None,
        );
        Ok(())
    }

    /// Hand a claimed row back untouched
    async fn release(&self, message: &TransportMessage) {
        let sql = format!(
            "UPDATE {} SET consumer_id = NULL WHERE id = $1 AND consumer_id = $2",
            quote_identifier(&self.table_name)
        );
        let result = sqlx::query(&sql)
            .bind(message.id)
            .bind(&self.consumer_id)
            .execute(self.connection.pool())
            .await;

        match result {
            Ok(_) => log_queue_operation("release", Some(&message.queue), Some(message.id), "RELEASED", None),
            Err(e) => log_error(
                "dbal_consumer",
                "release",
                &e.to_string(),
                Some(&format!("message_id={}", message.id)),
            ),
        }
    }

    async fn handle(
        &self,
        message: TransportMessage,
        extension: &mut ChainExtension<'_>,
        context: &mut ConsumptionContext,
    ) -> Result<()> {
        let processor: Arc<dyn MessageProcessor> = match self.processors.resolve(self.requested_processor(&message)) {
            Ok(processor) => processor,
            Err(e) => {
                self.release(&message).await;
                return Err(e);
            }
        };

        context.set_message(message.clone());
        context.set_processor_name(processor.name());

        // The claim is handed back if processing fails or panics
        let processed = AssertUnwindSafe(async {
            extension.on_pre_received(context);
            processor.process(&message).await
        })
        .catch_unwind()
        .await;

        let status = match processed {
            Ok(Ok(status)) => status,
            Ok(Err(e)) => {
                self.release(&message).await;
                return Err(e);
            }
            Err(panic) => {
                self.release(&message).await;
                resume_unwind(panic);
            }
        };

        if let Err(e) = self.settle(&message, status).await {
            self.release(&message).await;
            return Err(e);
        }
        context.set_status(status);
        extension.on_post_received(context);
        Ok(())
    }
}

#[async_trait]
impl QueueConsumer for DbalQueueConsumer {
    fn bind(&mut self, transport_queue: &str, processor_name: &str) {
        debug!(transport_queue, processor_name, "Binding transport queue");
        self.bindings.push(QueueBinding {
            transport_queue: transport_queue.to_string(),
            processor_name: processor_name.to_string(),
        });
    }

    async fn consume(&mut self, extension: &mut ChainExtension<'_>) -> Result<()> {
        let queues = self.bound_queues();
        if queues.is_empty() {
            return Err(MqDebugError::consumption("no transport queues are bound"));
        }

        info!(
            consumer_id = %self.consumer_id,
            queues = ?queues,
            table = %self.table_name,
            "Consumer ready"
        );

        let mut context = ConsumptionContext::new();
        extension.on_start(&mut context);

        while !context.is_interrupted() {
            context.reset_for_next_message();
            extension.on_before_receive(&mut context);
            if context.is_interrupted() {
                break;
            }

            match self.claim(&queues).await? {
                Some(message) => self.handle(message, extension, &mut context).await?,
                None => {
                    tokio::time::sleep(self.polling_interval).await;
                    extension.on_idle(&mut context);
                }
            }
        }

        extension.on_interrupted(&mut context);
        Ok(())
    }

    async fn close_connection(&mut self) {
        self.connection.close().await;
    }
}
