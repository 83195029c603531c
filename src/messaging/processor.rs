//! # Message Processors
//!
//! Processors receive claimed messages from the consume engine and decide how
//! each one is settled. The registry resolves processor names, falling back to
//! a configured processor for names this tool does not implement (the real
//! handlers live in the application that produced the messages).

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

use super::message::{ProcessorStatus, TransportMessage};
use crate::constants::processors;
use crate::error::{MqDebugError, Result};

#[async_trait]
pub trait MessageProcessor: Send + Sync {
    fn name(&self) -> &str;

    async fn process(&self, message: &TransportMessage) -> Result<ProcessorStatus>;
}

/// Logs the full message and settles it with a fixed status
#[derive(Debug, Clone)]
pub struct InspectProcessor {
    name: String,
    status: ProcessorStatus,
}

impl InspectProcessor {
    pub fn new(name: impl Into<String>, status: ProcessorStatus) -> Self {
        Self {
            name: name.into(),
            status,
        }
    }

    /// Log and acknowledge
    pub fn inspect() -> Self {
        Self::new(processors::INSPECT, ProcessorStatus::Ack)
    }

    /// Log and put back on the queue
    pub fn peek() -> Self {
        Self::new(processors::PEEK, ProcessorStatus::Requeue)
    }
}

#[async_trait]
impl MessageProcessor for InspectProcessor {
    fn name(&self) -> &str {
        &self.name
    }

    async fn process(&self, message: &TransportMessage) -> Result<ProcessorStatus> {
        info!(
            message_id = message.id,
            queue = %message.queue,
            priority = message.priority,
            redelivered = message.redelivered,
            headers = %serde_json::Value::Object(message.headers.clone()),
            properties = %serde_json::Value::Object(message.properties.clone()),
            body = %message.body,
            status = %self.status,
            "Inspected message"
        );
        Ok(self.status)
    }
}

/// Name-to-processor lookup with an optional fallback
#[derive(Clone, Default)]
pub struct ProcessorRegistry {
    processors: HashMap<String, Arc<dyn MessageProcessor>>,
    fallback: Option<String>,
}

impl std::fmt::Debug for ProcessorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.processors.keys().collect();
        names.sort();
        f.debug_struct("ProcessorRegistry")
            .field("processors", &names)
            .field("fallback", &self.fallback)
            .finish()
    }
}

impl ProcessorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the inspect and peek processors
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(InspectProcessor::inspect()));
        registry.register(Arc::new(InspectProcessor::peek()));
        registry
    }

    pub fn register(&mut self, processor: Arc<dyn MessageProcessor>) {
        debug!(processor = processor.name(), "Registering message processor");
        self.processors
            .insert(processor.name().to_string(), processor);
    }

    /// Use `name` for unknown processors; an empty name disables the fallback
    pub fn with_fallback(mut self, name: Option<impl Into<String>>) -> Self {
        self.fallback = name.map(Into::into).filter(|name: &String| !name.is_empty());
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.processors.contains_key(name)
    }

    /// Resolve `name`, or the fallback when `name` is absent or unregistered
    pub fn resolve(&self, name: Option<&str>) -> Result<Arc<dyn MessageProcessor>> {
        if let Some(processor) = name.and_then(|name| self.processors.get(name)) {
            return Ok(Arc::clone(processor));
        }

        let requested = name.unwrap_or_default();
        match &self.fallback {
            Some(fallback) => {
                debug!(requested, fallback = %fallback, "Using fallback processor");
                self.processors
                    .get(fallback)
                    .cloned()
                    .ok_or_else(|| MqDebugError::processor_not_found(fallback.clone()))
            }
            None => Err(MqDebugError::processor_not_found(requested)),
        }
    }
}
