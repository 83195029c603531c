//! # Transport Messages
//!
//! A row of the transport table after it has been claimed by a consumer.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::constants::PROCESSOR_NAME_PROPERTY;

/// Message claimed from a transport queue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportMessage {
    /// Row id in the transport table
    pub id: i64,
    /// Raw message body
    pub body: String,
    /// Transport headers (message id, timestamps, content type)
    pub headers: Map<String, Value>,
    /// Client properties (topic, processor name, ...)
    pub properties: Map<String, Value>,
    /// Whether the message has been delivered before
    pub redelivered: bool,
    /// Transport queue the message was stored under
    pub queue: String,
    /// Higher runs first
    pub priority: i32,
}

impl TransportMessage {
    pub fn new(id: i64, queue: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id,
            body: body.into(),
            headers: Map::new(),
            properties: Map::new(),
            redelivered: false,
            queue: queue.into(),
            priority: 0,
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Processor chosen by the producer, if recorded
    pub fn processor_name(&self) -> Option<&str> {
        self.properties
            .get(PROCESSOR_NAME_PROPERTY)
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
    }

    /// Parse a JSON object column; anything else becomes an empty map
    pub fn parse_json_map(raw: Option<&str>) -> Map<String, Value> {
        match raw.map(serde_json::from_str::<Value>) {
            Some(Ok(Value::Object(map))) => map,
            _ => Map::new(),
        }
    }
}

/// Outcome of processing one message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessorStatus {
    /// Processed; remove from the queue
    Ack,
    /// Unprocessable; remove from the queue
    Reject,
    /// Put back on the queue for another delivery
    Requeue,
}

impl ProcessorStatus {
    /// Whether settling removes the row from the table
    pub fn removes_message(self) -> bool {
        matches!(self, Self::Ack | Self::Reject)
    }
}

impl fmt::Display for ProcessorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ack => write!(f, "ACK"),
            Self::Reject => write!(f, "REJECT"),
            Self::Requeue => write!(f, "REQUEUE"),
        }
    }
}
