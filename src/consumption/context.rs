use chrono::{DateTime, Utc};

use crate::messaging::{ProcessorStatus, TransportMessage};

/// State of one consume cycle, shared by the engine and its extensions
#[derive(Debug, Clone)]
pub struct ConsumptionContext {
    started_at: DateTime<Utc>,
    message: Option<TransportMessage>,
    processor_name: Option<String>,
    status: Option<ProcessorStatus>,
    interrupted: bool,
    interrupted_reason: Option<String>,
}

impl ConsumptionContext {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            message: None,
            processor_name: None,
            status: None,
            interrupted: false,
            interrupted_reason: None,
        }
    }

    /// Clear per-message fields before the next receive; interruption sticks
    pub fn reset_for_next_message(&mut self) {
        self.message = None;
        self.processor_name = None;
        self.status = None;
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn message(&self) -> Option<&TransportMessage> {
        self.message.as_ref()
    }

    pub fn set_message(&mut self, message: TransportMessage) {
        self.message = Some(message);
    }

    pub fn processor_name(&self) -> Option<&str> {
        self.processor_name.as_deref()
    }

    pub fn set_processor_name(&mut self, name: impl Into<String>) {
        self.processor_name = Some(name.into());
    }

    pub fn status(&self) -> Option<ProcessorStatus> {
        self.status
    }

    pub fn set_status(&mut self, status: ProcessorStatus) {
        self.status = Some(status);
    }

    pub fn is_interrupted(&self) -> bool {
        self.interrupted
    }

    pub fn interrupted_reason(&self) -> Option<&str> {
        self.interrupted_reason.as_deref()
    }

    /// Ask the engine to stop after the current hook; the first reason is kept
    pub fn interrupt(&mut self, reason: impl Into<String>) {
        if !self.interrupted {
            self.interrupted = true;
            self.interrupted_reason = Some(reason.into());
        }
    }
}

impl Default for ConsumptionContext {
    fn default() -> Self {
        Self::new()
    }
}
