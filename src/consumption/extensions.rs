//! Extensions installed by the `process` command.

use chrono::{DateTime, Utc};
use std::fmt;
use std::io::Write;
use tracing::debug;

use super::context::ConsumptionContext;
use super::extension::Extension;
use crate::messaging::ProcessorStatus;

/// Mirrors consumption events to the command's output stream as
/// `[level] message` lines
#[derive(Debug)]
pub struct LoggingExtension<W> {
    out: W,
    processed: u64,
}

impl<W: Write + Send> LoggingExtension<W> {
    pub fn new(out: W) -> Self {
        Self { out, processed: 0 }
    }

    pub fn processed(&self) -> u64 {
        self.processed
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, level: &str, message: fmt::Arguments<'_>) {
        if let Err(e) = writeln!(self.out, "[{level}] {message}") {
            debug!(error = %e, "Could not write consumption log line");
        }
    }
}

impl<W: Write + Send> Extension for LoggingExtension<W> {
    fn name(&self) -> &'static str {
        "logging"
    }

    fn on_start(&mut self, _context: &mut ConsumptionContext) {
        self.line("info", format_args!("Start consuming"));
    }

    fn on_pre_received(&mut self, context: &mut ConsumptionContext) {
        if let Some(message) = context.message() {
            debug!(
                message_id = message.id,
                queue = %message.queue,
                processor = context.processor_name().unwrap_or_default(),
                "Received message"
            );
        }
    }

    fn on_post_received(&mut self, context: &mut ConsumptionContext) {
        self.processed += 1;
        let message_id = context.message().map(|m| m.id).unwrap_or_default();
        let queue = context.message().map(|m| m.queue.clone()).unwrap_or_default();
        let processor = context.processor_name().unwrap_or_default().to_string();

        let (level, status) = match context.status() {
            Some(ProcessorStatus::Ack) => ("info", ProcessorStatus::Ack.to_string()),
            Some(status) => ("warning", status.to_string()),
            None => ("warning", "no status".to_string()),
        };
        debug!(message_id, queue = %queue, processor = %processor, status = %status, "Message processed");
        self.line(
            level,
            format_args!("Message #{message_id} from {queue} processed by {processor}: {status}"),
        );
    }

    fn on_idle(&mut self, _context: &mut ConsumptionContext) {
        self.line("debug", format_args!("Idle"));
    }

    fn on_interrupted(&mut self, context: &mut ConsumptionContext) {
        let reason = context.interrupted_reason().unwrap_or("unknown").to_string();
        let processed = self.processed;
        debug!(processed, reason = %reason, "Consuming interrupted");
        self.line(
            "info",
            format_args!("Consuming interrupted after {processed} message(s): {reason}"),
        );
    }
}

/// Stops consumption after `limit` processed messages
#[derive(Debug)]
pub struct LimitConsumedMessagesExtension {
    limit: u64,
    consumed: u64,
}

impl LimitConsumedMessagesExtension {
    pub fn new(limit: u64) -> Self {
        Self { limit, consumed: 0 }
    }

    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    fn check(&self, context: &mut ConsumptionContext) {
        if self.consumed >= self.limit {
            debug!(limit = self.limit, consumed = self.consumed, "Message limit reached");
            context.interrupt(format!("message limit reached ({})", self.limit));
        }
    }
}

impl Extension for LimitConsumedMessagesExtension {
    fn name(&self) -> &'static str {
        "limit_consumed_messages"
    }

    fn on_before_receive(&mut self, context: &mut ConsumptionContext) {
        self.check(context);
    }

    fn on_post_received(&mut self, context: &mut ConsumptionContext) {
        self.consumed += 1;
        self.check(context);
    }
}

/// Stops consumption once the deadline has passed
#[derive(Debug)]
pub struct LimitConsumptionTimeExtension {
    deadline: DateTime<Utc>,
}

impl LimitConsumptionTimeExtension {
    pub fn new(deadline: DateTime<Utc>) -> Self {
        Self { deadline }
    }

    pub fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }

    fn check(&self, context: &mut ConsumptionContext) {
        let now = Utc::now();
        if now >= self.deadline {
            debug!(deadline = %self.deadline, "Time limit reached");
            context.interrupt(format!("time limit reached ({})", self.deadline.to_rfc3339()));
        }
    }
}

impl Extension for LimitConsumptionTimeExtension {
    fn name(&self) -> &'static str {
        "limit_consumption_time"
    }

    fn on_before_receive(&mut self, context: &mut ConsumptionContext) {
        self.check(context);
    }

    fn on_post_received(&mut self, context: &mut ConsumptionContext) {
        self.check(context);
    }

    fn on_idle(&mut self, context: &mut ConsumptionContext) {
        self.check(context);
    }
}
