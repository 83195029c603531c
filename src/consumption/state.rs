//! # Consumer State
//!
//! An explicit, cloneable handle recording whether consumption is in progress
//! and which message is being handled. Callers pass it to the invoker; there is
//! no process-wide instance.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Message currently handed to a processor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InFlightMessage {
    pub message_id: i64,
    pub transport_queue: String,
    pub processor_name: Option<String>,
}

#[derive(Debug, Default)]
struct StateInner {
    consuming: AtomicBool,
    runs: AtomicU64,
    started_at: Mutex<Option<DateTime<Utc>>>,
    in_flight: Mutex<Option<InFlightMessage>>,
}

#[derive(Debug, Clone, Default)]
pub struct ConsumerState {
    inner: Arc<StateInner>,
}

impl ConsumerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark consumption started; it is marked stopped when the guard drops
    #[must_use = "consumption is marked stopped as soon as the guard is dropped"]
    pub fn start_consumption(&self) -> ConsumptionGuard {
        self.inner.consuming.store(true, Ordering::SeqCst);
        self.inner.runs.fetch_add(1, Ordering::SeqCst);
        *self.inner.started_at.lock() = Some(Utc::now());
        debug!("Consumption started");
        ConsumptionGuard {
            state: self.clone(),
        }
    }

    fn stop_consumption(&self) {
        self.inner.consuming.store(false, Ordering::SeqCst);
        *self.inner.started_at.lock() = None;
        *self.inner.in_flight.lock() = None;
        debug!("Consumption stopped");
    }

    pub fn is_consumption_started(&self) -> bool {
        self.inner.consuming.load(Ordering::SeqCst)
    }

    /// Number of times consumption has been started on this handle
    pub fn runs(&self) -> u64 {
        self.inner.runs.load(Ordering::SeqCst)
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        *self.inner.started_at.lock()
    }

    pub fn set_in_flight(&self, message: Option<InFlightMessage>) {
        *self.inner.in_flight.lock() = message;
    }

    pub fn in_flight(&self) -> Option<InFlightMessage> {
        self.inner.in_flight.lock().clone()
    }
}

/// Marks consumption stopped on drop, including during unwinding
#[derive(Debug)]
pub struct ConsumptionGuard {
    state: ConsumerState,
}

impl Drop for ConsumptionGuard {
    fn drop(&mut self) {
        self.state.stop_consumption();
    }
}
