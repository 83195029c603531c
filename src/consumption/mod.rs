//! # Consumption
//!
//! The seam between the `process` command and a consume engine.
//!
//! ## Architecture
//!
//! ```text
//! QueueConsumer (trait)              bind(transport_queue, processor) / consume / close
//! ├── ChainExtension                 ordered hooks invoked by the engine
//! │   ├── LoggingExtension
//! │   ├── LimitConsumedMessagesExtension
//! │   └── LimitConsumptionTimeExtension
//! ├── ConsumptionContext             per-cycle state the hooks read and interrupt
//! └── ConsumerState / ConsumptionGuard   explicit "consumption in progress" flag
//! ```
//!
//! [`run_consumption`] wraps one consume call with guaranteed cleanup: the
//! state is marked stopped and the connection closed whether the engine returns,
//! fails or panics.

pub mod consumer;
pub mod context;
pub mod extension;
pub mod extensions;
pub mod state;
pub mod time_limit;

pub use consumer::{run_consumption, QueueConsumer};
pub use context::ConsumptionContext;
pub use extension::{ChainExtension, Extension};
pub use extensions::{LimitConsumedMessagesExtension, LimitConsumptionTimeExtension, LoggingExtension};
pub use state::{ConsumerState, ConsumptionGuard};
pub use time_limit::{parse_time_limit, TimeLimitError};
