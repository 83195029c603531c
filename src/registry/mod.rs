//! # Destination Registry
//!
//! Enumerates the logical queues (destinations) an application publishes to,
//! the transport queue each one is stored under, and the processors bound to it.
//!
//! ## Architecture
//!
//! ```text
//! DestinationRegistry (trait)
//! └── StaticDestinationRegistry   (built from configuration, declaration order)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use mq_debug::registry::{DestinationMeta, DestinationRegistry, StaticDestinationRegistry};
//!
//! let registry = StaticDestinationRegistry::new(vec![DestinationMeta::new(
//!     "default",
//!     "oro.default",
//!     vec!["oro_message_queue.async.unique_message_processor".to_string()],
//! )]);
//!
//! let default = registry.get_destination("default").unwrap();
//! assert_eq!(default.transport_queue_name, "oro.default");
//! assert!(registry.get_destination("missing").is_err());
//! ```

pub mod destination_registry;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use destination_registry::StaticDestinationRegistry;

/// Metadata for one destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationMeta {
    /// Name used by application code
    pub name: String,
    /// Queue name as stored in the transport table
    pub transport_queue_name: String,
    /// Processors bound to this destination, possibly empty
    pub processors: Vec<String>,
}

impl DestinationMeta {
    pub fn new(
        name: impl Into<String>,
        transport_queue_name: impl Into<String>,
        processors: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            transport_queue_name: transport_queue_name.into(),
            processors,
        }
    }

    pub fn has_processors(&self) -> bool {
        !self.processors.is_empty()
    }
}

/// Read-only source of destination metadata
pub trait DestinationRegistry: Send + Sync {
    /// All destinations, in a stable order
    fn list_destinations(&self) -> Vec<DestinationMeta>;

    /// A single destination; unknown names yield `DestinationNotFound`
    fn get_destination(&self, name: &str) -> Result<DestinationMeta>;
}
