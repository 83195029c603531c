//! # Database Operations
//!
//! PostgreSQL access for the DBAL transport table.
//!
//! ## Key Components
//!
//! - [`connection`] - Pooled connection management and identifier quoting
//! - [`queue_storage`] - Pending message counts per transport queue, with
//!   failures collapsed into an empty count set
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use mq_debug::config::DatabaseConfig;
//! use mq_debug::database::{DatabaseConnection, MessageCounts, PgQueueStorage};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let connection = DatabaseConnection::connect_lazy(&DatabaseConfig::default())?;
//! let storage = PgQueueStorage::new(connection, "oro_message_queue");
//!
//! let counts = MessageCounts::collect(&storage, chrono::Utc::now().timestamp()).await;
//! println!("oro.default: {}", counts.get("oro.default"));
//! # Ok(())
//! # }
//! ```

pub mod connection;
pub mod queue_storage;

pub use connection::{quote_identifier, DatabaseConnection};
pub use queue_storage::{
    MessageCountRow, MessageCounts, PgQueueStorage, QueueStorageReader, UnavailableStorage,
};
