#![allow(clippy::doc_markdown)] // Allow technical terms like PostgreSQL, SQLx in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # MQ Debug
//!
//! Debugging commands for a database-backed (DBAL) message queue transport, where
//! one PostgreSQL table holds every queued message.
//!
//! ## Overview
//!
//! - **`list`** joins the configured destinations with live pending-message counts
//!   and prints them as a table or JSON. Storage problems never fail the command;
//!   counts read as zero instead.
//! - **`process`** binds one or all destinations on a consumer and drains a bounded
//!   number of messages, stopping on a message count and/or a deadline.
//!
//! ## Module Organization
//!
//! - [`commands`] - The `list` and `process` operations
//! - [`inventory`] - Report rows and their text/JSON rendering
//! - [`consumption`] - Consumer trait, extension chain, consumer state, time limits
//! - [`transport`] - DBAL consume engine over the transport table
//! - [`messaging`] - Transport messages and message processors
//! - [`registry`] - Destination metadata
//! - [`database`] - Connection pool and pending-count queries
//! - [`config`] - Layered configuration
//! - [`logging`] - Tracing initialisation and structured log helpers
//! - [`error`] - Structured error handling
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mq_debug::commands::{list, ListOptions};
//! use mq_debug::config::ConfigLoader;
//! use mq_debug::database::{DatabaseConnection, PgQueueStorage};
//! use mq_debug::registry::StaticDestinationRegistry;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConfigLoader::new().load()?;
//! let registry = StaticDestinationRegistry::from_config(&config);
//! let connection = DatabaseConnection::connect_lazy(&config.database)?;
//! let storage = PgQueueStorage::new(connection, config.transport.table_name.clone());
//!
//! let options = ListOptions { queue_filter: None, json: true };
//! list::execute(&registry, &storage, &options, &mut std::io::stdout()).await?;
//! # Ok(())
//! # }
//! ```

pub mod commands;
pub mod config;
pub mod constants;
pub mod consumption;
pub mod database;
pub mod error;
pub mod inventory;
pub mod logging;
pub mod messaging;
pub mod registry;
pub mod transport;

pub use commands::{CommandStatus, ListOptions, ProcessOptions};
pub use config::{ConfigLoader, MqDebugConfig};
pub use consumption::{ChainExtension, ConsumerState, QueueConsumer};
pub use database::{DatabaseConnection, MessageCounts, PgQueueStorage, QueueStorageReader};
pub use error::{MqDebugError, Result};
pub use inventory::ReportRow;
pub use registry::{DestinationMeta, DestinationRegistry, StaticDestinationRegistry};
pub use transport::DbalQueueConsumer;
