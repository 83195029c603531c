//! # Queue Storage Reader
//!
//! Pending message counts per transport queue, read from the DBAL transport table.
//! A message is pending when no consumer has claimed it and it is either not
//! delayed or its delay has elapsed.
//!
//! Counting is best-effort enrichment: [`MessageCounts::collect`] turns a missing
//! table, an unreachable database or a failed query into an empty count set, so
//! every queue reads as zero instead of the report failing.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::Row;
use std::collections::HashMap;
use tracing::debug;

use super::connection::{quote_identifier, DatabaseConnection};
use crate::error::{MqDebugError, Result};

/// Pending count for one transport queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageCountRow {
    pub transport_queue_name: String,
    pub count: i64,
}

impl MessageCountRow {
    pub fn new(transport_queue_name: impl Into<String>, count: i64) -> Self {
        Self {
            transport_queue_name: transport_queue_name.into(),
            count,
        }
    }
}

/// Backing store holding not-yet-consumed messages
#[async_trait]
pub trait QueueStorageReader: Send + Sync {
    /// Whether the transport table exists
    async fn table_exists(&self) -> Result<bool>;

    /// Pending counts grouped by transport queue, as of `now` (Unix seconds)
    async fn count_pending_by_queue(&self, now: i64) -> Result<Vec<MessageCountRow>>;
}

/// Pending counts keyed by transport queue; absent queues read as zero
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageCounts {
    counts: HashMap<String, i64>,
}

impl MessageCounts {
    /// Query the store, collapsing every failure into an empty set
    pub async fn collect(reader: &dyn QueueStorageReader, now: i64) -> Self {
        match reader.table_exists().await {
            Ok(true) => {}
            Ok(false) => {
                debug!("Transport table does not exist - reporting zero counts");
                return Self::default();
            }
            Err(e) => {
                debug!(error = %e, "Could not check transport table - reporting zero counts");
                return Self::default();
            }
        }

        match reader.count_pending_by_queue(now).await {
            Ok(rows) => {
                debug!(queues = rows.len(), "Pending message counts loaded");
                Self::from_rows(rows)
            }
            Err(e) => {
                debug!(error = %e, "Could not count pending messages - reporting zero counts");
                Self::default()
            }
        }
    }

    pub fn from_rows(rows: impl IntoIterator<Item = MessageCountRow>) -> Self {
        let mut counts = HashMap::new();
        for row in rows {
            *counts.entry(row.transport_queue_name).or_insert(0) += row.count.max(0);
        }
        Self { counts }
    }

    pub fn get(&self, transport_queue_name: &str) -> i64 {
        self.counts.get(transport_queue_name).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Storage reader over the PostgreSQL transport table
#[derive(Debug, Clone)]
pub struct PgQueueStorage {
    connection: DatabaseConnection,
    table_name: String,
}

impl PgQueueStorage {
    pub fn new(connection: DatabaseConnection, table_name: impl Into<String>) -> Self {
        Self {
            connection,
            table_name: table_name.into(),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    fn count_sql(&self) -> String {
        format!(
            "SELECT queue, COUNT(*) AS cnt FROM {} \
             WHERE consumer_id IS NULL AND (delayed_until IS NULL OR delayed_until <= $1) \
             GROUP BY queue",
            quote_identifier(&self.table_name)
        )
    }
}

#[async_trait]
impl QueueStorageReader for PgQueueStorage {
    async fn table_exists(&self) -> Result<bool> {
        let row = sqlx::query("SELECT to_regclass($1) IS NOT NULL AS present")
            .bind(&self.table_name)
            .fetch_one(self.connection.pool())
            .await?;
        Ok(row.try_get::<bool, _>("present")?)
    }

    async fn count_pending_by_queue(&self, now: i64) -> Result<Vec<MessageCountRow>> {
        let rows = sqlx::query(&self.count_sql())
            .bind(now)
            .fetch_all(self.connection.pool())
            .await?;

        rows.iter()
            .map(|row| {
                Ok(MessageCountRow::new(
                    row.try_get::<String, _>("queue")?,
                    row.try_get::<i64, _>("cnt")?,
                ))
            })
            .collect()
    }
}

/// Reader used when no connection could be built; every call fails
#[derive(Debug, Clone)]
pub struct UnavailableStorage {
    reason: String,
}

impl UnavailableStorage {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl QueueStorageReader for UnavailableStorage {
    async fn table_exists(&self) -> Result<bool> {
        Err(MqDebugError::config(self.reason.clone()))
    }

    async fn count_pending_by_queue(&self, _now: i64) -> Result<Vec<MessageCountRow>> {
        Err(MqDebugError::config(self.reason.clone()))
    }
}
