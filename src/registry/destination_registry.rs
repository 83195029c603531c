//! # Static Destination Registry
//!
//! In-memory registry populated once from configuration. Lookups are by exact
//! destination name; listing preserves declaration order.

use std::collections::HashMap;
use tracing::debug;

use super::{DestinationMeta, DestinationRegistry};
use crate::config::MqDebugConfig;
use crate::error::{MqDebugError, Result};

#[derive(Debug, Clone, Default)]
pub struct StaticDestinationRegistry {
    destinations: Vec<DestinationMeta>,
    index: HashMap<String, usize>,
}

impl StaticDestinationRegistry {
    /// Build from metadata; on duplicate names the first declaration wins
    pub fn new(destinations: Vec<DestinationMeta>) -> Self {
        let mut index = HashMap::with_capacity(destinations.len());
        for (position, destination) in destinations.iter().enumerate() {
            index.entry(destination.name.clone()).or_insert(position);
        }
        Self {
            destinations,
            index,
        }
    }

    pub fn from_config(config: &MqDebugConfig) -> Self {
        let registry = Self::new(config.destination_metas());
        debug!(
            destinations = registry.len(),
            "Destination registry built from configuration"
        );
        registry
    }

    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }
}

impl DestinationRegistry for StaticDestinationRegistry {
    fn list_destinations(&self) -> Vec<DestinationMeta> {
        self.destinations.clone()
    }

    fn get_destination(&self, name: &str) -> Result<DestinationMeta> {
        self.index
            .get(name)
            .map(|&position| self.destinations[position].clone())
            .ok_or_else(|| MqDebugError::destination_not_found(name))
    }
}
