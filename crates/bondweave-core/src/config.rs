//! Engine configuration

use crate::error::Result;
use crate::limits::{self, DEFAULT_ARRAY_ITEMS, DEFAULT_GRAPH_NODES};
use serde::{Deserialize, Serialize};
use std::time::Duration;

fn default_max_graph_nodes() -> usize {
    DEFAULT_GRAPH_NODES
}

fn default_max_array_items() -> usize {
    DEFAULT_ARRAY_ITEMS
}

fn default_store_timeout_ms() -> u64 {
    5_000
}

/// Tunables shared by the validators and the graph builder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maximum nodes discovered by one graph build
    #[serde(default = "default_max_graph_nodes")]
    pub max_graph_nodes: usize,

    /// Maximum elements accepted in one array field
    #[serde(default = "default_max_array_items")]
    pub max_array_items: usize,

    /// Per-call article store timeout in milliseconds
    #[serde(default = "default_store_timeout_ms")]
    pub store_timeout_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_graph_nodes: default_max_graph_nodes(),
            max_array_items: default_max_array_items(),
            store_timeout_ms: default_store_timeout_ms(),
        }
    }
}

impl EngineConfig {
    /// Check every limit against its hard ceiling
    pub fn validate(&self) -> Result<()> {
        limits::validate_graph_nodes(self.max_graph_nodes)?;
        limits::validate_array_items(self.max_array_items)?;
        Ok(())
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }
}
