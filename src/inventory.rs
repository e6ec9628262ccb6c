//! Provider-agnostic view of the compute fleet
//!
//! The reaper never talks to EC2 types directly. Adapters (see `aws::fleet`)
//! flatten whatever shape the provider returns into `InstanceRecord`s and
//! hand them over through `InventorySource`.

use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Instance identifier (e.g. `i-0123456789abcdef0`)
pub type InstanceId = String;

/// Read-only view of one compute instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceRecord {
    pub id: InstanceId,
    pub private_ip: Option<String>,
    /// Always set by EC2 for launched instances; `None` only for malformed input
    pub launch_time: Option<DateTime<Utc>>,
    /// Security group names in provider order
    pub security_groups: Vec<String>,
    /// Empty map means the instance is untagged
    pub tags: BTreeMap<String, String>,
    pub state: InstanceState,
}

/// Instance lifecycle states
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstanceState {
    Pending,
    Running,
    ShuttingDown,
    Terminated,
    Stopping,
    Stopped,
    Unknown(String),
}

impl InstanceState {
    /// The instance is already on its way out and must not be terminated again
    pub fn is_terminating(&self) -> bool {
        matches!(self, InstanceState::ShuttingDown | InstanceState::Terminated)
    }
}

/// Helper to convert provider state names to `InstanceState`
pub fn normalize_state(state_str: &str) -> InstanceState {
    match state_str.to_lowercase().as_str() {
        "pending" => InstanceState::Pending,
        "running" => InstanceState::Running,
        "shutting-down" => InstanceState::ShuttingDown,
        "terminated" => InstanceState::Terminated,
        "stopping" => InstanceState::Stopping,
        "stopped" => InstanceState::Stopped,
        _ => InstanceState::Unknown(state_str.to_string()),
    }
}

/// Source of instance records ("describe instances")
///
/// Implementations return every instance they can see in one call; all
/// filtering happens client-side in the reaper.
#[async_trait]
pub trait InventorySource: Send + Sync {
    async fn list_instances(&self) -> Result<Vec<InstanceRecord>>;
}
