//! Error types for reapctl
//!
//! There are two error types: `ReapError` (main error enum) and `ConfigError`
//! (configuration-specific).
//!
//! ## Error Handling Philosophy
//!
//! Library code uses `crate::error::Result<T>` which returns `ReapError`.
//! The binary uses `anyhow::Result<T>` for top-level error handling and maps
//! the underlying `ReapError` to an exit code (see `exit_codes`).
//!
//! Every variant is fatal. A reaper run is a single operator-invoked pass:
//! nothing is retried and no partial results are used. Re-running the tool
//! re-evaluates the fleet from scratch.
//!
//! ## When to Use Which Error
//!
//! - `ConfigError`: invalid criteria or settings
//!   - Automatically converted to `ReapError::Config` via `#[from]`
//!
//! - `Auth`: the credential profile could not produce a working session
//!
//! - `Inventory`: listing instances failed
//!
//! - `Actuator`: the batched termination request failed

use crate::inventory::InstanceId;
use thiserror::Error;

/// Main error type for reapctl
#[derive(Error, Debug)]
pub enum ReapError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Authentication failed for profile '{profile}': {message}")]
    Auth {
        profile: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Failed to list instances: {message}")]
    Inventory {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Failed to terminate {} instance(s) [{}]: {}", .instance_ids.len(), .instance_ids.join(", "), .message)]
    Actuator {
        instance_ids: Vec<InstanceId>,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Failed to parse config: {0}")]
    ParseError(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ReapError>;

impl ReapError {
    pub fn inventory(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ReapError::Inventory {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn actuator(
        instance_ids: &[InstanceId],
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ReapError::Actuator {
            instance_ids: instance_ids.to_vec(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
