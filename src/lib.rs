//! reapctl library
//!
//! Finds zombie EC2 instances (in the runner security group, untagged, older
//! than a threshold) and terminates them in one batch.

pub mod aws;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod inventory;
pub mod reaper;
pub mod report;
pub mod terminator;
pub mod utils;
pub mod zombie;

// Re-export commonly used types
pub use inventory::{InstanceId, InstanceRecord, InstanceState, InventorySource};
pub use reaper::{reap, ReapReport};
pub use terminator::{Actuator, TerminationAck, TerminationOutcome};
pub use zombie::{is_zombie, scan, ZombieCriteria};
