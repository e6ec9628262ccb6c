//! AWS EC2 adapter
//!
//! Everything that knows about the AWS SDK lives under this module.
//!
//! ## Module Organization
//!
//! - `session`: credential profile loading and identity check
//! - `helpers`: conversion of EC2 response shapes into reaper types
//! - `fleet`: `Ec2Fleet`, the EC2-backed `InventorySource` and `Actuator`
//!
//! The reaper itself only sees the traits, so the pipeline can be exercised
//! with in-memory fakes.

mod fleet;
mod helpers;
mod session;

pub use fleet::Ec2Fleet;
pub use helpers::{flatten_reservations, instance_to_record, terminate_output_to_ack};
pub use session::{establish_session, load_sdk_config};
