//! Exit code standardization for reapctl
//!
//! Provides consistent exit codes so cron jobs and scripts can tell a
//! misconfigured run apart from a failing cloud API.
//!
//! ## Exit Code Convention
//!
//! - `0` = Success (including "nothing to terminate")
//! - `2` = System error (EC2 API failure, network error, output failure)
//! - `3` = Configuration error (invalid criteria, unusable credentials)

use crate::error::ReapError;

/// Standard exit codes for reapctl
pub mod codes {
    /// Success
    pub const SUCCESS: i32 = 0;
    /// System error (AWS API failure, network error)
    pub const SYSTEM_ERROR: i32 = 2;
    /// Configuration error (invalid settings, invalid credentials)
    pub const CONFIG_ERROR: i32 = 3;
}

/// Map a ReapError to an appropriate exit code
pub fn exit_code_for_error(error: &ReapError) -> i32 {
    use ReapError::*;
    match error {
        Config(_) => codes::CONFIG_ERROR,
        Auth { .. } => codes::CONFIG_ERROR,

        Inventory { .. } => codes::SYSTEM_ERROR,
        Actuator { .. } => codes::SYSTEM_ERROR,
        Io(_) => codes::SYSTEM_ERROR,
        Json(_) => codes::SYSTEM_ERROR,
    }
}

/// Exit code for an error surfaced through `anyhow` at the CLI boundary
///
/// Errors that did not originate in the library (e.g. a config file that
/// failed to parse) are treated as configuration errors.
pub fn exit_code_for_anyhow(error: &anyhow::Error) -> i32 {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<ReapError>())
        .map(exit_code_for_error)
        .unwrap_or(codes::CONFIG_ERROR)
}
