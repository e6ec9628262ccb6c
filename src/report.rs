//! Console output
//!
//! These lines are the user-facing record of a run, written to stdout
//! independently of `tracing` logs.

use crate::error::Result;
use crate::inventory::InstanceRecord;
use crate::terminator::TerminationAck;
use crate::utils::{age_minutes, format_utc};
use chrono::{DateTime, Utc};
use std::io::Write;

/// One line describing a zombie about to be terminated
pub fn candidate_line(record: &InstanceRecord, now: DateTime<Utc>) -> String {
    let ip = record.private_ip.as_deref().unwrap_or("-");
    let (launch, age) = match record.launch_time {
        Some(lt) => (format_utc(lt), age_minutes(lt, now)),
        None => ("-".to_string(), 0.0),
    };
    format!(
        "Instance {} found with IP {}. Launch Time: {}, Current Time: {}, Duration: {:.6}",
        record.id,
        ip,
        launch,
        format_utc(now),
        age
    )
}

/// Final line carrying the provider acknowledgment verbatim
pub fn ack_line(ack: &TerminationAck) -> Result<String> {
    Ok(format!("Terminate output: {}", serde_json::to_string(ack)?))
}

pub fn write_candidate<W: Write>(out: &mut W, record: &InstanceRecord, now: DateTime<Utc>) -> Result<()> {
    writeln!(out, "{}", candidate_line(record, now))?;
    Ok(())
}

pub fn write_ack<W: Write>(out: &mut W, ack: &TerminationAck) -> Result<()> {
    writeln!(out, "{}", ack_line(ack)?)?;
    Ok(())
}
