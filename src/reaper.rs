//! End-to-end reaper pass: fetch, filter, report, terminate

use crate::error::Result;
use crate::inventory::{InstanceId, InventorySource};
use crate::report;
use crate::terminator::{self, Actuator, TerminationOutcome};
use crate::zombie::{self, ZombieCriteria};
use chrono::{DateTime, Utc};
use std::io::Write;
use tracing::{debug, info};

/// Summary of one reaper pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReapReport {
    /// Instances returned by the inventory
    pub scanned: usize,
    /// Instances dropped because they were already shutting down or terminated
    pub skipped_terminating: usize,
    pub zombies: Vec<InstanceId>,
    pub outcome: TerminationOutcome,
}

/// Run one pass against a fixed `now`
///
/// Candidate lines are written to `out` before termination is attempted;
/// the acknowledgment line follows only if the actuator accepted a batch.
pub async fn reap<W: Write>(
    inventory: &dyn InventorySource,
    actuator: &dyn Actuator,
    criteria: &ZombieCriteria,
    now: DateTime<Utc>,
    out: &mut W,
) -> Result<ReapReport> {
    let mut instances = inventory.list_instances().await?;
    let scanned = instances.len();

    instances.retain(|r| !r.state.is_terminating());
    let skipped_terminating = scanned - instances.len();
    debug!(
        "Scanning {} instance(s) ({} already terminating) for group '{}' older than {} min",
        instances.len(),
        skipped_terminating,
        criteria.target_group_name,
        criteria.min_age_minutes
    );

    let zombies = zombie::scan(&instances, criteria, now);
    for record in instances.iter().filter(|r| zombies.contains(&r.id)) {
        report::write_candidate(&mut *out, record, now)?;
    }

    let outcome = terminator::terminate(actuator, &zombies).await?;
    match &outcome {
        TerminationOutcome::NothingToDo => info!("No zombie instances found"),
        TerminationOutcome::Terminated(ack) => {
            info!("Terminated {} zombie instance(s)", zombies.len());
            report::write_ack(&mut *out, ack)?;
        }
    }

    Ok(ReapReport {
        scanned,
        skipped_terminating,
        zombies,
        outcome,
    })
}
