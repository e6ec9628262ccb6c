//! Conversions from EC2 response shapes
//!
//! DescribeInstances nests instances inside reservations; the reaper wants a
//! flat list of `InstanceRecord`s. TerminateInstances returns state changes
//! that become a `TerminationAck`.

use crate::inventory::{normalize_state, InstanceRecord, InstanceState};
use crate::terminator::{StateChange, TerminationAck};
use aws_sdk_ec2::operation::describe_instances::DescribeInstancesOutput;
use aws_sdk_ec2::operation::terminate_instances::TerminateInstancesOutput;
use aws_sdk_ec2::types::{Instance as Ec2Instance, InstanceState as Ec2InstanceState};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use tracing::warn;

/// Convert one EC2 instance into an `InstanceRecord`
///
/// Returns `None` for instances without an ID, which EC2 never produces for
/// real instances.
pub fn instance_to_record(instance: &Ec2Instance) -> Option<InstanceRecord> {
    let id = instance.instance_id()?.to_string();

    let launch_time = instance
        .launch_time()
        .and_then(|lt| DateTime::<Utc>::from_timestamp(lt.secs(), lt.subsec_nanos()));

    let security_groups = instance
        .security_groups()
        .iter()
        .filter_map(|g| g.group_name())
        .map(str::to_string)
        .collect();

    // A tag without a key still counts as a tag
    let tags: BTreeMap<String, String> = instance
        .tags()
        .iter()
        .map(|t| {
            (
                t.key().unwrap_or_default().to_string(),
                t.value().unwrap_or_default().to_string(),
            )
        })
        .collect();

    Some(InstanceRecord {
        id,
        private_ip: instance.private_ip_address().map(str::to_string),
        launch_time,
        security_groups,
        tags,
        state: state_of(instance.state()),
    })
}

fn state_of(state: Option<&Ec2InstanceState>) -> InstanceState {
    state
        .and_then(|s| s.name())
        .map(|name| normalize_state(name.as_str()))
        .unwrap_or_else(|| InstanceState::Unknown("unknown".to_string()))
}

fn state_name(state: Option<&Ec2InstanceState>) -> Option<String> {
    state
        .and_then(|s| s.name())
        .map(|name| name.as_str().to_string())
}

/// Flatten every reservation in a DescribeInstances response
pub fn flatten_reservations(response: &DescribeInstancesOutput) -> Vec<InstanceRecord> {
    response
        .reservations()
        .iter()
        .flat_map(|r| r.instances())
        .filter_map(|instance| {
            let record = instance_to_record(instance);
            if record.is_none() {
                warn!("Skipping instance without an ID in DescribeInstances response");
            }
            record
        })
        .collect()
}

/// Convert a TerminateInstances response into a `TerminationAck`
pub fn terminate_output_to_ack(output: &TerminateInstancesOutput) -> TerminationAck {
    TerminationAck {
        terminating_instances: output
            .terminating_instances()
            .iter()
            .map(|change| StateChange {
                instance_id: change.instance_id().unwrap_or("unknown").to_string(),
                previous_state: state_name(change.previous_state()),
                current_state: state_name(change.current_state()),
            })
            .collect(),
    }
}
