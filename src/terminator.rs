//! Batched termination
//!
//! All zombies found in a run are terminated with a single request. An empty
//! batch is a no-op and never reaches the provider.

use crate::error::Result;
use crate::inventory::InstanceId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Per-instance state transition reported by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateChange {
    pub instance_id: InstanceId,
    pub previous_state: Option<String>,
    pub current_state: Option<String>,
}

/// Provider acknowledgment of a termination request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminationAck {
    pub terminating_instances: Vec<StateChange>,
}

/// Executes termination requests ("terminate instances")
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Actuator: Send + Sync {
    /// Submit one batch. Implementations must not split or retry it.
    async fn terminate(&self, instance_ids: &[InstanceId]) -> Result<TerminationAck>;
}

/// Result of a termination step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationOutcome {
    /// The batch was empty; the actuator was not called
    NothingToDo,
    /// The actuator accepted the batch
    Terminated(TerminationAck),
}

/// Terminate `instance_ids` in one batch
///
/// Actuator errors are returned as-is; there is no partial recovery.
pub async fn terminate(
    actuator: &dyn Actuator,
    instance_ids: &[InstanceId],
) -> Result<TerminationOutcome> {
    if instance_ids.is_empty() {
        debug!("No instances to terminate, skipping actuator call");
        return Ok(TerminationOutcome::NothingToDo);
    }

    info!("Terminating {} instance(s): {:?}", instance_ids.len(), instance_ids);
    let ack = actuator.terminate(instance_ids).await?;
    Ok(TerminationOutcome::Terminated(ack))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReapError;
    use std::collections::HashSet;

    #[tokio::test]
    async fn test_empty_batch_skips_actuator() {
        let mut actuator = MockActuator::new();
        actuator.expect_terminate().never();

        let outcome = terminate(&actuator, &[]).await.unwrap();
        assert_eq!(outcome, TerminationOutcome::NothingToDo);
    }

    #[tokio::test]
    async fn test_single_call_with_all_ids() {
        let mut actuator = MockActuator::new();
        actuator
            .expect_terminate()
            .times(1)
            .withf(|ids: &[InstanceId]| {
                let got: HashSet<&str> = ids.iter().map(String::as_str).collect();
                got == HashSet::from(["i-1", "i-2"])
            })
            .returning(|ids| {
                Ok(TerminationAck {
                    terminating_instances: ids
                        .iter()
                        .map(|id| StateChange {
                            instance_id: id.clone(),
                            previous_state: Some("running".into()),
                            current_state: Some("shutting-down".into()),
                        })
                        .collect(),
                })
            });

        let ids = vec!["i-1".to_string(), "i-2".to_string()];
        let outcome = terminate(&actuator, &ids).await.unwrap();
        match outcome {
            TerminationOutcome::Terminated(ack) => {
                assert_eq!(ack.terminating_instances.len(), 2);
                assert_eq!(ack.terminating_instances[0].instance_id, "i-1");
            }
            other => panic!("expected Terminated, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_ack_returned_unmodified() {
        let ack = TerminationAck {
            terminating_instances: vec![StateChange {
                instance_id: "i-9".into(),
                previous_state: Some("stopped".into()),
                current_state: Some("terminated".into()),
            }],
        };
        let expected = ack.clone();

        let mut actuator = MockActuator::new();
        actuator
            .expect_terminate()
            .times(1)
            .returning(move |_| Ok(ack.clone()));

        let outcome = terminate(&actuator, &["i-9".to_string()]).await.unwrap();
        assert_eq!(outcome, TerminationOutcome::Terminated(expected));
    }

    #[tokio::test]
    async fn test_actuator_error_propagates() {
        let mut actuator = MockActuator::new();
        actuator.expect_terminate().times(1).returning(|ids| {
            Err(ReapError::Actuator {
                instance_ids: ids.to_vec(),
                message: "UnauthorizedOperation".into(),
                source: None,
            })
        });

        let err = terminate(&actuator, &["i-1".to_string()]).await.unwrap_err();
        assert!(matches!(err, ReapError::Actuator { .. }));
    }
}
