use crate::error::{ReapError, Result};
use crate::inventory::{InstanceId, InstanceRecord, InventorySource};
use crate::terminator::{Actuator, TerminationAck};
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_ec2::error::DisplayErrorContext;
use aws_sdk_ec2::Client as Ec2Client;
use tracing::{debug, info};

use super::helpers::{flatten_reservations, terminate_output_to_ack};

/// EC2-backed inventory and actuator sharing one client
#[derive(Clone, Debug)]
pub struct Ec2Fleet {
    client: Ec2Client,
}

impl Ec2Fleet {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            client: Ec2Client::new(sdk_config),
        }
    }

    pub fn from_client(client: Ec2Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl InventorySource for Ec2Fleet {
    /// One unfiltered DescribeInstances call; only the first page is used
    async fn list_instances(&self) -> Result<Vec<InstanceRecord>> {
        let response = self
            .client
            .describe_instances()
            .send()
            .await
            .map_err(|e| ReapError::inventory(format!("{}", DisplayErrorContext(&e)), e))?;

        if response.next_token().is_some() {
            debug!("DescribeInstances returned more pages; only the first page is scanned");
        }

        let records = flatten_reservations(&response);
        info!("Listed {} EC2 instance(s)", records.len());
        Ok(records)
    }
}

#[async_trait]
impl Actuator for Ec2Fleet {
    async fn terminate(&self, instance_ids: &[InstanceId]) -> Result<TerminationAck> {
        let output = self
            .client
            .terminate_instances()
            .set_instance_ids(Some(instance_ids.to_vec()))
            .send()
            .await
            .map_err(|e| {
                ReapError::actuator(instance_ids, format!("{}", DisplayErrorContext(&e)), e)
            })?;

        Ok(terminate_output_to_ack(&output))
    }
}
