//! Credential profile and session setup

use crate::error::{ReapError, Result};
use aws_config::{BehaviorVersion, SdkConfig};
use aws_sdk_sts::error::DisplayErrorContext;
use aws_sdk_sts::Client as StsClient;
use tracing::{debug, info};

/// Load SDK configuration for a named profile from the shared config files
///
/// When `region` is `None` the region comes from the profile or the default
/// provider chain.
pub async fn load_sdk_config(profile: &str, region: Option<&str>) -> SdkConfig {
    debug!("Loading AWS config for profile '{}'", profile);
    let mut loader = aws_config::defaults(BehaviorVersion::latest()).profile_name(profile);
    if let Some(region) = region {
        loader = loader.region(aws_sdk_ec2::config::Region::new(region.to_string()));
    }
    loader.load().await
}

/// Load the profile and prove the credentials work
///
/// Credential providers resolve lazily, so a broken profile would otherwise
/// only surface on the first EC2 call. A single STS `GetCallerIdentity` makes
/// it fail up front as `ReapError::Auth`, before any scanning.
pub async fn establish_session(profile: &str, region: Option<&str>) -> Result<SdkConfig> {
    let sdk_config = load_sdk_config(profile, region).await;

    if sdk_config.region().is_none() {
        return Err(ReapError::Auth {
            profile: profile.to_string(),
            message: "no region configured; set one in the profile or pass --region".to_string(),
            source: None,
        });
    }

    let identity = StsClient::new(&sdk_config)
        .get_caller_identity()
        .send()
        .await
        .map_err(|e| ReapError::Auth {
            profile: profile.to_string(),
            message: format!("{}", DisplayErrorContext(&e)),
            source: Some(Box::new(e)),
        })?;

    info!(
        "Authenticated as {} (account {})",
        identity.arn().unwrap_or("unknown"),
        identity.account().unwrap_or("unknown")
    );
    Ok(sdk_config)
}
