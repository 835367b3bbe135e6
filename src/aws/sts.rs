use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_sts::{Client as StsClient, error::DisplayErrorContext};
use tracing::debug;

use crate::error::{OzError, Result};

/// Confirms that a profile's credentials are currently usable
#[async_trait]
pub trait IdentityProbe: Send + Sync {
    /// ARN of the caller when the profile has a live session.
    async fn caller_identity(&self, profile: &str, region: &str) -> Result<String>;
}

/// Probes with STS `GetCallerIdentity`
#[derive(Debug, Clone, Copy, Default)]
pub struct StsProbe;

#[async_trait]
impl IdentityProbe for StsProbe {
    async fn caller_identity(&self, profile: &str, region: &str) -> Result<String> {
        debug!("Calling STS GetCallerIdentity");
        debug!("Profile: {}", profile);
        debug!("Region: {}", region);

        let config = aws_config::defaults(BehaviorVersion::latest())
            .profile_name(profile)
            .region(Region::new(region.to_string()))
            .load()
            .await;

        let client = StsClient::new(&config);

        let response = client
            .get_caller_identity()
            .send()
            .await
            .map_err(|e| OzError::IdentityProbe {
                profile: profile.to_string(),
                reason: DisplayErrorContext(&e).to_string(),
            })?;

        let arn = response.arn().unwrap_or_default().to_string();
        debug!("Caller identity: {}", arn);
        Ok(arn)
    }
}
