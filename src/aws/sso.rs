use tracing::info;

use super::{AwsCli, runner::args};
use crate::error::Result;

/// Interactive `aws sso login`, output shown as it arrives
pub async fn login(cli: AwsCli<'_>, profile: &str) -> Result<()> {
    info!("Starting SSO login for profile: {}", profile);
    cli.stream(&args(["sso", "login", "--profile", profile]))
        .await?;
    info!("SSO login finished for profile: {}", profile);
    Ok(())
}
