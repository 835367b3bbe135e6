use tracing::debug;

use super::{AwsCli, runner::args};
use crate::error::{OzError, Result};

/// Profiles from the local AWS config, in the CLI's order
pub async fn list_profiles(cli: AwsCli<'_>) -> Result<Vec<String>> {
    let stdout = cli.run(&args(["configure", "list-profiles"])).await?;

    Ok(stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Region configured for `profile`
pub async fn region(cli: AwsCli<'_>, profile: &str) -> Result<String> {
    let args = args(["configure", "get", "region", "--profile", profile]);
    let region = cli.run(&args).await?.trim().to_string();

    if region.is_empty() {
        return Err(OzError::UnexpectedResponse {
            command: cli.render(&args),
            reason: "no region configured".to_string(),
        });
    }

    debug!("Region for profile '{}': {}", profile, region);
    Ok(region)
}

/// Shell `export` lines for the profile's current credentials
pub async fn export_credentials(cli: AwsCli<'_>, profile: &str) -> Result<String> {
    cli.run(&args([
        "configure",
        "export-credentials",
        "--profile",
        profile,
        "--format",
        "env",
    ]))
    .await
}
