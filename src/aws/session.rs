use tracing::{debug, info};

use super::{AwsCli, IdentityProbe, configure, sso};
use crate::error::Result;

/// How a profile's session was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Credentials were already valid
    Active,
    /// An SSO login was run
    LoggedIn,
}

/// Make sure `profile` has a live session, logging in through SSO if not.
///
/// Any probe failure (no region, expired or missing credentials) counts as
/// "not logged in". Failure of the login itself is returned.
pub async fn ensure_session(
    cli: AwsCli<'_>,
    probe: &dyn IdentityProbe,
    profile: &str,
) -> Result<SessionState> {
    match probe_session(cli, probe, profile).await {
        Ok(arn) => {
            info!("Session for profile '{}' is active as {}", profile, arn);
            Ok(SessionState::Active)
        }
        Err(e) => {
            debug!("Session probe failed: {}", e);
            // stdout may carry the exports
            eprintln!("Logging in to profile '{profile}'...");
            sso::login(cli, profile).await?;
            Ok(SessionState::LoggedIn)
        }
    }
}

async fn probe_session(
    cli: AwsCli<'_>,
    probe: &dyn IdentityProbe,
    profile: &str,
) -> Result<String> {
    let region = configure::region(cli, profile).await?;
    probe.caller_identity(profile, &region).await
}
