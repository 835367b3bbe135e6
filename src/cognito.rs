//! Custom-auth sign-in against a Cognito user pool.
//!
//! `Idle → AuthInitiated → {ChallengeIssued | UserCreationOffered} →
//! AuthCompleted | Aborted`. An unknown user may be signed up once with a
//! generated password, after which auth is initiated exactly once more.

use std::fmt;

use serde_json::Value;
use tracing::info;

use crate::{
    aws::{AwsCli, cognito},
    error::{OzError, Result},
    prompt::Prompter,
};

/// Auth flows this tool can drive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFlow {
    CustomAuth,
}

impl AuthFlow {
    pub const ALL: [AuthFlow; 1] = [AuthFlow::CustomAuth];

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthFlow::CustomAuth => "CUSTOM_AUTH",
        }
    }
}

impl fmt::Display for AuthFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who to authenticate, and where
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthTarget {
    pub pool_id: String,
    pub client_id: String,
    pub flow: AuthFlow,
    pub username: String,
}

/// Run the challenge/response sequence and return the authentication result.
///
/// Declining to create a missing user yields [`OzError::DeclinedByUser`]
/// without touching sign-up.
pub async fn authenticate(
    cli: AwsCli<'_>,
    prompter: &dyn Prompter,
    target: &AuthTarget,
) -> Result<Value> {
    let challenge = match initiate(cli, target).await {
        Ok(challenge) => challenge,
        Err(OzError::UserNotFound { .. }) => {
            println!("User not found.");
            create_user(cli, prompter, target).await?;
            initiate(cli, target).await?
        }
        Err(e) => return Err(e),
    };
    info!("Challenge issued: {}", challenge.challenge_name);

    let code = prompter.input("Enter verification code", None)?;

    cognito::respond_to_auth_challenge(cli, &target.client_id, &challenge, code.trim()).await
}

async fn initiate(cli: AwsCli<'_>, target: &AuthTarget) -> Result<cognito::AuthChallenge> {
    cognito::admin_initiate_auth(
        cli,
        &target.pool_id,
        &target.client_id,
        target.flow.as_str(),
        &target.username,
    )
    .await
}

async fn create_user(cli: AwsCli<'_>, prompter: &dyn Prompter, target: &AuthTarget) -> Result<()> {
    if !prompter.confirm("Create user?", true)? {
        return Err(OzError::DeclinedByUser);
    }

    let password = cognito::random_password(cli).await?;
    cognito::sign_up(cli, &target.client_id, &target.username, &password).await?;
    info!("Signed up user: {}", target.username);
    Ok(())
}
