use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

use super::{AwsCli, runner::args};
use crate::{
    constants::{GENERATED_PASSWORD_LENGTH, USER_NOT_FOUND_CODE, USER_POOL_PAGE_SIZE},
    error::{OzError, Result, aws_error_code},
    select::Listing,
};

/// Challenge returned by `admin-initiate-auth`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AuthChallenge {
    pub challenge_name: String,
    pub session: String,
    pub challenge_parameters: ChallengeParameters,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChallengeParameters {
    #[serde(rename = "USERNAME")]
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}

pub fn user_pools() -> Listing {
    Listing {
        message: "Select a user pool".to_string(),
        args: args([
            "cognito-idp".to_string(),
            "list-user-pools".to_string(),
            "--max-results".to_string(),
            USER_POOL_PAGE_SIZE.to_string(),
        ]),
        items_key: "UserPools",
        label_key: "Name",
        value_key: "Id",
    }
}

pub fn user_pool_clients(pool_id: &str) -> Listing {
    Listing {
        message: "Select an app client".to_string(),
        args: args([
            "cognito-idp",
            "list-user-pool-clients",
            "--user-pool-id",
            pool_id,
        ]),
        items_key: "UserPoolClients",
        label_key: "ClientName",
        value_key: "ClientId",
    }
}

/// Start an admin auth flow for `username`.
///
/// An unknown user is reported as [`OzError::UserNotFound`].
pub async fn admin_initiate_auth(
    cli: AwsCli<'_>,
    pool_id: &str,
    client_id: &str,
    auth_flow: &str,
    username: &str,
) -> Result<AuthChallenge> {
    let auth_parameters = json!({ "USERNAME": username }).to_string();

    cli.run_json(&args([
        "cognito-idp",
        "admin-initiate-auth",
        "--user-pool-id",
        pool_id,
        "--client-id",
        client_id,
        "--auth-flow",
        auth_flow,
        "--auth-parameters",
        auth_parameters.as_str(),
    ]))
    .await
    .map_err(|err| match err {
        OzError::CommandFailed { stderr, .. }
            if aws_error_code(&stderr) == Some(USER_NOT_FOUND_CODE) =>
        {
            OzError::UserNotFound {
                username: username.to_string(),
                stderr,
            }
        }
        other => other,
    })
}

/// Answer a custom auth challenge; returns the raw authentication result.
pub async fn respond_to_auth_challenge(
    cli: AwsCli<'_>,
    client_id: &str,
    challenge: &AuthChallenge,
    answer: &str,
) -> Result<Value> {
    let params = &challenge.challenge_parameters;
    let mut responses = json!({
        "ANSWER": answer,
        "USERNAME": params.username,
    });
    if let Some(email) = &params.email {
        responses["email"] = Value::String(email.clone());
    }
    let responses = responses.to_string();

    cli.run_json(&args([
        "cognito-idp",
        "respond-to-auth-challenge",
        "--client-id",
        client_id,
        "--challenge-name",
        challenge.challenge_name.as_str(),
        "--session",
        challenge.session.as_str(),
        "--challenge-responses",
        responses.as_str(),
    ]))
    .await
}

/// Register `username` (also used as its email) with `password`.
pub async fn sign_up(cli: AwsCli<'_>, client_id: &str, username: &str, password: &str) -> Result<()> {
    let attributes = json!([{ "Name": "email", "Value": username }]).to_string();
    // Joined form so a password starting with '-' is not read as an option
    let password_arg = format!("--password={password}");

    let stdout = cli
        .run(&args([
            "cognito-idp",
            "sign-up",
            "--client-id",
            client_id,
            "--username",
            username,
            "--user-attributes",
            attributes.as_str(),
            password_arg.as_str(),
        ]))
        .await?;
    debug!("sign-up response: {}", stdout.trim());
    Ok(())
}

/// Random password with every character class, from Secrets Manager
pub async fn random_password(cli: AwsCli<'_>) -> Result<String> {
    let length = GENERATED_PASSWORD_LENGTH.to_string();
    let args = args([
        "secretsmanager",
        "get-random-password",
        "--password-length",
        length.as_str(),
        "--require-each-included-type",
        "--output",
        "text",
        "--query",
        "RandomPassword",
    ]);

    let password = cli.run(&args).await?.trim().to_string();
    if password.is_empty() {
        return Err(OzError::UnexpectedResponse {
            command: cli.render(&args),
            reason: "empty password".to_string(),
        });
    }
    Ok(password)
}
