use anyhow::{Context, Result};
use clap::Subcommand;
use tracing::{debug, info};

use crate::{
    aws::{AwsCli, CommandRunner, ProcessRunner, cognito as idp},
    cognito::{self, AuthFlow, AuthTarget},
    config::Settings,
    constants::GIT,
    error::OzError,
    prompt::{Prompter, TerminalPrompter},
    select::select_paginated,
};

#[derive(Debug, Clone, Subcommand)]
pub enum CognitoCommand {
    #[command(about = "Log in to a Cognito user pool")]
    Login,
}

impl CognitoCommand {
    pub async fn execute(self, settings: &Settings) -> Result<()> {
        let runner = ProcessRunner;
        let cli = AwsCli::new(&runner, &settings.aws_cli);

        match self {
            Self::Login => login(cli, &TerminalPrompter).await,
        }
    }
}

async fn login(cli: AwsCli<'_>, prompter: &dyn Prompter) -> Result<()> {
    let pool_id = select_paginated(cli, prompter, &idp::user_pools())
        .await
        .context("Failed to select a user pool")?;
    println!("Selected pool ID: {pool_id}");

    let client_id = select_paginated(cli, prompter, &idp::user_pool_clients(&pool_id))
        .await
        .context("Failed to select an app client")?;
    println!("Selected client ID: {client_id}");

    let flow = select_flow(prompter)?;
    println!("Selected auth flow: {flow}");

    let default_username = default_username(cli.runner()).await;
    let username = prompter.input("Enter a username", default_username.as_deref())?;
    println!("Selected username: {username}");

    let target = AuthTarget {
        pool_id,
        client_id,
        flow,
        username,
    };

    println!("Initiating authentication...");
    match cognito::authenticate(cli, prompter, &target).await {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
        Err(OzError::DeclinedByUser) => {
            info!("User creation declined; nothing to do");
            Ok(())
        }
        Err(e) => Err(anyhow::Error::new(e).context("Authentication failed")),
    }
}

fn select_flow(prompter: &dyn Prompter) -> Result<AuthFlow> {
    let names: Vec<String> = AuthFlow::ALL.iter().map(ToString::to_string).collect();
    let index = prompter.select("Select an authentication flow", &names)?;

    AuthFlow::ALL
        .get(index)
        .copied()
        .context("Authentication flow selection out of range")
}

/// The git user email, if one is configured
async fn default_username(runner: &dyn CommandRunner) -> Option<String> {
    let args = ["config".to_string(), "user.email".to_string()];
    match runner.output(GIT, &args).await {
        Ok(email) => Some(email.trim().to_string()).filter(|email| !email.is_empty()),
        Err(e) => {
            debug!("No default username from git: {}", e);
            None
        }
    }
}
