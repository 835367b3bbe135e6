use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use crate::{
    commands::{CognitoCommand, CompletionsCommand, EnvCommand, LoginCommand, ShellInitCommand},
    config::Settings,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "oz", version, about = "awscli macros", long_about = None, arg_required_else_help = true)]
pub struct Cli {
    #[arg(short = 'v', long, global = true, action = ArgAction::Count, help = "Increase verbosity (-v info, -vv debug, -vvv trace)")]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    #[command(
        about = "Log in to AWS with a profile and export AWS_PROFILE or its credentials (skips login when the session is live)"
    )]
    Login(LoginCommand),
    #[command(subcommand, about = "Manage AWS environment variables")]
    Env(EnvCommand),
    #[command(subcommand, about = "Interact with AWS Cognito user pools")]
    Cognito(CognitoCommand),
    #[command(about = "Generate shell completion scripts for oz")]
    Completions(CompletionsCommand),
    #[command(about = "Print the shell function that applies oz's exports to the current shell")]
    ShellInit(ShellInitCommand),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Login(cmd) => cmd.execute(&Settings::from_env()?).await,
            Commands::Env(cmd) => cmd.execute(&Settings::from_env()?),
            Commands::Cognito(cmd) => cmd.execute(&Settings::from_env()?).await,
            Commands::Completions(cmd) => {
                cmd.execute();
                Ok(())
            }
            Commands::ShellInit(cmd) => {
                cmd.execute(&Settings::from_env()?);
                Ok(())
            }
        }
    }
}
