use std::env;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::{
    config::Settings,
    constants::ALL_VARS,
    shell::{self, ShellEmitter},
};

#[derive(Debug, Clone, Subcommand)]
pub enum EnvCommand {
    #[command(about = "Print the AWS environment variables")]
    Print,
    #[command(about = "Clear the AWS environment variables")]
    Clear(ClearArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ClearArgs {
    #[arg(long, help = "Write unset lines to stdout instead of the shell side channel")]
    pub stdout: bool,
}

impl EnvCommand {
    pub fn execute(self, settings: &Settings) -> Result<()> {
        match self {
            Self::Print => {
                for line in print_lines(|key| env::var(key).ok()) {
                    println!("{line}");
                }
                Ok(())
            }
            Self::Clear(args) => {
                let mut emitter =
                    ShellEmitter::new(shell::open_sink(settings.export_fd, args.stdout));
                emitter
                    .clear()
                    .context("Failed to write shell unset lines")
            }
        }
    }
}

/// `KEY=VALUE` for every managed variable, empty when unset
pub fn print_lines(lookup: impl Fn(&str) -> Option<String>) -> Vec<String> {
    ALL_VARS
        .iter()
        .map(|key| format!("{key}={}", lookup(key).unwrap_or_default()))
        .collect()
}
