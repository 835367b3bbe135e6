use serde::de::DeserializeOwned;

use crate::error::{OzError, Result};

pub mod cognito;
pub mod configure;
pub mod runner;
pub mod session;
pub mod sso;
pub mod sts;

pub use runner::{CommandRunner, ProcessRunner};
pub use session::SessionState;
pub use sts::{IdentityProbe, StsProbe};

/// Handle on the AWS CLI: which executable to call and how to run it
#[derive(Clone, Copy)]
pub struct AwsCli<'a> {
    runner: &'a dyn CommandRunner,
    program: &'a str,
}

impl<'a> AwsCli<'a> {
    pub fn new(runner: &'a dyn CommandRunner, program: &'a str) -> Self {
        Self { runner, program }
    }

    pub fn runner(&self) -> &'a dyn CommandRunner {
        self.runner
    }

    /// Rendered command line, as used in errors
    pub fn render(&self, args: &[String]) -> String {
        runner::render(self.program, args)
    }

    /// Run an AWS CLI command and return its stdout.
    pub async fn run(&self, args: &[String]) -> Result<String> {
        self.runner.output(self.program, args).await
    }

    /// Run an AWS CLI command and deserialize its JSON stdout.
    pub async fn run_json<T: DeserializeOwned>(&self, args: &[String]) -> Result<T> {
        let stdout = self.run(args).await?;
        serde_json::from_str(&stdout).map_err(|e| OzError::UnexpectedResponse {
            command: self.render(args),
            reason: e.to_string(),
        })
    }

    /// Run an interactive AWS CLI command with its output shown live.
    pub async fn stream(&self, args: &[String]) -> Result<()> {
        self.runner.stream(self.program, args).await
    }
}

impl std::fmt::Debug for AwsCli<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsCli")
            .field("program", &self.program)
            .finish_non_exhaustive()
    }
}
