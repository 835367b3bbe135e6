use std::env;

use crate::{
    constants::{AWS_CLI_ENV, DEFAULT_AWS_CLI, DEFAULT_EXPORT_FD, EXPORT_FD_ENV},
    error::{OzError, Result},
};

/// Runtime settings taken from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// AWS CLI executable (name on PATH or absolute path)
    pub aws_cli: String,
    /// Descriptor the wrapping shell function evaluates
    pub export_fd: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            aws_cli: DEFAULT_AWS_CLI.to_string(),
            export_fd: DEFAULT_EXPORT_FD,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let aws_cli = lookup(AWS_CLI_ENV)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or(defaults.aws_cli);

        let export_fd = match lookup(EXPORT_FD_ENV) {
            None => defaults.export_fd,
            Some(value) => value
                .trim()
                .parse::<i32>()
                .ok()
                .filter(|fd| *fd >= 0)
                .ok_or(OzError::InvalidSetting {
                    name: EXPORT_FD_ENV,
                    value,
                })?,
        };

        Ok(Self { aws_cli, export_fd })
    }
}
