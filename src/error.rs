use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, OzError>;

/// Failures raised below the command layer.
///
/// Callers branch on the variant rather than on stderr content; the only
/// place that inspects AWS CLI stderr is [`aws_error_code`].
#[derive(Debug, Error)]
pub enum OzError {
    /// The external command ran and exited non-zero.
    #[error("`{command}` failed ({status})")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    /// Cognito rejected the username with `UserNotFoundException`.
    #[error("user '{username}' does not exist in the user pool")]
    UserNotFound { username: String, stderr: String },

    /// The external command could not be launched at all.
    #[error("failed to launch `{command}`")]
    SpawnFailed {
        command: String,
        #[source]
        source: io::Error,
    },

    /// The user declined the offered recovery step.
    #[error("declined by user")]
    DeclinedByUser,

    #[error("unexpected output from `{command}`: {reason}")]
    UnexpectedResponse { command: String, reason: String },

    /// STS could not confirm the caller's identity for the profile.
    #[error("no live session for profile '{profile}': {reason}")]
    IdentityProbe { profile: String, reason: String },

    #[error("`{command}` returned nothing to choose from")]
    NoItems { command: String },

    #[error("no AWS profiles are configured (see ~/.aws/config)")]
    NoProfiles,

    #[error("invalid value for {name}: '{value}'")]
    InvalidSetting { name: &'static str, value: String },

    #[error(transparent)]
    Prompt(#[from] dialoguer::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl OzError {
    /// Captured stderr of a failed external command, if any was captured.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            Self::CommandFailed { stderr, .. } | Self::UserNotFound { stderr, .. }
                if !stderr.trim().is_empty() =>
            {
                Some(stderr)
            }
            _ => None,
        }
    }

    /// AWS service error code reported by the CLI, e.g. `UserNotFoundException`.
    pub fn aws_error_code(&self) -> Option<&str> {
        match self {
            Self::CommandFailed { stderr, .. } => aws_error_code(stderr),
            _ => None,
        }
    }
}

/// Extract the error code from the CLI's
/// `An error occurred (<Code>) when calling the <Op> operation: ...` line.
pub fn aws_error_code(stderr: &str) -> Option<&str> {
    const MARKER: &str = "An error occurred (";

    stderr.lines().find_map(|line| {
        let start = line.find(MARKER)? + MARKER.len();
        let rest = &line[start..];
        let end = rest.find(')')?;
        let code = &rest[..end];
        (!code.is_empty()).then_some(code)
    })
}
