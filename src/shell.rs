use std::{
    borrow::Cow,
    fs::OpenOptions,
    io::{self, Write},
};

use clap::ValueEnum;
use tracing::{debug, warn};

use crate::constants::{ALL_VARS, AWS_PROFILE, CREDENTIAL_VARS};

/// Which variables `login` leaves set in the calling shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExportMode {
    /// Export AWS_PROFILE only
    #[default]
    Profile,
    /// Export discrete credentials resolved from the profile
    Creds,
    /// Leave nothing set
    #[value(name = "none")]
    Nothing,
}

/// What to write for a resolved login
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exports<'a> {
    Profile(&'a str),
    /// Output of `aws configure export-credentials --format env`
    Credentials(&'a str),
    Nothing,
}

/// Writes `export`/`unset` lines to a sink the calling shell evaluates
#[derive(Debug)]
pub struct ShellEmitter<W: Write> {
    sink: W,
}

impl<W: Write> ShellEmitter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    pub fn into_inner(self) -> W {
        self.sink
    }

    pub fn unset(&mut self, key: &str) -> io::Result<()> {
        writeln!(self.sink, "unset {key}")
    }

    pub fn export(&mut self, key: &str, value: &str) -> io::Result<()> {
        writeln!(self.sink, "export {key}={}", quote(value))
    }

    /// Forward shell text produced elsewhere, newline terminated.
    pub fn passthrough(&mut self, text: &str) -> io::Result<()> {
        self.sink.write_all(text.as_bytes())?;
        if !text.is_empty() && !text.ends_with('\n') {
            self.sink.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Unset every managed variable.
    pub fn clear(&mut self) -> io::Result<()> {
        for key in ALL_VARS {
            self.unset(key)?;
        }
        self.sink.flush()
    }

    pub fn emit(&mut self, exports: Exports<'_>) -> io::Result<()> {
        match exports {
            Exports::Profile(profile) => {
                for key in CREDENTIAL_VARS {
                    self.unset(key)?;
                }
                self.export(AWS_PROFILE, profile)?;
            }
            Exports::Credentials(env) => {
                self.unset(AWS_PROFILE)?;
                self.passthrough(env)?;
            }
            Exports::Nothing => return self.clear(),
        }
        self.sink.flush()
    }
}

/// Quote `value` for POSIX shells unless it is made only of safe characters.
pub fn quote(value: &str) -> Cow<'_, str> {
    let safe = |c: char| c.is_ascii_alphanumeric() || "_./:@+=-".contains(c);

    if !value.is_empty() && value.chars().all(safe) {
        Cow::Borrowed(value)
    } else {
        Cow::Owned(format!("'{}'", value.replace('\'', r"'\''")))
    }
}

/// Open the side channel, or stdout when asked to or when the descriptor
/// is not open (the binary was run without the shell function).
pub fn open_sink(export_fd: i32, to_stdout: bool) -> Box<dyn Write> {
    if to_stdout {
        return Box::new(io::stdout());
    }

    let path = format!("/dev/fd/{export_fd}");
    match OpenOptions::new().append(true).open(&path) {
        Ok(file) => {
            debug!("Writing exports to {}", path);
            Box::new(file)
        }
        Err(e) => {
            warn!(
                "Descriptor {} is not open ({}); writing exports to stdout. Run `oz shell-init` to set up the shell function.",
                export_fd, e
            );
            Box::new(io::stdout())
        }
    }
}
