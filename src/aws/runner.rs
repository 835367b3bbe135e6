use std::{
    io::{self, Write},
    process::Stdio,
    sync::{Mutex, PoisonError},
};

use async_trait::async_trait;
use tokio::{
    io::{AsyncBufReadExt, AsyncRead, BufReader},
    process::Command,
};
use tracing::debug;

use crate::error::{OzError, Result};

/// Seam between the tool and the external programs it drives
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run to completion and return captured stdout.
    async fn output(&self, program: &str, args: &[String]) -> Result<String>;

    /// Run with stdout/stderr forwarded to the console (stderr) line by line,
    /// returning once the child has exited.
    async fn stream(&self, program: &str, args: &[String]) -> Result<()>;
}

/// Runs real child processes through tokio
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn output(&self, program: &str, args: &[String]) -> Result<String> {
        let command = render(program, args);
        debug!("Running: {}", command);

        let output = Command::new(program)
            .args(args)
            .output()
            .await
            .map_err(|source| OzError::SpawnFailed {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(OzError::CommandFailed {
                command,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    async fn stream(&self, program: &str, args: &[String]) -> Result<()> {
        // stdout may be the export stream, so nothing of the child's goes there
        stream_to(program, args, io::stderr()).await
    }
}

/// Run `program`, copying both of its output streams line by line to
/// `console`, and wait for it to exit.
pub(crate) async fn stream_to<W>(program: &str, args: &[String], console: W) -> Result<()>
where
    W: Write + Send,
{
    let command = render(program, args);
    debug!("Streaming: {}", command);

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| OzError::SpawnFailed {
            command: command.clone(),
            source,
        })?;

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    let console = Mutex::new(console);
    let write_line = |line: &str| -> io::Result<()> {
        let mut console = console.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(console, "{line}")?;
        console.flush()
    };

    let (out, err) = tokio::join!(
        forward_lines(stdout, &write_line),
        forward_lines(stderr, &write_line),
    );
    out?;
    err?;

    let status = child.wait().await?;
    if !status.success() {
        // stderr has already been shown to the user
        return Err(OzError::CommandFailed {
            command,
            status: status.to_string(),
            stderr: String::new(),
        });
    }

    Ok(())
}

async fn forward_lines<R, F>(reader: Option<R>, emit: F) -> io::Result<()>
where
    R: AsyncRead + Unpin,
    F: Fn(&str) -> io::Result<()>,
{
    let Some(reader) = reader else {
        return Ok(());
    };

    let mut lines = BufReader::new(reader).lines();
    while let Some(line) = lines.next_line().await? {
        emit(&line)?;
    }
    Ok(())
}

/// Human-readable command line for logs and error messages
pub fn render(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Build an owned argument vector from string slices
pub fn args<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}
