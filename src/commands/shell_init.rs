use clap::{Args, CommandFactory};

use crate::{cli::Cli, config::Settings};

#[derive(Debug, Clone, Args)]
pub struct ShellInitCommand {}

impl ShellInitCommand {
    pub fn execute(self, settings: &Settings) {
        print!("{}", self.script(settings.export_fd));
    }

    /// bash/zsh function that evaluates what the binary writes to the side
    /// channel `fd`. Stdout is sent to stderr so only the side channel is
    /// captured.
    pub fn script(&self, fd: i32) -> String {
        let name = Cli::command().get_name().to_string();

        format!(
            r#"{name}() {{
  local __{name}_exports __{name}_status
  __{name}_exports="$(command {name} "$@" {fd}>&1 1>&2)"
  __{name}_status=$?
  if [ $__{name}_status -eq 0 ] && [ -n "$__{name}_exports" ]; then
    eval "$__{name}_exports"
  fi
  return $__{name}_status
}}
"#
        )
    }
}
