use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use crate::{
    aws::{self, AwsCli, IdentityProbe, ProcessRunner, StsProbe, configure},
    config::Settings,
    error::OzError,
    prompt::{Prompter, TerminalPrompter},
    shell::{self, ExportMode, Exports, ShellEmitter},
};

#[derive(Debug, Clone, Args)]
pub struct LoginCommand {
    #[arg(
        short = 'p',
        long,
        help = "AWS profile to log in with (~/.aws/config); prompts when omitted"
    )]
    pub profile: Option<String>,

    #[arg(
        short = 'e',
        long = "export",
        value_enum,
        default_value_t = ExportMode::Profile,
        help = "Which environment variables to export"
    )]
    pub export: ExportMode,

    #[arg(long, help = "Write export/unset lines to stdout instead of the shell side channel")]
    pub stdout: bool,
}

impl LoginCommand {
    pub async fn execute(self, settings: &Settings) -> Result<()> {
        let runner = ProcessRunner;
        let cli = AwsCli::new(&runner, &settings.aws_cli);
        let mut emitter = ShellEmitter::new(shell::open_sink(settings.export_fd, self.stdout));

        self.run(cli, &TerminalPrompter, &StsProbe, &mut emitter).await
    }

    async fn run<W: Write>(
        &self,
        cli: AwsCli<'_>,
        prompter: &dyn Prompter,
        probe: &dyn IdentityProbe,
        emitter: &mut ShellEmitter<W>,
    ) -> Result<()> {
        let profile = match &self.profile {
            Some(profile) => profile.clone(),
            None => select_profile(cli, prompter).await?,
        };
        info!("Starting login for profile: {}", profile);

        aws::session::ensure_session(cli, probe, &profile)
            .await
            .with_context(|| format!("Failed to log in with profile '{profile}'"))?;

        let credentials;
        let exports = match self.export {
            ExportMode::Profile => Exports::Profile(&profile),
            ExportMode::Creds => {
                credentials = configure::export_credentials(cli, &profile)
                    .await
                    .with_context(|| format!("Failed to export credentials for '{profile}'"))?;
                Exports::Credentials(&credentials)
            }
            ExportMode::Nothing => Exports::Nothing,
        };

        emitter
            .emit(exports)
            .context("Failed to write shell exports")?;

        Ok(())
    }
}

async fn select_profile(cli: AwsCli<'_>, prompter: &dyn Prompter) -> Result<String> {
    let mut profiles = configure::list_profiles(cli)
        .await
        .context("Failed to list AWS profiles")?;

    if profiles.is_empty() {
        return Err(OzError::NoProfiles.into());
    }

    let index = prompter.select("Select a profile", &profiles)?;
    if index >= profiles.len() {
        anyhow::bail!("Profile selection out of range");
    }
    Ok(profiles.swap_remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{Answer, FixedProbe, ScriptedPrompter, ScriptedRunner};

    const REGION: [&str; 5] = ["configure", "get", "region", "--profile", "dev"];
    const EXPORT: [&str; 6] = [
        "configure",
        "export-credentials",
        "--profile",
        "dev",
        "--format",
        "env",
    ];
    const CREDS_ENV: &str = "export AWS_ACCESS_KEY_ID=ASIAEXAMPLE\nexport AWS_SECRET_ACCESS_KEY=secret\nexport AWS_SESSION_TOKEN=token\nexport AWS_CREDENTIAL_EXPIRATION=2026-10-16T12:00:00+00:00\n";

    fn command(profile: Option<&str>, export: ExportMode) -> LoginCommand {
        LoginCommand {
            profile: profile.map(str::to_string),
            export,
            stdout: false,
        }
    }

    async fn run(
        cmd: LoginCommand,
        runner: &ScriptedRunner,
        prompter: &ScriptedPrompter,
        probe: &FixedProbe,
    ) -> Result<String> {
        let mut emitter = ShellEmitter::new(Vec::new());
        cmd.run(AwsCli::new(runner, "aws"), prompter, probe, &mut emitter)
            .await?;
        Ok(String::from_utf8(emitter.into_inner()).unwrap())
    }

    #[tokio::test]
    async fn test_profile_mode_exports_profile() {
        let runner = ScriptedRunner::new().ok(&REGION, "us-east-1\n");
        let out = run(
            command(Some("dev"), ExportMode::Profile),
            &runner,
            &ScriptedPrompter::new([]),
            &FixedProbe::live(),
        )
        .await
        .unwrap();

        assert!(out.ends_with("export AWS_PROFILE=dev\n"));
        assert_eq!(out.matches("unset ").count(), 4);
        runner.assert_done();
    }

    #[tokio::test]
    async fn test_creds_mode_unsets_profile_then_passes_export_through() {
        let runner = ScriptedRunner::new()
            .ok(&REGION, "us-east-1\n")
            .ok(&EXPORT, CREDS_ENV);
        let out = run(
            command(Some("dev"), ExportMode::Creds),
            &runner,
            &ScriptedPrompter::new([]),
            &FixedProbe::live(),
        )
        .await
        .unwrap();

        assert_eq!(out, format!("unset AWS_PROFILE\n{CREDS_ENV}"));
        assert!(!out.contains("export AWS_PROFILE"));
        runner.assert_done();
    }

    #[tokio::test]
    async fn test_none_mode_unsets_everything() {
        let runner = ScriptedRunner::new().ok(&REGION, "us-east-1\n");
        let out = run(
            command(Some("dev"), ExportMode::Nothing),
            &runner,
            &ScriptedPrompter::new([]),
            &FixedProbe::live(),
        )
        .await
        .unwrap();

        assert_eq!(out.lines().count(), 5);
        assert!(out.lines().all(|line| line.starts_with("unset ")));
    }

    #[tokio::test]
    async fn test_prompts_for_profile_when_omitted() {
        let runner = ScriptedRunner::new()
            .ok(&["configure", "list-profiles"], "default\ndev\n")
            .ok(&REGION, "us-east-1\n");
        let prompter = ScriptedPrompter::new([Answer::Select("dev")]);

        let out = run(
            command(None, ExportMode::Profile),
            &runner,
            &prompter,
            &FixedProbe::live(),
        )
        .await
        .unwrap();

        assert!(out.contains("export AWS_PROFILE=dev"));
        assert_eq!(prompter.menus(), vec![vec!["default", "dev"]]);
    }

    #[tokio::test]
    async fn test_no_profiles_is_an_error() {
        let runner = ScriptedRunner::new().ok(&["configure", "list-profiles"], "\n");
        let err = run(
            command(None, ExportMode::Profile),
            &runner,
            &ScriptedPrompter::new([]),
            &FixedProbe::live(),
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<OzError>(),
            Some(OzError::NoProfiles)
        ));
    }

    #[tokio::test]
    async fn test_expired_session_logs_in_before_exporting() {
        let runner = ScriptedRunner::new()
            .ok(&REGION, "us-east-1\n")
            .streamed(&["sso", "login", "--profile", "dev"]);
        let out = run(
            command(Some("dev"), ExportMode::Profile),
            &runner,
            &ScriptedPrompter::new([]),
            &FixedProbe::expired(),
        )
        .await
        .unwrap();

        assert!(out.contains("export AWS_PROFILE=dev"));
        runner.assert_done();
    }

    #[tokio::test]
    async fn test_failed_sso_login_writes_nothing() {
        let runner = ScriptedRunner::new()
            .ok(&REGION, "us-east-1\n")
            .fail(&["sso", "login", "--profile", "dev"], "");
        let mut emitter = ShellEmitter::new(Vec::new());

        let result = command(Some("dev"), ExportMode::Profile)
            .run(
                AwsCli::new(&runner, "aws"),
                &ScriptedPrompter::new([]),
                &FixedProbe::expired(),
                &mut emitter,
            )
            .await;

        assert!(result.is_err());
        assert!(emitter.into_inner().is_empty());
    }
}
