use std::{collections::VecDeque, sync::Mutex};

use async_trait::async_trait;

use crate::{
    aws::{CommandRunner, IdentityProbe, runner::render},
    error::{OzError, Result},
    prompt::Prompter,
};

enum Reply {
    Stdout(String),
    Fail(String),
    Streamed,
}

struct Expectation {
    program: String,
    args: Vec<String>,
    reply: Reply,
}

/// Runner that replays a fixed script and fails the test on any deviation
#[derive(Default)]
pub struct ScriptedRunner {
    script: Mutex<VecDeque<Expectation>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(self, program: &str, args: &[&str], reply: Reply) -> Self {
        self.script.lock().unwrap().push_back(Expectation {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            reply,
        });
        self
    }

    /// Expect an `aws` call that succeeds with `stdout`.
    pub fn ok(self, args: &[&str], stdout: &str) -> Self {
        self.push("aws", args, Reply::Stdout(stdout.to_string()))
    }

    /// Expect a call to another program that succeeds with `stdout`.
    pub fn ok_from(self, program: &str, args: &[&str], stdout: &str) -> Self {
        self.push(program, args, Reply::Stdout(stdout.to_string()))
    }

    /// Expect an `aws` call that exits non-zero with `stderr`.
    pub fn fail(self, args: &[&str], stderr: &str) -> Self {
        self.push("aws", args, Reply::Fail(stderr.to_string()))
    }

    pub fn fail_from(self, program: &str, args: &[&str], stderr: &str) -> Self {
        self.push(program, args, Reply::Fail(stderr.to_string()))
    }

    /// Expect a streamed `aws` call that exits zero.
    pub fn streamed(self, args: &[&str]) -> Self {
        self.push("aws", args, Reply::Streamed)
    }

    /// Rendered command lines received so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn assert_done(&self) {
        let script = self.script.lock().unwrap();
        let pending: Vec<String> = script
            .iter()
            .map(|e| render(&e.program, &e.args))
            .collect();
        assert!(pending.is_empty(), "Commands never called: {pending:?}");
    }

    fn next(&self, program: &str, args: &[String], streamed: bool) -> Result<String> {
        let command = render(program, args);
        self.calls.lock().unwrap().push(command.clone());

        let expected = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("Unexpected command: {command}"));
        assert_eq!(
            render(&expected.program, &expected.args),
            command,
            "Command does not match script"
        );

        match expected.reply {
            Reply::Stdout(stdout) if !streamed => Ok(stdout),
            Reply::Streamed if streamed => Ok(String::new()),
            Reply::Fail(stderr) => Err(OzError::CommandFailed {
                command,
                status: "exit status: 255".to_string(),
                stderr,
            }),
            _ => panic!("Command {command} was run in the wrong mode"),
        }
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn output(&self, program: &str, args: &[String]) -> Result<String> {
        self.next(program, args, false)
    }

    async fn stream(&self, program: &str, args: &[String]) -> Result<()> {
        self.next(program, args, true).map(|_| ())
    }
}

pub enum Answer {
    /// Pick the menu entry with this label
    Select(&'static str),
    Input(&'static str),
    Confirm(bool),
}

/// Prompter that answers from a script and records every menu it was shown
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: Mutex<VecDeque<Answer>>,
    menus: Mutex<Vec<Vec<String>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Menus presented by `select`, in order
    pub fn menus(&self) -> Vec<Vec<String>> {
        self.menus.lock().unwrap().clone()
    }

    /// Messages of every prompt shown, in order
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn assert_done(&self) {
        assert!(
            self.answers.lock().unwrap().is_empty(),
            "Not every scripted answer was used"
        );
    }

    fn next(&self, message: &str) -> Answer {
        self.prompts.lock().unwrap().push(message.to_string());
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("Unexpected prompt: {message}"))
    }
}

impl Prompter for ScriptedPrompter {
    fn select(&self, message: &str, items: &[String]) -> Result<usize> {
        self.menus.lock().unwrap().push(items.to_vec());
        match self.next(message) {
            Answer::Select(label) => Ok(items
                .iter()
                .position(|item| item == label)
                .unwrap_or_else(|| panic!("'{label}' is not in menu {items:?}"))),
            _ => panic!("Expected a select answer for '{message}'"),
        }
    }

    fn input(&self, message: &str, _default: Option<&str>) -> Result<String> {
        match self.next(message) {
            Answer::Input(text) => Ok(text.to_string()),
            _ => panic!("Expected an input answer for '{message}'"),
        }
    }

    fn confirm(&self, message: &str, _default: bool) -> Result<bool> {
        match self.next(message) {
            Answer::Confirm(yes) => Ok(yes),
            _ => panic!("Expected a confirm answer for '{message}'"),
        }
    }
}

/// Identity probe with a fixed outcome
pub struct FixedProbe {
    live: bool,
    calls: Mutex<Vec<(String, String)>>,
}

impl FixedProbe {
    pub fn live() -> Self {
        Self {
            live: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn expired() -> Self {
        Self {
            live: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// (profile, region) pairs probed
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl IdentityProbe for FixedProbe {
    async fn caller_identity(&self, profile: &str, region: &str) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((profile.to_string(), region.to_string()));

        if self.live {
            Ok(format!("arn:aws:sts::123456789012:assumed-role/Dev/{profile}"))
        } else {
            Err(OzError::IdentityProbe {
                profile: profile.to_string(),
                reason: "the SSO session has expired".to_string(),
            })
        }
    }
}
