pub mod cognito;
pub mod completions;
pub mod env;
pub mod login;
pub mod shell_init;

pub use cognito::CognitoCommand;
pub use completions::CompletionsCommand;
pub use env::EnvCommand;
pub use login::LoginCommand;
pub use shell_init::ShellInitCommand;
