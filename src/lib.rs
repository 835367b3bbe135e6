pub mod aws;
pub mod cli;
pub mod cognito;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod prompt;
pub mod select;
pub mod shell;

#[cfg(test)]
pub(crate) mod test_utils;
