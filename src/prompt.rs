use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};

use crate::error::Result;

/// Interactive questions asked during a command.
///
/// Implementations render to stderr so stdout and the side channel stay
/// clean for the wrapping shell function.
pub trait Prompter: Send + Sync {
    /// Single choice from `items`; returns the chosen index.
    fn select(&self, message: &str, items: &[String]) -> Result<usize>;

    /// Free text, pre-filled with `default` when given.
    fn input(&self, message: &str, default: Option<&str>) -> Result<String>;

    fn confirm(&self, message: &str, default: bool) -> Result<bool>;
}

/// Terminal prompts via dialoguer
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn select(&self, message: &str, items: &[String]) -> Result<usize> {
        let theme = ColorfulTheme::default();
        let index = Select::with_theme(&theme)
            .with_prompt(message)
            .items(items)
            .default(0)
            .interact()?;
        Ok(index)
    }

    fn input(&self, message: &str, default: Option<&str>) -> Result<String> {
        let theme = ColorfulTheme::default();
        let mut input = Input::<String>::with_theme(&theme).with_prompt(message);
        if let Some(default) = default.filter(|d| !d.is_empty()) {
            input = input.default(default.to_string());
        }
        Ok(input.interact_text()?)
    }

    fn confirm(&self, message: &str, default: bool) -> Result<bool> {
        let theme = ColorfulTheme::default();
        let answer = Confirm::with_theme(&theme)
            .with_prompt(message)
            .default(default)
            .interact()?;
        Ok(answer)
    }
}
