//! Interactive selection over paginated AWS CLI listings.
//!
//! Each page is offered as a menu. When the listing reports a `NextToken` the
//! menu ends with "Load more..."; once the user has paged forward and reached
//! the last page it ends with "Start over" instead.

use serde_json::Value;
use tracing::debug;

use crate::{
    aws::AwsCli,
    error::{OzError, Result},
    prompt::Prompter,
};

pub const LOAD_MORE_LABEL: &str = "Load more...";
pub const START_OVER_LABEL: &str = "Start over";

/// A paginated `aws` listing and how to turn its items into menu entries
#[derive(Debug, Clone)]
pub struct Listing {
    /// Prompt shown above the menu
    pub message: String,
    /// CLI arguments without the pagination cursor
    pub args: Vec<String>,
    /// Top-level field holding the item array
    pub items_key: &'static str,
    /// Item field shown to the user
    pub label_key: &'static str,
    /// Item field returned on selection
    pub value_key: &'static str,
}

impl Listing {
    fn args_for(&self, cursor: Option<&str>) -> Vec<String> {
        let mut args = self.args.clone();
        if let Some(token) = cursor {
            args.push("--next-token".to_string());
            args.push(token.to_string());
        }
        args
    }
}

/// One entry of the selection menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    Item(String),
    LoadMore(String),
    StartOver,
}

/// A parsed listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// (label, value) pairs in listing order
    pub items: Vec<(String, String)>,
    pub next_token: Option<String>,
}

impl Page {
    pub fn parse(listing: &Listing, command: &str, stdout: &str) -> Result<Self> {
        let unexpected = |reason: String| OzError::UnexpectedResponse {
            command: command.to_string(),
            reason,
        };

        let body: Value =
            serde_json::from_str(stdout).map_err(|e| unexpected(e.to_string()))?;

        let raw_items = body
            .get(listing.items_key)
            .and_then(Value::as_array)
            .ok_or_else(|| unexpected(format!("missing '{}' array", listing.items_key)))?;

        let items = raw_items
            .iter()
            .map(|item| {
                let field = |key: &str| {
                    item.get(key)
                        .and_then(Value::as_str)
                        .map(str::to_string)
                        .ok_or_else(|| unexpected(format!("item without string '{key}'")))
                };
                Ok((field(listing.label_key)?, field(listing.value_key)?))
            })
            .collect::<Result<Vec<_>>>()?;

        let next_token = body
            .get("NextToken")
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .map(str::to_string);

        Ok(Self { items, next_token })
    }

    /// Menu for this page. `paged` is true when the page was fetched with a
    /// cursor.
    pub fn menu(&self, paged: bool) -> Vec<(String, Choice)> {
        let mut entries: Vec<(String, Choice)> = self
            .items
            .iter()
            .map(|(label, value)| (label.clone(), Choice::Item(value.clone())))
            .collect();

        match &self.next_token {
            Some(token) => entries.push((LOAD_MORE_LABEL.to_string(), Choice::LoadMore(token.clone()))),
            None if paged => entries.push((START_OVER_LABEL.to_string(), Choice::StartOver)),
            None => {}
        }

        entries
    }
}

/// Page through `listing` until the user picks an item; returns its value.
///
/// A first page with no items and no cursor is [`OzError::NoItems`].
pub async fn select_paginated(
    cli: AwsCli<'_>,
    prompter: &dyn Prompter,
    listing: &Listing,
) -> Result<String> {
    let mut cursor: Option<String> = None;

    loop {
        let args = listing.args_for(cursor.as_deref());
        let command = cli.render(&args);
        let stdout = cli.run(&args).await?;
        let page = Page::parse(listing, &command, &stdout)?;
        debug!(
            "{} items, next token: {}",
            page.items.len(),
            page.next_token.is_some()
        );

        let entries = page.menu(cursor.is_some());
        if entries.is_empty() {
            return Err(OzError::NoItems { command });
        }

        let labels: Vec<String> = entries.iter().map(|(label, _)| label.clone()).collect();
        let index = prompter.select(&listing.message, &labels)?;

        let (_, choice) = entries
            .into_iter()
            .nth(index)
            .ok_or_else(|| OzError::UnexpectedResponse {
                command: "selection prompt".to_string(),
                reason: format!("index {index} out of range"),
            })?;

        match choice {
            Choice::Item(value) => return Ok(value),
            Choice::LoadMore(token) => cursor = Some(token),
            Choice::StartOver => cursor = None,
        }
    }
}
