//! Resolve every token and report the ones that fail.
//!
//! Intended for CI: the command exits non-zero when any alias is broken or
//! circular. Tokens marked `$deprecated` are listed as warnings but do not
//! fail the check.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::context::TokenContext;
use crate::core::TokenError;

/// Command to validate every alias in the document.
#[derive(Args)]
pub struct CheckCommand {}

impl CheckCommand {
    pub fn execute(self, context: &mut TokenContext) -> Result<()> {
        let deprecated: Vec<String> = context
            .entries()
            .filter(|(_, ticket)| ticket.value.as_alias().is_some_and(|alias| alias.is_deprecated()))
            .map(|(id, _)| id.to_string())
            .collect();
        for id in &deprecated {
            println!("{} {} is deprecated", "⚠".yellow(), id);
        }

        let unresolved = context.unresolved();
        if unresolved.is_empty() {
            println!("{} All {} tokens resolve", "✓".green(), context.size());
            return Ok(());
        }

        for id in &unresolved {
            println!("{} {}", "✗".red(), id);
        }
        Err(TokenError::UnresolvedTokens {
            count: unresolved.len(),
        }
        .into())
    }
}
