//! Resolve references from the command line.
//!
//! Each reference may be a token id (`colors.primary`), an alias string
//! (`{colors.primary}`) or a partial path through a group
//! (`{colors}.blue.500`).
//!
//! # Examples
//!
//! ```bash
//! dtr resolve colors.primary
//! dtr resolve '{colors.primary}' spacing.md --format json
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::common::{OutputFormat, json_value, not_found};
use crate::context::TokenContext;
use crate::core::TokenError;

/// Command to resolve one or more references.
#[derive(Args)]
pub struct ResolveCommand {
    /// References to resolve.
    #[arg(required = true, value_name = "REF")]
    references: Vec<String>,

    /// Output format (table, json).
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

impl ResolveCommand {
    /// Resolve every reference, print the results and fail when any reference
    /// did not resolve.
    pub fn execute(self, context: &mut TokenContext) -> Result<()> {
        let results: Vec<_> =
            self.references.iter().map(|reference| (reference, context.resolve(reference.as_str()))).collect();

        match self.format {
            OutputFormat::Json => {
                let object: serde_json::Map<_, _> = results
                    .iter()
                    .map(|(reference, value)| ((*reference).clone(), json_value(value.as_ref())))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&object)?);
            }
            OutputFormat::Table => {
                for (reference, value) in &results {
                    match value {
                        Some(value) => println!("{} = {}", reference.cyan(), value),
                        None => println!("{} = {}", reference.cyan(), "unresolved".red()),
                    }
                }
            }
        }

        let failed: Vec<&String> =
            results.iter().filter(|(_, value)| value.is_none()).map(|(reference, _)| *reference).collect();

        match failed.as_slice() {
            [] => Ok(()),
            [reference] => Err(not_found(context, reference).into()),
            _ => Err(TokenError::UnresolvedTokens {
                count: failed.len(),
            }
            .into()),
        }
    }
}
