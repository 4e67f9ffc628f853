//! Reverse lookup: find the ids holding a value.
//!
//! The value is parsed as JSON when possible, so `dtr browse 4` matches the
//! number 4 and `dtr browse '"4"'` the string "4". Matching is strict: no
//! type coercion.

use anyhow::Result;
use clap::Args;

use super::common::{OutputFormat, parse_value};
use crate::context::TokenContext;
use crate::core::TokenError;

/// Command to find tokens by value.
#[derive(Args)]
pub struct BrowseCommand {
    /// Value to search for (JSON, or a plain string).
    value: String,

    /// Compare against resolved values instead of stored ones.
    #[arg(short, long)]
    resolved: bool,

    /// Output format (table, json).
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

impl BrowseCommand {
    pub fn execute(self, context: &mut TokenContext) -> Result<()> {
        let value = parse_value(&self.value);
        let ids = if self.resolved {
            context.browse_resolved(&value)
        } else {
            context.browse(&value)
        };

        let Some(ids) = ids else {
            return Err(TokenError::Other {
                message: format!("No tokens with value {value}"),
            }
            .into());
        };

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&ids)?),
            OutputFormat::Table => ids.iter().for_each(|id| println!("{id}")),
        }
        Ok(())
    }
}
