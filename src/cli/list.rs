//! List registered tokens.
//!
//! Tokens are shown in registration (index) order. With `--resolved` each
//! token's final value is shown next to its stored value.
//!
//! # Examples
//!
//! ```bash
//! dtr list
//! dtr list --resolved
//! dtr list --format json
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use super::common::{OutputFormat, json_value, print_header};
use crate::context::TokenContext;
use crate::tokens::TokenValue;

/// Command to list tokens.
#[derive(Args)]
pub struct ListCommand {
    /// Also resolve every token.
    #[arg(short, long)]
    resolved: bool,

    /// Output format (table, json).
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

/// One row of `list --format json`.
#[derive(Debug, Serialize)]
struct TokenRow {
    index: usize,
    id: String,
    value: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    resolved: Option<serde_json::Value>,
}

impl ListCommand {
    pub fn execute(self, context: &mut TokenContext) -> Result<()> {
        let resolved: Vec<_> = if self.resolved {
            context.resolve_all().into_iter().map(|(_, value)| value).collect()
        } else {
            Vec::new()
        };

        let rows: Vec<TokenRow> = context
            .entries()
            .enumerate()
            .map(|(position, (id, ticket))| TokenRow {
                index: ticket.index,
                id: id.to_string(),
                value: json_value(Some(&ticket.value)),
                resolved: self.resolved.then(|| json_value(resolved.get(position).and_then(Option::as_ref))),
            })
            .collect();

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
            OutputFormat::Table => self.print_table(context, &resolved),
        }
        Ok(())
    }

    fn print_table(&self, context: &TokenContext, resolved: &[Option<TokenValue>]) {
        if context.is_empty() {
            println!("No tokens found.");
            return;
        }

        print_header(&format!("Tokens ({})", context.size()));
        for (position, (id, ticket)) in context.entries().enumerate() {
            let line = format!("{:>5}  {}  {}", ticket.index, id.cyan(), ticket.value);
            if self.resolved {
                match resolved.get(position).and_then(Option::as_ref) {
                    Some(value) => println!("{line}  {} {value}", "->".bright_black()),
                    None => println!("{line}  {} {}", "->".bright_black(), "unresolved".red()),
                }
            } else {
                println!("{line}");
            }
        }
    }
}
