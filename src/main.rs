//! DTR CLI entry point
//!
//! This is the main executable for the Design Token Registry. It parses
//! arguments, runs the command and prints failures with context and
//! suggestions.
//!
//! Commands:
//! - `resolve` - Resolve references to their final values
//! - `list` - List registered tokens
//! - `browse` - Find tokens by value
//! - `lookup` - Show the token at an index
//! - `check` - Report tokens that do not resolve

use anyhow::Result;
use clap::Parser;
use dtr_cli::cli;
use dtr_cli::core::error::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
