//! Command-line interface for DTR (Design Token Registry).
//!
//! The CLI is a thin collaborator around the engine: it loads a token
//! document from disk, builds a [`TokenContext`](crate::context::TokenContext)
//! and exposes the engine's read operations as subcommands.
//!
//! # Available Commands
//!
//! - `resolve` - Resolve one or more references to their final values
//! - `list` - List every registered token in index order
//! - `browse` - Find the ids whose value equals a given value
//! - `lookup` - Show the id registered at an index
//! - `check` - Resolve every token and report the broken ones
//!
//! # Global Options
//!
//! - `--document` - Token document to load (JSON, YAML or TOML)
//! - `--prefix` - Prefix every generated id
//! - `--flat` - Keep nested groups as single tokens
//! - `--config` - Path to a `dtr.toml` (also `DTR_CONFIG`)
//! - `--verbose` - Enable debug output
//! - `--quiet` - Suppress all logging
//!
//! # Example
//!
//! ```bash
//! dtr --document tokens.json resolve '{colors.primary}' spacing.md
//! dtr list --resolved
//! dtr browse '#F00'
//! dtr check
//! ```

mod browse;
mod check;
pub mod common;
mod list;
mod lookup;
mod resolve;


use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use common::TokenSource;

/// Logging configuration derived from the global flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Filter directive for the tracing subscriber.
    ///
    /// `None` disables logging entirely. `RUST_LOG`, when set, takes
    /// precedence over any value here.
    pub log_level: Option<String>,
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    /// Install the global tracing subscriber, writing to stderr.
    ///
    /// Safe to call more than once; later calls are ignored.
    pub fn init_logging(&self) {
        let Some(level) = &self.log_level else {
            return;
        };

        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(level)
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
            .try_init();
    }
}

/// Main CLI structure for DTR.
#[derive(Parser)]
#[command(
    name = "dtr",
    about = "Design Token Registry - flatten token documents and resolve aliases",
    version,
    long_about = "DTR loads a nested design token document (W3C Design Tokens style), \
                  flattens it into dot-separated ids and resolves alias references between tokens."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    source: TokenSource,

    /// Path to the configuration file (defaults to ./dtr.toml when present).
    #[arg(long, global = true, env = "DTR_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable verbose output for debugging.
    ///
    /// Shows flattening, cache and resolution details. Mutually exclusive
    /// with `--quiet`.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all log output, including resolution warnings.
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve references to their final values.
    ///
    /// See [`resolve::ResolveCommand`].
    Resolve(resolve::ResolveCommand),

    /// List registered tokens in index order.
    ///
    /// See [`list::ListCommand`].
    List(list::ListCommand),

    /// Find tokens by value.
    ///
    /// See [`browse::BrowseCommand`].
    Browse(browse::BrowseCommand),

    /// Show the token registered at an index.
    ///
    /// See [`lookup::LookupCommand`].
    Lookup(lookup::LookupCommand),

    /// Resolve every token and report failures.
    ///
    /// See [`check::CheckCommand`].
    Check(check::CheckCommand),
}

impl Cli {
    /// Run the parsed command.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Translate the verbosity flags into a [`CliConfig`].
    ///
    /// - `--verbose`: `debug`
    /// - `--quiet`: logging disabled
    /// - default: `warn`, so unresolved references are reported
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            None
        } else {
            Some("warn".to_string())
        };

        CliConfig {
            log_level,
        }
    }

    /// Run the command with an explicit configuration.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();

        let dir = std::env::current_dir()?;
        let mut context = self.source.load(self.config.as_deref(), &dir).await?;

        match self.command {
            Commands::Resolve(cmd) => cmd.execute(&mut context),
            Commands::List(cmd) => cmd.execute(&mut context),
            Commands::Browse(cmd) => cmd.execute(&mut context),
            Commands::Lookup(cmd) => cmd.execute(&context),
            Commands::Check(cmd) => cmd.execute(&mut context),
        }
    }
}
