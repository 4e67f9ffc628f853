//! Shared helpers for CLI commands.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;
use tracing::debug;

use crate::config::ProjectConfig;
use crate::context::TokenContext;
use crate::core::TokenError;
use crate::loader::load_document;
use crate::tokens::TokenValue;

/// Where the tokens come from and how they are flattened.
#[derive(Args, Debug, Clone, Default)]
pub struct TokenSource {
    /// Token document to load (JSON, YAML or TOML).
    ///
    /// Defaults to the `document` entry of `dtr.toml`, then `./tokens.json`.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub document: Option<PathBuf>,

    /// Prefix every generated token id with `<PREFIX>.`.
    #[arg(short, long, global = true)]
    pub prefix: Option<String>,

    /// Keep nested groups as single tokens instead of flattening them.
    #[arg(long, global = true)]
    pub flat: bool,
}

impl TokenSource {
    /// Merge with the project configuration, read the document and build the context.
    ///
    /// # Errors
    ///
    /// Fails when the configuration or the document cannot be loaded, or the
    /// resulting options are invalid.
    pub async fn load(&self, config_path: Option<&Path>, dir: &Path) -> Result<TokenContext> {
        let config = ProjectConfig::load_with_optional(config_path, dir).await?;
        let options = config.token_options(self.prefix.clone(), self.flat);
        let path = config.document_path(self.document.clone(), dir);
        debug!("Loading tokens from {}", path.display());

        let document = load_document(&path).await?;
        let context = TokenContext::new(&document, options)
            .with_context(|| format!("Failed to build tokens from {}", path.display()))?;
        Ok(context)
    }
}

/// Output format shared by the listing commands.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Parse a command-line value: JSON when it parses, otherwise a plain string.
///
/// `12` is a number, `true` a boolean, `'"12"'` the string "12" and `#F00`
/// the string "#F00".
pub fn parse_value(raw: &str) -> TokenValue {
    serde_json::from_str::<serde_json::Value>(raw).map_or_else(|_| TokenValue::from(raw), TokenValue::from)
}

/// JSON form of an optional resolution, `null` for failures.
pub fn json_value(value: Option<&TokenValue>) -> serde_json::Value {
    value.map_or(serde_json::Value::Null, serde_json::Value::from)
}

/// Error for a reference that does not resolve, with similar ids attached.
pub fn not_found(context: &TokenContext, reference: &str) -> TokenError {
    TokenError::TokenNotFound {
        reference: reference.to_string(),
        suggestions: context.suggest(reference),
    }
}

/// Print a bold title followed by a rule, as the table outputs do.
pub fn print_header(title: &str) {
    println!("{}", title.bold());
    println!("{}", "-".repeat(60).bright_black());
}
