//! Project configuration (`dtr.toml`).
//!
//! The configuration file is optional. It supplies defaults for the CLI so a
//! project can run `dtr check` without repeating flags:
//!
//! ```toml
//! # Token document to load (JSON, YAML or TOML)
//! document = "tokens/theme.json"
//!
//! # Prefix every generated id with "theme."
//! prefix = "theme"
//!
//! # Keep nested groups as single tokens
//! flat = false
//! ```
//!
//! # Lookup
//!
//! 1. `--config <PATH>` or the `DTR_CONFIG` environment variable; the file must exist
//! 2. `dtr.toml` in the current directory, if present
//! 3. Built-in defaults
//!
//! Command-line flags always win over values from the file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::context::TokenOptions;
use crate::core::TokenError;

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "dtr.toml";

/// Default token document name when neither the CLI nor the config names one.
pub const DEFAULT_DOCUMENT: &str = "tokens.json";

/// Contents of `dtr.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Token document path, relative to the configuration file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<PathBuf>,

    /// Id prefix passed to [`TokenOptions::prefix`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    /// Passed to [`TokenOptions::flat`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flat: Option<bool>,
}

impl ProjectConfig {
    /// Load from an explicit path, or from `dtr.toml` in `dir` when present.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit path does not exist, or if the file
    /// cannot be read or parsed.
    pub async fn load_with_optional(path: Option<&Path>, dir: &Path) -> Result<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(TokenError::ConfigError {
                        message: format!("configuration file {} does not exist", path.display()),
                    }
                    .into());
                }
                Self::load_from(path).await
            }
            None => {
                let default = dir.join(CONFIG_FILE_NAME);
                if default.exists() {
                    Self::load_from(&default).await
                } else {
                    debug!("No {} found in {}, using defaults", CONFIG_FILE_NAME, dir.display());
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load from a specific file. A relative `document` is resolved against
    /// the file's directory.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config: Self = toml::from_str(&content).map_err(|e| TokenError::ConfigError {
            message: format!("{}: {}", path.display(), e.message()),
        })?;

        if let Some(document) = &config.document
            && document.is_relative()
            && let Some(parent) = path.parent()
        {
            config.document = Some(parent.join(document));
        }

        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Token options from this configuration, with command-line overrides.
    #[must_use]
    pub fn token_options(&self, prefix: Option<String>, flat: bool) -> TokenOptions {
        TokenOptions {
            flat: flat || self.flat.unwrap_or(false),
            prefix: prefix.or_else(|| self.prefix.clone()),
        }
    }

    /// Document path: the command-line value, else the configured one, else
    /// `tokens.json` in `dir`.
    #[must_use]
    pub fn document_path(&self, cli: Option<PathBuf>, dir: &Path) -> PathBuf {
        cli.or_else(|| self.document.clone()).unwrap_or_else(|| dir.join(DEFAULT_DOCUMENT))
    }
}
