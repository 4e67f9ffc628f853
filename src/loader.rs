//! Token document loading.
//!
//! The engine never touches the filesystem; this module is the collaborator
//! that reads a document from disk and hands the engine a [`TokenMap`].
//! JSON, YAML and TOML are supported, chosen by file extension. All three are
//! parsed through serde into a `serde_json::Value` first, so they share one
//! conversion into token values.

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::core::TokenError;
use crate::tokens::{TokenMap, document_from_json};

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
    Toml,
}

impl DocumentFormat {
    /// Detect the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "JSON",
            Self::Yaml => "YAML",
            Self::Toml => "TOML",
        })
    }
}

/// Parse document text in the given format.
///
/// `origin` only labels error messages.
pub fn parse_document(content: &str, format: DocumentFormat, origin: &str) -> Result<TokenMap, TokenError> {
    let parse_error = |reason: String| TokenError::DocumentParseError {
        path: origin.to_string(),
        format: format.to_string(),
        reason,
    };

    let value: serde_json::Value = match format {
        DocumentFormat::Json => serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))?,
        DocumentFormat::Yaml => serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string()))?,
        DocumentFormat::Toml => toml::from_str(content).map_err(|e| parse_error(e.to_string()))?,
    };

    document_from_json(value).ok_or_else(|| TokenError::InvalidDocument {
        reason: format!("{origin}: the root must be an object"),
    })
}

/// Read and parse a token document from disk.
pub async fn load_document(path: &Path) -> Result<TokenMap> {
    if !path.exists() {
        return Err(TokenError::DocumentNotFound {
            path: path.display().to_string(),
        }
        .into());
    }

    let format = DocumentFormat::from_path(path).ok_or_else(|| TokenError::UnsupportedFormat {
        path: path.display().to_string(),
    })?;

    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read token document {}", path.display()))?;

    let document = parse_document(&content, format, &path.display().to_string())?;
    debug!("Loaded {} document {} ({} top-level keys)", format, path.display(), document.len());
    Ok(document)
}
