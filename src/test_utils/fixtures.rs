//! Test fixtures for token documents and configuration files.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// A token document written to disk under `file_name`.
#[derive(Clone, Debug)]
pub struct DocumentFixture {
    pub content: String,
    pub file_name: String,
}

impl DocumentFixture {
    /// A small theme: a palette, aliases to it, spacing and a partial-path alias.
    pub fn theme() -> Self {
        Self::json(
            r##"{
  "colors": {
    "base": "#007BFF",
    "primary": { "$value": "{colors.base}", "$type": "color" },
    "accent": { "$value": "{colors.primary}" },
    "blue": { "500": "#3b82f6" }
  },
  "spacing": {
    "sm": 4,
    "md": { "$value": "{spacing.sm}", "$description": "Medium spacing" }
  },
  "link": "{colors.blue.500}",
  "legacy": { "$value": "#333", "$deprecated": true }
}"##,
        )
    }

    /// Two aliases pointing at each other plus one dangling alias.
    pub fn broken() -> Self {
        Self::json(
            r##"{
  "ok": "#fff",
  "a": "{b}",
  "b": "{a}",
  "dangling": { "$value": "{nowhere}" }
}"##,
        )
    }

    /// Two tokens sharing a value, plus an alias to one of them.
    pub fn duplicates() -> Self {
        Self::json(
            r##"{
  "error": "#F00",
  "danger": "#F00",
  "alert": { "$value": "{error}" },
  "zero": 0,
  "zero-string": "0"
}"##,
        )
    }

    /// The theme fixture in YAML.
    pub fn theme_yaml() -> Self {
        Self {
            file_name: "tokens.yaml".to_string(),
            content: r##"
colors:
  base: "#007BFF"
  primary:
    $value: "{colors.base}"
spacing:
  sm: 4
"##
            .trim()
            .to_string(),
        }
    }

    /// A JSON document written as `tokens.json`.
    pub fn json(content: &str) -> Self {
        Self {
            file_name: "tokens.json".to_string(),
            content: content.trim().to_string(),
        }
    }

    /// Write the document into `dir`.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&self.file_name);
        fs::write(&path, &self.content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}

/// A `dtr.toml` project configuration.
#[derive(Clone, Debug)]
pub struct ConfigFixture {
    pub content: String,
}

impl ConfigFixture {
    pub fn new(content: &str) -> Self {
        Self {
            content: content.trim().to_string(),
        }
    }

    /// Configuration naming a document and a prefix.
    pub fn with_prefix(document: &str, prefix: &str) -> Self {
        Self::new(&format!("document = \"{document}\"\nprefix = \"{prefix}\"\n"))
    }

    /// Write `dtr.toml` into `dir`.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join("dtr.toml");
        fs::write(&path, &self.content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}
