//! Integration test suite for DTR
//!
//! End-to-end tests that run the `dtr` binary against token documents in a
//! temporary project directory.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **resolve**: `dtr resolve` output, failures and suggestions
//! - **list**: `dtr list` table and JSON output
//! - **browse**: reverse value lookup
//! - **lookup**: index lookup
//! - **check**: whole-document validation
//! - **cli**: help, version, verbosity and environment handling
//! - **config**: `dtr.toml` and global options

#[path = "../common/mod.rs"]
mod common;

mod browse;
mod check;
mod cli;
mod config;
mod lookup;
