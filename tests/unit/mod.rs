//! Unit test suite for DTR
//!
//! Exercises the engine through the public library API only, without the
//! CLI. Faster than the integration suite.
//!
//! ```bash
//! cargo test --test unit
//! ```
//!
//! - **properties**: behavioral guarantees of resolution and flattening
//! - **registry_api**: the generic registry used with non-token values

mod properties;
mod registry_api;
