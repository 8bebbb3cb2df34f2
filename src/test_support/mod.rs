//! Test utilities for schemeport unit tests.
//!
//! Provides toy greeting handlers, a catalog preloaded with them, and
//! helpers for laying out build output directories.
//!
//! # Example
//!
//! ```rust,ignore
//! use schemeport::test_support::{greeting_catalog, write_manifest};
//!
//! #[test]
//! fn test_example() {
//!     let tmp = tempfile::TempDir::new().unwrap();
//!     write_manifest(tmp.path(), "geekout", &["demo::GreetingConnection"]);
//!     let catalog = greeting_catalog();
//!     // Build a resolver over tmp.path()...
//! }
//! ```

pub mod fixtures;

use std::fs;
use std::path::Path;

pub use fixtures::*;

use crate::core::manifest::{manifest_path, render};
use crate::core::Catalog;

/// Identifier of [`GreetingConnection`] in [`greeting_catalog`].
pub const GREETING_CONNECTION: &str = "demo::GreetingConnection";

/// Identifier of [`GeekhiFactory`] in [`greeting_catalog`].
pub const GEEKHI_FACTORY: &str = "demo::GeekhiFactory";

/// Identifier of [`hi_method`] in [`greeting_catalog`].
pub const HI_METHOD: &str = "demo::greetings::hi";

/// Catalog defining every greeting fixture.
pub fn greeting_catalog() -> Catalog {
    let mut catalog = Catalog::new();
    catalog
        .define_connection(GREETING_CONNECTION, GreetingConnection::open)
        .define_factory(GEEKHI_FACTORY, || Ok(GeekhiFactory))
        .define_method(HI_METHOD, hi_method);
    catalog
}

/// Write a manifest for `scheme` below the build output `root`.
pub fn write_manifest(root: &Path, scheme: &str, entries: &[&str]) {
    let path = manifest_path(root, scheme);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let entries: Vec<String> = entries.iter().map(|e| e.to_string()).collect();
    fs::write(path, render(&entries)).unwrap();
}
