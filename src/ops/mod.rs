//! High-level operations.
//!
//! This module contains the implementation of schemeport commands.

pub mod clean;
pub mod compile;
pub mod list;

pub use clean::clean;
pub use compile::{compile, CompileOptions, CompileOutcome};
pub use list::{format_listings, list, SchemeListing};
