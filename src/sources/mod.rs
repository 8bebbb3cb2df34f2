//! Manifest sources.
//!
//! Sources are the places the resolver reads scheme manifests from: build
//! output directories of contributing modules, or manifests embedded in
//! the binary.

pub mod memory;
pub mod path;
pub mod set;
pub mod source;

pub use memory::MemorySource;
pub use path::PathSource;
pub use set::{Candidate, SourceSet};
pub use source::ManifestSource;
