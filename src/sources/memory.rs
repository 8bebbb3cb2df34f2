//! In-memory source - manifests embedded in the binary.
//!
//! Useful when a module ships its generated manifests with
//! `include_str!` instead of reading a build directory at run time.

use std::collections::BTreeMap;

use crate::core::error::DiscoveryError;
use crate::sources::ManifestSource;

/// A source holding manifest contents in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    name: String,
    manifests: BTreeMap<String, String>,
}

impl MemorySource {
    /// Create an empty in-memory source.
    pub fn new(name: impl Into<String>) -> Self {
        MemorySource {
            name: name.into(),
            manifests: BTreeMap::new(),
        }
    }

    /// Add (or replace) the manifest for `scheme`.
    pub fn with_manifest(mut self, scheme: impl Into<String>, contents: impl Into<String>) -> Self {
        self.manifests.insert(scheme.into(), contents.into());
        self
    }
}

impl ManifestSource for MemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn read_manifest(&self, scheme: &str) -> Result<Option<String>, DiscoveryError> {
        Ok(self.manifests.get(scheme).cloned())
    }

    fn schemes(&self) -> Result<Vec<String>, DiscoveryError> {
        Ok(self.manifests.keys().cloned().collect())
    }
}
