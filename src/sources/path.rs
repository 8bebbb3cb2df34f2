//! Path source - manifests in a build output directory.

use std::fs;
use std::io;
use std::path::PathBuf;

use walkdir::WalkDir;

use crate::core::error::DiscoveryError;
use crate::core::manifest::{is_valid_scheme, manifest_path, schemes_dir};
use crate::sources::ManifestSource;

/// A source reading `registry/schemes/<scheme>` below a root directory.
#[derive(Debug, Clone)]
pub struct PathSource {
    /// Build output root
    root: PathBuf,

    /// Display name
    name: String,
}

impl PathSource {
    /// Create a path source named after its root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let name = root.display().to_string();
        PathSource { root, name }
    }

    /// Override the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl ManifestSource for PathSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn read_manifest(&self, scheme: &str) -> Result<Option<String>, DiscoveryError> {
        // Invalid names could escape the manifest directory.
        if !is_valid_scheme(scheme) {
            return Ok(None);
        }

        let path = manifest_path(&self.root, scheme);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(DiscoveryError::ManifestRead {
                source_name: self.name.clone(),
                path,
                source,
            }),
        }
    }

    fn schemes(&self) -> Result<Vec<String>, DiscoveryError> {
        let dir = schemes_dir(&self.root);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut schemes = Vec::new();
        for entry in WalkDir::new(&dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| DiscoveryError::Listing {
                source_name: self.name.clone(),
                message: e.to_string(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if is_valid_scheme(name) {
                    schemes.push(name.to_string());
                }
            }
        }

        schemes.sort();
        Ok(schemes)
    }
}
