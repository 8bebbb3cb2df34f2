//! ManifestSource trait - common interface for all manifest locations.

use crate::core::error::DiscoveryError;

/// A place scheme manifests can be read from, such as one module's build
/// output directory.
pub trait ManifestSource: Send + Sync {
    /// Get the source name for display.
    fn name(&self) -> &str;

    /// Read the raw manifest for `scheme`.
    ///
    /// Returns `Ok(None)` when this source contributes nothing for the scheme.
    fn read_manifest(&self, scheme: &str) -> Result<Option<String>, DiscoveryError>;

    /// List every scheme this source has a manifest for, sorted.
    fn schemes(&self) -> Result<Vec<String>, DiscoveryError>;
}
