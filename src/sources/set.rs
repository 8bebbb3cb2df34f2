//! Ordered set of manifest sources.
//!
//! When several sources carry a manifest for the same scheme, the one with
//! the lowest priority number is read first. Sources with equal priority keep
//! the order in which they were added.

use serde::Serialize;

use crate::core::manifest::parse_entries;
use crate::sources::ManifestSource;

/// Priority given to sources added without one.
pub const DEFAULT_PRIORITY: i32 = 100;

struct SourceEntry {
    priority: i32,
    source: Box<dyn ManifestSource>,
}

/// One manifest entry together with the source it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    /// Name of the contributing source
    pub source: String,

    /// Implementation identifier
    pub entry: String,
}

/// Manifest sources in precedence order.
#[derive(Default)]
pub struct SourceSet {
    sources: Vec<SourceEntry>,
}

impl SourceSet {
    /// Create a new empty source set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a source with the default priority.
    pub fn add(&mut self, source: Box<dyn ManifestSource>) {
        self.add_with_priority(source, DEFAULT_PRIORITY);
    }

    /// Add a source with an explicit priority (lower = read earlier).
    pub fn add_with_priority(&mut self, source: Box<dyn ManifestSource>, priority: i32) {
        let pos = self
            .sources
            .iter()
            .position(|e| e.priority > priority)
            .unwrap_or(self.sources.len());
        self.sources.insert(pos, SourceEntry { priority, source });
    }

    /// Builder-style [`SourceSet::add`].
    pub fn with(mut self, source: impl ManifestSource + 'static) -> Self {
        self.add(Box::new(source));
        self
    }

    /// Iterate sources in precedence order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn ManifestSource> + '_ {
        self.sources.iter().map(|e| e.source.as_ref())
    }

    /// Source names in precedence order.
    pub fn names(&self) -> Vec<String> {
        self.iter().map(|s| s.name().to_string()).collect()
    }

    /// Every manifest entry for `scheme`, in the order the resolver tries them.
    ///
    /// Sources that fail to read are logged and skipped.
    pub fn candidates(&self, scheme: &str) -> Vec<Candidate> {
        let mut candidates = Vec::new();
        for source in self.iter() {
            match source.read_manifest(scheme) {
                Ok(Some(contents)) => {
                    candidates.extend(parse_entries(&contents).into_iter().map(|entry| Candidate {
                        source: source.name().to_string(),
                        entry,
                    }));
                }
                Ok(None) => {}
                Err(e) => tracing::warn!("{}", e),
            }
        }
        candidates
    }

    /// Union of all schemes with a manifest in any source, sorted.
    ///
    /// Sources that fail to list are logged and skipped.
    pub fn schemes(&self) -> Vec<String> {
        let mut schemes = Vec::new();
        for source in self.iter() {
            match source.schemes() {
                Ok(found) => schemes.extend(found),
                Err(e) => tracing::warn!("{}", e),
            }
        }
        schemes.sort();
        schemes.dedup();
        schemes
    }

    /// Number of sources.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
