//! Scheme resolution.
//!
//! The resolver finds a [`Handler`] for a scheme in two stages:
//!
//! 1. **Manifests.** Every source's `registry/schemes/<scheme>` is read in
//!    precedence order, entries top to bottom. The first entry that loads
//!    wins: a factory is asked for the scheme (and skipped if it declines), a
//!    connection target is wrapped in the generic adapter.
//! 2. **Providers.** Only if no manifest entry produced a handler, every
//!    registered provider is asked in registry order.
//!
//! Faults during discovery (unreadable manifests, unknown identifiers,
//! failing factories) are logged and skipped so one broken contributor
//! cannot block resolution. The resolver keeps no cache.

pub mod errors;
pub mod resolve;

pub use errors::ResolveError;
pub use resolve::{Origin, Resolved};

use std::sync::Arc;

use url::Url;

use crate::core::capability::{Connection, Handler};
use crate::core::catalog::{Catalog, Loaded};
use crate::core::error::DiscoveryError;
use crate::core::manifest::parse_entries;
use crate::core::registry::{self, ProviderRegistry};
use crate::sources::{Candidate, SourceSet};

/// Resolves schemes to handlers.
pub struct SchemeResolver {
    /// Manifest sources in precedence order
    sources: SourceSet,

    /// Implementations manifest entries can name
    catalog: Arc<Catalog>,

    /// Stage-two fallback
    providers: Arc<ProviderRegistry>,
}

impl SchemeResolver {
    /// Create a resolver over `sources` and `catalog`, falling back to the
    /// process-wide provider registry.
    pub fn new(sources: SourceSet, catalog: Arc<Catalog>) -> Self {
        SchemeResolver {
            sources,
            catalog,
            providers: registry::global(),
        }
    }

    /// Use a specific provider registry instead of the process-wide one.
    pub fn with_providers(mut self, providers: Arc<ProviderRegistry>) -> Self {
        self.providers = providers;
        self
    }

    /// The manifest sources.
    pub fn sources(&self) -> &SourceSet {
        &self.sources
    }

    /// Find a handler for `scheme`.
    pub fn resolve(&self, scheme: &str) -> Result<Arc<dyn Handler>, ResolveError> {
        self.resolve_with_origin(scheme).map(|r| r.handler)
    }

    /// Find a handler for `scheme` and report where it came from.
    ///
    /// Scheme names are matched case-insensitively.
    pub fn resolve_with_origin(&self, scheme: &str) -> Result<Resolved, ResolveError> {
        let scheme = &scheme.to_ascii_lowercase();
        if let Some(resolved) = self.seek_in_manifests(scheme) {
            tracing::debug!("scheme `{}` resolved by {}", scheme, resolved.origin);
            return Ok(resolved);
        }

        if let Some(resolved) = self.seek_in_providers(scheme) {
            tracing::debug!("scheme `{}` resolved by {}", scheme, resolved.origin);
            return Ok(resolved);
        }

        Err(ResolveError::NotFound {
            scheme: scheme.to_string(),
        })
    }

    /// Parse `url`, resolve its scheme and open a connection.
    pub fn open(&self, url: &str) -> Result<Box<dyn Connection>, ResolveError> {
        let parsed = Url::parse(url).map_err(|source| ResolveError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;
        let handler = self.resolve(parsed.scheme())?;
        Ok(handler.open(&parsed)?)
    }

    /// Every manifest entry for `scheme`, in the order stage one tries them.
    pub fn candidates(&self, scheme: &str) -> Vec<Candidate> {
        self.sources.candidates(&scheme.to_ascii_lowercase())
    }

    fn seek_in_manifests(&self, scheme: &str) -> Option<Resolved> {
        for source in self.sources.iter() {
            let contents = match source.read_manifest(scheme) {
                Ok(Some(contents)) => contents,
                Ok(None) => continue,
                Err(e) => {
                    tracing::warn!("skipping manifest source: {}", e);
                    continue;
                }
            };

            for entry in parse_entries(&contents) {
                match self.try_entry(scheme, &entry) {
                    Ok(Some(handler)) => {
                        return Some(Resolved {
                            handler,
                            origin: Origin::Manifest {
                                source: source.name().to_string(),
                                entry,
                            },
                        });
                    }
                    Ok(None) => {
                        tracing::debug!("factory `{}` declined scheme `{}`", entry, scheme);
                    }
                    Err(e) => {
                        tracing::warn!("skipping `{}` for scheme `{}`: {}", entry, scheme, e);
                    }
                }
            }
        }
        None
    }

    fn try_entry(
        &self,
        scheme: &str,
        entry: &str,
    ) -> Result<Option<Arc<dyn Handler>>, DiscoveryError> {
        match self.catalog.load(entry)? {
            Loaded::Factory(factory) => Ok(factory.create(scheme)),
            Loaded::Connection(handler) => Ok(Some(Arc::new(handler))),
        }
    }

    fn seek_in_providers(&self, scheme: &str) -> Option<Resolved> {
        let (name, handler) = self.providers.create(scheme)?;
        Some(Resolved {
            handler,
            origin: Origin::Provider { name },
        })
    }
}
