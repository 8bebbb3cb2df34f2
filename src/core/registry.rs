//! Provider registry - process-wide factories consulted after manifests.
//!
//! Modules register their factories from initialization code. The registry
//! is append-only and iterates in a documented order: ascending priority
//! (lower number first), ties in registration order.

use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use thiserror::Error;

use crate::core::capability::{Factory, Handler};

/// Priority given to providers registered without one.
pub const DEFAULT_PRIORITY: i32 = 100;

/// Process-wide registry used by resolvers that are not given their own.
static GLOBAL: LazyLock<Arc<ProviderRegistry>> =
    LazyLock::new(|| Arc::new(ProviderRegistry::new()));

/// The process-wide provider registry.
pub fn global() -> Arc<ProviderRegistry> {
    GLOBAL.clone()
}

/// Provider registration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderRegistryError {
    #[error("provider name must not be empty")]
    EmptyName,

    #[error("provider `{0}` is already registered")]
    DuplicateName(String),
}

/// A registered provider.
#[derive(Clone)]
pub struct ProviderEntry {
    /// Name used in logs and diagnostics
    pub name: String,

    /// Ordering key (lower = consulted earlier)
    pub priority: i32,

    /// The factory itself
    pub factory: Arc<dyn Factory>,
}

impl std::fmt::Debug for ProviderEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderEntry")
            .field("name", &self.name)
            .field("priority", &self.priority)
            .finish()
    }
}

/// Append-only set of discoverable factories.
#[derive(Debug, Default)]
pub struct ProviderRegistry {
    entries: RwLock<Vec<ProviderEntry>>,
}

impl ProviderRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider with the default priority.
    pub fn register(
        &self,
        name: impl Into<String>,
        factory: Arc<dyn Factory>,
    ) -> Result<(), ProviderRegistryError> {
        self.register_with_priority(name, DEFAULT_PRIORITY, factory)
    }

    /// Register a provider with an explicit priority.
    pub fn register_with_priority(
        &self,
        name: impl Into<String>,
        priority: i32,
        factory: Arc<dyn Factory>,
    ) -> Result<(), ProviderRegistryError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ProviderRegistryError::EmptyName);
        }

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if entries.iter().any(|e| e.name == name) {
            return Err(ProviderRegistryError::DuplicateName(name));
        }

        // Insert after every entry of equal or lower priority value, which
        // keeps registration order among equal priorities.
        let pos = entries
            .iter()
            .position(|e| e.priority > priority)
            .unwrap_or(entries.len());
        tracing::debug!("registered provider `{}` (priority {})", name, priority);
        entries.insert(
            pos,
            ProviderEntry {
                name,
                priority,
                factory,
            },
        );
        Ok(())
    }

    /// Snapshot of all providers in discovery order.
    ///
    /// The lock is released before the caller touches any factory.
    pub fn providers(&self) -> Vec<ProviderEntry> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Provider names in discovery order.
    pub fn names(&self) -> Vec<String> {
        self.providers().into_iter().map(|e| e.name).collect()
    }

    /// Ask each provider in turn for `scheme`; the first handler wins.
    pub fn create(&self, scheme: &str) -> Option<(String, Arc<dyn Handler>)> {
        for entry in self.providers() {
            if let Some(handler) = entry.factory.create(scheme) {
                return Some((entry.name, handler));
            }
        }
        None
    }

    /// Number of registered providers.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check if no providers are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
