//! Catalog - the typed table of loadable implementations.
//!
//! Manifest entries name implementations by identifier. The catalog maps
//! each identifier to an [`Implementation`], a closed set of variants whose
//! constructors are captured when the owning module defines them. Loading an
//! identifier never inspects types at run time.
//!
//! Identifiers of generated method adapters (`<method>$url$<scheme>`) are
//! not defined directly; the catalog instantiates the generic adapter for
//! them from the method they name.

use std::collections::HashMap;
use std::fmt;
use std::io::Read;
use std::sync::Arc;

use url::Url;

use crate::core::adapter::{parse_adapter_id, ConnectionCtor, GenericHandler, StreamFn};
use crate::core::capability::{Connection, Factory};
use crate::core::error::{BoxError, DiscoveryError};

/// Zero-argument factory constructor.
pub type FactoryCtor = Arc<dyn Fn() -> Result<Box<dyn Factory>, BoxError> + Send + Sync>;

/// A loadable implementation.
#[derive(Clone)]
pub enum Implementation {
    /// Implements the factory capability.
    Factory(FactoryCtor),
    /// Implements the connection capability. `None` when the type has no
    /// URL constructor.
    Connection(Option<ConnectionCtor>),
    /// A bare `(url) -> stream` function, reachable only through its
    /// generated adapter.
    Method(StreamFn),
}

impl Implementation {
    /// Short name of the variant for logs and listings.
    pub fn kind(&self) -> &'static str {
        match self {
            Implementation::Factory(_) => "factory",
            Implementation::Connection(_) => "connection",
            Implementation::Method(_) => "method",
        }
    }
}

impl fmt::Debug for Implementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Implementation::{}", self.kind())
    }
}

/// Result of loading a manifest entry.
pub enum Loaded {
    /// An instantiated factory, still to be asked for a handler.
    Factory(Box<dyn Factory>),
    /// A connection target wrapped in the generic adapter.
    Connection(GenericHandler),
}

/// Table of implementations keyed by fully-qualified identifier.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    entries: HashMap<String, Implementation>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Define an implementation. A later definition of the same identifier
    /// replaces the earlier one.
    pub fn define(&mut self, id: impl Into<String>, implementation: Implementation) -> &mut Self {
        let id = id.into();
        if self.entries.insert(id.clone(), implementation).is_some() {
            tracing::debug!("catalog entry `{}` redefined", id);
        }
        self
    }

    /// Define a factory built by `ctor` each time it is loaded.
    pub fn define_factory<F, C>(&mut self, id: impl Into<String>, ctor: C) -> &mut Self
    where
        F: Factory + 'static,
        C: Fn() -> Result<F, BoxError> + Send + Sync + 'static,
    {
        let ctor: FactoryCtor =
            Arc::new(move || -> Result<Box<dyn Factory>, BoxError> { Ok(Box::new(ctor()?)) });
        self.define(id, Implementation::Factory(ctor))
    }

    /// Define a connection type with a URL constructor.
    pub fn define_connection<C, K>(&mut self, id: impl Into<String>, ctor: K) -> &mut Self
    where
        C: Connection + 'static,
        K: Fn(&Url) -> Result<C, BoxError> + Send + Sync + 'static,
    {
        let ctor: ConnectionCtor =
            Arc::new(move |url: &Url| -> Result<Box<dyn Connection>, BoxError> {
                Ok(Box::new(ctor(url)?))
            });
        self.define(id, Implementation::Connection(Some(ctor)))
    }

    /// Define a connection type that lacks a URL constructor.
    pub fn define_connection_type(&mut self, id: impl Into<String>) -> &mut Self {
        self.define(id, Implementation::Connection(None))
    }

    /// Define a bare `(url) -> stream` function.
    pub fn define_method<R, M>(&mut self, id: impl Into<String>, method: M) -> &mut Self
    where
        R: Read + Send + 'static,
        M: Fn(&Url) -> Result<R, BoxError> + Send + Sync + 'static,
    {
        let method: StreamFn =
            Arc::new(move |url: &Url| -> Result<Box<dyn Read + Send>, BoxError> {
                Ok(Box::new(method(url)?))
            });
        self.define(id, Implementation::Method(method))
    }

    /// Look up an identifier without instantiating anything.
    pub fn get(&self, id: &str) -> Option<&Implementation> {
        self.entries.get(id)
    }

    /// Check whether an identifier can be loaded.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id) || self.method_for_adapter(id).is_some()
    }

    /// Number of defined implementations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load and instantiate the implementation named by a manifest entry.
    pub fn load(&self, id: &str) -> Result<Loaded, DiscoveryError> {
        if let Some(method) = self.method_for_adapter(id) {
            return Ok(Loaded::Connection(GenericHandler::for_method(id, method)));
        }

        match self.entries.get(id) {
            Some(Implementation::Factory(ctor)) => {
                let factory = ctor().map_err(|source| DiscoveryError::Instantiation {
                    implementation: id.to_string(),
                    source,
                })?;
                Ok(Loaded::Factory(factory))
            }
            Some(Implementation::Connection(ctor)) => {
                Ok(Loaded::Connection(GenericHandler::new(id, ctor.clone())))
            }
            Some(Implementation::Method(_)) => Err(DiscoveryError::NotACandidate {
                implementation: id.to_string(),
            }),
            None => Err(DiscoveryError::UnknownImplementation {
                implementation: id.to_string(),
            }),
        }
    }

    /// The method behind a generated adapter identifier, if `id` is one.
    fn method_for_adapter(&self, id: &str) -> Option<StreamFn> {
        if self.entries.contains_key(id) {
            return None;
        }
        let (method, _scheme) = parse_adapter_id(id)?;
        match self.entries.get(method) {
            Some(Implementation::Method(f)) => Some(f.clone()),
            _ => None,
        }
    }
}
