//! Runtime error types shared by the catalog, sources and adapters.

use std::path::PathBuf;

use thiserror::Error;

/// Boxed error returned by user-supplied constructors.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A fault while discovering a handler.
///
/// Discovery errors are never fatal: the resolver logs them and moves on to
/// the next manifest entry or source.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("failed to read manifest {} from `{source_name}`", .path.display())]
    ManifestRead {
        source_name: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to list manifests in `{source_name}`: {message}")]
    Listing { source_name: String, message: String },

    #[error("implementation `{implementation}` is not defined in the catalog")]
    UnknownImplementation { implementation: String },

    #[error("implementation `{implementation}` is neither a factory nor a connection")]
    NotACandidate { implementation: String },

    #[error("failed to instantiate `{implementation}`")]
    Instantiation {
        implementation: String,
        #[source]
        source: BoxError,
    },
}

/// The selected handler's target broke its construction contract.
///
/// Raised when a connection is opened, after a handler has been committed
/// to. There is no fallback at that point.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("`{implementation}` needs to have a constructor with URL parameter")]
    MissingConstructor { implementation: String },

    #[error("constructing `{implementation}` for `{url}` failed")]
    ConstructorFailed {
        implementation: String,
        url: String,
        #[source]
        source: BoxError,
    },
}

impl ConfigurationError {
    /// The implementation identifier this error refers to.
    pub fn implementation(&self) -> &str {
        match self {
            ConfigurationError::MissingConstructor { implementation }
            | ConfigurationError::ConstructorFailed { implementation, .. } => implementation,
        }
    }
}
