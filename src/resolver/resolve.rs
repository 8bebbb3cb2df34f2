//! Resolution results.

use std::fmt;
use std::sync::Arc;

use crate::core::capability::Handler;

/// Where a resolved handler came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// Found through a manifest entry.
    Manifest {
        /// Name of the source holding the manifest
        source: String,
        /// The implementation identifier that produced the handler
        entry: String,
    },

    /// Produced by a registered provider.
    Provider {
        /// Provider name
        name: String,
    },
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Manifest { source, entry } => write!(f, "manifest entry `{}` in {}", entry, source),
            Origin::Provider { name } => write!(f, "provider `{}`", name),
        }
    }
}

/// A handler together with its origin.
#[derive(Clone)]
pub struct Resolved {
    pub handler: Arc<dyn Handler>,
    pub origin: Origin,
}

impl fmt::Debug for Resolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolved")
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}
