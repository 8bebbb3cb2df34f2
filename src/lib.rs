//! schemeport - pluggable URI scheme handlers
//!
//! Modules declare which of their types or functions handle which URI
//! schemes. At build time the [`compiler`] validates those declarations and
//! writes one manifest per scheme. At run time the [`resolver`] finds a
//! handler for a scheme from those manifests, falling back to the providers
//! modules registered during initialization.

pub mod compiler;
pub mod core;
pub mod ops;
pub mod resolver;
pub mod sources;
pub mod util;

/// Toy greeting handlers and manifest helpers for unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests.
#[cfg(test)]
pub mod test_support;

pub use compiler::{CompileReport, Registration, RegistrationCompiler};
pub use core::{Catalog, Connection, Factory, Handler, ProviderRegistry};
pub use resolver::{ResolveError, SchemeResolver};
pub use sources::{MemorySource, PathSource, SourceSet};
pub use util::context::GlobalContext;
