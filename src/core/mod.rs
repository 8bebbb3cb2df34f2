//! Core runtime types for schemeport.
//!
//! This module contains the pieces shared by the resolver and by modules
//! that contribute handlers:
//! - Capability traits (Factory, Handler, Connection)
//! - The catalog of loadable implementations
//! - The generic adapter for connection and method targets
//! - Manifest layout and parsing
//! - The provider registry

pub mod adapter;
pub mod capability;
pub mod catalog;
pub mod error;
pub mod manifest;
pub mod registry;

pub use adapter::{GenericHandler, MethodConnection};
pub use capability::{read_to_string, Connection, Factory, Handler};
pub use catalog::{Catalog, Implementation, Loaded};
pub use error::{BoxError, ConfigurationError, DiscoveryError};
pub use registry::{ProviderRegistry, ProviderRegistryError};
