//! Adapter synthesis for method targets.
//!
//! A method registration becomes one connection registration per scheme.
//! Nothing is generated as source: the adapter is identified as
//! `<method>$url$<scheme>` and the catalog builds the generic adapter for
//! that identifier at run time.

use serde::Serialize;

use crate::compiler::declaration::{Owner, Registration, TargetKind};
use crate::core::adapter::adapter_id;

/// A connection-kind registration synthesized for a method target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedAdapter {
    /// Adapter identifier as written to the manifest
    pub id: String,

    /// The method it invokes
    pub method: String,

    /// The scheme it was generated for
    pub scheme: String,
}

impl GeneratedAdapter {
    pub fn new(method: &str, scheme: &str) -> Self {
        GeneratedAdapter {
            id: adapter_id(method, scheme),
            method: method.to_string(),
            scheme: scheme.to_string(),
        }
    }

    /// The registration the adapter goes through, same as a handwritten
    /// public connection with a URL constructor.
    pub fn registration(&self) -> Registration {
        Registration::new(Owner::connection(self.id.clone()), TargetKind::Connection)
            .scheme(self.scheme.clone())
    }
}
