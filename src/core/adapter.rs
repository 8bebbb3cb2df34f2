//! Generic adapter between registered targets and the [`Handler`] contract.
//!
//! A [`GenericHandler`] wraps either a connection constructor discovered in
//! the catalog or a bare `(url) -> stream` function. Method targets are wrapped
//! in a [`MethodConnection`], so both end up behind the same handler type.

use std::fmt;
use std::io::{self, Read};
use std::sync::Arc;

use url::Url;

use crate::core::capability::{Connection, Handler};
use crate::core::error::{BoxError, ConfigurationError};

/// Marker separating the method path from the scheme in adapter identifiers.
pub const ADAPTER_MARKER: &str = "$url$";

/// Constructor taking the URL being opened.
pub type ConnectionCtor =
    Arc<dyn Fn(&Url) -> Result<Box<dyn Connection>, BoxError> + Send + Sync>;

/// A bare function from URL to byte stream.
pub type StreamFn = Arc<dyn Fn(&Url) -> Result<Box<dyn Read + Send>, BoxError> + Send + Sync>;

/// Identifier of the adapter generated for `method` and `scheme`.
pub fn adapter_id(method: &str, scheme: &str) -> String {
    format!("{}{}{}", method, ADAPTER_MARKER, scheme)
}

/// Split an adapter identifier into `(method, scheme)`.
pub fn parse_adapter_id(id: &str) -> Option<(&str, &str)> {
    let (method, scheme) = id.rsplit_once(ADAPTER_MARKER)?;
    if method.is_empty() || scheme.is_empty() {
        return None;
    }
    Some((method, scheme))
}

/// Handler that instantiates a connection target once per `open` call.
#[derive(Clone)]
pub struct GenericHandler {
    implementation: String,
    ctor: Option<ConnectionCtor>,
}

impl GenericHandler {
    /// Wrap a connection target. `ctor` is `None` when the target has no
    /// URL constructor; opening then fails with a configuration error.
    pub fn new(implementation: impl Into<String>, ctor: Option<ConnectionCtor>) -> Self {
        GenericHandler {
            implementation: implementation.into(),
            ctor,
        }
    }

    /// Wrap a bare stream function behind a [`MethodConnection`].
    pub fn for_method(implementation: impl Into<String>, method: StreamFn) -> Self {
        let ctor: ConnectionCtor = Arc::new(move |url: &Url| -> Result<Box<dyn Connection>, BoxError> {
            let stream = method(url)?;
            Ok(Box::new(MethodConnection::new(url.clone(), stream)) as Box<dyn Connection>)
        });
        GenericHandler::new(implementation, Some(ctor))
    }

    /// The implementation identifier this handler instantiates.
    pub fn implementation(&self) -> &str {
        &self.implementation
    }
}

impl fmt::Debug for GenericHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenericHandler")
            .field("implementation", &self.implementation)
            .field("has_constructor", &self.ctor.is_some())
            .finish()
    }
}

impl Handler for GenericHandler {
    fn open(&self, url: &Url) -> Result<Box<dyn Connection>, ConfigurationError> {
        let ctor = self
            .ctor
            .as_ref()
            .ok_or_else(|| ConfigurationError::MissingConstructor {
                implementation: self.implementation.clone(),
            })?;

        ctor(url).map_err(|source| ConfigurationError::ConstructorFailed {
            implementation: self.implementation.clone(),
            url: url.to_string(),
            source,
        })
    }
}

/// Connection produced for a method target: holds the stream the method
/// returned when the connection was constructed.
pub struct MethodConnection {
    url: Url,
    stream: Box<dyn Read + Send>,
}

impl MethodConnection {
    pub fn new(url: Url, stream: Box<dyn Read + Send>) -> Self {
        MethodConnection { url, stream }
    }
}

impl Read for MethodConnection {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.stream.read(buf)
    }
}

impl Connection for MethodConnection {
    fn url(&self) -> &Url {
        &self.url
    }
}
