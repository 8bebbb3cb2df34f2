//! The capability surface every scheme handler is built from.
//!
//! - [`Factory`] hands out handlers for the schemes it knows.
//! - [`Handler`] opens a [`Connection`] for one URL.
//! - [`Connection`] is a readable byte stream bound to that URL.

use std::io::{self, Read};
use std::sync::Arc;

use url::Url;

use crate::core::error::ConfigurationError;

/// Produces handlers for the schemes it understands.
pub trait Factory: Send + Sync {
    /// Return a handler for `scheme`, or `None` if the scheme is not supported.
    fn create(&self, scheme: &str) -> Option<Arc<dyn Handler>>;
}

/// Opens connections for URLs of a scheme.
pub trait Handler: Send + Sync {
    /// Open a connection for `url`.
    fn open(&self, url: &Url) -> Result<Box<dyn Connection>, ConfigurationError>;
}

/// A readable byte stream for one URL.
pub trait Connection: Read + Send {
    /// The URL this connection was opened for.
    fn url(&self) -> &Url;
}

/// Read a connection to completion as UTF-8 text.
pub fn read_to_string(conn: &mut dyn Connection) -> io::Result<String> {
    let mut buf = String::new();
    conn.read_to_string(&mut buf)?;
    Ok(buf)
}
