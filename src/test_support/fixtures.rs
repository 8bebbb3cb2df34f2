//! Greeting handlers used across unit tests.
//!
//! These are toy string-producing streams, not part of the library surface.

use std::io::{self, Cursor, Read};
use std::sync::Arc;

use url::Url;

use crate::core::{BoxError, ConfigurationError, Connection, Factory, Handler};

fn host(url: &Url) -> &str {
    url.host_str().unwrap_or_default()
}

/// Connection reading `Hello <host>!`.
pub struct GreetingConnection {
    url: Url,
    body: Cursor<Vec<u8>>,
}

impl GreetingConnection {
    /// URL constructor, as registered in catalogs.
    pub fn open(url: &Url) -> Result<Self, BoxError> {
        Ok(GreetingConnection::with_body(url, format!("Hello {}!", host(url))))
    }

    fn with_body(url: &Url, body: String) -> Self {
        GreetingConnection {
            url: url.clone(),
            body: Cursor::new(body.into_bytes()),
        }
    }
}

impl Read for GreetingConnection {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.body.read(buf)
    }
}

impl Connection for GreetingConnection {
    fn url(&self) -> &Url {
        &self.url
    }
}

/// Method target producing `Hi <host>!`.
pub fn hi_method(url: &Url) -> Result<Cursor<Vec<u8>>, BoxError> {
    Ok(Cursor::new(format!("Hi {}!", host(url)).into_bytes()))
}

/// Handler producing a fixed body prefix followed by the host.
pub struct PrefixHandler {
    prefix: String,
}

impl PrefixHandler {
    pub fn new(prefix: impl Into<String>) -> Self {
        PrefixHandler {
            prefix: prefix.into(),
        }
    }
}

impl Handler for PrefixHandler {
    fn open(&self, url: &Url) -> Result<Box<dyn Connection>, ConfigurationError> {
        let body = format!("{} {}!", self.prefix, host(url));
        Ok(Box::new(GreetingConnection::with_body(url, body)))
    }
}

/// Factory answering only for `geekhi`, greeting with `Hi`.
#[derive(Debug, Default, Clone, Copy)]
pub struct GeekhiFactory;

impl Factory for GeekhiFactory {
    fn create(&self, scheme: &str) -> Option<Arc<dyn Handler>> {
        if scheme == "geekhi" {
            Some(Arc::new(PrefixHandler::new("Hi")))
        } else {
            None
        }
    }
}

/// Factory answering for one scheme with a configurable greeting.
#[derive(Debug, Clone)]
pub struct SchemeFactory {
    scheme: String,
    greeting: String,
}

impl SchemeFactory {
    pub fn new(scheme: impl Into<String>, greeting: impl Into<String>) -> Self {
        SchemeFactory {
            scheme: scheme.into(),
            greeting: greeting.into(),
        }
    }
}

impl Factory for SchemeFactory {
    fn create(&self, scheme: &str) -> Option<Arc<dyn Handler>> {
        (scheme == self.scheme)
            .then(|| Arc::new(PrefixHandler::new(self.greeting.clone())) as Arc<dyn Handler>)
    }
}

/// Factory that never answers.
#[derive(Debug, Default, Clone, Copy)]
pub struct DecliningFactory;

impl Factory for DecliningFactory {
    fn create(&self, _scheme: &str) -> Option<Arc<dyn Handler>> {
        None
    }
}
