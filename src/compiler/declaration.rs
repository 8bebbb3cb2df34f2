//! Registration declarations.
//!
//! A registration says "this owner handles these schemes". The owner carries
//! the facts the compiler validates against: visibility, the capabilities it
//! implements, its constructors, and for bare functions the signature shape.
//! Declarations are built in code or read from a `Schemes.toml` file:
//!
//! ```toml
//! [[registration]]
//! owner = "demo::GeekoutConnection"
//! kind = "connection"
//! schemes = ["geekout"]
//!
//! [[registration]]
//! owner = "demo::greetings::hi"
//! kind = "method"
//! schemes = ["greet2"]
//! ```
//!
//! Facts left out of a file default to what the declared kind implies, so a
//! file only spells them out when they differ.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Canonical declaration file name.
pub const DECLARATION_FILE: &str = "Schemes.toml";

/// Parameter type name of a URL argument.
pub const URL_PARAM: &str = "url";

/// Return type name of a byte stream.
pub const STREAM_RETURN: &str = "stream";

/// Visibility of a registration owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Crate,
    Private,
}

/// What kind of target a registration declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Factory,
    Connection,
    Method,
}

impl std::fmt::Display for TargetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetKind::Factory => write!(f, "factory"),
            TargetKind::Connection => write!(f, "connection"),
            TargetKind::Method => write!(f, "method"),
        }
    }
}

/// A capability an owner type can implement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    Factory,
    Connection,
}

/// The type or function a registration is attached to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    /// Fully-qualified identifier, written verbatim to manifests
    pub path: String,

    /// Declared visibility
    pub visibility: Visibility,

    /// Capabilities the type implements
    pub implements: BTreeSet<Capability>,

    /// Parameter type lists of the type's constructors
    pub constructors: Vec<Vec<String>>,

    /// Whether a function owner is free-standing (no receiver)
    pub is_static: bool,

    /// Parameter types of a function owner
    pub params: Vec<String>,

    /// Return type of a function owner
    pub returns: Option<String>,
}

impl Owner {
    /// A public owner with no declared facts.
    pub fn new(path: impl Into<String>) -> Self {
        Owner {
            path: path.into(),
            visibility: Visibility::Public,
            implements: BTreeSet::new(),
            constructors: Vec::new(),
            is_static: false,
            params: Vec::new(),
            returns: None,
        }
    }

    /// A public factory type with a no-argument constructor.
    pub fn factory(path: impl Into<String>) -> Self {
        Owner::new(path)
            .implementing(Capability::Factory)
            .with_constructor(Vec::<String>::new())
    }

    /// A public connection type with a URL constructor.
    pub fn connection(path: impl Into<String>) -> Self {
        Owner::new(path)
            .implementing(Capability::Connection)
            .with_constructor([URL_PARAM])
    }

    /// A public free function from URL to stream.
    pub fn method(path: impl Into<String>) -> Self {
        let mut owner = Owner::new(path);
        owner.is_static = true;
        owner.params = vec![URL_PARAM.to_string()];
        owner.returns = Some(STREAM_RETURN.to_string());
        owner
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn implementing(mut self, capability: Capability) -> Self {
        self.implements.insert(capability);
        self
    }

    pub fn with_constructor<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.constructors
            .push(params.into_iter().map(Into::into).collect());
        self
    }

    /// Drop all declared constructors.
    pub fn without_constructors(mut self) -> Self {
        self.constructors.clear();
        self
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    pub fn implements(&self, capability: Capability) -> bool {
        self.implements.contains(&capability)
    }

    /// Check for a constructor taking exactly one URL.
    pub fn has_url_constructor(&self) -> bool {
        self.constructors
            .iter()
            .any(|params| params.len() == 1 && params[0] == URL_PARAM)
    }

    /// Check for a free function `(url) -> stream`.
    pub fn is_stream_method(&self) -> bool {
        self.is_static
            && self.params.len() == 1
            && self.params[0] == URL_PARAM
            && self.returns.as_deref() == Some(STREAM_RETURN)
    }
}

/// One declaration: an owner, the schemes it handles, and its target kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub owner: Owner,
    /// Lowercase scheme names in declaration order, without duplicates
    pub schemes: Vec<String>,
    pub kind: TargetKind,
}

impl Registration {
    /// Create a registration without schemes.
    pub fn new(owner: Owner, kind: TargetKind) -> Self {
        Registration {
            owner,
            schemes: Vec::new(),
            kind,
        }
    }

    /// Add a scheme name. Schemes are case-insensitive, so the name is
    /// stored lowercase and repeats are ignored.
    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        let scheme = scheme.into().to_ascii_lowercase();
        if !self.schemes.contains(&scheme) {
            self.schemes.push(scheme);
        }
        self
    }

    /// Add several scheme names.
    pub fn with_schemes<I, S>(self, schemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        schemes.into_iter().fold(self, |reg, s| reg.scheme(s))
    }
}

#[derive(Debug, Deserialize)]
struct DeclarationFile {
    #[serde(default)]
    registration: Vec<RawRegistration>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRegistration {
    owner: String,
    kind: TargetKind,

    #[serde(default)]
    schemes: Vec<String>,

    #[serde(default)]
    visibility: Visibility,

    #[serde(default)]
    implements: Option<Vec<Capability>>,

    #[serde(default)]
    constructors: Option<Vec<Vec<String>>>,

    #[serde(default, rename = "static")]
    is_static: Option<bool>,

    #[serde(default)]
    params: Option<Vec<String>>,

    #[serde(default)]
    returns: Option<String>,
}

impl RawRegistration {
    fn into_registration(self) -> Registration {
        let mut owner = match self.kind {
            TargetKind::Factory => Owner::factory(self.owner),
            TargetKind::Connection => Owner::connection(self.owner),
            TargetKind::Method => Owner::method(self.owner),
        };
        owner.visibility = self.visibility;

        if let Some(implements) = self.implements {
            owner.implements = implements.into_iter().collect();
        }
        if let Some(constructors) = self.constructors {
            owner.constructors = constructors;
        }
        if let Some(is_static) = self.is_static {
            owner.is_static = is_static;
        }
        if let Some(params) = self.params {
            owner.params = params;
        }
        if self.returns.is_some() {
            owner.returns = self.returns;
        }

        Registration::new(owner, self.kind).with_schemes(self.schemes)
    }
}

/// Parse declarations from `Schemes.toml` contents.
pub fn parse_declarations(contents: &str) -> Result<Vec<Registration>, toml::de::Error> {
    let file: DeclarationFile = toml::from_str(contents)?;
    Ok(file
        .registration
        .into_iter()
        .map(RawRegistration::into_registration)
        .collect())
}

/// Load declarations from a file.
pub fn load_declarations(path: &Path) -> Result<Vec<Registration>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read declarations: {}", path.display()))?;
    parse_declarations(&contents)
        .with_context(|| format!("failed to parse declarations: {}", path.display()))
}
