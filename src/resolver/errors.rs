//! Resolution error types and diagnostics.

use thiserror::Error;

use crate::core::error::ConfigurationError;
use crate::util::diagnostic::Diagnostic;

/// Error surfaced to callers of the resolver.
///
/// Discovery faults never appear here; they are logged and skipped.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no handler found for scheme `{scheme}`")]
    NotFound { scheme: String },

    #[error("invalid URL `{url}`")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

impl ResolveError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ResolveError::NotFound { scheme } => {
                Diagnostic::error(format!("no handler found for scheme `{}`", scheme))
                    .with_context(format!(
                        "no manifest entry under `registry/schemes/{}` loaded and no provider answered",
                        scheme
                    ))
                    .with_suggestion(format!(
                        "Declare a registration for `{}` in Schemes.toml and run `schemeport compile`",
                        scheme
                    ))
                    .with_suggestion(
                        "Check that the module's initialization code registered its provider"
                            .to_string(),
                    )
            }

            ResolveError::InvalidUrl { url, source } => {
                Diagnostic::error(format!("invalid URL `{}`", url)).with_context(source.to_string())
            }

            ResolveError::Configuration(err) => Diagnostic::error(err.to_string())
                .with_context(format!(
                    "`{}` was selected as the handler, so there is no fallback",
                    err.implementation()
                ))
                .with_suggestion(
                    "Give the connection type a constructor taking the URL".to_string(),
                ),
        }
    }
}
