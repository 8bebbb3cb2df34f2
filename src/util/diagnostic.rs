//! User-friendly diagnostic messages.
//!
//! Every error shown to a user carries its root cause and, where one exists,
//! a suggested fix.

use std::fmt;
use std::path::PathBuf;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

/// Common suggestion messages for consistent error handling.
pub mod suggestions {
    /// Suggestion when no declaration file is found.
    pub const NO_DECLARATIONS: &str =
        "help: Create a Schemes.toml with at least one [[registration]] table";

    /// Suggestion when a scheme has no manifest anywhere.
    pub const NO_MANIFESTS: &str = "help: Run `schemeport compile` to write the scheme manifests";

    /// Suggestion when compile rejects registrations.
    pub const COMPILE_FAILED: &str = "help: Run `schemeport compile --verbose` for more details";
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A diagnostic message with optional suggestions.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Primary message
    pub message: String,
    /// Severity level
    pub severity: Severity,
    /// Additional context lines
    pub context: Vec<String>,
    /// Suggested fixes
    pub suggestions: Vec<String>,
    /// Related location (file path)
    pub location: Option<PathBuf>,
}

impl Diagnostic {
    fn with_severity(message: impl Into<String>, severity: Severity) -> Self {
        Diagnostic {
            message: message.into(),
            severity,
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
        }
    }

    /// Create a new error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self::with_severity(message, Severity::Error)
    }

    /// Create a new warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::with_severity(message, Severity::Warning)
    }

    /// Add context to the diagnostic.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Add a suggestion for fixing the issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Add a file location.
    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    /// Format the diagnostic for terminal output.
    pub fn format(&self, color: bool) -> String {
        let mut output = String::new();

        let severity_str = if color {
            match self.severity {
                Severity::Error => "\x1b[1;31merror\x1b[0m",
                Severity::Warning => "\x1b[1;33mwarning\x1b[0m",
            }
        } else {
            match self.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
            }
        };

        output.push_str(&format!("{}: {}\n", severity_str, self.message));

        if let Some(ref path) = self.location {
            output.push_str(&format!("  --> {}\n", path.display()));
        }

        for ctx in &self.context {
            output.push_str(&format!("  = {}\n", ctx));
        }

        if !self.suggestions.is_empty() {
            output.push('\n');
            let help_prefix = if color {
                "\x1b[1;32mhelp\x1b[0m"
            } else {
                "help"
            };
            output.push_str(&format!("{}: consider:\n", help_prefix));
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, suggestion));
            }
        }

        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(false))
    }
}

/// Compile run that rejected at least one registration.
#[derive(Debug, Error, MietteDiagnostic)]
#[error("{rejected} registration(s) rejected, {written} manifest line(s) written")]
#[diagnostic(code(schemeport::compile::failed))]
pub struct CompileFailed {
    pub rejected: usize,
    pub written: usize,
    #[help]
    pub help: Option<String>,
}

impl CompileFailed {
    pub fn new(rejected: usize, written: usize) -> Self {
        CompileFailed {
            rejected,
            written,
            help: Some(suggestions::COMPILE_FAILED.to_string()),
        }
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_formatting() {
        let diag = Diagnostic::error("`demo::Hidden` must be public")
            .with_location("Schemes.toml")
            .with_context("resolution loads owners from outside their module")
            .with_suggestion("Make the owner `pub`")
            .with_suggestion("Register a public wrapper instead");

        let output = diag.format(false);
        assert!(output.starts_with("error: `demo::Hidden` must be public"));
        assert!(output.contains("--> Schemes.toml"));
        assert!(output.contains("= resolution loads owners"));
        assert!(output.contains("help: consider:"));
        assert!(output.contains("2. Register a public wrapper"));
    }

    #[test]
    fn test_colored_severity() {
        let output = Diagnostic::warning("skipped").format(true);
        assert!(output.contains("\x1b[1;33mwarning"));
    }

    #[test]
    fn test_compile_failed_message() {
        let err = CompileFailed::new(2, 5);
        assert_eq!(
            err.to_string(),
            "2 registration(s) rejected, 5 manifest line(s) written"
        );
    }
}
