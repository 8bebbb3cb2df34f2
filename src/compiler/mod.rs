//! Registration compiler.
//!
//! Runs once per build over every declared [`Registration`] and writes the
//! scheme manifests below the build output directory. A rejected or
//! unwritable registration becomes a diagnostic; the rest of the batch is
//! still compiled.

pub mod adapter;
pub mod declaration;
pub mod validation;

pub use adapter::GeneratedAdapter;
pub use declaration::{
    load_declarations, parse_declarations, Capability, Owner, Registration, TargetKind,
    Visibility, DECLARATION_FILE,
};
pub use validation::ValidationError;

use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::core::manifest::{manifest_path, schemes_dir, GENERATED_HEADER};
use crate::util::diagnostic::Diagnostic;
use crate::util::fs::remove_dir_all_if_exists;

/// Why a registration produced no (or only part of its) manifest lines.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("failed to write manifest {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A compile error tied to the registration that caused it.
#[derive(Debug)]
pub struct CompileDiagnostic {
    /// Owner identifier of the offending registration
    pub owner: String,
    pub error: CompileError,
}

impl CompileDiagnostic {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.error.to_string());
        match &self.error {
            CompileError::Validation(ValidationError::NoSchemes { .. }) => diag
                .with_suggestion("Add at least one name to `schemes`".to_string()),
            CompileError::Validation(ValidationError::NotPublic { .. }) => diag
                .with_context("resolution loads owners from outside their module".to_string())
                .with_suggestion("Make the owner `pub` and set `visibility = \"public\"`".to_string()),
            CompileError::Validation(ValidationError::InvalidScheme { .. }) => diag
                .with_context(
                    "scheme names start with a letter followed by letters, digits, `+`, `-` or `.`"
                        .to_string(),
                ),
            CompileError::Validation(ValidationError::MissingCapability { .. }) => diag
                .with_suggestion("Implement `Factory` or `Connection` for the owner".to_string()),
            CompileError::Validation(ValidationError::MissingUrlConstructor { .. }) => diag
                .with_suggestion("Add a constructor taking only the URL".to_string()),
            CompileError::Validation(ValidationError::InvalidOwner { .. }) => diag
                .with_context(
                    "manifests hold one identifier per line, without spaces or a leading `#`"
                        .to_string(),
                ),
            CompileError::Validation(ValidationError::InvalidMethod { .. }) => diag
                .with_context("method targets are free functions `(url) -> stream`".to_string()),
            CompileError::Io { source, .. } => diag
                .with_context(format!("while registering `{}`", self.owner))
                .with_context(source.to_string()),
        }
    }
}

/// One line written to a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestLine {
    pub scheme: String,
    pub implementation: String,
    pub path: PathBuf,
}

/// Outcome of one compile run.
#[derive(Debug, Default)]
pub struct CompileReport {
    /// Lines written, in write order
    pub entries: Vec<ManifestLine>,

    /// Adapters synthesized for method targets
    pub adapters: Vec<GeneratedAdapter>,

    /// Rejected registrations and write failures
    pub diagnostics: Vec<CompileDiagnostic>,
}

impl CompileReport {
    /// Check whether any registration failed.
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Schemes that received at least one line, sorted.
    pub fn schemes(&self) -> Vec<String> {
        let mut schemes: Vec<String> = self.entries.iter().map(|e| e.scheme.clone()).collect();
        schemes.sort();
        schemes.dedup();
        schemes
    }

    fn reject(&mut self, owner: &str, error: impl Into<CompileError>) {
        let error = error.into();
        tracing::warn!("rejected `{}`: {}", owner, error);
        self.diagnostics.push(CompileDiagnostic {
            owner: owner.to_string(),
            error,
        });
    }
}

/// Writes manifests for a batch of registrations.
pub struct RegistrationCompiler {
    out_dir: PathBuf,

    /// Schemes whose manifest was already started in the current run
    touched: HashSet<String>,
}

impl RegistrationCompiler {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        RegistrationCompiler {
            out_dir: out_dir.into(),
            touched: HashSet::new(),
        }
    }

    /// Build output directory manifests are written below.
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Compile one batch.
    ///
    /// Each call is a fresh run: manifests left by a previous build are
    /// removed first, so a scheme that is no longer declared, or whose
    /// registrations are all rejected, stops resolving.
    pub fn compile(&mut self, registrations: &[Registration]) -> CompileReport {
        self.touched.clear();
        match remove_dir_all_if_exists(&schemes_dir(&self.out_dir)) {
            Ok(true) => tracing::debug!("removed previous manifests in {}", self.out_dir.display()),
            Ok(false) => {}
            Err(e) => tracing::warn!("{:#}", e),
        }

        let mut report = CompileReport::default();
        for registration in registrations {
            self.process(registration, &mut report);
        }

        tracing::debug!(
            "compiled {} registrations: {} lines, {} adapters, {} errors",
            registrations.len(),
            report.entries.len(),
            report.adapters.len(),
            report.diagnostics.len()
        );
        report
    }

    fn process(&mut self, registration: &Registration, report: &mut CompileReport) {
        let owner = &registration.owner;

        if let Err(e) = validation::validate_common(registration) {
            report.reject(&owner.path, e);
            return;
        }

        match registration.kind {
            TargetKind::Method => {
                if let Err(e) = validation::validate_method_target(owner) {
                    report.reject(&owner.path, e);
                    return;
                }
                for scheme in &registration.schemes {
                    let adapter = GeneratedAdapter::new(&owner.path, scheme);
                    let synthesized = adapter.registration();
                    report.adapters.push(adapter);
                    self.process(&synthesized, report);
                }
            }
            TargetKind::Factory | TargetKind::Connection => {
                if let Err(e) = validation::validate_type_target(owner) {
                    report.reject(&owner.path, e);
                    return;
                }
                for scheme in &registration.schemes {
                    match self.append_entry(scheme, &owner.path) {
                        Ok(path) => report.entries.push(ManifestLine {
                            scheme: scheme.clone(),
                            implementation: owner.path.clone(),
                            path,
                        }),
                        Err(e) => report.reject(&owner.path, e),
                    }
                }
            }
        }
    }

    fn append_entry(&mut self, scheme: &str, implementation: &str) -> Result<PathBuf, CompileError> {
        let path = manifest_path(&self.out_dir, scheme);
        let io_err = |source: io::Error| CompileError::Io {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let mut file = if self.touched.contains(scheme) {
            OpenOptions::new().append(true).open(&path).map_err(io_err)?
        } else {
            let mut file = File::create(&path).map_err(io_err)?;
            writeln!(file, "{}", GENERATED_HEADER).map_err(io_err)?;
            file
        };
        writeln!(file, "{}", implementation).map_err(io_err)?;

        self.touched.insert(scheme.to_string());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::manifest::parse_entries;
    use tempfile::TempDir;

    fn entries(out: &Path, scheme: &str) -> Vec<String> {
        parse_entries(&fs::read_to_string(manifest_path(out, scheme)).unwrap())
    }

    #[test]
    fn test_writes_one_line_per_scheme() {
        let tmp = TempDir::new().unwrap();
        let mut compiler = RegistrationCompiler::new(tmp.path());

        let report = compiler.compile(&[
            Registration::new(Owner::connection("demo::GeekoutConnection"), TargetKind::Connection)
                .scheme("geekout")
                .scheme("geekout2"),
            Registration::new(Owner::factory("demo::GeekhiFactory"), TargetKind::Factory)
                .scheme("geekout"),
        ]);

        assert!(!report.has_errors());
        assert_eq!(report.schemes(), vec!["geekout", "geekout2"]);
        assert_eq!(
            entries(tmp.path(), "geekout"),
            vec!["demo::GeekoutConnection", "demo::GeekhiFactory"]
        );
        assert_eq!(entries(tmp.path(), "geekout2"), vec!["demo::GeekoutConnection"]);

        let raw = fs::read_to_string(manifest_path(tmp.path(), "geekout")).unwrap();
        assert!(raw.starts_with(GENERATED_HEADER));
    }

    #[test]
    fn test_rejection_does_not_stop_batch() {
        let tmp = TempDir::new().unwrap();
        let mut compiler = RegistrationCompiler::new(tmp.path());

        let report = compiler.compile(&[
            Registration::new(Owner::factory("demo::Empty"), TargetKind::Factory),
            Registration::new(
                Owner::connection("demo::Hidden").with_visibility(Visibility::Private),
                TargetKind::Connection,
            )
            .scheme("xyz"),
            Registration::new(Owner::factory("demo::GeekhiFactory"), TargetKind::Factory)
                .scheme("geekhi"),
        ]);

        assert!(report.has_errors());
        assert_eq!(report.diagnostics.len(), 2);
        assert_eq!(report.diagnostics[0].owner, "demo::Empty");
        assert!(report.diagnostics[1]
            .to_diagnostic()
            .format(false)
            .contains("must be public"));

        assert_eq!(entries(tmp.path(), "geekhi"), vec!["demo::GeekhiFactory"]);
        assert!(!manifest_path(tmp.path(), "xyz").exists());
    }

    #[test]
    fn test_capability_messages() {
        let tmp = TempDir::new().unwrap();
        let mut compiler = RegistrationCompiler::new(tmp.path());

        let report = compiler.compile(&[
            Registration::new(Owner::new("demo::Plain"), TargetKind::Connection).scheme("a"),
            Registration::new(
                Owner::connection("demo::NoCtor").without_constructors(),
                TargetKind::Connection,
            )
            .scheme("b"),
        ]);

        let messages: Vec<String> = report
            .diagnostics
            .iter()
            .map(|d| d.error.to_string())
            .collect();
        assert_eq!(
            messages,
            vec![
                "`demo::Plain` must implement Factory or Connection",
                "`demo::NoCtor` must have constructor with URL parameter",
            ]
        );
    }

    #[test]
    fn test_method_synthesizes_adapter_per_scheme() {
        let tmp = TempDir::new().unwrap();
        let mut compiler = RegistrationCompiler::new(tmp.path());

        let report = compiler.compile(&[Registration::new(
            Owner::method("demo::greetings::hi"),
            TargetKind::Method,
        )
        .with_schemes(["greet2", "greet3"])]);

        assert!(!report.has_errors());
        assert_eq!(report.adapters.len(), 2);
        assert_eq!(
            entries(tmp.path(), "greet2"),
            vec!["demo::greetings::hi$url$greet2"]
        );
        assert_eq!(
            entries(tmp.path(), "greet3"),
            vec!["demo::greetings::hi$url$greet3"]
        );
    }

    #[test]
    fn test_invalid_method_rejected() {
        let tmp = TempDir::new().unwrap();
        let mut compiler = RegistrationCompiler::new(tmp.path());

        let mut owner = Owner::method("demo::instance_hi");
        owner.is_static = false;
        let report =
            compiler.compile(&[Registration::new(owner, TargetKind::Method).scheme("greet2")]);

        assert!(report.adapters.is_empty());
        assert!(matches!(
            report.diagnostics[0].error,
            CompileError::Validation(ValidationError::InvalidMethod { .. })
        ));
    }

    #[test]
    fn test_new_run_replaces_stale_entries() {
        let tmp = TempDir::new().unwrap();
        let mut compiler = RegistrationCompiler::new(tmp.path());

        compiler.compile(&[
            Registration::new(Owner::factory("demo::Old"), TargetKind::Factory).scheme("geekhi")
        ]);
        compiler.compile(&[
            Registration::new(Owner::factory("demo::New"), TargetKind::Factory).scheme("geekhi")
        ]);

        assert_eq!(entries(tmp.path(), "geekhi"), vec!["demo::New"]);
    }

    #[test]
    fn test_rejected_rebuild_drops_previous_manifest() {
        let tmp = TempDir::new().unwrap();
        let mut compiler = RegistrationCompiler::new(tmp.path());

        compiler.compile(&[
            Registration::new(Owner::connection("demo::Conn"), TargetKind::Connection).scheme("xyz"),
            Registration::new(Owner::factory("demo::Gone"), TargetKind::Factory).scheme("gone"),
        ]);
        assert!(manifest_path(tmp.path(), "xyz").exists());

        let report = compiler.compile(&[Registration::new(
            Owner::connection("demo::Conn").with_visibility(Visibility::Private),
            TargetKind::Connection,
        )
        .scheme("xyz")]);

        assert_eq!(report.diagnostics.len(), 1);
        assert!(!manifest_path(tmp.path(), "xyz").exists());
        assert!(!manifest_path(tmp.path(), "gone").exists());
    }

    #[test]
    fn test_mixed_case_scheme_is_written_lowercase() {
        let tmp = TempDir::new().unwrap();
        let mut compiler = RegistrationCompiler::new(tmp.path());

        let report = compiler.compile(&[Registration::new(
            Owner::method("demo::greetings::hi"),
            TargetKind::Method,
        )
        .scheme("Greet")]);

        assert!(!report.has_errors());
        assert_eq!(report.schemes(), vec!["greet"]);
        assert_eq!(
            entries(tmp.path(), "greet"),
            vec!["demo::greetings::hi$url$greet"]
        );
    }

    #[test]
    fn test_owner_cannot_inject_manifest_lines() {
        let tmp = TempDir::new().unwrap();
        let mut compiler = RegistrationCompiler::new(tmp.path());

        let report = compiler.compile(&[
            Registration::new(
                Owner::connection("demo::X\ndemo::Conn"),
                TargetKind::Connection,
            )
            .scheme("b"),
            Registration::new(Owner::factory("#demo::F"), TargetKind::Factory).scheme("b"),
            Registration::new(Owner::factory("  "), TargetKind::Factory).scheme("b"),
        ]);

        assert_eq!(report.diagnostics.len(), 3);
        assert!(report.diagnostics.iter().all(|d| matches!(
            d.error,
            CompileError::Validation(ValidationError::InvalidOwner { .. })
        )));
        assert!(report.entries.is_empty());
        assert!(!manifest_path(tmp.path(), "b").exists());
    }

    #[test]
    fn test_write_failure_is_tied_to_registration() {
        let tmp = TempDir::new().unwrap();
        // A file where the manifest directory should be.
        fs::write(tmp.path().join("registry"), "not a directory").unwrap();
        let mut compiler = RegistrationCompiler::new(tmp.path());

        let report = compiler.compile(&[
            Registration::new(Owner::factory("demo::GeekhiFactory"), TargetKind::Factory)
                .scheme("geekhi"),
            Registration::new(Owner::factory("demo::Other"), TargetKind::Factory)
                .scheme("other"),
        ]);

        assert_eq!(report.diagnostics.len(), 2);
        assert_eq!(report.diagnostics[0].owner, "demo::GeekhiFactory");
        assert!(matches!(report.diagnostics[0].error, CompileError::Io { .. }));
    }
}
