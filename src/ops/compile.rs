//! Implementation of `schemeport compile`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use crate::compiler::{load_declarations, CompileReport, RegistrationCompiler};
use crate::core::adapter::parse_adapter_id;
use crate::util::diagnostic::suggestions;
use crate::util::fs::glob_files;

/// Options for a compile run.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Directory patterns are relative to
    pub base: PathBuf,

    /// Declaration file glob patterns
    pub patterns: Vec<String>,

    /// Build output directory
    pub out_dir: PathBuf,
}

/// Result of a compile run.
#[derive(Debug)]
pub struct CompileOutcome {
    /// Declaration files read, sorted
    pub files: Vec<PathBuf>,

    pub report: CompileReport,

    /// Owner identifier to the file that declared it
    origins: HashMap<String, PathBuf>,
}

impl CompileOutcome {
    /// Declaration file an owner came from. Generated adapters map to the
    /// file declaring their method.
    pub fn location(&self, owner: &str) -> Option<&Path> {
        self.origins
            .get(owner)
            .or_else(|| {
                let (method, _) = parse_adapter_id(owner)?;
                self.origins.get(method)
            })
            .map(PathBuf::as_path)
    }
}

/// Compile every declaration file matching the patterns as one batch.
pub fn compile(opts: &CompileOptions) -> Result<CompileOutcome> {
    let files = glob_files(&opts.base, &opts.patterns)?;
    if files.is_empty() {
        bail!(
            "no declaration files match `{}` in {}\n\n{}",
            opts.patterns.join("`, `"),
            opts.base.display(),
            suggestions::NO_DECLARATIONS
        );
    }

    let mut registrations = Vec::new();
    let mut origins = HashMap::new();
    for file in &files {
        let declared = load_declarations(file)?;
        tracing::debug!("{}: {} registrations", file.display(), declared.len());
        for registration in &declared {
            origins
                .entry(registration.owner.path.clone())
                .or_insert_with(|| file.clone());
        }
        registrations.extend(declared);
    }

    let mut compiler = RegistrationCompiler::new(&opts.out_dir);
    let report = compiler.compile(&registrations);

    Ok(CompileOutcome {
        files,
        report,
        origins,
    })
}
