//! `schemeport compile` command

use anyhow::Result;

use crate::cli::CompileArgs;
use schemeport::core::manifest::resource_name;
use schemeport::ops::{compile, CompileOptions};
use schemeport::util::diagnostic::{emit, CompileFailed};
use schemeport::util::GlobalContext;

pub fn execute(args: CompileArgs, ctx: &GlobalContext) -> Result<()> {
    let patterns = if args.declarations.is_empty() {
        ctx.config().declaration_patterns()
    } else {
        args.declarations
    };

    let opts = CompileOptions {
        base: ctx.cwd().to_path_buf(),
        patterns,
        out_dir: ctx.out_dir(args.out_dir.as_deref()),
    };

    let outcome = compile(&opts)?;
    let report = &outcome.report;

    for diagnostic in &report.diagnostics {
        let mut diag = diagnostic.to_diagnostic();
        if let Some(location) = outcome.location(&diagnostic.owner) {
            diag = diag.with_location(location);
        }
        emit(&diag, ctx.color());
    }

    if ctx.is_verbose() {
        for adapter in &report.adapters {
            eprintln!("   Generated {} -> {}", adapter.method, adapter.id);
        }
    }

    for scheme in report.schemes() {
        eprintln!("       Wrote {}", resource_name(&scheme));
    }

    if report.has_errors() {
        return Err(CompileFailed::new(report.diagnostics.len(), report.entries.len()).into());
    }

    eprintln!(
        "    Finished {} manifest line(s) in {}",
        report.entries.len(),
        opts.out_dir.display()
    );

    Ok(())
}
