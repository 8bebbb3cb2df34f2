//! `schemeport list` command

use anyhow::Result;

use crate::cli::ListArgs;
use schemeport::ops::{format_listings, list};
use schemeport::util::diagnostic::{emit, suggestions, Diagnostic};
use schemeport::util::GlobalContext;

pub fn execute(args: ListArgs, ctx: &GlobalContext) -> Result<()> {
    for root in &args.roots {
        let root = ctx.resolve_path(root);
        if !root.is_dir() {
            emit(
                &Diagnostic::warning("build output directory does not exist").with_location(root),
                ctx.color(),
            );
        }
    }

    let sources = ctx.source_set(&args.roots);
    let listings = list(&sources, args.scheme.as_deref());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&listings)?);
    } else if listings.is_empty() {
        eprintln!("No scheme manifests in {}", sources.names().join(", "));
        eprintln!("{}", suggestions::NO_MANIFESTS);
    } else {
        print!("{}", format_listings(&listings));
    }

    Ok(())
}
