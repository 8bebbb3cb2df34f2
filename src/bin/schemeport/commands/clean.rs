//! `schemeport clean` command

use anyhow::Result;

use crate::cli::CleanArgs;
use schemeport::ops::clean;
use schemeport::util::GlobalContext;

pub fn execute(args: CleanArgs, ctx: &GlobalContext) -> Result<()> {
    let out_dir = ctx.out_dir(args.out_dir.as_deref());

    if clean(&out_dir)? {
        eprintln!("     Removed {}", out_dir.join("registry").display());
    } else {
        eprintln!("     Nothing to clean in {}", out_dir.display());
    }

    Ok(())
}
