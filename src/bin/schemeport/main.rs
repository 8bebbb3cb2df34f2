//! schemeport CLI - compile scheme registrations and inspect manifests

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use schemeport::util::GlobalContext;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("schemeport=debug")
    } else {
        EnvFilter::new("schemeport=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let mut ctx = GlobalContext::new()?;
    ctx.set_verbose(cli.verbose);
    ctx.set_color(!cli.no_color);

    match cli.command {
        Commands::Compile(args) => commands::compile::execute(args, &ctx),
        Commands::List(args) => commands::list::execute(args, &ctx),
        Commands::Clean(args) => commands::clean::execute(args, &ctx),
    }
}
