//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// schemeport - build-time registration of pluggable URI scheme handlers
#[derive(Parser)]
#[command(name = "schemeport")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate declarations and write scheme manifests
    Compile(CompileArgs),

    /// Show manifest candidates in lookup order
    List(ListArgs),

    /// Remove generated manifests
    Clean(CleanArgs),
}

#[derive(Args)]
pub struct CompileArgs {
    /// Declaration files or glob patterns (defaults to config, then Schemes.toml)
    pub declarations: Vec<String>,

    /// Build output directory
    #[arg(long, short = 'o', env = "SCHEMEPORT_OUT_DIR")]
    pub out_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct ListArgs {
    /// Only list this scheme
    pub scheme: Option<String>,

    /// Build output directory to read manifests from (repeatable, first wins)
    #[arg(long = "root", short = 'r')]
    pub roots: Vec<PathBuf>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CleanArgs {
    /// Build output directory
    #[arg(long, short = 'o', env = "SCHEMEPORT_OUT_DIR")]
    pub out_dir: Option<PathBuf>,
}
