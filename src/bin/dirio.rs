//! Dirio CLI Binary
//!
//! Command-line wrapper around the conversion entry points.

use anyhow::Context;
use clap::Parser;
use dirio::{convert, lconvert};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

/// Dirio - convert between directory trees and JSON descriptions
#[derive(Parser)]
#[command(name = "dirio")]
#[command(about = "Convert between directory trees and JSON tree descriptions")]
struct Cli {
    /// Source: a directory to read, or a .json file to materialize
    source: PathBuf,

    /// Destination: a .json file or an existing directory; omit to print
    /// the resulting tree to stdout
    dest: Option<PathBuf>,

    /// Preserve symbolic links as alias entries instead of following them
    #[arg(long, short = 'l')]
    preserve_links: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    if let Err(e) = execute(&cli).await {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

async fn execute(cli: &Cli) -> anyhow::Result<()> {
    let dest = cli.dest.as_deref();
    let result = if cli.preserve_links {
        lconvert(dest, cli.source.as_path()).await
    } else {
        convert(dest, cli.source.as_path()).await
    }
    .with_context(|| format!("converting {}", cli.source.display()))?;

    if let Some(tree) = result {
        println!("{}", serde_json::to_string_pretty(&tree)?);
    }
    Ok(())
}
