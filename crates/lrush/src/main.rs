//! lrush - command shell for an in-memory LRU cache

mod handler;
mod parser;
mod reply;
mod session;

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use lrucache::{Capacity, SharedLruCache};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::handler::CommandHandler;
use crate::parser::Command;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Cache capacity (number of entries)
    #[arg(short, long, default_value_t = 128, allow_negative_numbers = true)]
    capacity: i64,

    /// Read commands from this file instead of stdin
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Print cache statistics when the input ends
    #[arg(long)]
    stats: bool,

    /// Print the final statistics as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let capacity = Capacity::try_from(args.capacity)?;
    info!("Starting lrush v{}", env!("CARGO_PKG_VERSION"));
    info!("Cache capacity: {}", capacity);

    let handler = CommandHandler::new(SharedLruCache::with_capacity(capacity));
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &args.script {
        Some(path) => {
            info!("Reading commands from {}", path.display());
            let file = File::open(path)
                .with_context(|| format!("failed to open script {}", path.display()))?;
            session::run(&handler, BufReader::new(file), &mut out)?;
        }
        None => {
            session::run(&handler, io::stdin().lock(), &mut out)?;
        }
    }

    if args.json {
        writeln!(out, "{}", serde_json::to_string(&handler.report())?)?;
    } else if args.stats {
        writeln!(out, "{}", handler.handle(Command::Stats))?;
    }

    Ok(())
}
