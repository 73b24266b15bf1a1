mod extract;
mod transcript;

use std::fs;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use scraper::Html;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "dialog_extract",
    about = "Extract dialog turns from a saved Furhat Studio page",
    after_help = "Example: dialog_extract \"Furhat Studio.html\" participant02.txt"
)]
struct Cli {
    /// Path to the saved HTML file
    #[arg(value_name = "SOURCE")]
    source: PathBuf,

    /// Filename for the extracted dialog
    #[arg(value_name = "GOAL")]
    goal: PathBuf,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();

    // Bare invocation gets the help text on stdout, not a usage error.
    if std::env::args_os().len() <= 1 {
        Cli::command().print_help()?;
        return Ok(());
    }

    let cli = Cli::parse();
    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    // Source is fully read and closed before the destination is opened, so a
    // missing source never leaves an output file behind.
    let html = fs::read_to_string(&cli.source)
        .with_context(|| format!("reading {}", cli.source.display()))?;
    let document = Html::parse_document(&html);

    let file = File::create(&cli.goal)
        .with_context(|| format!("creating {}", cli.goal.display()))?;
    let count = transcript::write_transcript(&document, BufWriter::new(file))
        .with_context(|| format!("writing {}", cli.goal.display()))?;

    info!(turns = count, "extraction finished");
    println!("Extracted {} dialog turns -> {}", count, cli.goal.display());
    Ok(())
}
