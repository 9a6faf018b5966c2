use anyhow::{bail, Result};
use clap::Parser;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use docpath::config::Config;
use docpath::file::loader::load_reference;
use docpath::file::saver::{render, save_document, OutputFormat};
use docpath::path::Walker;

/// docpath - hide keys in YAML and JSON documents by wildcard path
#[derive(Parser)]
#[command(name = "docpath")]
#[command(version)]
#[command(about = "Remove keys from YAML and JSON documents by wildcard path", long_about = None)]
struct Cli {
    /// Document to read, optionally with a `#/json/pointer` suffix (omit or `-` for stdin)
    source: Option<String>,

    /// Comma-separated paths to remove (repeatable)
    #[arg(long = "hide-key", value_name = "PATHS")]
    hide_key: Vec<String>,

    /// Comma-separated paths to remove when their value is empty (repeatable)
    #[arg(long = "hide-key-if-empty", value_name = "PATHS")]
    hide_key_if_empty: Vec<String>,

    /// Output format (default: from config, else yaml)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Write the result to a file instead of stdout (`.gz` compresses)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Nesting limit for a single path walk
    #[arg(long)]
    max_depth: Option<usize>,

    /// Log every match to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool, default_level: &str) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli, config: Config) -> Result<()> {
    // Validate every path before reading the document
    let mut options = config.hide_options();
    for list in &cli.hide_key {
        options.add_hide_key(list)?;
    }
    for list in &cli.hide_key_if_empty {
        options.add_hide_key_if_empty(list)?;
    }

    let reference = cli.source.as_deref().unwrap_or("-");
    let (source, _) = docpath::options::split_pointer(reference);
    if (source.is_empty() || source == "-") && io::stdin().is_terminal() {
        bail!("no document given: pass a file or pipe one on stdin");
    }

    let walker = cli
        .max_depth
        .map(Walker::with_max_depth)
        .unwrap_or_else(|| config.walker());

    let mut tree = load_reference(reference)?;
    let matches = options.apply(&walker, tree.root_mut())?;
    info!(
        source = tree.source(),
        matches,
        modified = tree.root().is_modified(),
        "applied hide paths"
    );

    let format = cli.format.unwrap_or(config.format);
    match &cli.output {
        Some(path) => save_document(path, tree.root(), format)?,
        None => print!("{}", render(tree.root(), format)?),
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = Config::try_load();
    let log_level = match &config {
        Ok(config) => config.log_level.clone(),
        Err(_) => Config::default().log_level,
    };
    init_logging(cli.verbose, &log_level);

    let config = config.unwrap_or_else(|err| {
        warn!("ignoring config file: {:#}", err);
        Config::default()
    });

    match run(cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
