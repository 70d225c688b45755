use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing::{debug, Level};

mod config;
mod shell;

use crate::config::{resolve_path, Config, DEFAULT_DICTIONARY, DEFAULT_STATS};
use crate::shell::Shell;

/// An interactive dictionary with prefix suggestions.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Word list, one word per line. May start with $HOME or $EXE.
    #[arg(short, long, default_value = DEFAULT_DICTIONARY)]
    dictionary: PathBuf,
    /// Saved search counts. May start with $HOME or $EXE.
    #[arg(short, long, default_value = DEFAULT_STATS)]
    stats: PathBuf,
    /// Only remember this many recently added and deleted words.
    #[arg(long)]
    history_limit: Option<usize>,
    /// List the most searched words first instead of in first-seen order.
    #[arg(long)]
    rank_searches: bool,
    /// Don't color the output.
    #[arg(long)]
    no_color: bool,
    /// Write log messages to this file instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Log more. Repeat for even more.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(args: &Cli) -> Result<()> {
    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = tracing_subscriber::fmt().with_max_level(level);
    if let Some(path) = &args.log_file {
        let file = File::create(path)
            .with_context(|| format!("Could not create log file {}", path.display()))?;
        subscriber.with_ansi(false).with_writer(file).init();
    } else {
        subscriber.with_writer(io::stderr).init();
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_logging(&args)?;

    let config = Config {
        dictionary: resolve_path(&args.dictionary)?,
        stats: resolve_path(&args.stats)?,
        history_limit: args.history_limit,
        rank_searches: args.rank_searches,
        color: !args.no_color,
    };
    debug!("{:?}", config);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(stdin.lock(), stdout.lock(), &config);
    shell.load().context("Terminal input or output failed")?;
    shell.run().context("Terminal input or output failed")
}
