//! CLI tool to parse a rule file, expand automatic variables, and print it.

use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use makefile_rs::{Config, Program};
use tracing_subscriber::EnvFilter;

/// Parse a Makefile-style rule file and print the expanded rules.
#[derive(Parser, Debug)]
#[command(name = "makefile")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Rule file to read
    #[arg(long, value_name = "FILE")]
    path: PathBuf,

    /// Write output here instead of stdout
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,

    /// Reject variable assignments instead of skipping them
    #[arg(long)]
    strict: bool,

    /// Separator used when expanding the all-prerequisites variable
    #[arg(long, value_name = "SEP", default_value = "")]
    separator: String,

    /// Print rules as parsed, without expanding variables
    #[arg(long)]
    no_expand: bool,

    /// Log parser decisions to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let content = fs::read_to_string(&cli.path)
        .with_context(|| format!("failed to read {}", cli.path.display()))?;

    let config = Config::new().strict(cli.strict).separator(&cli.separator);
    let program = process(&content, &config, !cli.no_expand)
        .with_context(|| cli.path.display().to_string())?;

    // opened only after a successful parse so a bad input never
    // clobbers an existing output file
    match &cli.out {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            makefile_rs::write_to(&program, BufWriter::new(file))
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
        None => {
            let stdout = io::stdout().lock();
            makefile_rs::write_to(&program, BufWriter::new(stdout))
                .context("failed to write to stdout")?;
        }
    }

    Ok(())
}

fn process(content: &str, config: &Config, expand: bool) -> Result<Program, makefile_rs::Error> {
    let mut program = makefile_rs::parse_str_with(content, config)?;
    if expand {
        program.expand_with(config)?;
    }
    tracing::debug!(nodes = program.tree.len(), "parsed rule file");
    Ok(program)
}
