#![forbid(unsafe_code)]

mod cmd;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tokenize::PipelineConfig;

/// Tokenize text, build a vocabulary, and encode/decode against it.
#[derive(Parser)]
#[command(name = "tokenize-drill", version, about)]
struct Cli {
    /// JSON pipeline config (max_vocab_size, unknown_token, tokenizer, stop_words).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: cmd::Command,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = match &cli.config {
        Some(path) => PipelineConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    cmd::run(cli.command, config)
}
