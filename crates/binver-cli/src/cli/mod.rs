//! CLI for binver.

mod commands;

use anyhow::Result;
use binver_core::checksum::HashAlgorithm;
use binver_core::config;
use binver_core::resolve::Detection;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use commands::{run_checksum, run_detect, run_literal};

/// Exit status of `detect` when the file is not in the catalog.
const EXIT_UNKNOWN: u8 = 2;

/// Top-level CLI for binver.
#[derive(Debug, Parser)]
#[command(name = "binver")]
#[command(about = "binver: identify program versions by file checksum", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Detect which catalog version a file is.
    Detect(DetectArgs),

    /// Print the hex digest of a file.
    Checksum {
        /// Path to the file.
        path: String,
        /// Hash algorithm (default from config).
        #[arg(long, short)]
        algorithm: Option<HashAlgorithm>,
    },

    /// Print a file's digest as a byte-array literal for pasting into a catalog.
    Literal {
        /// Path to the file.
        path: String,
        /// Hash algorithm (default from config).
        #[arg(long, short)]
        algorithm: Option<HashAlgorithm>,
    },
}

#[derive(Debug, Args)]
pub struct DetectArgs {
    /// Path to the file to identify.
    pub path: String,

    /// Catalog TOML file (default from config).
    #[arg(long, short, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Hash algorithm (default: catalog's, then config's).
    #[arg(long, short)]
    pub algorithm: Option<HashAlgorithm>,

    /// Who to contact with an unknown-version artifact.
    #[arg(long)]
    pub contact: Option<String>,

    /// Directory for the unknown-version artifact.
    #[arg(long, value_name = "DIR")]
    pub artifact_dir: Option<PathBuf>,

    /// Name the artifact after this target program instead of the file.
    #[arg(long, value_name = "NAME")]
    pub target: Option<String>,
}

impl CliCommand {
    pub fn run_from_args() -> Result<ExitCode> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Detect(args) => match run_detect(&cfg, &args)? {
                Detection::Matched(_) => Ok(ExitCode::SUCCESS),
                Detection::Unknown => Ok(ExitCode::from(EXIT_UNKNOWN)),
            },
            CliCommand::Checksum { path, algorithm } => {
                run_checksum(Path::new(&path), algorithm.unwrap_or(cfg.algorithm))?;
                Ok(ExitCode::SUCCESS)
            }
            CliCommand::Literal { path, algorithm } => {
                run_literal(Path::new(&path), algorithm.unwrap_or(cfg.algorithm))?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

#[cfg(test)]
mod tests;
