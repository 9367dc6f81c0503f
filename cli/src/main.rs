//! ksha1sum
//!
//! `sha1sum`-style command-line tool hashing through the kernel crypto API.

mod commands;
mod logging;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use commands::{check_mode, hash_files, hash_stdin, BackendChoice};
use std::path::PathBuf;

// =============================================================================
// CLI DEFINITION
// =============================================================================

#[derive(Parser)]
#[command(name = "ksha1sum")]
#[command(about = "SHA-1 checksums via the Linux kernel crypto API", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Files to hash (stdin if none and no subcommand)
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Hashing backend to use
    #[arg(short, long, value_enum, default_value_t = BackendChoice::Auto, global = true)]
    backend: BackendChoice,

    /// Increase log verbosity (-v, -vv, -vvv); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify checksums from file (like sha1sum -c)
    Check {
        #[arg(value_name = "FILE")]
        checksum_file: PathBuf,
    },
}

// =============================================================================
// ENTRY POINT
// =============================================================================

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match &cli.command {
        Some(Commands::Check { checksum_file }) => {
            if !check_mode(checksum_file, cli.backend)? {
                std::process::exit(1);
            }
        }
        None if cli.files.is_empty() => hash_stdin(cli.backend)?,
        None => hash_files(&cli.files, cli.backend)?,
    }

    Ok(())
}
