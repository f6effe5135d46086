//! Command line argument parsing for the Exascan server using clap.

use std::path::PathBuf;

use clap::Parser;

use crate::search::DEFAULT_WORKERS;
use crate::server::handler::DEFAULT_LIMIT;

/// Exascan - an exact brute-force vector similarity search service
#[derive(Parser, Debug, Clone)]
#[command(name = "exascan")]
#[command(about = "An exact, parallel brute-force vector similarity search service")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct ExascanArgs {
    /// Dimensionality of every vector in every loaded file
    #[arg(value_name = "DIMENSION")]
    pub dimension: usize,

    /// Port to serve on
    #[arg(value_name = "PORT")]
    pub port: u16,

    /// Vector files to load; each becomes one collection named after the
    /// file (with any `.vec` suffix stripped)
    #[arg(value_name = "FILE", required = true, num_args = 1..)]
    pub files: Vec<PathBuf>,

    /// Number of scan workers per query
    #[arg(long, default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,

    /// Number of results returned when a request omits `limit`
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    pub default_limit: usize,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,
}

impl ExascanArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}
