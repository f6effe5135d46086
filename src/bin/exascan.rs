//! Exascan server binary.

use std::io::Write;
use std::net::{IpAddr, SocketAddr};
use std::process;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;

use exascan::cli::args::ExascanArgs;
use exascan::collection::VectorCollection;
use exascan::collection::registry::CollectionRegistry;
use exascan::search::EngineConfig;
use exascan::search::engine::SimilarityEngine;
use exascan::server::{self, AppState};

fn main() {
    // Parse command line arguments using clap
    let args = ExascanArgs::parse();

    // Set up logging/verbosity based on args
    let log_level = match args.verbosity() {
        0 => LevelFilter::Error, // Quiet mode
        1 => LevelFilter::Info,  // Default: startup progress
        2 => LevelFilter::Debug, // Verbose
        _ => LevelFilter::Trace, // Very verbose (3+)
    };

    Builder::new()
        .filter_level(log_level)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    if let Err(e) = run(args) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(args: ExascanArgs) -> anyhow::Result<()> {
    if args.default_limit == 0 {
        anyhow::bail!("--default-limit must be at least 1");
    }

    // Load every collection up front; any failure aborts before serving.
    let mut registry = CollectionRegistry::new(args.dimension)?;
    for file in &args.files {
        log::info!("loading {}", file.display());
        let collection = VectorCollection::load(file, args.dimension)
            .with_context(|| format!("failed to load {}", file.display()))?;
        log::info!(
            "collection {:?}: {} vectors of dimension {}",
            collection.name(),
            collection.len(),
            collection.dimension()
        );
        registry.register(collection)?;
    }
    log::info!("loaded {} collections", registry.len());

    let engine = SimilarityEngine::new(EngineConfig {
        workers: args.workers,
    })?;

    let state = Arc::new(AppState {
        registry,
        engine,
        default_limit: args.default_limit,
    });

    let host: IpAddr = args
        .host
        .parse()
        .with_context(|| format!("invalid host address: {}", args.host))?;
    let addr = SocketAddr::new(host, args.port);

    tokio::runtime::Runtime::new()
        .context("failed to start async runtime")?
        .block_on(server::serve(state, addr))?;

    Ok(())
}
