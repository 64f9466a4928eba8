//! Tagger RPC Server - JSON-RPC backend for the labeling frontend.
//!
//! This binary provides a JSON-RPC 2.0 server that wraps the tagger-core
//! library. Routing and payload decoding live here; every rule about
//! annotations lives in the library.

mod handlers;
mod server;
mod wrapper;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tagger_core::{DatasetLayout, TaggerApi};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tagger-rpc")]
#[command(about = "JSON-RPC server for the cow tagger")]
struct Args {
    /// Port to listen on (0 = auto-assign)
    #[arg(short, long, default_value = "8000", env = "TAGGER_PORT")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1", env = "TAGGER_HOST")]
    host: String,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    debug: bool,

    /// Root directory holding the dataset hierarchy
    #[arg(long, default_value = "dataset", env = "TAGGER_DATASET_ROOT")]
    dataset_root: PathBuf,

    /// Dataset layout under the root: single or multi
    #[arg(long, default_value = "multi", value_parser = parse_layout, env = "TAGGER_LAYOUT")]
    layout: DatasetLayout,

    /// Keep a .json.bak copy of the previous record on every save
    #[arg(long)]
    keep_backup: bool,
}

fn parse_layout(s: &str) -> std::result::Result<DatasetLayout, String> {
    DatasetLayout::parse(s).ok_or_else(|| format!("unknown layout '{s}' (expected single or multi)"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging
    let default_level = if args.debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    info!("Starting Tagger RPC Server");
    info!(
        "Dataset root: {} ({} layout)",
        args.dataset_root.display(),
        args.layout
    );

    let api = TaggerApi::builder(&args.dataset_root)
        .layout(args.layout)
        .keep_backup(args.keep_backup)
        .auto_create_dirs(true)
        .build()?;

    let addr = server::start_server(api, &args.host, args.port).await?;

    // Machine-readable port line for launchers and tests
    println!("RPC_PORT={}", addr.port());

    info!("RPC server running on {}", addr);

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received, exiting");

    Ok(())
}
