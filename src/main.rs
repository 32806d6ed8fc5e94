//! Docforge - an office-artifact generation service.
//!
//! # Usage
//!
//! ```bash
//! docforge
//! docforge --port 9000
//! docforge --dot-bin /opt/graphviz/bin/dot
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use docforge::config::{
    clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags, ConfigFlags,
};
use docforge::diagram::GraphvizRenderer;
use docforge::server::{self, AppState};

/// An office-artifact generation service
#[derive(Parser, Debug)]
#[command(name = "docforge", version, about, long_about = None)]
struct Cli {
    /// Address to bind
    #[arg(long, value_name = "ADDR")]
    bind: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Path to the Graphviz dot binary
    #[arg(long, value_name = "PATH")]
    dot_bin: Option<PathBuf>,

    /// Save current command-line flags as defaults in .docforgerc
    #[arg(long)]
    save: bool,

    /// Clear saved defaults in .docforgerc
    #[arg(long)]
    clear: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    let addr: SocketAddr = effective
        .bind_addr()
        .parse()
        .with_context(|| format!("invalid bind address {}", effective.bind_addr()))?;

    let renderer = GraphvizRenderer::new(effective.dot_binary());
    let state = AppState::new(Arc::new(renderer));

    server::serve(addr, state).await
}
