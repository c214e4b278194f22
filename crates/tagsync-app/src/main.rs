//! # tagsync - Tag handoff demo for one managed-resource family
//!
//! This is the main entry point that wires everything together.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  main.rs (this file) - Dependency Injection & Wiring           │
//! │    │                                                            │
//! │    ├── Loads:   TagSyncConfig (shared)                         │
//! │    ├── Creates: InMemoryTagClient (adapter)                    │
//! │    ├── Creates: TagAdapter (use case)                          │
//! │    └── Runs:    One read pass per resource, concurrently       │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

mod read_pass;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use shared::TagSyncConfig;
use tagsync_usecase::TagAdapter;

use crate::read_pass::{log_report, read_all, seed_client};

#[derive(Parser)]
#[command(name = "tagsync")]
#[command(about = "Refresh observed tags for configured resources")]
#[command(version)]
struct Cli {
    /// Path to the tagsync configuration file
    #[arg(short, long, default_value = "tagsync.json")]
    config: PathBuf,

    /// Also probe this single tag key on every resource
    #[arg(short, long)]
    key: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let cli = Cli::parse();

    let config = TagSyncConfig::from_file(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;

    info!("🏷️  tagsync - {} service package", config.service);
    info!("");

    // ========================================
    // Dependency Injection - Wire up the system
    // ========================================

    let client = seed_client(&config)?;
    let adapter = Arc::new(TagAdapter::new(config.service.clone(), client));

    // ========================================
    // Read pass
    // ========================================

    info!("📋 Refreshing {} resource(s)...", config.resources.len());
    debug!("   {}", config.identifiers().join(", "));

    let results = read_all(adapter, config.resources, cli.key).await;

    let mut failures = 0usize;
    for (identifier, outcome) in &results {
        match outcome {
            Ok(report) => log_report(report),
            Err(e) => {
                failures += 1;
                error!("   ✗ {}: {}", identifier, e);
            }
        }
    }

    info!("");
    info!("📊 {} refreshed, {} failed", results.len() - failures, failures);

    if failures > 0 {
        anyhow::bail!("{} resource(s) could not be read", failures);
    }
    Ok(())
}
