//! Content Resolver CLI
//!
//! Resolves a logical content path with the same flat parameter contract
//! the HTTP surface uses, and prints the outcome as JSON.

use std::collections::HashMap;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use wrikka::{ContentResolver, WrikkaConfig};

#[derive(Parser)]
#[command(name = "wrikka-content")]
#[command(about = "Resolve a content path against the flat-file store")]
struct Cli {
    /// Logical content path (e.g. "guides/quickstart")
    #[arg(default_value = "")]
    path: String,

    /// Content type key (falls back to the configured default)
    #[arg(short = 't', long = "type")]
    content_type: Option<String>,

    /// JSON-encoded equality filter (e.g. '{"draft": false}')
    #[arg(short, long, default_value = "{}")]
    query: String,

    /// JSON-encoded sort spec (e.g. '{"date": "desc"}')
    #[arg(short, long, default_value = "{}")]
    sort: String,

    /// Result cap; empty means unlimited
    #[arg(short, long, default_value = "")]
    limit: String,

    /// Return only the first result
    #[arg(long)]
    single: bool,

    /// Path to a config file
    #[arg(short, long)]
    config: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = WrikkaConfig::load_from(cli.config.as_deref())?;
    let resolver = ContentResolver::from_config(&config);

    let mut params = HashMap::from([
        ("path".to_string(), cli.path),
        ("query".to_string(), cli.query),
        ("sort".to_string(), cli.sort),
        ("limit".to_string(), cli.limit),
        ("single".to_string(), cli.single.to_string()),
    ]);
    if let Some(content_type) = cli.content_type {
        params.insert("type".to_string(), content_type);
    }

    let outcome = resolver.resolve_params(&params);
    println!("{}", serde_json::to_string_pretty(&outcome)?);

    if outcome.is_not_found() {
        std::process::exit(1);
    }
    Ok(())
}
