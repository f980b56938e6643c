//! Component Registry CLI
//!
//! Queries a descriptor manifest through the in-memory registry.

use std::collections::HashMap;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use wrikka::{ComponentDescriptor, ComponentRegistry, WrikkaConfig};

#[derive(Parser)]
#[command(name = "wrikka-registry")]
#[command(about = "Query the component metadata registry")]
struct Cli {
    /// Path to the descriptor manifest (falls back to the configured one)
    #[arg(short, long)]
    manifest: Option<PathBuf>,

    /// Path to a config file
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all registered components
    List,

    /// Show one component as JSON
    Get {
        /// Component id
        id: String,
    },

    /// List components in a category
    Category {
        /// Category name (e.g. "form", "navigation")
        category: String,
    },

    /// List components carrying a tag
    Tag {
        /// Tag name
        tag: String,
    },

    /// List components with a status
    Status {
        /// Status name (e.g. "stable", "deprecated")
        status: String,
    },

    /// Search name, description, and tags
    Search {
        /// Case-insensitive substring
        query: String,
    },

    /// List components related to one component
    Related {
        /// Component id
        id: String,
    },

    /// Show registry statistics
    Stats,

    /// Export the full registry snapshot as JSON
    Export {
        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },
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

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = WrikkaConfig::load_from(cli.config.as_deref())?;
    let manifest = cli
        .manifest
        .or_else(|| config.manifest_path())
        .ok_or("No descriptor manifest given (use --manifest or configure [registry] manifest)")?;

    let mut registry = ComponentRegistry::new();
    registry.register_all(wrikka::load_descriptors(&manifest)?);

    match cli.command {
        Commands::List => {
            if registry.is_empty() {
                println!("No components registered.");
            } else {
                println!("📦 Registered components:");
                for descriptor in sorted(registry.all()) {
                    print_line(descriptor);
                }
            }
            Ok(())
        }

        Commands::Get { id } => {
            let descriptor = registry
                .get(&id)
                .ok_or_else(|| format!("Component '{}' not found", id))?;
            println!("{}", serde_json::to_string_pretty(descriptor)?);
            Ok(())
        }

        Commands::Category { category } => {
            print_list(registry.by_category(category.parse()?));
            Ok(())
        }

        Commands::Tag { tag } => {
            print_list(registry.by_tag(&tag));
            Ok(())
        }

        Commands::Status { status } => {
            print_list(registry.by_status(status.parse()?));
            Ok(())
        }

        Commands::Search { query } => {
            print_list(registry.search(&query));
            Ok(())
        }

        Commands::Related { id } => {
            print_list(registry.related(&id));
            Ok(())
        }

        Commands::Stats => {
            let stats = registry.stats();
            println!("📊 Registry statistics:");
            println!("  Components: {}", stats.total);
            println!("  Categories: {}", stats.total_categories);
            println!("  Tags: {}", stats.total_tags);
            println!();
            println!("  By category:");
            for (category, count) in sorted_counts(&stats.by_category) {
                println!("    {}: {}", category, count);
            }
            println!("  By status:");
            for (status, count) in sorted_counts(&stats.by_status) {
                println!("    {}: {}", status, count);
            }
            Ok(())
        }

        Commands::Export { output } => {
            let snapshot = registry.export();
            std::fs::write(&output, serde_json::to_string_pretty(&snapshot)?)?;
            println!(
                "✅ Exported {} components to {}",
                registry.len(),
                output.display()
            );
            Ok(())
        }
    }
}

fn print_line(descriptor: &ComponentDescriptor) {
    println!(
        "  {} [{}/{}] {}",
        descriptor.id, descriptor.category, descriptor.status, descriptor.name
    );
}

fn print_list(descriptors: Vec<&ComponentDescriptor>) {
    if descriptors.is_empty() {
        println!("No matching components.");
        return;
    }
    for descriptor in sorted(descriptors) {
        print_line(descriptor);
    }
}

fn sorted(mut descriptors: Vec<&ComponentDescriptor>) -> Vec<&ComponentDescriptor> {
    descriptors.sort_by(|a, b| a.id.cmp(&b.id));
    descriptors
}

fn sorted_counts<K: ToString>(counts: &HashMap<K, usize>) -> Vec<(String, usize)> {
    let mut entries: Vec<(String, usize)> = counts
        .iter()
        .map(|(key, count)| (key.to_string(), *count))
        .collect();
    entries.sort();
    entries
}
