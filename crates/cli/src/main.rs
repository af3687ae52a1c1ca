//! CanvasForge CLI — the main entry point.
//!
//! Commands:
//! - `init`     — Write a default canvasforge.toml
//! - `serve`    — Start the HTTP API server
//! - `generate` — Generate a component from a prompt
//! - `list`     — List generated components
//! - `export`   — Compile a layout JSON file into a page

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "canvasforge",
    about = "CanvasForge — AI-assisted React component builder",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default canvasforge.toml in the current directory
    Init,

    /// Start the HTTP API server
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Generate a component from a natural-language prompt
    Generate {
        /// Component name (PascalCase)
        name: String,

        /// What the component should do
        prompt: String,
    },

    /// List generated components
    List,

    /// Compile a layout JSON file into a React page
    Export {
        /// Page name (PascalCase)
        name: String,

        /// Path to the layout JSON file
        layout: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Init => commands::init::run().await?,
        Commands::Serve { port } => commands::serve::run(port).await?,
        Commands::Generate { name, prompt } => commands::generate::run(&name, &prompt).await?,
        Commands::List => commands::list::run().await?,
        Commands::Export { name, layout } => commands::export::run(&name, &layout).await?,
    }

    Ok(())
}
