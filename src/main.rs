//! `vembed` CLI - resolve video URLs into embeddable references

mod cmd;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "vembed")]
#[command(about = "Resolve YouTube, Vimeo and SoundCloud URLs into embeddable references")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// How resolved videos are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    Text,
    /// JSON array of resolved videos
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve one or more video URLs
    Resolve {
        /// URLs to resolve
        #[arg(required = true)]
        urls: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Skip the metadata cache for this run
        #[arg(long)]
        no_cache: bool,
    },

    /// List supported providers and their oEmbed endpoints
    Providers,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so JSON output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve {
            urls,
            format,
            no_cache,
        } => {
            cmd::resolve::cmd_resolve(&urls, format, no_cache).await?;
        }
        Commands::Providers => {
            cmd::providers::cmd_providers();
        }
    }

    Ok(())
}
