mod locations;
mod search;
mod session;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "opps-cli")]
#[command(about = "Search, rank and page through listings")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Filter, rank and paginate listings; prints the result page as JSON.
    Search {
        #[command(flatten)]
        source: SourceArgs,
        /// Free-text match against title, description and tags.
        #[arg(long)]
        text: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        tag: Option<String>,
        #[arg(long)]
        status: Option<String>,
        /// `default` or `nearby`.
        #[arg(long)]
        sort: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        page: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        page_size: Option<String>,
        /// Only listings within this many miles of --lat/--lon.
        #[arg(long, allow_negative_numbers = true)]
        radius: Option<String>,
    },
    /// Print the location dropdown for the labels found in a listings file.
    Locations {
        #[command(flatten)]
        source: SourceArgs,
    },
}

/// Listings file plus an optional stand-in for the device position.
#[derive(Debug, Clone, Args)]
struct SourceArgs {
    /// JSON array of listings.
    #[arg(long)]
    listings: PathBuf,
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    lat: Option<f64>,
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    lon: Option<f64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = opps_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Search {
            source,
            text,
            category,
            tag,
            status,
            sort,
            page,
            page_size,
            radius,
        }) => {
            let params = opps_search::QueryParams {
                q: text,
                category,
                tag,
                status,
                sort,
                page,
                page_size,
                radius,
            };
            search::run_search(&config, &source, params).await?;
        }
        Some(Commands::Locations { source }) => {
            locations::run_locations(&config, &source).await?;
        }
        None => println!("opps-cli ready; run `opps-cli --help` for commands"),
    }

    Ok(())
}
