mod fetch;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "storefront-cli")]
#[command(about = "Spree storefront command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print categories and brands from the configured taxonomy roots
    SiteInfo {
        /// Request preview content where the backend supports it
        #[arg(long)]
        preview: bool,
    },
    /// Print one page of normalized products
    Products {
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
        #[arg(long, default_value_t = 25, value_parser = clap::value_parser!(u32).range(1..=100))]
        per_page: u32,
    },
    /// Print normalized products by slug, fetched concurrently
    Product {
        #[arg(required = true, num_args = 1..)]
        slugs: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse first so `--help` works without a configured environment.
    let cli = Cli::parse();

    let config = storefront_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let client = storefront_spree::SpreeClient::from_config(&config)?;

    match cli.command {
        Commands::SiteInfo { preview } => {
            fetch::run_site_info(&client, &config, preview).await?;
        }
        Commands::Products { page, per_page } => {
            fetch::run_products(&client, &config, page, per_page).await?;
        }
        Commands::Product { slugs } => {
            fetch::run_product(&client, &config, &slugs).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests;
