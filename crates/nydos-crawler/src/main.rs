//! NY DOS entity crawler - Entry Point

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use nydos_crawler::config::{api, output};
use nydos_crawler::models::EntityIdentifier;
use nydos_crawler::{Config, Crawler, RegistryClient, SearchToken, Store, generate_token};

#[derive(Parser, Debug)]
#[command(name = "nydos-crawler")]
#[command(about = "Enumerate business entities from the NY DOS public inquiry API")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Directory receiving response files
    #[arg(long, global = true, default_value = output::DEFAULT_DIR, env = "NYDOS_OUTPUT_DIR")]
    output_dir: PathBuf,

    /// Registry host; endpoint paths are appended
    #[arg(long, global = true, default_value = api::BASE_URL, env = "NYDOS_BASE_URL")]
    base_url: String,

    /// Override the full search endpoint URL
    #[arg(long, global = true, env = "NYDOS_SEARCH_URL")]
    search_url: Option<String>,

    /// Override the full detail endpoint URL
    #[arg(long, global = true, env = "NYDOS_DETAIL_URL")]
    detail_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one search and log the raw results
    Search {
        /// Three-letter search term; random when omitted
        #[arg(long)]
        token: Option<SearchToken>,
    },
    /// Search random tokens and fetch every entity found
    Scan {
        /// Number of tokens to try [default: 1000]
        #[arg(long, env = "NYDOS_ITERATIONS")]
        iterations: Option<u32>,
    },
    /// Fetch a single entity record by identifier
    Fetch {
        /// Registry identifier (dosID)
        #[arg(long)]
        id: EntityIdentifier,
    },
}

impl Cli {
    fn config(&self) -> Config {
        let mut config = Config::with_base_url(&self.base_url, &self.output_dir);
        if let Some(url) = &self.search_url {
            config.search_url.clone_from(url);
        }
        if let Some(url) = &self.detail_url {
            config.detail_url.clone_from(url);
        }
        config
    }
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        subscriber.with(tracing_subscriber::fmt::layer().compact()).init();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    let config = cli.config();
    config.validate()?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        output_dir = %config.output_dir.display(),
        "Starting NY DOS crawler"
    );

    let store = Store::new(&config.output_dir);
    store.ensure_root().await?;
    let crawler = Crawler::new(RegistryClient::new(&config)?, store);

    match cli.command {
        Command::Search { token } => {
            let token = match token {
                Some(token) => token,
                None => generate_token()?,
            };
            // A failed cycle is not a failed process.
            if let Err(e) = crawler.search_once(token).await {
                tracing::error!(%token, error = %e, "Failed to retrieve search results");
            }
        }
        Command::Scan { iterations } => {
            crawler.scan(iterations.unwrap_or(config.iterations)).await;
        }
        Command::Fetch { id } => match crawler.fetch_detail(id).await {
            Ok(outcome) => tracing::info!(%id, ?outcome, "Entity record saved"),
            Err(e) => tracing::error!(%id, error = %e, "Failed to fetch entity record"),
        },
    }

    Ok(())
}
