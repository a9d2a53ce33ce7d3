mod args;

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use metascore_core::{
    load_config, load_config_from_env, validate_config, Config, MetacriticClient,
};

use args::{parse_args, Args, Command, USAGE};

/// Config file picked up from the working directory when present
const DEFAULT_CONFIG_FILE: &str = "metascore.toml";

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let args = parse_args(std::env::args().skip(1))?;

    if args.command == Command::Help {
        println!("{}", USAGE);
        return Ok(());
    }

    let config = load(&args)?;
    validate_config(&config).context("Configuration validation failed")?;

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log.filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let client = MetacriticClient::new(config.client).context("Failed to create client")?;

    let output = match args.command {
        Command::Help => return Ok(()),
        Command::Search { query, kind } => {
            info!(query = %query, "Searching");
            let results = client.search(&query, kind, args.sort_by_similarity).await;
            serde_json::to_string_pretty(&results)?
        }
        Command::Detail { query, kind } => {
            info!(query = %query, %kind, "Fetching details");
            let record = client
                .get_detail(&query, kind, args.sort_by_similarity)
                .await;
            serde_json::to_string_pretty(&record)?
        }
    };

    println!("{}", output);
    Ok(())
}

/// Resolve the config source: --config, then $METASCORE_CONFIG, then
/// ./metascore.toml if it exists, else defaults plus env overrides.
fn load(args: &Args) -> Result<Config> {
    let explicit = args
        .config
        .clone()
        .or_else(|| std::env::var("METASCORE_CONFIG").ok().map(PathBuf::from));

    if let Some(path) = explicit {
        return load_config(&path)
            .with_context(|| format!("Failed to load config from {:?}", path));
    }

    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
    if local.exists() {
        return load_config(&local)
            .with_context(|| format!("Failed to load config from {:?}", local));
    }

    load_config_from_env().context("Failed to load config from environment")
}
