use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use url::Url;

use rsslookup::config::Config;
use rsslookup::feed::Discovery;
use rsslookup::lookup::{FeedResult, LookupService};
use rsslookup::util::validate_url;

#[derive(Parser, Debug)]
#[command(name = "rsslookup", version, about = "Find the RSS and Atom feeds a website publishes")]
struct Args {
    /// TOML config file (missing file means defaults)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP lookup service
    Serve {
        /// Listen address, overriding the config file
        #[arg(long, value_name = "ADDR")]
        bind: Option<String>,
    },
    /// Discover feeds for one URL directly, without CAPTCHA or rate limits
    Discover {
        url: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config from '{}'", path.display()))?,
        None => Config::default(),
    };
    config.apply_env_overrides();
    tracing::debug!(config = ?config, "Effective configuration");

    match args.command {
        Command::Serve { bind } => {
            if let Some(bind) = bind {
                config.bind = bind;
            }
            serve(&config).await
        }
        Command::Discover { url, json } => discover(&config, &url, json).await,
    }
}

async fn serve(config: &Config) -> Result<()> {
    let service = LookupService::from_config(config).context("Failed to build HTTP client")?;
    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("Failed to bind '{}'", config.bind))?;
    rsslookup::server::serve(listener, Arc::new(service)).await
}

async fn discover(config: &Config, raw_url: &str, json: bool) -> Result<()> {
    let url = if config.allow_private_hosts {
        Url::parse(raw_url).context("Invalid URL")?
    } else {
        validate_url(raw_url)?
    };
    if !matches!(url.scheme(), "http" | "https") {
        bail!("Only http and https URLs can be looked up");
    }

    let discovery = Discovery::from_config(config).context("Failed to build HTTP client")?;
    let run = discovery.discover(raw_url, &url).await;
    let feeds: Vec<FeedResult> = run.result?.into_iter().map(FeedResult::from).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&feeds)?);
        return Ok(());
    }

    for feed in &feeds {
        let marker = if feed.is_from_rule { " [rule]" } else { "" };
        println!("{}{marker}", feed.title.as_deref().unwrap_or("(untitled)"));
        println!("  {}", feed.url);
    }
    Ok(())
}
