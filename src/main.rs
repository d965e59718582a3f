//! npsites - Browse US national sites by state and find places nearby
//!
//! An interactive prompt that lists national sites for a state from nps.gov
//! and looks up places near a chosen site, caching every response on disk.

use std::io;
use std::process;

use clap::Parser;
use reqwest::Client;
use tracing::debug;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

use npsites::app::App;
use npsites::cache::CacheStore;
use npsites::cli::{Cli, StartupConfig};
use npsites::data::{NpsClient, PlacesClient};
use npsites::fetch::{CachedFetcher, ReqwestFetch};

/// Sets up logging on stderr, keeping prompts on stdout readable
fn init_tracing(quiet: bool) {
    let default_level = if quiet {
        LevelFilter::WARN
    } else {
        LevelFilter::INFO
    };

    let mut filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();
    for directive in ["hyper=warn", "reqwest=warn", "html5ever=warn", "selectors=warn"] {
        if let Ok(directive) = directive.parse() {
            filter = filter.add_directive(directive);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .compact()
        .init();
}

async fn run(config: StartupConfig) -> Result<(), Box<dyn std::error::Error>> {
    let client = Client::builder()
        .user_agent(concat!("npsites/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let store = CacheStore::open(&config.cache_file);
    debug!(path = %store.path().display(), entries = store.len(), "cache ready");

    let fetcher = CachedFetcher::new(store, ReqwestFetch::with_client(client));
    let mut app = App::new(
        fetcher,
        NpsClient::with_base_url(config.nps_base_url),
        PlacesClient::with_base_url(config.api_key, config.places_url),
    );

    let stdin = io::stdin();
    app.run(stdin.lock(), io::stdout()).await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.quiet);

    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(2);
        }
    };

    if let Err(e) = run(config).await {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}
