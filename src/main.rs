//! COVID-19 stats gateway
//!
//! Startup fetches the stats feed once, stores a copy in the document store,
//! then serves the snapshot over REST until Ctrl-C.
//!
//! Usage:
//!   ./target/release/covid_gateway [options]   (see --help)
//!
//! REST endpoints:
//!   GET /                      - Health check
//!   GET /summary               - Nationwide summary
//!   GET /regional              - All regions
//!   GET /regional/:loc         - Single region by exact name
//!   GET /regional?lat=X&lon=Y  - Region containing the coordinates
//!   GET /collectionname        - Collection the snapshot is stored in

use anyhow::{Context, Result};
use clap::Parser;
use covid_gateway::{
    api::{create_router, AppState},
    config::Config,
    db,
    feed::FeedClient,
    geocode::GeocodeClient,
    snapshot::Snapshot,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn print_banner(config: &Config, snapshot: &Snapshot) {
    println!("============================================================");
    println!("              COVID-19 STATS GATEWAY");
    println!("============================================================");
    println!();
    println!("  Listen:     http://{}", config.listen);
    println!("  Regions:    {}", snapshot.regional().len());
    println!("  Updated:    {}", snapshot.document().last_origin_update);
    if config.skip_persist {
        println!("  Store:      disabled");
    } else {
        println!("  Store:      {} ({})", config.db_endpoint, config.db_collection);
    }
    println!();
    println!("REST Endpoints:");
    println!("  GET /                       Health check");
    println!("  GET /summary                Nationwide summary");
    println!("  GET /regional               All regions");
    println!("  GET /regional/:loc          Region by name");
    println!("  GET /regional?lat=&lon=     Region by coordinates");
    println!("  GET /collectionname         Storage collection");
    println!();
    println!("============================================================");
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .init();

    let config = Config::parse();

    let http = reqwest::Client::builder()
        .timeout(config.http_timeout())
        .build()
        .context("Failed to build HTTP client")?;

    let feed = FeedClient::new(http.clone(), &config.stats_url)
        .fetch()
        .await
        .context("Could not load the stats feed")?;
    let snapshot = Snapshot::new(feed);

    // Held until the server stops so the connection closes on shutdown.
    let _store = if config.skip_persist {
        info!("Persistence disabled, snapshot kept in memory only");
        None
    } else {
        Some(db::persist(&config, &snapshot).await?)
    };

    if config.geocode_key.is_none() {
        warn!("No geocoder key configured; coordinate lookups will answer 503");
    }
    let geocoder = GeocodeClient::new(http, &config.geocode_url, config.geocode_key.clone());

    print_banner(&config, &snapshot);

    let app = create_router(AppState::new(snapshot, geocoder, &config.db_collection));

    let listener = tokio::net::TcpListener::bind(config.listen)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen))?;
    info!("Serving on {}", config.listen);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
