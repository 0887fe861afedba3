//! Bounded TTL Cache - cache-aside demo
//!
//! Runs a fixed sequence of slow dune searches through the cache and prints
//! the resulting statistics.

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bounded_ttl_cache::demo::{search_sand_dunes, DuneSearchResult};
use bounded_ttl_cache::{CacheConfig, CachedFetch, SharedCache};

const QUERIES: &[&str] = &["sahara", "arabian", "sahara", "gobi", "sahara", "namib"];

/// Demo entry point.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the shared cache and wrap the search function
/// 4. Run the query sequence and report statistics
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bounded_ttl_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = CacheConfig::from_env().context("Failed to load cache configuration")?;
    info!(
        "Configuration loaded: max_size={}, default_ttl={}s",
        config.max_size,
        config.default_ttl.as_secs()
    );

    let cache: SharedCache<String, DuneSearchResult> =
        SharedCache::from_config(&config).context("Failed to create cache")?;
    let search = CachedFetch::new(cache.clone(), search_sand_dunes);

    for query in QUERIES {
        let result = search.call(query.to_string()).await;
        info!("Found {} dunes for '{}'", result.count, result.query);
    }

    let stats = cache.stats();
    info!("Cache statistics: {}", stats);
    println!(
        "{}",
        serde_json::to_string_pretty(&stats).context("Failed to serialize statistics")?
    );

    Ok(())
}
