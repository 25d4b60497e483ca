//! tracecache demo driver
//!
//! Walks the library through its paces: stores a few values, prints the
//! replay transcript of the instrumented store operation, and (given a URL
//! argument) exercises the TTL page cache.
//!
//! Runs against a Redis server when `REDIS_URL` is set, and falls back to
//! the in-memory backend otherwise.

use std::env;

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tracecache::{Backend, Cache, Config, MemoryBackend, PageCache, RedisBackend, Result, STORE_OP};

#[tokio::main]
async fn main() {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tracecache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    let result = match &config.redis_url {
        Some(url) => {
            info!("Using Redis backend at {}", url);
            match RedisBackend::connect(url).await {
                Ok(backend) => run(backend, &config).await,
                Err(e) => Err(e),
            }
        }
        None => {
            info!("REDIS_URL not set, using in-memory backend");
            run(MemoryBackend::new(), &config).await
        }
    };

    if let Err(e) = result {
        error!("Demo failed: {}", e);
        std::process::exit(1);
    }
}

async fn run<B: Backend + Clone>(backend: B, config: &Config) -> Result<()> {
    let cache = Cache::new(backend.clone());

    let text_id = cache.store("hello").await?;
    let int_id = cache.store(42i64).await?;

    info!(
        "Stored \"hello\" under {}, fetched back {:?}",
        text_id,
        cache.fetch_text(&text_id).await?
    );
    info!(
        "Stored 42 under {}, fetched back {:?}",
        int_id,
        cache.fetch_int(&int_id).await?
    );

    print!("{}", cache.replay(STORE_OP).await?);

    if let Some(url) = env::args().nth(1) {
        let pages = PageCache::with_ttl(backend, config.page_ttl);

        let body = pages.get_page(&url).await?;
        info!("Fetched {} ({} bytes)", url, body.len());

        // Second call within the TTL window is served from the cache
        pages.get_page(&url).await?;
        info!(
            "Accessed {} {} times, stats: {}",
            url,
            pages.access_count(&url).await?,
            serde_json::to_string(&pages.stats()).unwrap_or_default()
        );
    }

    Ok(())
}
