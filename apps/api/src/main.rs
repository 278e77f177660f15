use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use resume_desk::config::Config;
use resume_desk::db::create_pool;
use resume_desk::drafts::cache::{KeyValueCache, MemoryCache, RedisCache};
use resume_desk::drafts::submitter::ResumeSubmitter;
use resume_desk::render::html::HtmlRenderer;
use resume_desk::routes::build_router;
use resume_desk::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("resume_desk={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Desk v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Draft cache: Redis when configured, process memory otherwise
    let drafts: Arc<dyn KeyValueCache> = match &config.redis_url {
        Some(url) => {
            let client = redis::Client::open(url.as_str()).context("Invalid REDIS_URL")?;
            let cache = RedisCache::connect(&client)
                .await
                .context("Could not connect to REDIS_URL")?;
            info!("Draft cache: Redis");
            Arc::new(cache)
        }
        None => {
            warn!("REDIS_URL is not set; drafts are kept in memory and lost on restart");
            Arc::new(MemoryCache::new())
        }
    };

    let submitter = ResumeSubmitter::new(
        &config.submit_base_url,
        config.submit_api_key.clone(),
        config.submit_timeout,
    )
    .context("Could not build the submission client")?;
    info!(
        "Submitting to {} (timeout {}s)",
        submitter.endpoint(),
        config.submit_timeout.as_secs()
    );

    let html = Arc::new(HtmlRenderer::new().context("Could not compile the HTML template")?);

    // Build app state
    let state = AppState {
        db,
        drafts,
        submitter,
        html,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
