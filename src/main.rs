use anyhow::Result;
use realtor_pricing::api::{build_router, AppState};
use realtor_pricing::config::Config;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment (.env included) before logging so RUST_LOG applies
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.rust_log)))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("🏠 Starting pricing API server...");
    info!(
        "Positioning band: ±{}%, diff precision: {} decimals",
        config.pricing.positioning_band_pct, config.pricing.price_diff_decimals
    );

    let state = AppState {
        pricing: config.pricing.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    info!("🚀 Server running on http://{}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
