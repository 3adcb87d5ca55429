use analytics::AnalyticsEngine;
use axum::{routing::get, Router};
use configuration::Config;
use market_data::MarketDataRepository;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;
pub mod models;

/// The shared application state that all handlers can access.
///
/// It is immutable; every request loads its ticker afresh through `repository`.
pub struct AppState {
    pub repository: MarketDataRepository,
    pub engine: AnalyticsEngine,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let repository = MarketDataRepository::new(config.data.directory.clone());
        let engine = AnalyticsEngine::new(
            config.session,
            config.analytics.relative_mode,
            config.analytics.sd_convention,
        );
        Self { repository, engine }
    }
}

/// Builds the application router with its middleware stack.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any());

    // --- DEFINE THE APPLICATION ROUTES ---
    Router::new()
        .route("/", get(handlers::landing_page))
        .route("/dashboard", get(handlers::dashboard_page))
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/tickers", get(handlers::list_tickers))
        .route("/api/tickers/:ticker", get(handlers::get_ticker))
        .route("/api/tickers/:ticker/prices", get(handlers::get_prices))
        .route("/api/tickers/:ticker/series", get(handlers::get_series))
        .route("/api/tickers/:ticker/aggregate", get(handlers::get_aggregate))
        .route("/api/tickers/:ticker/chart", get(handlers::get_chart))
        .with_state(state)
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
}

/// The main function to configure and run the web server.
///
/// Tracing must already be initialised by the caller.
pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let addr = config.bind_address();
    let app = build_router(Arc::new(AppState::new(&config)));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        data_dir = %config.data.directory.display(),
        "Web server listening on http://{}",
        listener.local_addr()?
    );
    axum::serve(listener, app).await?;

    Ok(())
}
