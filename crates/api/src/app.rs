use axum::{middleware, routing::get, Router};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{rate_limit_middleware, spawn_eviction_task, RateLimiterState};
use crate::routes::{charts, dashboard, export, health, insights};
use shared::jwt::{JwtError, JwtValidator};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub jwt: Arc<JwtValidator>,
    pub rate_limiter: Option<Arc<RateLimiterState>>,
}

pub fn create_app(config: Config, pool: PgPool) -> Result<Router, JwtError> {
    let config = Arc::new(config);

    let jwt = Arc::new(JwtValidator::from_rsa_pem(
        &config.jwt.public_key,
        config.jwt.leeway_secs,
    )?);

    // Rate limiting is enabled when rate_limit_per_minute > 0
    let rate_limiter = if config.security.rate_limit_per_minute > 0 {
        let limiter = Arc::new(RateLimiterState::new(
            config.security.rate_limit_per_minute,
        ));
        spawn_eviction_task(limiter.clone());
        Some(limiter)
    } else {
        None
    };

    let state = AppState {
        pool,
        config: config.clone(),
        jwt,
        rate_limiter,
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Production: only allow specified origins
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Data routes: Bearer JWT required (enforced by the AuthPrincipal
    // extractor in each handler), rate limited per client IP.
    let data_routes = Router::new()
        .route("/api/v1/dashboard", get(dashboard::get_dashboard))
        .route("/api/v1/charts/time-series", get(charts::get_time_series))
        .route(
            "/api/v1/charts/campaign-performance",
            get(charts::get_campaign_performance),
        )
        .route(
            "/api/v1/charts/brand-analysis",
            get(charts::get_brand_analysis),
        )
        .route("/api/v1/insights/trends", get(insights::get_trend_insights))
        .route("/api/v1/export", get(export::export_analytics))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ));

    // Public routes (no authentication required)
    let public_routes = Router::new().route("/api/v1/health", get(health::health_check));

    let app = Router::new()
        .merge(public_routes)
        .merge(data_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    Ok(app)
}
