pub mod api;
mod cache;
mod config;
mod models;
mod providers;
mod reference;
mod services;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use cache::FlightCache;
use config::{Config, Credentials};
use providers::openrouter::OpenRouterClient;

#[derive(OpenApi)]
#[openapi(
    info(title = "Flight Status API", version = "0.1.0"),
    paths(
        api::health::health_check,
        api::flights::list_route_flights,
        api::flights::list_all_flights,
        api::metrics::route_metrics,
        api::reschedule::reschedule_flight,
        api::chat::ask,
        api::refresh::force_refresh,
    ),
    components(schemas(
        api::ErrorResponse,
        api::health::HealthResponse,
        api::flights::AllFlightsResponse,
        api::chat::AskResponse,
        api::refresh::RefreshResponse,
        models::FlightRecord,
        models::FlightStatus,
        models::FlightView,
        services::metrics::RouteMetrics,
        services::metrics::MetricsCards,
        services::metrics::HourlyDelay,
        services::metrics::AirlineDelay,
        services::reschedule::RescheduleImpact,
    )),
    tags(
        (name = "health", description = "Service health check"),
        (name = "flights", description = "Flight listings"),
        (name = "metrics", description = "Route delay metrics"),
        (name = "reschedule", description = "Reschedule impact simulation"),
        (name = "chat", description = "Natural-language Q&A over flight data"),
        (name = "system", description = "Cache management")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .init();

    // Load config
    let config = Config::load_or_default("config.yaml").expect("Failed to load config");
    let credentials = Credentials::from_env();
    tracing::info!(
        aviationstack = credentials.aviationstack_api_key.is_some(),
        openrouter = credentials.openrouter_api_key.is_some(),
        "Loaded configuration"
    );

    // Build CORS layer based on config
    let cors_layer = if config.cors_permissive {
        tracing::warn!("CORS: Permissive mode explicitly enabled (all origins allowed) - DO NOT USE IN PRODUCTION");
        CorsLayer::permissive()
    } else if !config.cors_origins.is_empty() {
        tracing::info!(origins = ?config.cors_origins, "CORS: Restricting to configured origins");
        let origins: Vec<_> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([axum::http::header::CONTENT_TYPE])
    } else {
        panic!("CORS configuration error: Either set 'cors_origins' with allowed origins, or set 'cors_permissive: true' for development");
    };

    // Build the cache and populate it before serving traffic
    let cache = Arc::new(FlightCache::new(config.cache.clone(), &credentials));
    let flights = cache.get_flight_data().await;
    tracing::info!(count = flights.len(), "Loaded flights into cache");

    // Q&A backend, if configured
    let chat = credentials
        .openrouter_api_key
        .clone()
        .and_then(|key| match OpenRouterClient::new(key) {
            Ok(client) => Some(Arc::new(client)),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to build OpenRouter client, Q&A disabled");
                None
            }
        });

    // Periodic background refresh, independent of read traffic
    let refresh_cache = cache.clone();
    tokio::spawn(async move {
        refresh_cache.run_refresh_loop().await;
    });

    // Build the app
    let app = Router::new()
        .route("/", get(root))
        .merge(api::router(cache, chat))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer);

    // Start server
    let port = config.resolved_port();
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .expect("Failed to bind port");

    tracing::info!("Server running on http://localhost:{}", port);
    tracing::info!("Swagger UI: http://localhost:{}/swagger-ui", port);

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}

async fn root() -> &'static str {
    "Flight Status API"
}
