//! HTTP surface for the Cappy assistant.
//!
//! Sessions live in memory only; every message turn runs the context
//! pipeline and one model call through the shared [`cappy_chat::Assistant`].

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use config::Config;
use routes::{health, sessions};
use state::AppState;

/// Slack on top of the model timeout before the server gives up on a request
const REQUEST_TIMEOUT_MARGIN_SECS: u64 = 10;

pub fn build_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        // Health
        .route("/health", get(health::health_check))
        .route("/about", get(health::about))
        // Sessions
        .route("/sessions", post(sessions::create_session))
        .route(
            "/sessions/:session_id",
            get(sessions::get_session).delete(sessions::delete_session),
        )
        .route("/sessions/:session_id/messages", post(sessions::send_message))
        .route("/sessions/:session_id/clear", post(sessions::clear_session))
        .route("/sessions/:session_id/new", post(sessions::new_chat));

    let timeout = Duration::from_secs(
        state
            .config
            .llm
            .request_timeout_secs
            .saturating_add(REQUEST_TIMEOUT_MARGIN_SECS),
    );

    api_routes
        .layer(axum::middleware::from_fn(middleware::logging::log_request))
        .layer(TimeoutLayer::new(timeout))
        .layer(CompressionLayer::new())
        .layer(build_cors_layer(&state.config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn build_cors_layer(config: &Config) -> CorsLayer {
    if config.cors.enabled {
        let mut cors = CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers(Any);

        if config.cors.origins.iter().any(|o| o == "*") {
            cors = cors.allow_origin(Any);
        } else {
            let origins: Vec<axum::http::HeaderValue> = config
                .cors
                .origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();
            cors = cors.allow_origin(origins);
        }

        cors
    } else {
        CorsLayer::permissive()
    }
}
