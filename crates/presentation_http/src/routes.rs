//! Route definitions

use axum::{
    Router,
    http::{HeaderName, HeaderValue, Method},
    routing::{get, post},
};
use infrastructure::ServerConfig;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{self, audio},
    middleware::{REQUEST_ID_HEADER, RequestIdLayer},
    state::AppState,
};

/// Create the router with all routes and request ID handling
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health_check))
        .route("/voices", get(handlers::voices::list_voices))
        .route("/generate-audio", post(handlers::audio::generate_audio))
        .route("/webhook", post(handlers::whatsapp::receive_message))
        .route("/media/{name}", get(handlers::whatsapp::media))
        .with_state(state)
        .layer(RequestIdLayer::new())
}

/// Create the router wrapped in CORS, body limit and tracing layers
pub fn create_app(state: AppState, server: &ServerConfig) -> Router {
    create_router(state)
        .layer(RequestBodyLimitLayer::new(server.max_body_size_json_bytes))
        .layer(cors_layer(server))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let exposed = [
        REQUEST_ID_HEADER,
        audio::DIALECT_HEADER,
        audio::PROVIDER_HEADER,
        audio::CLASSIFICATION_HEADER,
    ]
    .into_iter()
    .filter_map(|name| HeaderName::try_from(name).ok())
    .collect::<Vec<_>>();

    if server.allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
            .expose_headers(exposed)
    } else {
        let origins: Vec<HeaderValue> = server
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
            .expose_headers(exposed)
    }
}
