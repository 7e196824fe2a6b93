//! Router Assembly
//!
//! Mounts the auth API under `/api` and, outside dev mode, the built site
//! with an `index.html` fallback for client-side routes.

use auth::{AuthAppState, InMemorySessionRepository, StaticCredentialRepository, auth_router};
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::get,
};
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

pub type AppState = AuthAppState<StaticCredentialRepository, InMemorySessionRepository>;

pub const DEV_HINT: &str =
    "Dev mode: the site is served by the frontend dev server; this process only answers /api.";

/// Build the full application router
pub fn build_router(state: AppState, config: &ServerConfig, dev: bool) -> Router {
    let router = Router::new().nest("/api", auth_router(state));

    let router = if dev {
        router.route("/", get(|| async { DEV_HINT }))
    } else {
        let index = config.static_dir.join("index.html");
        router.fallback_service(ServeDir::new(&config.static_dir).fallback(ServeFile::new(index)))
    };

    router
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.frontend_origins))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([header::CONTENT_TYPE, header::ACCEPT]))
        .allow_credentials(true)
}
