//! HTTP frontend for the cupreg tournament-registration service.
//!
//! The library exposes the router assembly so integration tests can drive
//! the exact service the binary serves; `main.rs` only adds config
//! loading, the listener, and the periodic limiter sweep.

pub mod api;
pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod state;

use axum::http::{header, Method};
use axum::middleware::from_fn;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router. `hsts` adds the strict-transport header
/// and is enabled by the binary when TLS is configured.
pub fn app(state: AppState, hsts: bool) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let router = Router::new().nest("/api", api::auth_router());

    let router = if hsts {
        router.layer(from_fn(
            middleware::security_headers::security_headers_with_hsts,
        ))
    } else {
        router.layer(from_fn(middleware::security_headers::security_headers))
    };

    router
        .layer(RequestBodyLimitLayer::new(64 * 1024))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
