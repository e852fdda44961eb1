//! Stela Server Library
//!
//! HTTP surface of the Stela credential issuer. The library exposes the
//! router and state for integration testing while the binary handles
//! startup.

pub mod config;
pub mod routes;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use state::AppState;

/// Build CORS layer based on environment.
///
/// `STELA_CORS_ORIGINS` is a comma-separated list of allowed origins;
/// the default `*` allows all origins.
fn cors_layer() -> CorsLayer {
    let origins = std::env::var("STELA_CORS_ORIGINS").unwrap_or_else(|_| "*".into());

    let allow_origin = if origins.trim() == "*" {
        AllowOrigin::any()
    } else {
        let parsed: Vec<_> = origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .max_age(std::time::Duration::from_secs(3600))
}

fn core_routes() -> Router<AppState> {
    Router::new()
        // Identity lifecycle
        .route("/v1/identities", post(routes::create_identity))
        // Claim issuance and revocation
        .route("/v1/:identifier/claims", post(routes::create_claim))
        .route(
            "/v1/:identifier/claims/revoke/:nonce",
            post(routes::revoke_claim),
        )
        // Health check
        .route("/health", get(routes::health))
}

/// Create the main router with all routes configured
pub fn create_router(state: AppState) -> Router {
    core_routes()
        .with_state(state)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}
