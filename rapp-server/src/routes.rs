//! Router construction

use crate::handlers;
use crate::middleware::{cors, track_requests, CorsHeaders};
use crate::state::AppState;
use axum::{
    middleware,
    routing::{any, get, post},
    Router,
};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

/// Build the full HTTP surface
pub fn build_router(state: AppState) -> Router {
    let cors_headers = CorsHeaders::new(&state.config.cors_allow_origin);

    Router::new()
        // Probes
        .route("/healthz", get(handlers::healthz))
        .route("/readyz", get(handlers::readyz))
        .route("/version", get(handlers::version))
        // Metrics
        .route("/metrics", get(handlers::metrics))
        // PMS notifications
        .route("/callback", any(handlers::callback))
        // PMS proxy
        .route("/api/services", get(handlers::list_services))
        .route(
            "/api/policies",
            get(handlers::list_policies).post(handlers::upsert_policy),
        )
        .route("/api/policies/limit", post(handlers::set_policy_limit))
        .route("/api/rics", get(handlers::list_rics))
        .route("/api/policy-types", get(handlers::list_policy_types))
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(middleware::from_fn(track_requests))
        .layer(middleware::from_fn_with_state(cors_headers, cors))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}
