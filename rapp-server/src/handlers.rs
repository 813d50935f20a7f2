//! HTTP request handlers

use crate::api::{HealthResponse, LimitRequest, PolicyDocument, PolicyTypesParams};
use crate::error::{ApiError, ApiResult};
use crate::proxy::{forward_get, relay_put};
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use rapp_core::types::{POLICY_INSTANCES_PATH, POLICY_TYPES_PATH, RICS_PATH, SERVICES_PATH};
use serde_json::json;
use tracing::info;

/// Liveness probe
pub async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse::OK)
}

/// Readiness probe: ready once registration and policy submission succeeded
pub async fn readyz(State(state): State<AppState>) -> (StatusCode, &'static str) {
    if state.readiness.is_ready() {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "not-ready")
    }
}

/// Plain-text version
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Prometheus metrics endpoint
pub async fn metrics() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        crate::metrics::get_prometheus_metrics(),
    )
}

/// Sink for PMS status notifications
pub async fn callback(method: Method, uri: Uri, body: Bytes) -> Json<HealthResponse> {
    info!(
        method = %method,
        path = %uri.path(),
        body = %String::from_utf8_lossy(&body),
        "CALLBACK"
    );
    Json(HealthResponse::OK)
}

/// Services registered with PMS
pub async fn list_services(State(state): State<AppState>) -> ApiResult<Response> {
    forward_get(&state.client, SERVICES_PATH, &[]).await
}

/// Policy instances known to PMS
pub async fn list_policies(State(state): State<AppState>) -> ApiResult<Response> {
    forward_get(&state.client, POLICY_INSTANCES_PATH, &[]).await
}

/// Create or update a policy; unset identifiers come from configuration
pub async fn upsert_policy(State(state): State<AppState>, body: Bytes) -> ApiResult<Response> {
    let document: PolicyDocument = serde_json::from_slice(&body)?;
    let policy = document.into_policy(&state.config);

    info!(policy_id = %policy.policy_id, ric_id = %policy.ric_id, "Upserting policy");

    let outcome = state.client.put_policy(&policy).await?;
    Ok(relay_put(outcome))
}

/// Re-submit the configured policy with a new `limit`
pub async fn set_policy_limit(State(state): State<AppState>, body: Bytes) -> ApiResult<Response> {
    let request: LimitRequest = serde_json::from_slice(&body)?;
    let limit = request.limit();
    let policy = state.config.policy_request(json!({
        "note": "from-ui",
        "limit": limit,
    }));

    info!(policy_id = %policy.policy_id, limit = %limit, "Updating policy limit");
    if let Some(value) = limit.as_f64() {
        rapp_core::metrics::set_policy_limit(value);
    }

    let outcome = state.client.put_policy(&policy).await?;
    Ok(relay_put(outcome))
}

/// RICs known to PMS
pub async fn list_rics(State(state): State<AppState>) -> ApiResult<Response> {
    forward_get(&state.client, RICS_PATH, &[]).await
}

/// Policy types, optionally filtered by `ric_id`
pub async fn list_policy_types(
    State(state): State<AppState>,
    Query(params): Query<PolicyTypesParams>,
) -> ApiResult<Response> {
    match params.ric_id.as_deref().filter(|ric| !ric.is_empty()) {
        Some(ric_id) => forward_get(&state.client, POLICY_TYPES_PATH, &[("ric_id", ric_id)]).await,
        None => forward_get(&state.client, POLICY_TYPES_PATH, &[]).await,
    }
}

/// Unknown route
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}
