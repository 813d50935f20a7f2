//! Passthrough to the policy-management service

use crate::error::{ApiError, ApiResult};
use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderName, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use rapp_core::{PmsClient, PutOutcome};
use serde_json::json;
use tracing::{warn, Instrument};

/// Headers that describe the upstream connection rather than the payload
static HOP_BY_HOP: [HeaderName; 8] = [
    header::CONNECTION,
    header::CONTENT_LENGTH,
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

/// GET `path` on PMS and relay status, headers and body
pub async fn forward_get(
    client: &PmsClient,
    path: &str,
    query: &[(&str, &str)],
) -> ApiResult<Response> {
    let span = crate::tracing::proxy_span("GET", path);
    async {
        let upstream = client.get(path, query).await.map_err(|e| {
            warn!(path, error = %e, "PMS proxy request failed");
            ApiError::from(e)
        })?;

        let status = upstream.status();
        let headers = relayable_headers(upstream.headers());
        let body = upstream
            .bytes()
            .await
            .map_err(|e| ApiError::BadGateway(format!("Reading PMS response: {}", e)))?;

        crate::tracing::record_status(status.as_u16());

        let mut response = Response::new(Body::from(body));
        *response.status_mut() = status;
        response.headers_mut().extend(headers);
        Ok::<_, ApiError>(response)
    }
    .instrument(span)
    .await
}

/// Reply to a proxied PUT with the PMS status and an empty JSON object
pub fn relay_put(outcome: PutOutcome) -> Response {
    let status = StatusCode::from_u16(outcome.status).unwrap_or(StatusCode::BAD_GATEWAY);
    (status, Json(json!({}))).into_response()
}

fn relayable_headers(headers: &HeaderMap) -> HeaderMap {
    let mut relayed = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        if !HOP_BY_HOP.contains(name) {
            relayed.append(name.clone(), value.clone());
        }
    }
    relayed
}
