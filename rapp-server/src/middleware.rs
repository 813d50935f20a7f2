//! CORS and request-metrics middleware

use axum::{
    extract::{MatchedPath, Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

const ALLOWED_METHODS: &str = "GET,POST,PUT,OPTIONS";
const ALLOWED_HEADERS: &str = "Content-Type, Authorization";

/// CORS headers stamped on every response
#[derive(Debug, Clone)]
pub struct CorsHeaders {
    allow_origin: HeaderValue,
}

impl CorsHeaders {
    /// Headers for the configured origin; an unusable value falls back to `*`
    pub fn new(allow_origin: &str) -> Self {
        let allow_origin = HeaderValue::from_str(allow_origin).unwrap_or_else(|e| {
            warn!(origin = allow_origin, error = %e, "Invalid CORS origin, using *");
            HeaderValue::from_static("*")
        });
        Self { allow_origin }
    }

    fn apply(&self, response: &mut Response) {
        let headers = response.headers_mut();
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            self.allow_origin.clone(),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        );
    }
}

/// Add CORS headers; any OPTIONS request is answered with 204 right here
pub async fn cors(State(cors): State<CorsHeaders>, req: Request, next: Next) -> Response {
    let mut response = if req.method() == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(req).await
    };
    cors.apply(&mut response);
    response
}

/// Count requests by route and status code
pub async fn track_requests(req: Request, next: Next) -> Response {
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(req).await;
    crate::metrics::record_http_request(&path, response.status().as_u16());
    response
}
