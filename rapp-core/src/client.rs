//! HTTP client for the policy-management service
//!
//! A thin wrapper over `reqwest` with a fixed request timeout. PUTs return
//! the status and raw body whatever the status is; callers decide whether a
//! status counts as failure (see [`PutOutcome::into_success`]).

use crate::error::{RappError, Result};
use crate::metrics;
use crate::types::{PolicyRequest, RegistrationRequest, POLICIES_PATH, SERVICES_PATH};
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Timeout applied to every request sent to PMS
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Status code and body of a PUT that reached PMS
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutOutcome {
    /// HTTP status code
    pub status: u16,
    /// Raw response body
    pub body: Vec<u8>,
}

impl PutOutcome {
    /// Anything below 300 counts as success
    pub fn is_success(&self) -> bool {
        self.status < 300
    }

    /// Turn a logical failure (status >= 300) into an error
    pub fn into_success(self, resource: &str) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(RappError::UpstreamRejection {
                resource: resource.to_string(),
                status: self.status,
            })
        }
    }
}

/// Client for the PMS A1-P REST API
#[derive(Debug, Clone)]
pub struct PmsClient {
    http: reqwest::Client,
    base_url: String,
}

impl PmsClient {
    /// Create a client for the given base URL with the default timeout
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, REQUEST_TIMEOUT)
    }

    /// Create a client with a custom request timeout
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| RappError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self { http, base_url })
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve a PMS path, appending query pairs form-encoded
    pub fn url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url> {
        let raw = format!("{}{}", self.base_url, path);
        let mut url = Url::parse(&raw).map_err(|e| RappError::InvalidUrl(format!("{}: {}", raw, e)))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter());
        }
        Ok(url)
    }

    /// PUT `body` as JSON to `url`
    pub async fn put_json<T>(&self, url: Url, body: &T) -> Result<PutOutcome>
    where
        T: Serialize + ?Sized,
    {
        let payload = serde_json::to_vec(body)?;

        let response = match self
            .http
            .put(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(method = "PUT", url = %url, error = %e, "PMS request failed");
                return Err(e.into());
            }
        };

        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        info!(method = "PUT", url = %url, status, "PMS request completed");

        Ok(PutOutcome { status, body })
    }

    /// Register (or refresh) this service with PMS
    pub async fn put_service(&self, req: &RegistrationRequest) -> Result<PutOutcome> {
        let url = self.url(SERVICES_PATH, &[])?;
        self.put_resource("services", url, req).await
    }

    /// Create or update a policy instance
    pub async fn put_policy(&self, req: &PolicyRequest) -> Result<PutOutcome> {
        let url = self.url(POLICIES_PATH, &[])?;
        self.put_resource("policies", url, req).await
    }

    /// Plain GET against PMS; the response is handed back untouched
    pub async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<reqwest::Response> {
        let url = self.url(path, query)?;
        debug!(method = "GET", url = %url, "Forwarding to PMS");
        Ok(self.http.get(url).send().await?)
    }

    async fn put_resource<T>(&self, resource: &str, url: Url, body: &T) -> Result<PutOutcome>
    where
        T: Serialize + ?Sized,
    {
        match self.put_json(url, body).await {
            Ok(outcome) => {
                metrics::record_put(resource, outcome.status);
                Ok(outcome)
            }
            Err(e) => {
                if e.is_upstream() {
                    metrics::record_put_error(resource);
                }
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_invalid_base_url() {
        let err = PmsClient::new("not a url").unwrap_err();
        assert!(matches!(err, RappError::InvalidUrl(_)));
    }

    #[test]
    fn test_url_escapes_query() {
        let client = PmsClient::new("http://pms:8081/").unwrap();
        assert_eq!(client.base_url(), "http://pms:8081");

        let url = client
            .url("/a1-policy/v2/policy-types", &[("ric_id", "ric 7&x")])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://pms:8081/a1-policy/v2/policy-types?ric_id=ric+7%26x"
        );
    }

    #[test]
    fn test_outcome_success_boundary() {
        let ok = PutOutcome { status: 299, body: Vec::new() };
        assert!(ok.clone().into_success("services").is_ok());

        let redirect = PutOutcome { status: 300, body: Vec::new() };
        let err = redirect.into_success("services").unwrap_err();
        assert!(matches!(err, RappError::UpstreamRejection { status: 300, .. }));
    }

    #[tokio::test]
    async fn test_put_json_sends_json_and_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/echo"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(201).set_body_string("created"))
            .expect(1)
            .mount(&server)
            .await;

        let client = PmsClient::new(server.uri()).unwrap();
        let body = json!({"a": 1.5, "b": [true, null, "x"], "c": {"d": "é"}});
        let outcome = client
            .put_json(client.url("/echo", &[]).unwrap(), &body)
            .await
            .unwrap();

        assert_eq!(outcome.status, 201);
        assert_eq!(outcome.body, b"created".to_vec());

        let received = server.received_requests().await.unwrap();
        let sent: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
        assert_eq!(sent, body);
    }

    #[tokio::test]
    async fn test_put_json_rejection_still_returns_status() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = PmsClient::new(server.uri()).unwrap();
        let outcome = client
            .put_json(client.url("/x", &[]).unwrap(), &json!({}))
            .await
            .unwrap();

        assert_eq!(outcome.status, 500);
        assert!(!outcome.is_success());
        assert_eq!(outcome.body, b"boom".to_vec());
    }

    #[tokio::test]
    async fn test_put_json_timeout_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let client = PmsClient::with_timeout(server.uri(), Duration::from_millis(50)).unwrap();
        let err = client
            .put_json(client.url("/slow", &[]).unwrap(), &json!({}))
            .await
            .unwrap_err();

        assert!(matches!(err, RappError::Transport(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        // Port 9 (discard) is not expected to be listening in test environments
        let client = PmsClient::new("http://127.0.0.1:9").unwrap();
        let err = client
            .put_service(&RegistrationRequest {
                service_id: "s".to_string(),
                keep_alive_interval_seconds: 1,
                callback_url: "http://cb".to_string(),
            })
            .await
            .unwrap_err();

        assert!(err.is_upstream());
    }
}
