//! Environment configuration
//!
//! Every setting is a plain environment variable with a default. Empty
//! values are treated as unset.

use crate::error::{RappError, Result};
use crate::retry::RetryPolicy;
use crate::types::{PolicyRequest, RegistrationRequest};
use serde_json::json;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

/// Default PMS base URL
pub const DEFAULT_PMS_URL: &str = "http://policy-agent:8081";
/// Default listen address for the HTTP surface
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// rApp configuration
#[derive(Debug, Clone)]
pub struct RappConfig {
    /// Base URL of the policy-management service
    pub pms_url: String,
    /// Service identifier registered with PMS
    pub service_id: String,
    /// Target RIC
    pub ric_id: String,
    /// Policy instance identifier
    pub policy_id: String,
    /// Policy type identifier (empty for the A1-STD basic simulator)
    pub policy_type_id: String,
    /// URL PMS calls back with status notifications
    pub callback_url: String,
    /// Value for `Access-Control-Allow-Origin`
    pub cors_allow_origin: String,
    /// HTTP listen address
    pub bind_address: SocketAddr,
    /// Keepalive interval announced to PMS at registration
    pub keep_alive_interval_seconds: u64,
    /// How often the keepalive scheduler re-registers
    pub keepalive_period: Duration,
    /// `policy_data.limit` submitted at startup, kept in its written form
    pub initial_policy_limit: serde_json::Number,
    /// Backoff used by the startup sequence
    pub retry: RetryPolicy,
    /// Export traces over OTLP in addition to console logging
    pub otel_enabled: bool,
}

impl Default for RappConfig {
    fn default() -> Self {
        RappConfig {
            pms_url: DEFAULT_PMS_URL.to_string(),
            service_id: "demo-rapp".to_string(),
            ric_id: "ric2".to_string(),
            policy_id: "demo-policy-go".to_string(),
            policy_type_id: String::new(),
            callback_url: "http://demo-rapp:8080/callback".to_string(),
            cors_allow_origin: "*".to_string(),
            bind_address: SocketAddr::from(([0, 0, 0, 0], 8080)),
            keep_alive_interval_seconds: 3600,
            keepalive_period: Duration::from_secs(300),
            initial_policy_limit: serde_json::Number::from(21),
            retry: RetryPolicy::default(),
            otel_enabled: false,
        }
    }
}

impl RappConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = RappConfig::default();

        let retry = RetryPolicy {
            initial_delay: Duration::from_millis(parse_or(
                &get,
                "RETRY_INITIAL_DELAY_MS",
                defaults.retry.initial_delay.as_millis() as u64,
            )?),
            max_delay: Duration::from_millis(parse_or(
                &get,
                "RETRY_MAX_DELAY_MS",
                defaults.retry.max_delay.as_millis() as u64,
            )?),
        };
        if retry.initial_delay.is_zero() {
            return Err(RappError::Config(
                "RETRY_INITIAL_DELAY_MS must be greater than zero".to_string(),
            ));
        }

        let keepalive_secs: u64 = parse_or(
            &get,
            "KEEPALIVE_PERIOD_SECONDS",
            defaults.keepalive_period.as_secs(),
        )?;
        if keepalive_secs == 0 {
            return Err(RappError::Config(
                "KEEPALIVE_PERIOD_SECONDS must be greater than zero".to_string(),
            ));
        }

        Ok(RappConfig {
            pms_url: get("PMS_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.pms_url),
            service_id: get("SERVICE_ID").unwrap_or(defaults.service_id),
            ric_id: get("RIC_ID").unwrap_or(defaults.ric_id),
            policy_id: get("POLICY_ID").unwrap_or(defaults.policy_id),
            policy_type_id: get("POLICY_TYPE_ID").unwrap_or(defaults.policy_type_id),
            callback_url: get("CALLBACK_URL").unwrap_or(defaults.callback_url),
            cors_allow_origin: get("CORS_ALLOW_ORIGIN").unwrap_or(defaults.cors_allow_origin),
            bind_address: parse_or(&get, "BIND_ADDRESS", defaults.bind_address)?,
            keep_alive_interval_seconds: parse_or(
                &get,
                "KEEP_ALIVE_INTERVAL_SECONDS",
                defaults.keep_alive_interval_seconds,
            )?,
            keepalive_period: Duration::from_secs(keepalive_secs),
            initial_policy_limit: parse_or(
                &get,
                "INITIAL_POLICY_LIMIT",
                defaults.initial_policy_limit,
            )?,
            retry,
            otel_enabled: parse_flag(&get, "OTEL_ENABLED", defaults.otel_enabled)?,
        })
    }

    /// Registration body sent at startup and on every keepalive
    pub fn registration_request(&self) -> RegistrationRequest {
        RegistrationRequest {
            service_id: self.service_id.clone(),
            keep_alive_interval_seconds: self.keep_alive_interval_seconds,
            callback_url: self.callback_url.clone(),
        }
    }

    /// Policy instance targeting the configured RIC with the given payload
    pub fn policy_request(&self, policy_data: serde_json::Value) -> PolicyRequest {
        PolicyRequest {
            policy_id: self.policy_id.clone(),
            ric_id: self.ric_id.clone(),
            policytype_id: self.policy_type_id.clone(),
            service_id: self.service_id.clone(),
            status_notification_uri: self.callback_url.clone(),
            policy_data,
        }
    }

    /// Policy submitted once the service is registered
    pub fn startup_policy(&self) -> PolicyRequest {
        self.policy_request(json!({
            "note": "hello-from-rapp",
            "limit": self.initial_policy_limit,
        }))
    }
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| RappError::Config(format!("{} ({:?}): {}", key, raw, e))),
        None => Ok(default),
    }
}

/// `true`/`false` in any letter case
fn parse_flag<G>(get: &G, key: &str, default: bool) -> Result<bool>
where
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .to_ascii_lowercase()
            .parse()
            .map_err(|e| RappError::Config(format!("{} ({:?}): {}", key, raw, e))),
        None => Ok(default),
    }
}
