//! API request and response types

use rapp_core::{PolicyRequest, RappConfig};
use serde::{Deserialize, Serialize};

/// Liveness / acknowledgement body: `{"ok":true}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `true` when the process answers
    pub ok: bool,
}

impl HealthResponse {
    /// The only body ever sent
    pub const OK: HealthResponse = HealthResponse { ok: true };
}

/// Body of `POST /api/policies/limit`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LimitRequest {
    /// New `policy_data.limit`, forwarded with the number's original form;
    /// absent or `null` means `0`
    #[serde(default)]
    pub limit: Option<serde_json::Number>,
}

impl LimitRequest {
    /// Limit to submit
    pub fn limit(&self) -> serde_json::Number {
        self.limit
            .clone()
            .unwrap_or_else(|| serde_json::Number::from(0))
    }
}

/// Body of `POST /api/policies`
///
/// Missing or empty identifiers fall back to the configured ones.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PolicyDocument {
    /// Policy instance identifier
    pub policy_id: Option<String>,
    /// Target RIC
    pub ric_id: Option<String>,
    /// Policy type identifier
    pub policytype_id: Option<String>,
    /// Owning service
    pub service_id: Option<String>,
    /// Where PMS reports status changes
    pub status_notification_uri: Option<String>,

    /// Opaque payload, forwarded as-is
    #[serde(default)]
    pub policy_data: serde_json::Value,
}

impl PolicyDocument {
    /// Fill unset fields from configuration
    pub fn into_policy(self, config: &RappConfig) -> PolicyRequest {
        PolicyRequest {
            policy_id: or_configured(self.policy_id, &config.policy_id),
            ric_id: or_configured(self.ric_id, &config.ric_id),
            policytype_id: or_configured(self.policytype_id, &config.policy_type_id),
            service_id: or_configured(self.service_id, &config.service_id),
            status_notification_uri: or_configured(
                self.status_notification_uri,
                &config.callback_url,
            ),
            policy_data: self.policy_data,
        }
    }
}

/// Query parameters of `GET /api/policy-types`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PolicyTypesParams {
    /// Restrict the listing to one RIC; empty means no filter
    #[serde(default)]
    pub ric_id: Option<String>,
}

fn or_configured(value: Option<String>, configured: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => configured.to_string(),
    }
}
