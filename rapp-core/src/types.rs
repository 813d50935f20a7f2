//! A1-P wire types exchanged with the policy-management service

use serde::{Deserialize, Serialize};

/// PMS path for service registration
pub const SERVICES_PATH: &str = "/a1-policy/v2/services";
/// PMS path for policy instance upserts
pub const POLICIES_PATH: &str = "/a1-policy/v2/policies";
/// PMS path listing policy instances
pub const POLICY_INSTANCES_PATH: &str = "/a1-policy/v2/policy-instances";
/// PMS path listing policy types
pub const POLICY_TYPES_PATH: &str = "/a1-policy/v2/policy-types";
/// PMS path listing RICs
pub const RICS_PATH: &str = "/a1-policy/v2/rics";

/// Service registration body (`PUT /a1-policy/v2/services`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    /// Identifier of this rApp
    pub service_id: String,

    /// How long PMS keeps the registration without a refresh
    pub keep_alive_interval_seconds: u64,

    /// Where PMS delivers service notifications
    pub callback_url: String,
}

/// Policy instance body (`PUT /a1-policy/v2/policies`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyRequest {
    /// Policy instance identifier
    pub policy_id: String,

    /// Target RIC
    pub ric_id: String,

    /// Policy type; empty for untyped simulators
    pub policytype_id: String,

    /// Owning service
    pub service_id: String,

    /// Where PMS reports policy status changes
    pub status_notification_uri: String,

    /// Opaque policy payload, forwarded as-is
    pub policy_data: serde_json::Value,
}

impl PolicyRequest {
    /// `policy_data.limit`, when the payload carries a numeric one
    pub fn limit(&self) -> Option<f64> {
        self.policy_data.get("limit").and_then(|v| v.as_f64())
    }
}
