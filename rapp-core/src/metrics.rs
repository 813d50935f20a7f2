//! A1 metrics recorded by the background sequence and the proxy
//!
//! These go through the global `metrics` recorder; the server installs the
//! Prometheus exporter. Without a recorder every call is a no-op.

use metrics::{counter, describe_counter, describe_gauge, gauge};

/// Counter of PUTs to PMS that produced a response
pub const A1_PUT_TOTAL: &str = "rapp_a1_put_total";
/// Counter of PUTs to PMS that failed before a response arrived
pub const A1_PUT_ERRORS_TOTAL: &str = "rapp_a1_put_errors_total";
/// Gauge holding the last attempted `policy_data.limit`
pub const POLICY_LIMIT: &str = "rapp_policy_limit";
/// Gauge mirroring the readiness flag
pub const READY: &str = "rapp_ready";

/// Register descriptions for the A1 metrics
pub fn describe() {
    describe_counter!(A1_PUT_TOTAL, "A1 PUT calls to PMS by resource");
    describe_counter!(
        A1_PUT_ERRORS_TOTAL,
        "A1 PUT calls to PMS that failed at the transport level"
    );
    describe_gauge!(
        POLICY_LIMIT,
        "Current policy_data.limit the rApp last attempted"
    );
    describe_gauge!(READY, "1 once service registration and policy submission succeeded");
}

/// Record an A1 PUT answered by PMS
pub fn record_put(resource: &str, status: u16) {
    counter!(A1_PUT_TOTAL, 1, "resource" => resource.to_string(), "status" => status.to_string());
}

/// Record an A1 PUT that never got a response
pub fn record_put_error(resource: &str) {
    counter!(A1_PUT_ERRORS_TOTAL, 1, "resource" => resource.to_string());
}

/// Record the policy limit about to be submitted
pub fn set_policy_limit(limit: f64) {
    gauge!(POLICY_LIMIT, limit);
}

/// Mirror the readiness flag
pub fn set_ready(ready: bool) {
    gauge!(READY, if ready { 1.0 } else { 0.0 });
}
