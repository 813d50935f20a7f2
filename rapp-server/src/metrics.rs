//! Prometheus metrics for the rApp server

use metrics::{counter, describe_counter};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

/// Counter of inbound HTTP requests
pub const HTTP_REQUESTS_TOTAL: &str = "rapp_http_requests_total";

/// Initialize all metric descriptions
pub fn init_metrics() {
    describe_counter!(HTTP_REQUESTS_TOTAL, "HTTP requests by path & code");
    rapp_core::metrics::describe();
    rapp_core::metrics::set_ready(false);
}

/// Record a served request
pub fn record_http_request(path: &str, code: u16) {
    counter!(HTTP_REQUESTS_TOTAL, 1, "path" => path.to_string(), "code" => code.to_string());
}

/// Storage for Prometheus handle
static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder as the global metrics recorder
pub fn init_prometheus() -> anyhow::Result<()> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| anyhow::anyhow!("Failed to set Prometheus handle"))?;
    Ok(())
}

/// Render metrics in the Prometheus text format
pub fn get_prometheus_metrics() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Prometheus metrics not initialized\n".to_string())
}
