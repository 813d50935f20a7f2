//! Logging setup and OpenTelemetry tracing integration for the rApp server

use opentelemetry::KeyValue;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    runtime,
    trace::{self, RandomIdGenerator, Sampler},
    Resource,
};
use std::time::Duration;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{
    layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, FmtSubscriber, Registry,
};

const DEFAULT_FILTER: &str = "info,rapp_core=debug,rapp_server=debug";

/// Initialize OpenTelemetry with OTLP exporter
pub fn init_telemetry(service_name: &str) -> anyhow::Result<opentelemetry_sdk::trace::Tracer> {
    let endpoint = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
        .unwrap_or_else(|_| "http://localhost:4317".to_string());

    let resource = Resource::new(vec![
        KeyValue::new("service.name", service_name.to_string()),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);

    let exporter = opentelemetry_otlp::new_exporter()
        .tonic()
        .with_endpoint(endpoint)
        .with_timeout(Duration::from_secs(3));

    let sampler_arg = std::env::var("OTEL_TRACES_SAMPLER_ARG").ok();
    let tracer = opentelemetry_otlp::new_pipeline()
        .tracing()
        .with_exporter(exporter)
        .with_trace_config(
            trace::config()
                .with_sampler(sampler_from(sampler_arg.as_deref()))
                .with_id_generator(RandomIdGenerator::default())
                .with_resource(resource),
        )
        .install_batch(runtime::Tokio)?;

    Ok(tracer)
}

/// Sampler for a `OTEL_TRACES_SAMPLER_ARG` value; unset or invalid means always on
fn sampler_from(arg: Option<&str>) -> Sampler {
    let sample_rate = arg.and_then(|s| s.parse::<f64>().ok()).unwrap_or(1.0);

    if sample_rate >= 1.0 {
        Sampler::AlwaysOn
    } else if sample_rate <= 0.0 {
        Sampler::AlwaysOff
    } else {
        Sampler::TraceIdRatioBased(sample_rate)
    }
}

/// Initialize the complete tracing stack (console + OpenTelemetry)
pub fn init_tracing_stack(service_name: &str) -> anyhow::Result<()> {
    let tracer = init_telemetry(service_name)?;
    let otel_layer = OpenTelemetryLayer::new(tracer);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_thread_ids(true)
        .with_thread_names(true);

    Registry::default()
        .with(env_filter())
        .with(fmt_layer)
        .with(otel_layer)
        .init();

    Ok(())
}

/// Console-only logging
pub fn init_console_logging() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Shutdown OpenTelemetry provider
pub fn shutdown_telemetry() {
    opentelemetry::global::shutdown_tracer_provider();
}

/// Span around a request forwarded to PMS
pub fn proxy_span(method: &str, path: &str) -> tracing::Span {
    tracing::info_span!(
        "pms_proxy",
        method = %method,
        path = %path,
        otel.kind = "client",
        http.status_code = tracing::field::Empty,
        otel.status_code = tracing::field::Empty,
    )
}

/// Record the upstream status in the current span
pub fn record_status(status: u16) {
    let span = tracing::Span::current();
    span.record("http.status_code", status);
    if status >= 500 {
        span.record("otel.status_code", "ERROR");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::subscriber::with_default;

    #[test]
    fn test_sampler_always_on() {
        assert!(matches!(sampler_from(Some("1.0")), Sampler::AlwaysOn));
        assert!(matches!(sampler_from(Some("2.0")), Sampler::AlwaysOn));
    }

    #[test]
    fn test_sampler_always_off() {
        assert!(matches!(sampler_from(Some("0.0")), Sampler::AlwaysOff));
        assert!(matches!(sampler_from(Some("-0.5")), Sampler::AlwaysOff));
    }

    #[test]
    fn test_sampler_ratio_based() {
        assert!(matches!(
            sampler_from(Some("0.5")),
            Sampler::TraceIdRatioBased(_)
        ));
        assert!(matches!(
            sampler_from(Some("0.001")),
            Sampler::TraceIdRatioBased(_)
        ));
    }

    #[test]
    fn test_sampler_defaults() {
        assert!(matches!(sampler_from(None), Sampler::AlwaysOn));
        assert!(matches!(sampler_from(Some("invalid")), Sampler::AlwaysOn));
    }

    #[test]
    fn test_shutdown_telemetry() {
        shutdown_telemetry();
    }

    #[test]
    fn test_proxy_span() {
        let subscriber = Registry::default();
        with_default(subscriber, || {
            let span = proxy_span("GET", "/a1-policy/v2/rics");
            assert_eq!(span.metadata().unwrap().name(), "pms_proxy");

            let _guard = span.enter();
            record_status(502);
        });
    }
}
