//! rApp HTTP Server binary

use anyhow::Context;
use rapp_core::{PmsClient, RappConfig, ReadinessFlag, RegistrationSequencer};
use rapp_server::{build_router, AppState};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = RappConfig::from_env().context("Invalid configuration")?;
    let enable_otel = config.otel_enabled;

    // Initialize OpenTelemetry tracing
    if enable_otel {
        rapp_server::tracing::init_tracing_stack("rapp-server")?;
        info!("OpenTelemetry tracing enabled");
    } else {
        rapp_server::tracing::init_console_logging()?;
        info!("Console logging enabled (set OTEL_ENABLED=true for OpenTelemetry)");
    }

    info!("Starting rApp server v{}", env!("CARGO_PKG_VERSION"));

    // Initialize Prometheus metrics
    rapp_server::metrics::init_prometheus()?;
    rapp_server::metrics::init_metrics();

    let client = PmsClient::new(&config.pms_url).context("Invalid PMS_URL")?;
    let readiness = ReadinessFlag::new();

    let listener = tokio::net::TcpListener::bind(config.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address))?;

    info!(
        addr = %config.bind_address,
        pms = %config.pms_url,
        service = %config.service_id,
        ric = %config.ric_id,
        policy = %config.policy_id,
        "rApp listening"
    );

    // Startup sequence runs alongside the server; /readyz flips when it completes
    let sequencer = RegistrationSequencer::from_config(&config, client.clone(), readiness.clone());
    let sequencer_handle = sequencer.spawn();

    let app = build_router(AppState::new(config, client, readiness));

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install CTRL+C signal handler");
            std::future::pending::<()>().await;
        }
        info!("Received shutdown signal, shutting down gracefully...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    sequencer_handle.abort();

    if enable_otel {
        info!("Flushing OpenTelemetry traces...");
        rapp_server::tracing::shutdown_telemetry();
    }

    info!("Server shutdown complete");
    Ok(())
}
