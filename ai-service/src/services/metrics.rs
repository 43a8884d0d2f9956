//! Metrics collection and Prometheus export.
//!
//! Initializes the metrics exporter, provides the /metrics endpoint body and
//! the provider-call recording helper.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::Duration;

use super::providers::ProviderError;

/// Global handle to the Prometheus recorder.
pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Initialize the metrics recorder.
///
/// Must be called once at startup before any metrics are recorded.
pub fn init_metrics() -> anyhow::Result<()> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("failed to install Prometheus recorder: {}", e))?;

    METRICS_HANDLE
        .set(handle)
        .map_err(|_| anyhow::anyhow!("metrics recorder already initialized"))?;

    tracing::info!("Prometheus metrics initialized");
    Ok(())
}

/// Get the current metrics in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string())
}

/// Record latency and outcome of one outbound provider call.
pub fn record_provider_call(
    operation: &'static str,
    model: &str,
    elapsed: Duration,
    error: Option<&ProviderError>,
) {
    histogram!(
        "ai_provider_latency_seconds",
        "operation" => operation,
        "model" => model.to_string()
    )
    .record(elapsed.as_secs_f64());

    if let Some(err) = error {
        counter!(
            "ai_provider_errors_total",
            "operation" => operation,
            "error_type" => err.kind()
        )
        .increment(1);
    }
}
