//! Prometheus export for everything recorded through the `metrics` macros.

use crate::error::AppError;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

/// Global handle to the Prometheus recorder.
static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder. Call once at startup, before any metric is
/// recorded; a second call is an error.
pub fn init_metrics() -> Result<(), AppError> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| AppError::TelemetryError(e.to_string()))?;

    METRICS_HANDLE
        .set(handle)
        .map_err(|_| AppError::TelemetryError("metrics handle already initialized".to_string()))
}

/// Current metrics in Prometheus text format.
pub fn render_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_without_recorder() {
        if METRICS_HANDLE.get().is_none() {
            assert_eq!(render_metrics(), "# Metrics recorder not initialized");
        }
    }
}
