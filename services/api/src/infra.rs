use metrics_exporter_prometheus::PrometheusHandle;
use retention_eligibility::config::AppConfig;
use retention_eligibility::workflows::retention::{
    ContractSource, EligibilityConfig, RetentionDesk,
};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) source: Arc<ContractSource>,
}

/// Desk over the configured spreadsheet. Nothing is read until the first
/// query or an explicit warm-up.
pub(crate) fn build_desk(config: &AppConfig) -> RetentionDesk {
    RetentionDesk::new(
        Arc::new(ContractSource::new(config.dataset.path.clone())),
        EligibilityConfig::standard(),
    )
}
