use crate::cli::ServeArgs;
use crate::infra::{build_desk, AppState};
use crate::routes::with_operational_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use retention_eligibility::config::AppConfig;
use retention_eligibility::error::AppError;
use retention_eligibility::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{error, info};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(dataset) = args.dataset.take() {
        config.dataset.path = dataset;
    }

    telemetry::init(&config.telemetry)?;

    let desk = Arc::new(build_desk(&config));
    // Populate the load-once cache before accepting traffic.
    match desk.source().dataset() {
        Ok(dataset) => info!(records = dataset.len(), "contract base ready"),
        Err(err) => error!(%err, "serving without a contract base"),
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        source: desk.source_handle(),
    };

    let app = with_operational_routes(desk)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        dataset = %config.dataset.path.display(),
        "retention eligibility portal ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
