use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryCatalogStore, InMemoryProfileStore};
use crate::routes::with_eligibility_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use scheme_finder::config::AppConfig;
use scheme_finder::eligibility::EligibilityService;
use scheme_finder::error::AppError;
use scheme_finder::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(catalog) = args.catalog.take() {
        config.catalog.path = Some(catalog);
    }

    telemetry::init(&config.telemetry, config.environment)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let catalog = InMemoryCatalogStore::load(config.catalog.path.as_deref())?;
    let program_count = catalog.len();
    let service = Arc::new(EligibilityService::new(
        Arc::new(InMemoryProfileStore::default()),
        Arc::new(catalog),
    ));

    let app = with_eligibility_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, programs = program_count, "scheme finder ready");

    axum::serve(listener, app).await?;
    Ok(())
}
