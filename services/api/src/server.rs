use crate::cli::ServeArgs;
use crate::infra::{build_review_store, AppState};
use crate::routes::with_summary_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use playground_reviews::config::AppConfig;
use playground_reviews::error::AppError;
use playground_reviews::summary::{GradioSummaryClient, ReviewSummaryService};
use playground_reviews::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = Arc::new(build_review_store(&config.data)?);
    let client = GradioSummaryClient::new(&config.summary)?;
    match client.endpoint() {
        Some(endpoint) => info!(
            %endpoint,
            timeout = ?config.summary.timeout,
            "summary endpoint configured"
        ),
        None => warn!("AI_SUMMARY_API_URL is not set; every summary request will fail"),
    }
    let summary_service = Arc::new(ReviewSummaryService::new(store, Arc::new(client)));

    let app = with_summary_routes(summary_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "playground review service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
