use crate::cli::ServeArgs;
use crate::infra::{load_knowledge, resolve_dataset_path, AppState};
use crate::routes::with_questionnaire_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use chrono::Duration;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;
use vark_expert::config::AppConfig;
use vark_expert::error::AppError;
use vark_expert::questionnaire::{InMemorySessionRepository, QuestionnaireService};
use vark_expert::telemetry::{self, LogOutput};

pub(crate) async fn run(mut args: ServeArgs, dataset: Option<PathBuf>) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry, LogOutput::Stdout)?;

    let dataset_path = resolve_dataset_path(dataset, &config.dataset);
    let knowledge = load_knowledge(dataset_path.as_deref())?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let idle_timeout = Duration::seconds(i64::from(config.sessions.idle_timeout_secs));
    let repository = Arc::new(InMemorySessionRepository::with_idle_timeout(idle_timeout));
    let service = Arc::new(QuestionnaireService::new(repository, knowledge.clone()));

    let app = with_questionnaire_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        questions = knowledge.questions().len(),
        rules = knowledge.rules().len(),
        session_idle_timeout_secs = config.sessions.idle_timeout_secs,
        "VARK questionnaire service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
