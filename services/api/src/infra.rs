use metrics_exporter_prometheus::PrometheusHandle;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;
use vark_expert::config::{AppConfig, DatasetConfig};
use vark_expert::error::AppError;
use vark_expert::questionnaire::{DatasetLoader, KnowledgeBase};
use vark_expert::telemetry::{self, LogOutput};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// A `--dataset` flag wins over `VARK_DATASET_PATH`.
pub(crate) fn resolve_dataset_path(
    cli_override: Option<PathBuf>,
    config: &DatasetConfig,
) -> Option<PathBuf> {
    cli_override.or_else(|| config.path.clone())
}

pub(crate) fn load_knowledge(path: Option<&Path>) -> Result<Arc<KnowledgeBase>, AppError> {
    let knowledge = match path {
        Some(path) => {
            let knowledge = DatasetLoader::from_path(path)?;
            info!(path = %path.display(), "loaded questionnaire dataset");
            knowledge
        }
        None => {
            let knowledge = KnowledgeBase::bundled()?;
            info!("loaded bundled questionnaire dataset");
            knowledge
        }
    };

    Ok(Arc::new(knowledge))
}

/// Shared setup for the terminal commands: config, stderr logging, dataset.
pub(crate) fn bootstrap_cli(dataset: Option<PathBuf>) -> Result<Arc<KnowledgeBase>, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry, LogOutput::Stderr)?;
    let path = resolve_dataset_path(dataset, &config.dataset);
    load_knowledge(path.as_deref())
}
