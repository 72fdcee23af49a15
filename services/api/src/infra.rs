use axum::http::header::CONTENT_TYPE;
use axum::http::Method;
use metrics_exporter_prometheus::PrometheusHandle;
use solar_survey::config::{ConfigError, ServerConfig, StorageConfig};
use solar_survey::survey::{JsonFileSurveyStore, SurveyService, UnknownOption};
use std::str::FromStr;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn open_survey_service(storage: &StorageConfig) -> SurveyService<JsonFileSurveyStore> {
    let store = Arc::new(JsonFileSurveyStore::new(storage.data_path.clone()));
    SurveyService::new(store)
}

/// Browser access for the survey frontend, limited to the configured origins.
pub(crate) fn build_cors_layer(config: &ServerConfig) -> Result<CorsLayer, ConfigError> {
    let origins = config.cors_header_values()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(3600)))
}

/// clap value parser accepting the same labels the survey form posts.
pub(crate) fn parse_label<T>(raw: &str) -> Result<T, String>
where
    T: FromStr<Err = UnknownOption>,
{
    raw.parse::<T>().map_err(|err| err.to_string())
}
