use crate::config::ConfigError;
use crate::questionnaire::{
    DatasetError, QuestionnaireServiceError, RepositoryError, SessionError,
};
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Dataset(DatasetError),
    Questionnaire(QuestionnaireServiceError),
    Json(serde_json::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Dataset(err) => write!(f, "dataset error: {}", err),
            AppError::Questionnaire(err) => write!(f, "questionnaire error: {}", err),
            AppError::Json(err) => write!(f, "serialization error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Dataset(err) => Some(err),
            AppError::Questionnaire(err) => Some(err),
            AppError::Json(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Questionnaire(err) => questionnaire_status(err),
            AppError::Dataset(DatasetError::Csv(_) | DatasetError::InvalidRecord { .. }) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Dataset(_)
            | AppError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

fn questionnaire_status(error: &QuestionnaireServiceError) -> StatusCode {
    match error {
        QuestionnaireServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        QuestionnaireServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        QuestionnaireServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        QuestionnaireServiceError::Session(_) => StatusCode::CONFLICT,
        QuestionnaireServiceError::UnknownQuestion(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<DatasetError> for AppError {
    fn from(value: DatasetError) -> Self {
        Self::Dataset(value)
    }
}

impl From<QuestionnaireServiceError> for AppError {
    fn from(value: QuestionnaireServiceError) -> Self {
        Self::Questionnaire(value)
    }
}

impl From<SessionError> for AppError {
    fn from(value: SessionError) -> Self {
        Self::Questionnaire(QuestionnaireServiceError::Session(value))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questionnaire::RecordError;

    #[test]
    fn unknown_question_maps_to_unprocessable() {
        let error = AppError::from(QuestionnaireServiceError::UnknownQuestion("Z9".to_string()));
        assert_eq!(error.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn malformed_dataset_maps_to_bad_request() {
        let error = AppError::from(DatasetError::InvalidRecord {
            line: 4,
            reason: RecordError::MissingCode,
        });
        assert_eq!(
            error.to_string(),
            "dataset error: invalid dataset row on line 4: question row has no code"
        );
        assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_session_maps_to_not_found() {
        let error = AppError::from(QuestionnaireServiceError::Repository(RepositoryError::NotFound));
        assert_eq!(error.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn unavailable_store_maps_to_server_error() {
        let error = AppError::from(QuestionnaireServiceError::Repository(
            RepositoryError::Unavailable("offline".to_string()),
        ));
        assert_eq!(error.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn session_errors_map_to_conflict() {
        let error = AppError::from(SessionError::NotScored);
        assert_eq!(error.into_response().status(), StatusCode::CONFLICT);
    }
}
