use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use super::domain::Answers;
use super::report::DiagnosisView;
use super::repository::SessionRepository;
use super::service::QuestionnaireService;
use super::session::{SessionId, SessionView};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub(crate) struct AnswerRequest {
    pub(crate) answer: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DiagnoseRequest {
    #[serde(default)]
    pub(crate) answers: Answers,
}

/// Router builder exposing questionnaire sessions and stateless diagnosis.
pub fn questionnaire_router<R>(service: Arc<QuestionnaireService<R>>) -> Router
where
    R: SessionRepository + 'static,
{
    Router::new()
        .route("/api/v1/sessions", post(start_handler::<R>))
        .route(
            "/api/v1/sessions/:session_id",
            get(status_handler::<R>).delete(end_handler::<R>),
        )
        .route(
            "/api/v1/sessions/:session_id/answers",
            post(answer_handler::<R>),
        )
        .route("/api/v1/sessions/:session_id/back", post(back_handler::<R>))
        .route(
            "/api/v1/sessions/:session_id/reset",
            post(reset_handler::<R>),
        )
        .route(
            "/api/v1/sessions/:session_id/result",
            get(result_handler::<R>),
        )
        .route("/api/v1/diagnose", post(diagnose_handler::<R>))
        .with_state(service)
}

pub(crate) async fn start_handler<R>(
    State(service): State<Arc<QuestionnaireService<R>>>,
) -> Result<(StatusCode, Json<SessionView>), AppError>
where
    R: SessionRepository + 'static,
{
    let view = service.start()?;
    Ok((StatusCode::CREATED, Json(view)))
}

pub(crate) async fn status_handler<R>(
    State(service): State<Arc<QuestionnaireService<R>>>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionView>, AppError>
where
    R: SessionRepository + 'static,
{
    Ok(Json(service.get(&SessionId(session_id))?))
}

pub(crate) async fn end_handler<R>(
    State(service): State<Arc<QuestionnaireService<R>>>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, AppError>
where
    R: SessionRepository + 'static,
{
    service.end(&SessionId(session_id))?;
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn answer_handler<R>(
    State(service): State<Arc<QuestionnaireService<R>>>,
    Path(session_id): Path<String>,
    Json(request): Json<AnswerRequest>,
) -> Result<Json<SessionView>, AppError>
where
    R: SessionRepository + 'static,
{
    Ok(Json(service.answer(&SessionId(session_id), request.answer)?))
}

pub(crate) async fn back_handler<R>(
    State(service): State<Arc<QuestionnaireService<R>>>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionView>, AppError>
where
    R: SessionRepository + 'static,
{
    Ok(Json(service.back(&SessionId(session_id))?))
}

pub(crate) async fn reset_handler<R>(
    State(service): State<Arc<QuestionnaireService<R>>>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionView>, AppError>
where
    R: SessionRepository + 'static,
{
    Ok(Json(service.reset(&SessionId(session_id))?))
}

pub(crate) async fn result_handler<R>(
    State(service): State<Arc<QuestionnaireService<R>>>,
    Path(session_id): Path<String>,
) -> Result<Json<DiagnosisView>, AppError>
where
    R: SessionRepository + 'static,
{
    Ok(Json(service.result(&SessionId(session_id))?))
}

pub(crate) async fn diagnose_handler<R>(
    State(service): State<Arc<QuestionnaireService<R>>>,
    Json(request): Json<DiagnoseRequest>,
) -> Result<Json<DiagnosisView>, AppError>
where
    R: SessionRepository + 'static,
{
    Ok(Json(service.diagnose(&request.answers)?))
}
