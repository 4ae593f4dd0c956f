use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use super::common::*;
use crate::questionnaire::router::questionnaire_router;

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).expect("json body")))
        .expect("request builds")
}

fn post_empty(uri: &str) -> Request<Body> {
    Request::post(uri).body(Body::empty()).expect("request builds")
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).expect("request builds")
}

#[tokio::test]
async fn start_route_creates_session() {
    let (service, _) = build_service();
    let router = questionnaire_router(service);

    let response = router
        .oneshot(post_empty("/api/v1/sessions"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["phase"], "collecting");
    assert_eq!(payload["current"]["code"], "Q1");
    assert_eq!(payload["scores"], json!({ "V": 0, "A": 0, "R": 0, "K": 0 }));
}

#[tokio::test]
async fn full_session_flow_over_http() {
    let (service, _) = build_service();
    let id = service.start().expect("session").session_id.0;
    let router = questionnaire_router(service);

    for answer in [true, true, false] {
        let response = router
            .clone()
            .oneshot(post_json(
                &format!("/api/v1/sessions/{id}/answers"),
                json!({ "answer": answer }),
            ))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = router
        .clone()
        .oneshot(get(&format!("/api/v1/sessions/{id}/result")))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["dominant"], json!(["V"]));
    assert_eq!(payload["profile"]["kind"], "single");
    assert_eq!(payload["matched_rules"], json!([]));

    let response = router
        .oneshot(post_json(
            &format!("/api/v1/sessions/{id}/answers"),
            json!({ "answer": true }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn result_route_conflicts_while_collecting() {
    let (service, _) = build_service();
    let id = service.start().expect("session").session_id.0;
    let router = questionnaire_router(service);

    let response = router
        .oneshot(get(&format!("/api/v1/sessions/{id}/result")))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn back_route_conflicts_on_first_question() {
    let (service, _) = build_service();
    let id = service.start().expect("session").session_id.0;
    let router = questionnaire_router(service);

    let response = router
        .oneshot(post_empty(&format!("/api/v1/sessions/{id}/back")))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload["error"],
        "questionnaire error: already at the first question"
    );
}

#[tokio::test]
async fn reset_route_clears_progress() {
    let (service, _) = build_service();
    let id = service.start().expect("session").session_id;
    service.answer(&id, true).expect("answer");
    let router = questionnaire_router(service);

    let response = router
        .oneshot(post_empty(&format!("/api/v1/sessions/{}/reset", id.0)))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["answered"], 0);
}

#[tokio::test]
async fn unknown_session_returns_not_found() {
    let (service, _) = build_service();
    let router = questionnaire_router(service);

    let response = router
        .oneshot(get("/api/v1/sessions/session-404"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn diagnose_route_scores_answer_maps() {
    let (service, _) = build_service();
    let router = questionnaire_router(service);

    let response = router
        .oneshot(post_json(
            "/api/v1/diagnose",
            json!({ "answers": { "Q1": true, "Q3": true } }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["dominant"], json!(["V"]));
    assert_eq!(payload["matched_rules"][0]["rule_ids"], json!(["R1"]));
    assert!(payload.get("rule_note").is_none());
}

#[tokio::test]
async fn diagnose_route_rejects_unknown_codes() {
    let (service, _) = build_service();
    let router = questionnaire_router(service);

    let response = router
        .oneshot(post_json(
            "/api/v1/diagnose",
            json!({ "answers": { "NOPE": true } }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn ended_session_is_gone() {
    let (service, repository) = build_service();
    let id = service.start().expect("session").session_id.0;
    let router = questionnaire_router(service);

    let delete = Request::delete(format!("/api/v1/sessions/{id}"))
        .body(Body::empty())
        .expect("request builds");
    let response = router.clone().oneshot(delete).await.expect("route executes");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(repository.is_empty());

    let response = router
        .oneshot(get(&format!("/api/v1/sessions/{id}")))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
