use super::common::*;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::workflows::crew::domain::VisitStatus;
use crate::workflows::crew::router::{crew_router, match_handler, MatchRequest};

fn match_request(assign: &[&str]) -> Request<axum::body::Body> {
    let mut payload = serde_json::to_value(snapshot()).expect("snapshot serializes");
    payload["assign"] = json!(assign);
    Request::post("/api/v1/crew/match")
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            serde_json::to_vec(&payload).expect("payload serializes"),
        ))
        .expect("request builds")
}

fn ids_in(payload: &Value, key: &str) -> Vec<String> {
    payload[key]
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|entry| entry["id"].as_str().map(str::to_string))
        .collect()
}

#[tokio::test]
async fn match_route_ranks_pool_and_proposes_teams() {
    let response = crew_router(scorer())
        .oneshot(match_request(&[]))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["visit_id"], "visit-100");
    assert_eq!(payload["locked"], false);
    assert_eq!(payload["requirement_source"], "synthesized");
    assert_eq!(ids_in(&payload, "available")[0], "t-ana");
    assert_eq!(payload["available"][0]["score"], 100);
    assert_eq!(payload["available"][0]["trade_label"], "B1 Tech");
    assert_eq!(
        payload["available"][0]["components"]
            .as_array()
            .map(Vec::len),
        Some(5)
    );
    assert_eq!(payload["proposals"].as_array().map(Vec::len), Some(3));
    assert_eq!(payload["proposals"][0]["label"], "High-Performance");
    assert!(payload.get("status_change").is_none());
}

#[tokio::test]
async fn match_route_assigns_batch_and_reports_status_intent() {
    let response = crew_router(scorer())
        .oneshot(match_request(&["t-ana", "t-ben"]))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(ids_in(&payload, "assigned"), vec!["t-ana", "t-ben"]);
    assert_eq!(payload["status_change"]["to"], "in_progress");
    assert_eq!(payload["requirements"][0]["day_assigned"], 7);
    assert_eq!(payload["proposals"][0]["label"], "Best Available");
}

#[tokio::test]
async fn match_route_rejects_unknown_technician() {
    let response = crew_router(scorer())
        .oneshot(match_request(&["t-nobody"]))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .is_some_and(|message| message.contains("t-nobody")));
}

#[tokio::test]
async fn match_handler_returns_conflict_for_locked_visit() {
    let mut snapshot = snapshot();
    snapshot.visit.status = VisitStatus::InProgress;
    snapshot.assigned = vec![id("t-ben")];
    let request = MatchRequest {
        snapshot,
        assign: vec![id("t-ana")],
    };

    let response = match_handler(State(scorer()), axum::Json(request)).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn match_handler_summarizes_locked_visit_without_proposals() {
    let mut snapshot = snapshot();
    snapshot.visit.status = VisitStatus::Completed;
    snapshot.assigned = vec![id("t-ben"), id("t-eli")];
    let request = MatchRequest {
        snapshot,
        assign: Vec::new(),
    };

    let response = match_handler(State(scorer()), axum::Json(request)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["locked"], true);
    assert_eq!(payload["status_label"], "Completed");
    assert_eq!(ids_in(&payload, "assigned"), vec!["t-ben", "t-eli"]);
    assert_eq!(payload["proposals"], json!([]));
}
