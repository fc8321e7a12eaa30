use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::json;

mod support;

use support::{app_with, get, post_json, send, token_for, PortalBehavior, RecordingConnector};

#[tokio::test]
async fn transcript_reports_weighted_gpa_excluding_registered_rows() {
    let connector = RecordingConnector::new(PortalBehavior::Ok);
    let app = app_with(connector.clone());
    let token = token_for("alice", "pw", false);

    let (status, body) = send(&app, get("/api/transcript", Some(&token))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cumGPA"], "3.65");
    assert_eq!(body["totalCredits"], json!(6));
    assert_eq!(body["courses"].as_array().map(Vec::len), Some(3));
    assert_eq!(connector.connects(), 1);
}

#[tokio::test]
async fn demo_token_serves_canned_transcript() {
    let connector = RecordingConnector::new(PortalBehavior::Fail);
    let app = app_with(connector.clone());
    let token = token_for("demo", "demo", true);

    let (status, body) = send(&app, get("/api/transcript", Some(&token))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cumGPA"], "3.51");
    assert_eq!(body["totalCredits"], json!(20));
    assert_eq!(connector.connects(), 0);
}

#[tokio::test]
async fn demo_query_override_switches_to_canned_data() {
    let connector = RecordingConnector::new(PortalBehavior::Fail);
    let app = app_with(connector.clone());
    let token = token_for("alice", "pw", false);

    let (status, _) = send(
        &app,
        get(
            "/api/transcript?username=demo&password=demo",
            Some(&token),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        post_json(
            "/api/transcript",
            Some(&token),
            json!({"username": "demo", "password": "demo"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(connector.connects(), 0);
}

#[tokio::test]
async fn non_demo_override_keeps_token_identity() {
    let connector = RecordingConnector::new(PortalBehavior::Ok);
    let app = app_with(connector.clone());
    let token = token_for("alice", "pw", false);

    let (status, body) = send(
        &app,
        get("/api/transcript?username=mallory&password=x", Some(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cumGPA"], "3.65");
    assert_eq!(connector.connects(), 1);
}

#[tokio::test]
async fn post_without_body_uses_token_session() {
    let connector = RecordingConnector::new(PortalBehavior::Ok);
    let app = app_with(connector.clone());
    let token = token_for("alice", "pw", false);

    let request = Request::builder()
        .method("POST")
        .uri("/api/transcript")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .expect("build request");
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalCredits"], json!(6));
    assert_eq!(connector.connects(), 1);
}

#[tokio::test]
async fn upstream_failures_map_to_error_codes() {
    let token = token_for("alice", "pw", false);

    let app = app_with(RecordingConnector::new(PortalBehavior::RejectCredentials));
    let (status, body) = send(&app, get("/api/transcript", Some(&token))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UPSTREAM_AUTH_FAILED");

    let app = app_with(RecordingConnector::new(PortalBehavior::Malformed));
    let (status, body) = send(&app, get("/api/transcript", Some(&token))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "UPSTREAM_DATA_ERROR");

    let app = app_with(RecordingConnector::new(PortalBehavior::Fail));
    let (status, body) = send(&app, get("/api/transcript", Some(&token))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to fetch transcript");
    assert_eq!(body["code"], "PORTAL_DOWN");
    assert_eq!(body["message"], "portal unavailable");
}
