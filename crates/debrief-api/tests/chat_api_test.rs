//! Chat endpoint tests.
//!
//! Runs the router in-process against the scripted mock gateway and checks
//! what context, if any, reaches the model for each meeting reference shape.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use chrono::Utc;
use tower::ServiceExt;
use uuid::Uuid;

use debrief_api::{router, AppState};
use debrief_core::models::{FactCheck, Improvements, Meeting, Summary, TaskList};
use debrief_core::MeetingStore;
use debrief_inference::mock::MockGateway;
use debrief_inference::ModelGateway;
use debrief_pipeline::pacing::NoDelay;
use debrief_pipeline::{AnalysisPipeline, ChatService};

/// Router state wired to a scripted gateway, with pacing and rate limiting
/// disabled.
fn test_state(gateway: &MockGateway) -> AppState {
    let gateway: Arc<dyn ModelGateway> = Arc::new(gateway.clone());
    let store = Arc::new(MeetingStore::new());
    let pipeline = Arc::new(
        AnalysisPipeline::new(gateway.clone(), store.clone()).with_pacing(Arc::new(NoDelay)),
    );
    let chat = Arc::new(ChatService::new(gateway.clone(), store.clone()));
    AppState {
        store,
        gateway,
        pipeline,
        chat,
        rate_limiter: None,
    }
}

fn stored_meeting() -> Meeting {
    Meeting {
        id: Uuid::new_v4(),
        filename: "allhands.mp3".to_string(),
        timestamp: Utc::now(),
        transcription: "Speaker 1: Welcome to the all-hands.".to_string(),
        summary: Summary {
            overview: "Company all-hands with Q3 numbers.".to_string(),
            ..Summary::default()
        },
        tasks: TaskList::default(),
        improvements: Improvements::default(),
        fact_check: FactCheck::default(),
    }
}

fn chat_request(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_chat_relays_the_model_reply() {
    let gateway = MockGateway::new().with_reply("Meetings work best with an agenda.");
    let state = test_state(&gateway);
    let app = router(state);

    let response = app
        .oneshot(chat_request(serde_json::json!({
            "message": "How do I run better meetings?"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["response"], "Meetings work best with an agenda.");
}

#[tokio::test]
async fn test_chat_includes_context_for_stored_meeting() {
    let gateway = MockGateway::new().with_reply("The Q3 numbers were discussed.");
    let state = test_state(&gateway);
    let meeting = stored_meeting();
    let id = meeting.id;
    state.store.put(meeting).await;
    let app = router(state);

    let response = app
        .oneshot(chat_request(serde_json::json!({
            "message": "What was discussed?",
            "meetingId": id.to_string(),
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["response"], "The Q3 numbers were discussed.");

    // The prompt carried the stored meeting's content
    let sent = &gateway.calls()[0].text;
    assert!(sent.contains("Welcome to the all-hands."));
    assert!(sent.contains("Q3 numbers"));
    assert!(sent.contains("What was discussed?"));
}

#[tokio::test]
async fn test_chat_answers_without_context_for_unknown_meeting() {
    let gateway = MockGateway::new().with_reply("I have no record of that meeting.");
    let state = test_state(&gateway);
    state.store.put(stored_meeting()).await;
    let app = router(state);

    let response = app
        .oneshot(chat_request(serde_json::json!({
            "message": "What was discussed?",
            "meetingId": Uuid::new_v4().to_string(),
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);

    // No context block was attached
    let sent = &gateway.calls()[0].text;
    assert!(!sent.contains("Transcription:"));
    assert!(sent.contains("What was discussed?"));
}

#[tokio::test]
async fn test_chat_treats_malformed_meeting_id_as_absent() {
    let gateway = MockGateway::new().with_reply("Happy to help.");
    let state = test_state(&gateway);
    state.store.put(stored_meeting()).await;
    let app = router(state);

    let response = app
        .oneshot(chat_request(serde_json::json!({
            "message": "Any advice?",
            "meetingId": "not-a-uuid",
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let sent = &gateway.calls()[0].text;
    assert!(!sent.contains("Transcription:"));
}

#[tokio::test]
async fn test_chat_missing_message_is_rejected() {
    let gateway = MockGateway::new();
    let state = test_state(&gateway);
    let app = router(state);

    let response = app
        .oneshot(chat_request(serde_json::json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Message is required");
    assert_eq!(gateway.call_count(), 0);
}

#[tokio::test]
async fn test_chat_blank_message_is_rejected() {
    let gateway = MockGateway::new();
    let state = test_state(&gateway);
    let app = router(state);

    let response = app
        .oneshot(chat_request(serde_json::json!({"message": "   "})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Message is required");
    assert_eq!(gateway.call_count(), 0);
}

#[tokio::test]
async fn test_chat_upstream_failure_returns_500() {
    let gateway = MockGateway::new().with_rejected("quota exceeded");
    let state = test_state(&gateway);
    let app = router(state);

    let response = app
        .oneshot(chat_request(serde_json::json!({"message": "Hello?"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Error processing chat message");
    assert!(body["details"].as_str().unwrap().contains("quota exceeded"));
}
