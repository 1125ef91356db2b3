//! Meeting listing and detail endpoint tests.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
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

fn stored_meeting(filename: &str, overview: &str) -> Meeting {
    Meeting {
        id: Uuid::new_v4(),
        filename: filename.to_string(),
        timestamp: Utc::now(),
        transcription: "Speaker 1: Hello everyone.".to_string(),
        summary: Summary {
            overview: overview.to_string(),
            ..Summary::default()
        },
        tasks: TaskList::default(),
        improvements: Improvements::default(),
        fact_check: FactCheck::default(),
    }
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_list_meetings_on_empty_store() {
    let gateway = MockGateway::new();
    let state = test_state(&gateway);
    let app = router(state);

    let response = app.oneshot(get("/api/meetings")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["meetings"], serde_json::json!([]));
}

#[tokio::test]
async fn test_list_meetings_most_recent_first_with_truncated_summaries() {
    let gateway = MockGateway::new();
    let state = test_state(&gateway);
    let first = stored_meeting("kickoff.mp3", "Project kickoff.");
    let second = stored_meeting("retro.wav", &"x".repeat(400));
    let second_id = second.id;
    state.store.put(first).await;
    state.store.put(second).await;
    let app = router(state);

    let response = app.oneshot(get("/api/meetings")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let meetings = body["meetings"].as_array().unwrap();
    assert_eq!(meetings.len(), 2);
    assert_eq!(meetings[0]["id"], second_id.to_string());
    assert_eq!(meetings[0]["filename"], "retro.wav");

    // Long overviews are cut to a preview snippet
    let preview = meetings[0]["summary"].as_str().unwrap();
    assert!(preview.ends_with("..."));
    assert!(preview.chars().count() < 400);
    assert_eq!(meetings[1]["summary"], "Project kickoff.");
}

#[tokio::test]
async fn test_get_meeting_returns_the_full_record() {
    let gateway = MockGateway::new();
    let state = test_state(&gateway);
    let meeting = stored_meeting("kickoff.mp3", "Project kickoff.");
    let id = meeting.id;
    state.store.put(meeting).await;
    let app = router(state);

    let response = app
        .oneshot(get(&format!("/api/meeting/{}", id)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["meeting"]["id"], id.to_string());
    assert_eq!(body["meeting"]["filename"], "kickoff.mp3");
    assert_eq!(body["meeting"]["transcription"], "Speaker 1: Hello everyone.");
    assert_eq!(body["meeting"]["summary"]["overview"], "Project kickoff.");
    // The full record carries all four analyses, camelCase keys included
    assert_eq!(
        body["meeting"]["factCheck"]["transcriptionQuality"]["rating"],
        "unknown"
    );
    assert!(body["meeting"]["tasks"]["tasks"].as_array().is_some());
}

#[tokio::test]
async fn test_get_meeting_unknown_id_returns_404() {
    let gateway = MockGateway::new();
    let state = test_state(&gateway);
    state.store.put(stored_meeting("kickoff.mp3", "Kickoff.")).await;
    let app = router(state);

    let response = app
        .oneshot(get(&format!("/api/meeting/{}", Uuid::new_v4())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Meeting not found");
}

#[tokio::test]
async fn test_get_meeting_unparseable_id_returns_404() {
    let gateway = MockGateway::new();
    let state = test_state(&gateway);
    let app = router(state);

    let response = app.oneshot(get("/api/meeting/not-a-uuid")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Meeting not found");
}
