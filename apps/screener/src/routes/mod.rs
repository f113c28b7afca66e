pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::conversation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Screening sessions
        .route("/api/v1/sessions", post(handlers::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(handlers::handle_get_session).delete(handlers::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/messages",
            post(handlers::handle_message),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::config::Config;
    use crate::conversation::{ConversationManager, SessionStore};
    use crate::gateway::testing::{interviewer, ScriptedProvider};

    fn app() -> Router {
        let config = Config::from_lookup(|key| {
            (key == "ANTHROPIC_API_KEY").then(|| "sk-test".to_string())
        })
        .unwrap();
        let manager = ConversationManager::new(
            config.interview.clone(),
            interviewer(Arc::new(ScriptedProvider::new(vec![Err(500)]))),
        );
        build_router(AppState {
            config,
            manager: Arc::new(manager),
            sessions: Arc::new(SessionStore::new()),
        })
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(match body {
                Some(value) => Body::from(value.to_string()),
                None => Body::empty(),
            })
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn create(app: &Router) -> String {
        let (status, body) = send(app, Method::POST, "/api/v1/sessions", None).await;
        assert_eq!(status, StatusCode::CREATED);
        body["session_id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(&app(), Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "screener");
        assert_eq!(body["active_sessions"], 0);
    }

    #[tokio::test]
    async fn test_create_session_returns_consent_prompt() {
        let (status, body) = send(&app(), Method::POST, "/api/v1/sessions", None).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["turn"]["status"], "prompt");
        assert_eq!(body["turn"]["stage"], "consent");
        assert_eq!(body["turn"]["input"]["kind"], "confirmation");
    }

    #[tokio::test]
    async fn test_message_flow_and_view_hide_identity() {
        let app = app();
        let id = create(&app).await;
        let uri = format!("/api/v1/sessions/{id}/messages");

        for input in ["yes", "Jane Doe", "jane@x.com"] {
            let (status, _) = send(&app, Method::POST, &uri, Some(json!({ "input": input }))).await;
            assert_eq!(status, StatusCode::OK);
        }
        let (_, turn) = send(&app, Method::POST, &uri, Some(json!({ "input": "12" }))).await;
        assert_eq!(turn["stage"], "identity");
        assert!(turn["notice"].is_string());

        let (status, view) = send(&app, Method::GET, &format!("/api/v1/sessions/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["stage"], "identity");
        assert_eq!(view["consent"], true);
        assert_eq!(view["identity_collected"], false);
        let raw = view.to_string();
        assert!(!raw.contains("jane@x.com"));
        assert!(!raw.contains("Jane Doe"));
    }

    #[tokio::test]
    async fn test_delete_ends_session_and_marks_purge() {
        let app = app();
        let id = create(&app).await;

        let (status, turn) = send(&app, Method::DELETE, &format!("/api/v1/sessions/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(turn["status"], "ended");
        assert_eq!(turn["outcome"], "withdrawn");

        let (_, view) = send(&app, Method::GET, &format!("/api/v1/sessions/{id}"), None).await;
        assert_eq!(view["purge_requested"], true);
        assert_eq!(view["stage"], "terminated");
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let uri = format!("/api/v1/sessions/{}/messages", Uuid::new_v4());
        let (status, body) = send(&app(), Method::POST, &uri, Some(json!({ "input": "yes" }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_oversized_input_rejected() {
        let app = app();
        let id = create(&app).await;
        let uri = format!("/api/v1/sessions/{id}/messages");
        let input = "x".repeat(10_001);
        let (status, body) = send(&app, Method::POST, &uri, Some(json!({ "input": input }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }
}
