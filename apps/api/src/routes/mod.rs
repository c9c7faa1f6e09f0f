pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::interview::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/roles", get(handlers::handle_list_roles))
        // Interview API
        .route("/api/interview/start", post(handlers::handle_start))
        .route("/api/interview/message", post(handlers::handle_message))
        .route("/api/interview/end", post(handlers::handle_end))
        .route(
            "/api/interview/transcript/:session_id",
            get(handlers::handle_transcript),
        )
        .route("/api/interview/:session_id", delete(handlers::handle_delete))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::{
        body::{to_bytes, Body},
        http::{Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::interview::prompts::{CLOSING_MESSAGE, LONG_MESSAGE_PROMPT};
    use crate::interview::roles::RoleCatalog;
    use crate::interview::store::{InMemorySessionRepository, SessionRepository};
    use crate::llm_client::ChatModel;
    use crate::testing::{FailingModel, FixedRandom, ScriptedModel, SlowModel};

    struct Harness {
        router: Router,
        sessions: Arc<InMemorySessionRepository>,
    }

    fn harness_with(llm: Arc<dyn ChatModel>) -> Harness {
        let sessions = Arc::new(InMemorySessionRepository::new());
        let state = AppState {
            sessions: sessions.clone(),
            roles: Arc::new(RoleCatalog::builtin()),
            llm,
            // follow-ups never drawn
            rng: Arc::new(FixedRandom(0.99)),
        };
        Harness {
            router: build_router(state),
            sessions,
        }
    }

    fn harness() -> Harness {
        harness_with(Arc::new(ScriptedModel::new()))
    }

    async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn start(router: &Router, role: &str) -> String {
        let (status, body) = send(
            router,
            Method::POST,
            "/api/interview/start",
            Some(json!({"role": role, "user_name": "Alex"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["session_id"].as_str().unwrap().to_string()
    }

    async fn message(router: &Router, session_id: &str, text: &str) -> (StatusCode, Value) {
        send(
            router,
            Method::POST,
            "/api/interview/message",
            Some(json!({"session_id": session_id, "message": text})),
        )
        .await
    }

    #[tokio::test]
    async fn test_health() {
        let h = harness();
        let (status, body) = send(&h.router, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_roles_lists_catalog() {
        let h = harness();
        let (status, body) = send(&h.router, Method::GET, "/api/roles", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["roles"]["retail"]["num_questions"], 10);
        assert_eq!(body["roles"]["software_engineer"]["name"], "Software Engineer");
        assert_eq!(body["roles"].as_object().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_start_returns_opening_question() {
        let h = harness();
        let (status, body) = send(
            &h.router,
            Method::POST,
            "/api/interview/start",
            Some(json!({"role": "retail"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let catalog = RoleCatalog::builtin();
        assert_eq!(
            body["first_question"],
            catalog.get("retail").unwrap().opening_question
        );
        assert_eq!(body["role_info"]["name"], "Retail Associate");

        let id = body["session_id"].as_str().unwrap();
        let handle = h.sessions.get(id).await.unwrap().unwrap();
        let session = handle.lock().await;
        assert_eq!(session.questions_asked, 1);
        assert_eq!(session.user_name, "Candidate");
    }

    #[tokio::test]
    async fn test_start_unknown_role_rejected() {
        let h = harness();
        let (status, body) = send(
            &h.router,
            Method::POST,
            "/api/interview/start",
            Some(json!({"role": "astronaut", "user_name": "Buzz"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(h.sessions.count().await, 0);
    }

    #[tokio::test]
    async fn test_message_unknown_session_is_404() {
        let h = harness();
        let (status, body) = message(&h.router, "session_nope", "hello").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert_eq!(h.sessions.count().await, 0);
    }

    #[tokio::test]
    async fn test_message_unknown_session_leaves_others_untouched() {
        let h = harness();
        let id = start(&h.router, "retail").await;

        let (status, _) = message(&h.router, &format!("{id}_other"), "hello").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        assert_eq!(h.sessions.count().await, 1);
        let handle = h.sessions.get(&id).await.unwrap().unwrap();
        let session = handle.lock().await;
        assert_eq!(session.questions_asked, 1);
        assert_eq!(session.history().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_messages_to_one_session_are_serialized() {
        let h = harness_with(Arc::new(SlowModel::new(Duration::from_millis(50))));
        let id = start(&h.router, "retail").await;
        let concurrent = 5u32;

        let tasks: Vec<_> = (0..concurrent)
            .map(|i| {
                let router = h.router.clone();
                let id = id.clone();
                tokio::spawn(async move { message(&router, &id, &format!("answer {i}")).await })
            })
            .collect();
        for task in tasks {
            let (status, _) = task.await.unwrap();
            assert_eq!(status, StatusCode::OK);
        }

        let handle = h.sessions.get(&id).await.unwrap().unwrap();
        let session = handle.lock().await;
        assert_eq!(session.questions_asked, 1 + concurrent);
        assert_eq!(session.history().len(), 1 + 2 * concurrent as usize);
    }

    #[tokio::test]
    async fn test_message_reports_questions_remaining() {
        let h = harness();
        let id = start(&h.router, "software_engineer").await;

        let (status, body) = message(&h.router, &id, "I write backend services.").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"], "Scripted reply #1");
        assert_eq!(body["is_complete"], false);
        assert_eq!(body["questions_remaining"], 5);
        assert!(body.get("feedback").is_none());
    }

    #[tokio::test]
    async fn test_oversized_message_returns_summary_prompt() {
        let h = harness();
        let id = start(&h.router, "sales").await;

        let (status, body) = message(&h.router, &id, &"z".repeat(2500)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"], LONG_MESSAGE_PROMPT);
        assert_eq!(body["is_complete"], false);
    }

    #[tokio::test]
    async fn test_retail_interview_runs_to_feedback() {
        let h = harness();
        let id = start(&h.router, "retail").await;

        for i in 1..=9u32 {
            let (status, body) = message(&h.router, &id, &format!("answer {i}")).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["is_complete"], false);
            assert_eq!(body["questions_remaining"], 9 - i);
        }

        let (status, body) = message(&h.router, &id, "last answer").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["is_complete"], true);
        assert_eq!(body["response"], CLOSING_MESSAGE);
        assert!(!body["feedback"].as_str().unwrap().is_empty());

        let (status, body) = message(&h.router, &id, "anything else?").await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "CONFLICT");
    }

    #[tokio::test]
    async fn test_turn_model_failure_is_500() {
        let h = harness_with(Arc::new(FailingModel));
        let id = start(&h.router, "manager").await;

        let (status, body) = message(&h.router, &id, "I led a team of five.").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "LLM_ERROR");

        let handle = h.sessions.get(&id).await.unwrap().unwrap();
        assert_eq!(handle.lock().await.history().len(), 1);
    }

    #[tokio::test]
    async fn test_end_accepts_query_parameter() {
        let h = harness();
        let id = start(&h.router, "marketing").await;
        message(&h.router, &id, "I grew a newsletter.").await;

        let (status, body) = send(
            &h.router,
            Method::POST,
            &format!("/api/interview/end?session_id={id}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(!body["feedback"].as_str().unwrap().is_empty());
        let transcript = body["transcript"].as_array().unwrap();
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[0]["role"], "assistant");
        assert_eq!(transcript[1]["role"], "user");
        assert_eq!(transcript[1]["content"], "I grew a newsletter.");

        let (status, _) = message(&h.router, &id, "wait").await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_end_accepts_json_body() {
        let h = harness();
        let id = start(&h.router, "data_analyst").await;

        let (status, body) = send(
            &h.router,
            Method::POST,
            "/api/interview/end",
            Some(json!({"session_id": id})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["transcript"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_end_feedback_failure_is_inline() {
        let h = harness_with(Arc::new(FailingModel));
        let id = start(&h.router, "data_analyst").await;

        let (status, body) = send(
            &h.router,
            Method::POST,
            &format!("/api/interview/end?session_id={id}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["feedback"]
            .as_str()
            .unwrap()
            .starts_with("Error generating feedback:"));
    }

    #[tokio::test]
    async fn test_end_dropped_mid_feedback_keeps_session_open() {
        let h = harness_with(Arc::new(SlowModel::new(Duration::from_secs(60))));
        let id = start(&h.router, "sales").await;

        let ended = tokio::time::timeout(
            Duration::from_millis(100),
            send(
                &h.router,
                Method::POST,
                &format!("/api/interview/end?session_id={id}"),
                None,
            ),
        )
        .await;
        assert!(ended.is_err(), "feedback should still be pending");

        let handle = h.sessions.get(&id).await.unwrap().unwrap();
        assert!(!handle.lock().await.is_complete());
    }

    #[tokio::test]
    async fn test_end_unknown_session_is_404() {
        let h = harness();
        let (status, _) = send(
            &h.router,
            Method::POST,
            "/api/interview/end?session_id=session_nope",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_end_without_session_id_is_400() {
        let h = harness();
        let (status, _) = send(&h.router, Method::POST, "/api/interview/end", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_transcript_renders_history_and_info() {
        let h = harness();
        let id = start(&h.router, "retail").await;
        message(&h.router, &id, "I love customers.").await;

        let (status, body) = send(
            &h.router,
            Method::GET,
            &format!("/api/interview/transcript/{id}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let transcript = body["transcript"].as_str().unwrap();
        assert!(transcript.contains("Candidate: Alex"));
        assert!(transcript.contains("[2] CANDIDATE:\nI love customers.\n"));
        assert!(transcript.contains("[3] INTERVIEWER:\nScripted reply #1\n"));
        assert_eq!(body["session_info"]["role"], "Retail Associate");
        assert_eq!(body["session_info"]["user_name"], "Alex");
        assert_eq!(body["session_info"]["questions_asked"], 2);
    }

    #[tokio::test]
    async fn test_transcript_unknown_session_is_404() {
        let h = harness();
        let (status, _) = send(
            &h.router,
            Method::GET,
            "/api/interview/transcript/session_nope",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_discards_session() {
        let h = harness();
        let id = start(&h.router, "sales").await;

        let (status, _) = send(&h.router, Method::DELETE, &format!("/api/interview/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = message(&h.router, &id, "hello?").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&h.router, Method::DELETE, &format!("/api/interview/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
