//! HTTP 前端
//!
//! - `GET  /health`                → `{"status":"ok"}`
//! - `POST /ask`                   → 进程级 Coordinator 处理 `{"message": ...}`
//! - `POST /sessions`              → 新建独立会话，返回 `{"session_id": ...}`
//! - `POST /sessions/:id/ask`      → 在指定会话中处理
//! - `GET  /sessions/:id/history`  → 会话内保留的消息
//! - `DELETE /sessions/:id`         → 关闭会话，释放其记忆
//!
//! 每次 ask 在独立任务中执行：客户端断开只会丢弃等待方，已开始的一轮总会写完用户消息与回复。

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::core::{Coordinator, ResponseEnvelope};
use crate::memory::Message;

/// 会话存储：session_id -> Coordinator（各自独立记忆，共享生成后端）
pub type SessionStore = Arc<RwLock<HashMap<String, Arc<Coordinator>>>>;

pub struct GatewayState {
    /// 未指定会话时使用的进程级 Coordinator
    pub coordinator: Arc<Coordinator>,
    pub sessions: SessionStore,
}

impl GatewayState {
    pub fn new(coordinator: Coordinator) -> Self {
        Self {
            coordinator: Arc::new(coordinator),
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AskBody {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionCreated {
    pub session_id: String,
}

pub fn create_router(state: Arc<GatewayState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ask", post(ask))
        .route("/sessions", post(create_session))
        .route("/sessions/:id", delete(close_session))
        .route("/sessions/:id/ask", post(session_ask))
        .route("/sessions/:id/history", get(session_history))
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// 在独立任务中跑完一轮；调用方被取消时任务照常完成
async fn run_turn(
    coordinator: Arc<Coordinator>,
    message: String,
) -> Result<ResponseEnvelope, StatusCode> {
    tokio::spawn(async move { coordinator.ask(&message).await })
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "ask task failed");
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

async fn ask(
    State(state): State<Arc<GatewayState>>,
    Json(body): Json<AskBody>,
) -> Result<Json<ResponseEnvelope>, StatusCode> {
    let envelope = run_turn(state.coordinator.clone(), body.message).await?;
    Ok(Json(envelope))
}

async fn create_session(State(state): State<Arc<GatewayState>>) -> (StatusCode, Json<SessionCreated>) {
    let session_id = uuid::Uuid::new_v4().to_string();
    let coordinator = Arc::new(state.coordinator.new_session());
    state
        .sessions
        .write()
        .await
        .insert(session_id.clone(), coordinator);
    tracing::info!(session_id = %session_id, "session created");
    (StatusCode::CREATED, Json(SessionCreated { session_id }))
}

async fn find_session(state: &GatewayState, id: &str) -> Result<Arc<Coordinator>, StatusCode> {
    state
        .sessions
        .read()
        .await
        .get(id)
        .cloned()
        .ok_or(StatusCode::NOT_FOUND)
}

async fn session_ask(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<String>,
    Json(body): Json<AskBody>,
) -> Result<Json<ResponseEnvelope>, StatusCode> {
    // 先释放会话表的读锁，再进入可能较慢的生成调用
    let coordinator = find_session(&state, &id).await?;
    Ok(Json(run_turn(coordinator, body.message).await?))
}

async fn session_history(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Message>>, StatusCode> {
    let coordinator = find_session(&state, &id).await?;
    Ok(Json(coordinator.history().await))
}

async fn close_session(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<String>,
) -> StatusCode {
    match state.sessions.write().await.remove(&id) {
        Some(_) => {
            tracing::info!(session_id = %id, "session closed");
            StatusCode::NO_CONTENT
        }
        None => StatusCode::NOT_FOUND,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    use super::*;
    use crate::llm::{MockBehavior, MockLlmClient};
    use crate::triage::{Intent, Urgency};

    fn router() -> Router {
        let coordinator = Coordinator::new(
            Arc::new(MockLlmClient::replying("We're on it.")),
            Duration::from_secs(5),
        );
        create_router(Arc::new(GatewayState::new(coordinator)))
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = body_json(response).await;
        assert_eq!(body, serde_json::json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn test_ask_returns_envelope() {
        let response = router()
            .oneshot(post_json("/ask", r#"{"message":"I will sue you"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let envelope: ResponseEnvelope = body_json(response).await;
        assert_eq!(envelope.intent, Intent::GeneralInquiry);
        assert_eq!(envelope.urgency, Urgency::Low);
        assert_eq!(envelope.reply, "We're on it.");
        assert!(envelope.escalation.escalate);
        assert_eq!(envelope.escalation.note, "Legal threat detected.");
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let app = router();

        let response = app
            .clone()
            .oneshot(Request::post("/sessions").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created: SessionCreated = body_json(response).await;

        let response = app
            .clone()
            .oneshot(post_json(
                &format!("/sessions/{}/ask", created.session_id),
                r#"{"message":"I need a refund"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(
                Request::get(format!("/sessions/{}/history", created.session_id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let history: Vec<Message> = body_json(response).await;
        assert_eq!(
            history,
            vec![Message::user("I need a refund"), Message::agent("We're on it.")]
        );
    }

    #[tokio::test]
    async fn test_closed_session_is_gone() {
        let state = Arc::new(GatewayState::new(Coordinator::new(
            Arc::new(MockLlmClient::replying("ok")),
            Duration::from_secs(5),
        )));
        let app = create_router(state.clone());

        let response = app
            .clone()
            .oneshot(Request::post("/sessions").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let created: SessionCreated = body_json(response).await;
        let uri = format!("/sessions/{}", created.session_id);

        let response = app
            .clone()
            .oneshot(Request::delete(uri.as_str()).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(state.sessions.read().await.is_empty());

        let response = app
            .clone()
            .oneshot(post_json(&format!("{uri}/ask"), r#"{"message":"hi"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .oneshot(Request::delete(uri.as_str()).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_abandoned_turn_still_completes() {
        let coordinator = Arc::new(Coordinator::new(
            Arc::new(MockLlmClient::new(MockBehavior::Stall(Duration::from_millis(100)))),
            Duration::from_secs(5),
        ));

        // 调用方在生成途中放弃等待
        let abandoned =
            tokio::time::timeout(Duration::from_millis(10), run_turn(coordinator.clone(), "first".into()))
                .await;
        assert!(abandoned.is_err());

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(
            coordinator.history().await,
            vec![Message::user("first"), Message::agent("late reply")]
        );
    }

    #[tokio::test]
    async fn test_unknown_session_is_404() {
        let response = router()
            .oneshot(post_json("/sessions/nope/ask", r#"{"message":"hi"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_missing_message_is_rejected() {
        let response = router()
            .oneshot(post_json("/ask", r#"{"text":"hi"}"#))
            .await
            .unwrap();
        assert!(response.status().is_client_error());
    }
}
