use std::time::Duration;

use axum::{
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::sync::oneshot;

pub const TOKEN: &str = "test-token";

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        == Some(format!("Bearer {TOKEN}").as_str())
}

async fn list_models(headers: HeaderMap) -> impl IntoResponse {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "missing key"})));
    }
    (
        StatusCode::OK,
        Json(json!({
            "object": "list",
            "data": [
                {"id": "ok", "object": "model"},
                {"id": "broken", "object": "model"},
                {"id": "missing", "object": "model"},
                {"id": "slow", "object": "model"},
            ]
        })),
    )
}

async fn chat(headers: HeaderMap, Json(body): Json<Value>) -> impl IntoResponse {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "missing key"})));
    }
    if body["max_tokens"] != 1 || body["messages"][0]["content"] != "hi" {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "unexpected payload"})));
    }

    match body["model"].as_str().unwrap_or_default() {
        "ok" => (
            StatusCode::OK,
            Json(json!({"choices": [{"message": {"role": "assistant", "content": "h"}}]})),
        ),
        "broken" => (
            StatusCode::OK,
            Json(json!({"error": "model broken"})),
        ),
        "slow" => {
            tokio::time::sleep(Duration::from_secs(3)).await;
            (StatusCode::OK, Json(json!({"choices": []})))
        }
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": {"message": "no such model"}})),
        ),
    }
}

/// Serve an OpenAI-style API on an ephemeral port under both path conventions.
pub async fn spawn_mock_server() -> (String, oneshot::Sender<()>) {
    let app = Router::new()
        .route("/v1/models", get(list_models))
        .route("/v1/chat/completions", post(chat))
        .route("/api/models", get(list_models))
        .route("/api/chat/completions", post(chat));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = rx.await;
            })
            .await
            .unwrap();
    });

    (format!("http://{addr}"), tx)
}
