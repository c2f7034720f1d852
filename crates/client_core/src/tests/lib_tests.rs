use super::*;
use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use shared::domain::SymptomId;
use tokio::net::TcpListener;

async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("test server");
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn fetch_disclaimer_returns_backend_text() {
    let router = Router::new().route(
        "/api/disclaimer",
        get(|| async { Json(json!({ "disclaimer": "Not a substitute for medical advice." })) }),
    );
    let client = TriageClient::new(serve(router).await);

    let disclaimer = client.fetch_disclaimer().await.expect("disclaimer");
    assert_eq!(disclaimer, "Not a substitute for medical advice.");
}

#[tokio::test]
async fn fetch_disclaimer_rejects_non_json_body() {
    let router = Router::new().route("/api/disclaimer", get(|| async { "plaintext, not json" }));
    let client = TriageClient::new(serve(router).await);

    match client.fetch_disclaimer().await {
        Err(ApiError::Decode(_)) => {}
        other => panic!("expected decode failure, got {other:?}"),
    }
}

#[tokio::test]
async fn send_chat_decodes_normal_reply() {
    let router = Router::new().route(
        "/api/chat",
        post(|Json(request): Json<ChatRequest>| async move {
            assert_eq!(request.message, "I have a headache and fever");
            Json(json!({ "response": "Noted.", "symptoms": ["headache", "fever"] }))
        }),
    );
    let client = TriageClient::new(serve(router).await);

    let outcome = client
        .send_chat("I have a headache and fever")
        .await
        .expect("chat outcome");
    match outcome {
        ChatOutcome::Reply(reply) => {
            assert_eq!(reply.response, "Noted.");
            assert_eq!(
                reply.symptoms,
                vec![SymptomId::new("headache"), SymptomId::new("fever")]
            );
        }
        ChatOutcome::Error(_) => panic!("decoded as business error"),
    }
}

#[tokio::test]
async fn send_chat_reads_business_error_despite_error_status() {
    let router = Router::new().route(
        "/api/chat",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "No message provided" })),
            )
        }),
    );
    let client = TriageClient::new(serve(router).await);

    match client.send_chat("").await.expect("chat outcome") {
        ChatOutcome::Error(body) => assert_eq!(body.error, "No message provided"),
        ChatOutcome::Reply(_) => panic!("decoded as reply"),
    }
}

#[tokio::test]
async fn send_chat_treats_unrecognized_body_as_decode_failure() {
    let router = Router::new().route(
        "/api/chat",
        post(|| async { "<html>gateway error</html>" }),
    );
    let client = TriageClient::new(serve(router).await);

    match client.send_chat("hello").await {
        Err(ApiError::Decode(_)) => {}
        other => panic!("expected decode failure, got {other:?}"),
    }
}

#[tokio::test]
async fn reset_succeeds_on_ok_status() {
    let router = Router::new().route(
        "/api/reset",
        post(|| async { Json(json!({ "message": "Conversation reset successfully" })) }),
    );
    let client = TriageClient::new(serve(router).await);

    client.reset_conversation().await.expect("reset ok");
}

#[tokio::test]
async fn reset_fails_on_error_status() {
    let router = Router::new().route(
        "/api/reset",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let client = TriageClient::new(serve(router).await);

    match client.reset_conversation().await {
        Err(ApiError::Transport(_)) => {}
        other => panic!("expected transport failure, got {other:?}"),
    }
}

#[tokio::test]
async fn trailing_slash_in_server_url_is_tolerated() {
    let router = Router::new().route(
        "/api/disclaimer",
        get(|| async { Json(json!({ "disclaimer": "ok" })) }),
    );
    let base = serve(router).await;
    let client = TriageClient::new(format!("{base}/"));

    assert_eq!(client.fetch_disclaimer().await.expect("disclaimer"), "ok");
}
