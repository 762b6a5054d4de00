//! End-to-end API tests against a spawned server with fake collaborators.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;

use astro_ai::agent::Agent;
use astro_ai::api::{self, AppState};
use astro_ai::llm::{ChatMessage, FunctionCall, LlmClient, Role, ToolCall, ToolDefinition};
use astro_ai::storage::ImageStore;

/// Fake LLM: one tool round, then a fixed report.
struct FakeLlm {
    calls: AtomicUsize,
}

impl FakeLlm {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
        })
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmClient for FakeLlm {
    async fn chat_completion(
        &self,
        _model: &str,
        messages: &[ChatMessage],
        _tools: Option<&[ToolDefinition]>,
    ) -> anyhow::Result<ChatMessage> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);

        if call == 0 {
            // Echo the submitted user data through the Astro_AI tool, the
            // way the real model does on its first turn
            let user_content = messages
                .iter()
                .find(|m| m.role == Role::User)
                .and_then(|m| m.content.clone())
                .unwrap_or_default();
            let payload = user_content
                .split_once(": ")
                .map(|(_, json)| json.to_string())
                .unwrap_or_default();

            Ok(ChatMessage {
                role: Role::Assistant,
                content: None,
                tool_calls: Some(vec![ToolCall {
                    id: "call_0".to_string(),
                    call_type: "function".to_string(),
                    function: FunctionCall {
                        name: "Astro_AI".to_string(),
                        arguments: payload,
                    },
                }]),
                tool_call_id: None,
            })
        } else {
            Ok(ChatMessage::text(
                Role::Assistant,
                "## Vedic Chart\n| House | Sign |\n...",
            ))
        }
    }
}

/// Fake store: records uploads and hands back deterministic URLs.
struct FakeStore {
    uploads: Mutex<Vec<String>>,
    fail_with: Option<String>,
}

impl FakeStore {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            uploads: Mutex::new(Vec::new()),
            fail_with: None,
        })
    }

    fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            uploads: Mutex::new(Vec::new()),
            fail_with: Some(message.to_string()),
        })
    }

    fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }
}

#[async_trait]
impl ImageStore for FakeStore {
    async fn store(
        &self,
        _data: Bytes,
        filename: &str,
        _mime_type: &str,
    ) -> anyhow::Result<String> {
        if let Some(message) = &self.fail_with {
            return Err(anyhow::anyhow!("{}", message));
        }
        self.uploads.lock().unwrap().push(filename.to_string());
        Ok(format!("https://drive.google.com/uc?id=fake-{}", filename))
    }
}

async fn spawn_app(llm: Arc<FakeLlm>, store: Arc<FakeStore>) -> String {
    let agent = Arc::new(Agent::new(llm, "test-model".to_string(), 8));
    let state = AppState::new(agent, store);
    let app = api::router(state, &[]);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn palm_part(bytes: &[u8], filename: &str) -> reqwest::multipart::Part {
    reqwest::multipart::Part::bytes(bytes.to_vec())
        .file_name(filename.to_string())
        .mime_str("image/jpeg")
        .unwrap()
}

fn full_form() -> reqwest::multipart::Form {
    reqwest::multipart::Form::new()
        .text("name", "Asha Rao")
        .text("dob", "1994-03-21")
        .text("tob", "04:15")
        .text("pob", "Pune, India")
        .text("gender", "female")
        .part("palmLeft", palm_part(b"left-image-bytes", "left.jpg"))
        .part("palmRight", palm_part(b"right-image-bytes", "right.jpg"))
}

#[tokio::test]
async fn scenario_a_valid_submission_returns_report() {
    let llm = FakeLlm::new();
    let store = FakeStore::new();
    let base = spawn_app(llm.clone(), store.clone()).await;

    let response = reqwest::Client::new()
        .post(format!("{}/read", base))
        .multipart(full_form())
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    let result = body["result"].as_str().unwrap();
    assert!(!result.is_empty());

    // Both images stored, one tool round plus the final model call
    assert_eq!(store.upload_count(), 2);
    assert_eq!(llm.call_count(), 2);
}

#[tokio::test]
async fn scenario_b_missing_palm_right_is_rejected_before_collaborators() {
    let llm = FakeLlm::new();
    let store = FakeStore::new();
    let base = spawn_app(llm.clone(), store.clone()).await;

    let form = reqwest::multipart::Form::new()
        .text("name", "Asha Rao")
        .text("dob", "1994-03-21")
        .text("tob", "04:15")
        .text("pob", "Pune, India")
        .text("gender", "female")
        .part("palmLeft", palm_part(b"left-image-bytes", "left.jpg"));

    let response = reqwest::Client::new()
        .post(format!("{}/read", base))
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Both palm images are required.");

    assert_eq!(store.upload_count(), 0);
    assert_eq!(llm.call_count(), 0);
}

#[tokio::test]
async fn scenario_c_store_failure_propagates_and_skips_llm() {
    let llm = FakeLlm::new();
    let store = FakeStore::failing("drive upload failed with status 503: backend unavailable");
    let base = spawn_app(llm.clone(), store.clone()).await;

    let response = reqwest::Client::new()
        .post(format!("{}/read", base))
        .multipart(full_form())
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 500);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body["error"],
        "drive upload failed with status 503: backend unavailable"
    );

    assert_eq!(llm.call_count(), 0);
}

#[tokio::test]
async fn health_reports_ok() {
    let base = spawn_app(FakeLlm::new(), FakeStore::new()).await;

    let response = reqwest::Client::new()
        .get(format!("{}/health", base))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}
