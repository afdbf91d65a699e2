use std::sync::Arc;

use infosec_assistant::backend::{Backend, MockBackend};
use infosec_assistant::classify::{EMPTY_QUERY_MESSAGE, REFUSAL_MESSAGE, UNAVAILABLE_MESSAGE};
use infosec_assistant::{server, Assistant};
use reqwest::{Client, Method, StatusCode};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

struct TestServer {
    base_url: String,
    handle: JoinHandle<()>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn start(backend: Option<Arc<dyn Backend>>) -> TestServer {
    let mut builder = Assistant::builder("http://unused");
    if let Some(backend) = backend {
        builder = builder.backend(backend);
    }
    let assistant = Arc::new(builder.build().expect("assistant"));

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let handle = tokio::spawn(async move {
        let _ = axum::serve(listener, server::router(assistant)).await;
    });
    TestServer {
        base_url: format!("http://{addr}"),
        handle,
    }
}

async fn ask(server: &TestServer, body: Value) -> Value {
    let resp = Client::new()
        .post(format!("{}/api/assistant", server.base_url))
        .json(&body)
        .send()
        .await
        .expect("send");
    assert_eq!(resp.status(), StatusCode::OK);
    resp.json().await.expect("json body")
}

#[tokio::test]
async fn test_empty_query_skips_model() {
    let mock = Arc::new(MockBackend::fixed("НЕ ИБ"));
    let server = start(Some(mock.clone())).await;

    for body in [json!({"query": "   "}), json!({}), json!({"query": 7})] {
        assert_eq!(ask(&server, body).await, json!({"response": EMPTY_QUERY_MESSAGE}));
    }
    assert_eq!(mock.calls(), 0);
}

#[tokio::test]
async fn test_malformed_body_is_empty_query() {
    let server = start(Some(Arc::new(MockBackend::fixed("НЕ ИБ")))).await;
    let resp = Client::new()
        .post(format!("{}/api/assistant", server.base_url))
        .header("content-type", "text/plain")
        .body("not json")
        .send()
        .await
        .expect("send");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("json body");
    assert_eq!(body["response"], EMPTY_QUERY_MESSAGE);
}

#[tokio::test]
async fn test_unconfigured_model() {
    let server = start(None).await;
    assert_eq!(
        ask(&server, json!({"query": "Что такое фишинг?"})).await,
        json!({"response": UNAVAILABLE_MESSAGE, "model_unavailable": true})
    );
}

#[tokio::test]
async fn test_failing_model() {
    let server = start(Some(Arc::new(MockBackend::failing(503)))).await;
    let body = ask(&server, json!({"query": "Что такое фишинг?"})).await;
    assert_eq!(body["model_unavailable"], true);
}

#[tokio::test]
async fn test_out_of_scope() {
    let server = start(Some(Arc::new(MockBackend::fixed("не иб, вопрос о кулинарии")))).await;
    assert_eq!(
        ask(&server, json!({"query": "Рецепт борща"})).await,
        json!({"is_security": false, "response": REFUSAL_MESSAGE})
    );
}

#[tokio::test]
async fn test_structured_answer_shape() {
    let reply = "ИБ:
Кратко: Фишинг-атака
Угроза: Фишинг
Контроли: MFA; фильтрация почты
Категории: административные=политика, обучение; технические=DMARC
Рекомендации: не переходить по ссылкам
Стандарты: ISO 27001 A.5.1; НПД 152-ФЗ";
    let server = start(Some(Arc::new(MockBackend::fixed(reply)))).await;
    assert_eq!(
        ask(&server, json!({"query": "Письмо от «банка»"})).await,
        json!({
            "summary": "Фишинг-атака",
            "threat": "Фишинг",
            "controls": ["MFA", "фильтрация почты"],
            "control_categories": {
                "административные": ["политика", "обучение"],
                "технические": ["DMARC"]
            },
            "recommendations": ["не переходить по ссылкам"],
            "standards": ["ISO 27001 A.5.1", "НПД 152-ФЗ"]
        })
    );
}

#[tokio::test]
async fn test_partial_answer_renders_empty_fields() {
    let server = start(Some(Arc::new(MockBackend::fixed("Кратко: Фишинг-атака\nУгроза: Фишинг")))).await;
    assert_eq!(
        ask(&server, json!({"query": "фишинг"})).await,
        json!({
            "summary": "Фишинг-атака",
            "threat": "Фишинг",
            "controls": [],
            "control_categories": {},
            "recommendations": [],
            "standards": []
        })
    );
}

#[tokio::test]
async fn test_freeform_answer() {
    let server = start(Some(Arc::new(MockBackend::fixed("Some unrelated unstructured reply")))).await;
    assert_eq!(
        ask(&server, json!({"query": "фишинг"})).await,
        json!({"response": "Some unrelated unstructured reply"})
    );
}

#[tokio::test]
async fn test_preflight_and_cors_headers() {
    let server = start(None).await;
    let resp = Client::new()
        .request(Method::OPTIONS, format!("{}/api/assistant", server.base_url))
        .send()
        .await
        .expect("send");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let headers = resp.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(headers["access-control-allow-headers"], "Content-Type");
    assert_eq!(headers["access-control-allow-methods"], "POST, OPTIONS");

    let resp = Client::new()
        .post(format!("{}/api/assistant", server.base_url))
        .json(&json!({"query": ""}))
        .send()
        .await
        .expect("send");
    assert_eq!(resp.headers()["access-control-allow-origin"], "*");
}

#[tokio::test]
async fn test_index_page() {
    let server = start(None).await;
    let resp = Client::new()
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .expect("send");
    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp.headers()["content-type"].to_str().expect("content-type");
    assert!(content_type.starts_with("text/html"));
    let html = resp.text().await.expect("text");
    assert!(html.contains("/api/assistant"));
}

#[tokio::test]
async fn test_health() {
    let server = start(Some(Arc::new(MockBackend::fixed("НЕ ИБ")))).await;
    let body: Value = Client::new()
        .get(format!("{}/health", server.base_url))
        .send()
        .await
        .expect("send")
        .json()
        .await
        .expect("json body");
    assert_eq!(body["model"]["configured"], true);
    assert_eq!(body["model"]["backend"], "mock");
    assert_eq!(body["model"]["name"], "gemini-2.5-flash");
}
