// Integration tests for the review HTTP API

use actix_web::http::{header, Method, StatusCode};
use actix_web::{test, web, App};
use async_trait::async_trait;
use review_assist::config::CorsSettings;
use review_assist::{app_config, cors, AppState, ModelError, ReviewModel};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

const FRONTEND: &str = "http://localhost:5173";

/// Records every prompt and answers with a canned reply
struct StubModel {
    reply: Result<String, String>,
    prompts: Mutex<Vec<String>>,
}

impl StubModel {
    fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(message.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReviewModel for StubModel {
    async fn review(&self, code: &str) -> Result<String, ModelError> {
        self.prompts.lock().unwrap().push(code.to_string());
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(message) => Err(ModelError::Api {
                status: 503,
                message: message.clone(),
            }),
        }
    }
}

fn state(model: &Arc<StubModel>) -> AppState {
    AppState::new(model.clone())
}

#[actix_web::test]
async fn test_review_returns_model_text_unchanged() {
    let model = StubModel::replying("## Review\n...");
    let app = test::init_service(App::new().configure(app_config(state(&model), 1024 * 1024))).await;

    let req = test::TestRequest::post()
        .uri("/ai/get-review")
        .set_json(json!({ "code": "function greet(){}" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "text": "## Review\n..." }));
    assert_eq!(model.prompts(), vec!["function greet(){}".to_string()]);
}

#[actix_web::test]
async fn test_missing_code_is_rejected() {
    let model = StubModel::replying("unused");
    let app = test::init_service(App::new().configure(app_config(state(&model), 1024 * 1024))).await;

    for payload in [json!({}), json!({ "code": "" }), json!({ "code": null })] {
        let req = test::TestRequest::post()
            .uri("/ai/get-review")
            .set_json(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "Prompt is required" }));
    }

    assert!(model.prompts().is_empty());
}

#[actix_web::test]
async fn test_bodyless_or_untyped_request_needs_prompt() {
    let model = StubModel::replying("unused");
    let app = test::init_service(App::new().configure(app_config(state(&model), 1024 * 1024))).await;

    let requests = [
        test::TestRequest::post().uri("/ai/get-review").to_request(),
        test::TestRequest::post()
            .uri("/ai/get-review")
            .insert_header(header::ContentType::plaintext())
            .set_payload("function greet() {}")
            .to_request(),
        test::TestRequest::post()
            .uri("/ai/get-review")
            .insert_header(header::ContentType::json())
            .to_request(),
    ];

    for req in requests {
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "Prompt is required" }));
    }

    assert!(model.prompts().is_empty());
}

#[actix_web::test]
async fn test_numeric_code_is_forwarded_as_text() {
    let model = StubModel::replying("ok");
    let app = test::init_service(App::new().configure(app_config(state(&model), 1024 * 1024))).await;

    let req = test::TestRequest::post()
        .uri("/ai/get-review")
        .set_json(json!({ "code": 123 }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(model.prompts(), vec!["123".to_string()]);
}

#[actix_web::test]
async fn test_provider_failure_maps_to_500() {
    let model = StubModel::failing("The model is overloaded");
    let app = test::init_service(App::new().configure(app_config(state(&model), 1024 * 1024))).await;

    let req = test::TestRequest::post()
        .uri("/ai/get-review")
        .set_json(json!({ "code": "x" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Model provider returned 503: The model is overloaded");
}

#[actix_web::test]
async fn test_urlencoded_body_is_accepted() {
    let model = StubModel::replying("ok");
    let app = test::init_service(App::new().configure(app_config(state(&model), 1024 * 1024))).await;

    let req = test::TestRequest::post()
        .uri("/ai/get-review")
        .set_form([("code", "let total = a + b;")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(model.prompts(), vec!["let total = a + b;".to_string()]);
}

#[actix_web::test]
async fn test_malformed_json_is_reported() {
    let model = StubModel::replying("unused");
    let app = test::init_service(App::new().configure(app_config(state(&model), 1024 * 1024))).await;

    let req = test::TestRequest::post()
        .uri("/ai/get-review")
        .insert_header(header::ContentType::json())
        .set_payload("{\"code\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_json");
    assert!(model.prompts().is_empty());
}

#[actix_web::test]
async fn test_oversized_body_is_rejected() {
    let model = StubModel::replying("unused");
    let app = test::init_service(App::new().configure(app_config(state(&model), 64))).await;

    let req = test::TestRequest::post()
        .uri("/ai/get-review")
        .set_json(json!({ "code": "x".repeat(1024) }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(model.prompts().is_empty());
}

#[actix_web::test]
async fn test_root_greeting_and_health() {
    let model = StubModel::replying("unused");
    let app = test::init_service(App::new().configure(app_config(state(&model), 1024 * 1024))).await;

    let req = test::TestRequest::get().uri("/").to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert_eq!(body, web::Bytes::from_static(b"Hello World"));

    let req = test::TestRequest::get().uri("/health").to_request();
    let health: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["version"], env!("CARGO_PKG_VERSION"));
}

#[actix_web::test]
async fn test_editor_page_and_render_endpoints() {
    let model = StubModel::replying("unused");
    let app = test::init_service(App::new().configure(app_config(state(&model), 1024 * 1024))).await;

    let req = test::TestRequest::get().uri("/editor").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let page = test::read_body(resp).await;
    let page = String::from_utf8_lossy(&page);
    assert!(page.contains("Generate Review"));
    assert!(page.contains("/ai/get-review"));

    let req = test::TestRequest::post()
        .uri("/ui/render")
        .set_json(json!({ "text": "#### ✅ Fixes\n\n```js\nlet a = 1;\n```\n" }))
        .to_request();
    let rendered: Value = test::call_and_read_body_json(&app, req).await;
    let html = rendered["html"].as_str().unwrap();
    assert!(html.contains("<h4>✅ Fixes</h4>"));
    assert!(html.contains("<span class=\"tok-keyword\">let</span>"));

    let req = test::TestRequest::post()
        .uri("/ui/highlight")
        .set_json(json!({ "code": "return 1 < 2;" }))
        .to_request();
    let highlighted: Value = test::call_and_read_body_json(&app, req).await;
    let html = highlighted["html"].as_str().unwrap();
    assert!(html.contains("<span class=\"tok-keyword\">return</span>"));
    assert!(html.contains("<span class=\"tok-number\">1</span>"));
    assert!(html.contains(" &lt; "));
}

#[actix_web::test]
async fn test_cors_allows_configured_origin() {
    let model = StubModel::replying("ok");
    let settings = CorsSettings {
        allowed_origin: FRONTEND.to_string(),
    };
    let app = test::init_service(
        App::new()
            .wrap(cors(&settings))
            .configure(app_config(state(&model), 1024 * 1024)),
    )
    .await;

    let req = test::TestRequest::default()
        .method(Method::OPTIONS)
        .uri("/ai/get-review")
        .insert_header((header::ORIGIN, FRONTEND))
        .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    assert_eq!(
        resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        FRONTEND
    );

    let req = test::TestRequest::post()
        .uri("/ai/get-review")
        .insert_header((header::ORIGIN, FRONTEND))
        .set_json(json!({ "code": "x" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        FRONTEND
    );
}

#[actix_web::test]
async fn test_cors_rejects_other_origins() {
    let model = StubModel::replying("ok");
    let settings = CorsSettings {
        allowed_origin: FRONTEND.to_string(),
    };
    let app = test::init_service(
        App::new()
            .wrap(cors(&settings))
            .configure(app_config(state(&model), 1024 * 1024)),
    )
    .await;

    let req = test::TestRequest::default()
        .method(Method::OPTIONS)
        .uri("/ai/get-review")
        .insert_header((header::ORIGIN, "https://evil.example"))
        .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert!(!resp.status().is_success());
    assert!(resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}

#[actix_web::test]
async fn test_cors_wildcard_allows_any_origin() {
    let model = StubModel::replying("ok");
    let settings = CorsSettings {
        allowed_origin: "*".to_string(),
    };
    let app = test::init_service(
        App::new()
            .wrap(cors(&settings))
            .configure(app_config(state(&model), 1024 * 1024)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/ai/get-review")
        .insert_header((header::ORIGIN, "https://anywhere.example"))
        .set_json(json!({ "code": "x" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_some());
}
