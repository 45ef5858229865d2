//! HTTP gateway tests against a local mock server

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use llmdeck::application::ports::{GatewayError, ProviderGateway};
use llmdeck::domain::config::{ApiConfig, AppConfig, ProvidersConfig};
use llmdeck::domain::deck::ProviderId;
use llmdeck::infrastructure::{ChatCompletionsGateway, ProviderRouter};

fn completion(content: &str) -> serde_json::Value {
    json!({ "choices": [{ "message": { "role": "assistant", "content": content } }] })
}

fn gateway_for(server: &MockServer) -> ChatCompletionsGateway {
    ChatCompletionsGateway::new(format!("{}/chat/completions", server.uri()))
}

#[tokio::test]
async fn posts_instruction_and_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "llama-3",
            "messages": [{ "role": "user", "content": "Summarize this\n\nHello world" }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("  Short.  ")))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway_for(&server)
        .with_api_key("sk-test")
        .with_model("llama-3");
    let text = gateway
        .transform(ProviderId::Llama, "Summarize this", "Hello world")
        .await
        .unwrap();

    assert_eq!(text, "Short.");
}

#[tokio::test]
async fn unauthorized_maps_to_invalid_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = gateway_for(&server)
        .transform(ProviderId::Gpt, "i", "c")
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::InvalidApiKey));
}

#[tokio::test]
async fn too_many_requests_maps_to_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = gateway_for(&server)
        .transform(ProviderId::Gpt, "i", "c")
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::RateLimited));
}

#[tokio::test]
async fn server_error_carries_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let err = gateway_for(&server)
        .transform(ProviderId::Gpt, "i", "c")
        .await
        .unwrap_err();
    match err {
        GatewayError::ApiError(message) => {
            assert!(message.contains("500"));
            assert!(message.contains("upstream down"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = gateway_for(&server)
        .transform(ProviderId::Gpt, "i", "c")
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::ParseError(_)));
}

#[tokio::test]
async fn error_object_in_body_is_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "error": { "message": "model overloaded" } })),
        )
        .mount(&server)
        .await;

    let err = gateway_for(&server)
        .transform(ProviderId::Gpt, "i", "c")
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::ApiError(m) if m == "model overloaded"));
}

#[tokio::test]
async fn blank_content_is_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("   ")))
        .mount(&server)
        .await;

    let err = gateway_for(&server)
        .transform(ProviderId::Gpt, "i", "c")
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::EmptyResponse));
}

#[tokio::test]
async fn router_sends_live_providers_to_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("live answer")))
        .expect(1)
        .mount(&server)
        .await;

    let config = AppConfig {
        api: Some(ApiConfig {
            endpoint: Some(format!("{}/chat/completions", server.uri())),
            ..Default::default()
        }),
        providers: Some(ProvidersConfig {
            gemini: Some("off".to_string()),
            ..Default::default()
        }),
        ..AppConfig::empty()
    };
    let router = ProviderRouter::from_config(&config);

    let live = router
        .transform(ProviderId::Llama, "Expand this", "notes")
        .await
        .unwrap();
    assert_eq!(live, "live answer");

    let mocked = router
        .transform(ProviderId::Gpt, "Expand this", "notes")
        .await
        .unwrap();
    assert!(mocked.starts_with("OpenAI response to: Expand this"));

    let off = router
        .transform(ProviderId::Gemini, "Expand this", "notes")
        .await
        .unwrap_err();
    assert!(matches!(off, GatewayError::NotConfigured(ProviderId::Gemini)));
}
