use memo_engine::assumptions::{resolve, AssumptionEstimator, EstimationRequest};
use memo_engine::data::{
    AnchoredValue, BusinessModelType, CompanyDescriptor, Currency, ResponseMap,
};
use memo_engine::estimator::{AiAssumptionEstimator, AiClient, ClaudeAiClient};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn estimator_for(server: &MockServer) -> AiAssumptionEstimator {
    let client = ClaudeAiClient::new(
        "claude-test".to_string(),
        "test-key".to_string(),
        format!("{}/", server.uri()),
    )
    .unwrap();
    AiAssumptionEstimator::new(Box::new(client))
}

fn text_response(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "content": [{"type": "text", "text": text}]
    }))
}

fn request() -> EstimationRequest {
    EstimationRequest {
        metric_label: "Average contract value".to_string(),
        business_model_type: BusinessModelType::Enterprise,
        currency: Currency::Eur,
        company: CompanyDescriptor::new("Acme", "legal tech", "seed"),
        responses: ResponseMap::new(),
    }
}

#[tokio::test]
async fn claude_client_sends_auth_headers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "test-key"))
        .and(header("anthropic-version", "2023-06-01"))
        .respond_with(text_response("hello"))
        .expect(1)
        .mount(&server)
        .await;

    let client = ClaudeAiClient::new(
        "claude-test".to_string(),
        "test-key".to_string(),
        server.uri(),
    )
    .unwrap();

    assert_eq!(client.send_request("system", "user").await.unwrap(), "hello");
}

#[tokio::test]
async fn estimator_parses_fenced_estimate() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(text_response("```json\n{\"estimatedValue\": 42000}\n```"))
        .expect(1)
        .mount(&server)
        .await;

    let value = estimator_for(&server).estimate(&request()).await.unwrap();
    assert_eq!(value, 42_000.0);
}

#[tokio::test]
async fn error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(529).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let err = estimator_for(&server)
        .estimate(&request())
        .await
        .unwrap_err();
    assert!(format!("{err:#}").contains("529"));
}

#[tokio::test]
async fn resolver_uses_estimate_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(text_response(r#"{"estimatedValue": 18000}"#))
        .expect(1)
        .mount(&server)
        .await;

    let estimator = estimator_for(&server);
    let company = CompanyDescriptor::new("Acme", "legal tech", "seed");
    let responses: ResponseMap = [("pitch", "Contract review for enterprise legal teams")]
        .into_iter()
        .collect();

    let anchored = resolve(None, &responses, Currency::Eur, &company, Some(&estimator)).await;

    assert_eq!(anchored.primary_metric_label, "Average contract value");
    assert_eq!(anchored.value, AnchoredValue::AiEstimated(18_000.0));
}

#[tokio::test]
async fn resolver_falls_back_when_service_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let estimator = estimator_for(&server);
    let company = CompanyDescriptor::new("Acme", "legal tech", "pre-seed");

    let anchored = resolve(
        None,
        &ResponseMap::new(),
        Currency::Usd,
        &company,
        Some(&estimator),
    )
    .await;

    assert!(matches!(anchored.value, AnchoredValue::FallbackDefault(Some(_))));
}
