use crate::{create_session, create_test_config, requests_to, API_KEY};
use firescope::output::render_json;
use firescope::{ApiClient, Session};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_scrape_renders_nulls_and_key_order_as_received() {
    let mock_server = MockServer::start().await;
    let body = "{\n  \"success\": true,\n  \"data\": {\n    \"markdown\": \"x\",\n    \"html\": null,\n    \"metadata\": null,\n    \"actions\": {\n      \"zeta\": 1,\n      \"alpha\": null\n    }\n  }\n}";

    Mock::given(method("POST"))
        .and(path("/scrape"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/json")
                .set_body_string(body),
        )
        .mount(&mock_server)
        .await;

    let mut session = create_session(&mock_server);
    let result = session.scrape("https://example.com").await.unwrap();

    assert_eq!(render_json(result).unwrap(), body);
}

#[tokio::test]
async fn test_scrape_displays_payload_unchanged() {
    let mock_server = MockServer::start().await;
    let payload = json!({
        "success": true,
        "data": {
            "markdown": "# Example Domain\n\nThis domain is for use in examples.",
            "html": "<h1>Example Domain</h1>",
            "metadata": {
                "title": "Example Domain",
                "sourceURL": "https://example.com",
                "statusCode": 200,
                "language": "en"
            }
        }
    });

    Mock::given(method("POST"))
        .and(path("/scrape"))
        .and(header("authorization", format!("Bearer {}", API_KEY).as_str()))
        .and(body_json(json!({
            "url": "https://example.com",
            "formats": ["markdown", "html"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload.clone()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut session = create_session(&mock_server);
    let result = session
        .scrape("https://example.com")
        .await
        .expect("Scrape failed");

    let rendered: serde_json::Value =
        serde_json::from_str(&render_json(result).unwrap()).unwrap();
    assert_eq!(rendered, payload);

    assert!(session.view().error().is_none());
    assert!(!session.view().loading());
    assert_eq!(requests_to(&mock_server, "/scrape").await, 1);
}

#[tokio::test]
async fn test_scrape_error_message_from_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/scrape"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"success": false, "message": "bad url"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut session = create_session(&mock_server);
    let err = session.scrape("https://example.com").await.unwrap_err();

    assert_eq!(err.to_string(), "bad url");
    assert_eq!(session.view().error(), Some("bad url"));
    assert!(session.view().result().is_none());
}

#[tokio::test]
async fn test_scrape_error_without_message_uses_fallback() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/scrape"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"success": false})))
        .mount(&mock_server)
        .await;

    let mut session = create_session(&mock_server);
    session.scrape("https://example.com").await.unwrap_err();

    assert_eq!(session.view().error(), Some("Failed to scrape URL"));
}

#[tokio::test]
async fn test_scrape_error_with_non_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/scrape"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&mock_server)
        .await;

    let mut session = create_session(&mock_server);
    session.scrape("https://example.com").await.unwrap_err();

    assert_eq!(session.view().error(), Some("Failed to scrape URL"));
}

#[tokio::test]
async fn test_scrape_transport_error_is_generic() {
    // Nothing listens on port 1.
    let config = create_test_config("http://127.0.0.1:1");
    let client = ApiClient::new(&config.api).expect("Failed to build client");
    let mut session = Session::new(client, &config).expect("Failed to create session");

    let err = session.scrape("https://example.com").await.unwrap_err();

    assert_eq!(err.to_string(), "An error occurred");
    assert_eq!(session.view().error(), Some("An error occurred"));
    assert!(!session.view().loading());
}

#[tokio::test]
async fn test_scrape_sends_configured_formats() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/scrape"))
        .and(body_json(json!({
            "url": "https://example.com/docs",
            "formats": ["markdown"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": {}})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&mock_server.uri());
    config.scrape.formats = vec!["markdown".to_string()];
    let client = ApiClient::new(&config.api).expect("Failed to build client");
    let mut session = Session::new(client, &config).expect("Failed to create session");

    session
        .scrape("https://example.com/docs")
        .await
        .expect("Scrape failed");
}
