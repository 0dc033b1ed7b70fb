use crate::{create_session, requests_to, API_KEY};
use firescope::output::render_json;
use firescope::{DisplayedResult, FirescopeError, JobStatus};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn status_body(status: &str, completed: u64) -> serde_json::Value {
    json!({
        "status": status,
        "total": 3,
        "completed": completed,
        "creditsUsed": completed,
        "expiresAt": "2026-10-20T12:00:00.000Z",
        "data": (0..completed)
            .map(|i| json!({
                "markdown": format!("Page {}", i),
                "metadata": {"sourceURL": format!("https://example.com/{}", i)}
            }))
            .collect::<Vec<_>>()
    })
}

async fn mount_crawl_start(server: &MockServer, id: &str) {
    Mock::given(method("POST"))
        .and(path("/crawl"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "id": id,
            "url": format!("{}/crawl/{}", server.uri(), id)
        })))
        .up_to_n_times(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_crawl_polls_until_completed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/crawl"))
        .and(header("authorization", format!("Bearer {}", API_KEY).as_str()))
        .and(body_json(json!({
            "url": "https://example.com",
            "limit": 100,
            "scrapeOptions": {"formats": ["markdown", "html"]}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "id": "job-123",
            "url": "https://api.firecrawl.dev/v1/crawl/job-123"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/crawl/job-123"))
        .and(header("authorization", format!("Bearer {}", API_KEY).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body("processing", 1)))
        .up_to_n_times(2)
        .expect(2)
        .mount(&mock_server)
        .await;

    let completed = status_body("completed", 3);
    Mock::given(method("GET"))
        .and(path("/crawl/job-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completed.clone()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut session = create_session(&mock_server);
    let result = session
        .crawl("https://example.com")
        .await
        .expect("Crawl failed");

    let rendered: serde_json::Value =
        serde_json::from_str(&render_json(result).unwrap()).unwrap();
    assert_eq!(rendered, completed);

    assert_eq!(requests_to(&mock_server, "/crawl").await, 1);
    assert_eq!(requests_to(&mock_server, "/crawl/job-123").await, 3);
    assert!(!session.view().loading());
}

#[tokio::test]
async fn test_crawl_failed_status_stops_polling() {
    let mock_server = MockServer::start().await;
    mount_crawl_start(&mock_server, "job-fail").await;

    Mock::given(method("GET"))
        .and(path("/crawl/job-fail"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body("failed", 1)))
        .mount(&mock_server)
        .await;

    let mut session = create_session(&mock_server);
    let err = session.crawl("https://example.com").await.unwrap_err();

    assert!(matches!(err, FirescopeError::CrawlFailed));
    assert_eq!(session.view().error(), Some("Crawl failed"));
    assert!(session.view().result().is_none());

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(requests_to(&mock_server, "/crawl/job-fail").await, 1);
}

#[tokio::test]
async fn test_crawl_start_error_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/crawl"))
        .respond_with(
            ResponseTemplate::new(402)
                .set_body_json(json!({"success": false, "message": "Insufficient credits"})),
        )
        .mount(&mock_server)
        .await;

    let mut session = create_session(&mock_server);
    let err = session.crawl("https://example.com").await.unwrap_err();

    assert_eq!(err.to_string(), "Insufficient credits");
    assert_eq!(session.view().error(), Some("Insufficient credits"));
    assert!(!session.view().loading());
    assert!(session.active_job().is_none());
}

#[tokio::test]
async fn test_crawl_start_error_without_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/crawl"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let mut session = create_session(&mock_server);
    session.crawl("https://example.com").await.unwrap_err();

    assert_eq!(session.view().error(), Some("Failed to start crawl"));
}

#[tokio::test]
async fn test_crawl_keeps_polling_through_errors() {
    let mock_server = MockServer::start().await;
    mount_crawl_start(&mock_server, "job-flaky").await;

    Mock::given(method("GET"))
        .and(path("/crawl/job-flaky"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/crawl/job-flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body("completed", 3)))
        .mount(&mock_server)
        .await;

    let mut session = create_session(&mock_server);
    let result = session
        .crawl("https://example.com")
        .await
        .expect("Crawl failed");

    assert_eq!(result.documents().len(), 3);
    assert_eq!(requests_to(&mock_server, "/crawl/job-flaky").await, 3);
}

#[tokio::test]
async fn test_unknown_status_keeps_polling() {
    let mock_server = MockServer::start().await;
    mount_crawl_start(&mock_server, "job-odd").await;

    Mock::given(method("GET"))
        .and(path("/crawl/job-odd"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body("cancelled", 0)))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/crawl/job-odd"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body("queued", 0)))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/crawl/job-odd"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body("completed", 3)))
        .mount(&mock_server)
        .await;

    let mut session = create_session(&mock_server);
    let result = session
        .crawl("https://example.com")
        .await
        .expect("Crawl failed");

    assert!(matches!(
        result,
        DisplayedResult::Crawl(status) if *status.status() == JobStatus::Completed
    ));
    assert_eq!(requests_to(&mock_server, "/crawl/job-odd").await, 3);
}

#[tokio::test]
async fn test_new_crawl_tears_down_previous_poller() {
    let mock_server = MockServer::start().await;
    mount_crawl_start(&mock_server, "job-old").await;
    mount_crawl_start(&mock_server, "job-new").await;

    Mock::given(method("GET"))
        .and(path("/crawl/job-old"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body("scraping", 1)))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/crawl/job-new"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body("completed", 3)))
        .mount(&mock_server)
        .await;

    let mut session = create_session(&mock_server);
    let first = session.start_crawl("https://example.com/a").await.unwrap();
    assert_eq!(first, "job-old");
    tokio::time::sleep(Duration::from_millis(100)).await;

    let second = session.start_crawl("https://example.com/b").await.unwrap();
    assert_eq!(second, "job-new");
    assert_eq!(session.active_job(), Some("job-new"));

    session.wait().await.expect("Crawl failed");

    let old_polls = requests_to(&mock_server, "/crawl/job-old").await;
    assert!(old_polls >= 1);
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(requests_to(&mock_server, "/crawl/job-old").await, old_polls);
}

#[tokio::test]
async fn test_dropping_session_stops_polling() {
    let mock_server = MockServer::start().await;
    mount_crawl_start(&mock_server, "job-drop").await;

    Mock::given(method("GET"))
        .and(path("/crawl/job-drop"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body("scraping", 1)))
        .mount(&mock_server)
        .await;

    let mut session = create_session(&mock_server);
    session.start_crawl("https://example.com").await.unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;
    drop(session);
    tokio::time::sleep(Duration::from_millis(50)).await;

    let polls = requests_to(&mock_server, "/crawl/job-drop").await;
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(requests_to(&mock_server, "/crawl/job-drop").await, polls);
}
