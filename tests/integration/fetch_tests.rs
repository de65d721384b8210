//! HTTP fetcher tests against a mock server

use url::Url;
use wiki_trawl::config::UserAgentConfig;
use wiki_trawl::crawler::{FetchError, HttpFetcher, PageFetcher};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher() -> HttpFetcher {
    HttpFetcher::new(&UserAgentConfig::default()).expect("Failed to build fetcher")
}

#[tokio::test]
async fn test_fetch_returns_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wiki/Start"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Test content"))
        .mount(&mock_server)
        .await;

    let url = Url::parse(&format!("{}/wiki/Start", mock_server.uri())).unwrap();
    let body = fetcher().fetch(&url).await.expect("Fetch failed");

    assert_eq!(body, "Test content");
}

#[tokio::test]
async fn test_fetch_sends_user_agent() {
    let mock_server = MockServer::start().await;
    let config = UserAgentConfig {
        crawler_name: "TestBot".to_string(),
        crawler_version: "2.0".to_string(),
        contact_url: "https://example.com/contact".to_string(),
        contact_email: "test@example.com".to_string(),
    };

    Mock::given(method("GET"))
        .and(header(
            "user-agent",
            "TestBot/2.0 (+https://example.com/contact; test@example.com)",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::new(&config).unwrap();
    let url = Url::parse(&format!("{}/wiki/Any", mock_server.uri())).unwrap();

    assert_eq!(fetcher.fetch(&url).await.unwrap(), "ok");
}

#[tokio::test]
async fn test_fetch_requests_encoded_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wiki/Caf%C3%A9"))
        .respond_with(ResponseTemplate::new(200).set_body_string("coffee"))
        .mount(&mock_server)
        .await;

    let url = Url::parse(&format!("{}/wiki/Café", mock_server.uri())).unwrap();

    assert_eq!(fetcher().fetch(&url).await.unwrap(), "coffee");
}

#[tokio::test]
async fn test_fetch_decodes_invalid_utf8_lossily() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![b'o', b'k', 0xff]))
        .mount(&mock_server)
        .await;

    let url = Url::parse(&format!("{}/wiki/Bytes", mock_server.uri())).unwrap();
    let body = fetcher().fetch(&url).await.unwrap();

    assert!(body.starts_with("ok"));
    assert!(body.contains('\u{FFFD}'));
}

#[tokio::test]
async fn test_fetch_reports_status_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let url = Url::parse(&format!("{}/wiki/Missing", mock_server.uri())).unwrap();
    let err = fetcher().fetch(&url).await.unwrap_err();

    assert!(matches!(err, FetchError::Status { status: 404, .. }));
    assert_eq!(err.url(), url.as_str());
}

#[tokio::test]
async fn test_fetch_reports_transport_failure() {
    // Bind and drop a listener so the port is closed
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let url = Url::parse(&format!("http://127.0.0.1:{}/wiki/Gone", port)).unwrap();
    let err = fetcher().fetch(&url).await.unwrap_err();

    assert!(matches!(err, FetchError::Transport { .. }));
    assert_eq!(err.status(), None);
}
