//! Traversal tests against a mock wiki
//!
//! These tests run the real HTTP fetcher and SQLite store against wiremock
//! servers and check what ends up in the link store.

use std::time::Duration;
use tempfile::TempDir;
use url::Url;
use wiki_trawl::config::Config;
use wiki_trawl::crawler::{run_trawl, ArticleFilter, FixedDelay, HttpFetcher, Traversal};
use wiki_trawl::storage::{LinkRecord, LinkStore, SqliteLinkStore, StorageError, StorageResult};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Renders a page whose body links to each href
fn page(hrefs: &[&str]) -> String {
    let anchors: String = hrefs
        .iter()
        .map(|href| format!(r#"<li><a href="{}">{}</a></li>"#, href, href))
        .collect();
    format!(
        r#"<html><head><title>Test</title></head><body><ul>{}</ul></body></html>"#,
        anchors
    )
}

async fn mount_page(server: &MockServer, at: &str, hrefs: &[&str]) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(page(hrefs))
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

fn traversal<S: LinkStore>(store: S) -> Traversal<HttpFetcher, S, FixedDelay> {
    let fetcher = HttpFetcher::new(&Config::default().user_agent).expect("Failed to build fetcher");
    Traversal::new(fetcher, store, FixedDelay::none(), ArticleFilter::default())
}

fn absolute(server: &MockServer, at: &str) -> String {
    format!("{}{}", server.uri(), at)
}

fn seed(server: &MockServer, at: &str) -> Url {
    Url::parse(&absolute(server, at)).expect("Failed to parse seed")
}

/// Link store that refuses any batch containing a poisoned URL
struct PoisonedStore {
    inner: SqliteLinkStore,
    poison: &'static str,
}

impl LinkStore for PoisonedStore {
    fn reset(&mut self) -> StorageResult<()> {
        self.inner.reset()
    }

    fn upsert_all(&mut self, urls: &[String]) -> StorageResult<usize> {
        if urls.iter().any(|u| u.contains(self.poison)) {
            return Err(StorageError::Database("disk on fire".to_string()));
        }
        self.inner.upsert_all(urls)
    }

    fn contains(&self, url: &str) -> StorageResult<bool> {
        self.inner.contains(url)
    }

    fn get_record(&self, url: &str) -> StorageResult<Option<LinkRecord>> {
        self.inner.get_record(url)
    }

    fn count(&self) -> StorageResult<u64> {
        self.inner.count()
    }

    fn urls(&self) -> StorageResult<Vec<String>> {
        self.inner.urls()
    }
}

#[tokio::test]
async fn test_depth_one_stores_exactly_the_seed_links() {
    let server = MockServer::start().await;
    mount_page(&server, "/wiki/Start", &["/wiki/A", "/wiki/B"]).await;
    mount_page(&server, "/wiki/A", &["/wiki/C"]).await;
    mount_page(&server, "/wiki/B", &["/wiki/D"]).await;

    let mut t = traversal(SqliteLinkStore::open_in_memory().unwrap());
    let report = t.run(&seed(&server, "/wiki/Start"), 1).await.unwrap();

    assert_eq!(
        t.store().urls().unwrap(),
        vec![absolute(&server, "/wiki/A"), absolute(&server, "/wiki/B")]
    );
    assert_eq!(report.pages_explored, 1);
    assert_eq!(report.skipped_depth, 2);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn test_only_article_links_are_stored() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/wiki/Start",
        &[
            "/wiki/Python",
            "/wiki/Python:History",
            "/wiki/Special:Random",
            "https://python.org",
            "/w/index.php?title=Python",
        ],
    )
    .await;

    let mut t = traversal(SqliteLinkStore::open_in_memory().unwrap());
    t.run(&seed(&server, "/wiki/Start"), 1).await.unwrap();

    assert_eq!(
        t.store().urls().unwrap(),
        vec![absolute(&server, "/wiki/Python")]
    );
}

#[tokio::test]
async fn test_failed_child_does_not_abort_siblings() {
    let server = MockServer::start().await;
    mount_page(&server, "/wiki/Start", &["/wiki/Broken", "/wiki/Working"]).await;
    mount_page(&server, "/wiki/Working", &["/wiki/Leaf"]).await;
    mount_page(&server, "/wiki/Leaf", &[]).await;

    Mock::given(method("GET"))
        .and(path("/wiki/Broken"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let mut t = traversal(SqliteLinkStore::open_in_memory().unwrap());
    let report = t.run(&seed(&server, "/wiki/Start"), 3).await.unwrap();

    assert_eq!(report.fetch_failures, 1);
    assert_eq!(report.frame_errors, 0);
    assert!(t.store().contains(&absolute(&server, "/wiki/Leaf")).unwrap());
    assert!(t.store().contains(&absolute(&server, "/wiki/Broken")).unwrap());
}

#[tokio::test]
async fn test_cyclic_graph_fetches_each_page_once() {
    let server = MockServer::start().await;
    mount_page(&server, "/wiki/A", &["/wiki/B"]).await;
    mount_page(&server, "/wiki/B", &["/wiki/A", "/wiki/C"]).await;
    mount_page(&server, "/wiki/C", &["/wiki/A", "/wiki/B", "/wiki/C"]).await;

    let mut t = traversal(SqliteLinkStore::open_in_memory().unwrap());
    let report = t.run(&seed(&server, "/wiki/A"), 6).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let mut paths: Vec<String> = requests.iter().map(|r| r.url.path().to_string()).collect();
    paths.sort();

    assert_eq!(paths, vec!["/wiki/A", "/wiki/B", "/wiki/C"]);
    assert_eq!(report.pages_explored, 3);
    assert_eq!(t.store().count().unwrap(), 3);
}

#[tokio::test]
async fn test_persistence_failure_is_contained_in_its_frame() {
    let server = MockServer::start().await;
    mount_page(&server, "/wiki/Start", &["/wiki/Bad", "/wiki/Good"]).await;
    mount_page(&server, "/wiki/Bad", &["/wiki/Poison", "/wiki/Hidden"]).await;
    mount_page(&server, "/wiki/Good", &["/wiki/Fine"]).await;

    let store = PoisonedStore {
        inner: SqliteLinkStore::open_in_memory().unwrap(),
        poison: "Poison",
    };
    let mut t = traversal(store);
    let report = t.run(&seed(&server, "/wiki/Start"), 3).await.unwrap();

    assert_eq!(report.frame_errors, 1);
    assert!(t.store().contains(&absolute(&server, "/wiki/Fine")).unwrap());
    assert!(!t.store().contains(&absolute(&server, "/wiki/Hidden")).unwrap());

    // Children of the failed frame are not explored
    let requests = server.received_requests().await.unwrap();
    assert!(requests.iter().all(|r| r.url.path() != "/wiki/Hidden"));
}

#[tokio::test]
async fn test_interrupt_keeps_completed_pages() {
    let server = MockServer::start().await;
    mount_page(&server, "/wiki/Start", &["/wiki/Fast", "/wiki/Slow"]).await;
    mount_page(&server, "/wiki/Fast", &["/wiki/FromFast"]).await;
    mount_page(&server, "/wiki/FromFast", &[]).await;

    Mock::given(method("GET"))
        .and(path("/wiki/Slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(page(&["/wiki/FromSlow"]))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let mut t = traversal(SqliteLinkStore::open_in_memory().unwrap());
    let outcome = t
        .run_until(
            &seed(&server, "/wiki/Start"),
            3,
            tokio::time::sleep(Duration::from_millis(1000)),
        )
        .await
        .unwrap();

    assert!(outcome.is_interrupted());
    assert!(outcome.report().interrupted);
    // Start, Fast and FromFast finish before Slow hangs
    assert_eq!(outcome.report().pages_explored, 3);

    let stored = t.store().urls().unwrap();
    assert!(stored.contains(&absolute(&server, "/wiki/FromFast")));
    assert!(stored.contains(&absolute(&server, "/wiki/Slow")));
    assert!(!stored.contains(&absolute(&server, "/wiki/FromSlow")));
}

#[tokio::test]
async fn test_run_until_completes_when_not_interrupted() {
    let server = MockServer::start().await;
    mount_page(&server, "/wiki/Start", &["/wiki/A"]).await;
    mount_page(&server, "/wiki/A", &[]).await;

    let mut t = traversal(SqliteLinkStore::open_in_memory().unwrap());
    let outcome = t
        .run_until(&seed(&server, "/wiki/Start"), 6, std::future::pending::<()>())
        .await
        .unwrap();

    assert!(!outcome.is_interrupted());
    assert_eq!(outcome.report().pages_explored, 2);
    assert!(outcome.report().finished_at.is_some());
}

#[tokio::test]
async fn test_run_trawl_resets_previous_store() {
    let server = MockServer::start().await;
    mount_page(&server, "/wiki/Start", &["/wiki/New"]).await;
    mount_page(&server, "/wiki/New", &[]).await;

    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("url_storage.db");

    {
        let mut store = SqliteLinkStore::open(&db_path).unwrap();
        store
            .upsert_all(&["https://stale.example/wiki/Old".to_string()])
            .unwrap();
    }

    let mut config = Config::default();
    config.output.database_path = db_path.display().to_string();
    config.crawler.request_delay_ms = 0;

    let outcome = run_trawl(&config, &seed(&server, "/wiki/Start"), std::future::pending())
        .await
        .expect("Run failed");
    assert!(!outcome.is_interrupted());

    let store = SqliteLinkStore::open(&db_path).unwrap();
    assert_eq!(store.urls().unwrap(), vec![absolute(&server, "/wiki/New")]);
    let record = store
        .get_record(&absolute(&server, "/wiki/New"))
        .unwrap()
        .unwrap();
    assert_eq!(record.id, 1);
}

#[tokio::test]
async fn test_pacing_delay_is_applied_per_fetch() {
    let server = MockServer::start().await;
    mount_page(&server, "/wiki/Start", &["/wiki/A", "/wiki/B"]).await;
    mount_page(&server, "/wiki/A", &[]).await;
    mount_page(&server, "/wiki/B", &[]).await;

    let fetcher = HttpFetcher::new(&Config::default().user_agent).unwrap();
    let mut t = Traversal::new(
        fetcher,
        SqliteLinkStore::open_in_memory().unwrap(),
        FixedDelay::from_millis(50),
        ArticleFilter::default(),
    );

    let start = std::time::Instant::now();
    let report = t.run(&seed(&server, "/wiki/Start"), 2).await.unwrap();

    assert_eq!(report.pages_explored, 3);
    assert!(start.elapsed() >= Duration::from_millis(150));
}
