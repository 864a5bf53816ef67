//! Listing and topic extraction against fixed fixtures

use crate::common::{
    config_for, extractor, html, mount_numbered_page, mount_page, session_for, topic_listing,
    topic_page, walker,
};
use carookee_dump::crawler::PageFetcher;
use carookee_dump::LinkEntry;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer};

const TOPIC_PATH: &str = "/forum/testforum/topic/42";
const TOPIC_PAGE_1: &str = include_str!("../fixtures/topic_page1.html");
const TOPIC_PAGE_2: &str = include_str!("../fixtures/topic_page2.html");
const TOPIC_EXPECTED: &str = include_str!("../fixtures/topic_expected.json");

async fn serve_topic_fixture(server: &MockServer) {
    mount_numbered_page(server, TOPIC_PATH, 2, TOPIC_PAGE_2).await;
    mount_page(server, TOPIC_PATH, TOPIC_PAGE_1).await;
}

#[tokio::test]
async fn test_extract_posts_matches_golden_file() {
    let server = MockServer::start().await;
    serve_topic_fixture(&server).await;

    let config = config_for(&server);
    let session = session_for(&config);
    let fetcher = PageFetcher::new(&session, Url::parse(&server.uri()).unwrap());

    let posts = extractor(&config)
        .extract_posts(&fetcher, &fetcher.site_url(TOPIC_PATH))
        .await
        .expect("Extraction failed");

    let expected: serde_json::Value = serde_json::from_str(TOPIC_EXPECTED).unwrap();
    assert_eq!(serde_json::to_value(&posts).unwrap(), expected);
    assert_eq!(session.requests_sent(), 2);
}

#[tokio::test]
async fn test_extract_posts_is_repeatable() {
    let server = MockServer::start().await;
    // Both runs fetch page 2, so the single-use numbered mock does not fit
    Mock::given(method("GET"))
        .and(path(TOPIC_PATH))
        .and(query_param("p", "2"))
        .respond_with(html(TOPIC_PAGE_2))
        .expect(2)
        .mount(&server)
        .await;
    mount_page(&server, TOPIC_PATH, TOPIC_PAGE_1).await;

    let config = config_for(&server);
    let session = session_for(&config);
    let fetcher = PageFetcher::new(&session, Url::parse(&server.uri()).unwrap());
    let extractor = extractor(&config);
    let url = fetcher.site_url(TOPIC_PATH);

    let first = extractor.extract_posts(&fetcher, &url).await.unwrap();
    let second = extractor.extract_posts(&fetcher, &url).await.unwrap();

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[tokio::test]
async fn test_fetch_topic_keeps_title_and_link() {
    let server = MockServer::start().await;
    serve_topic_fixture(&server).await;

    let config = config_for(&server);
    let session = session_for(&config);
    let fetcher = PageFetcher::new(&session, Url::parse(&server.uri()).unwrap());
    let entry = LinkEntry::new(fetcher.site_url(TOPIC_PATH), "Stammtisch im März");

    let topic = extractor(&config)
        .fetch_topic(&fetcher, &entry)
        .await
        .unwrap();

    assert_eq!(topic.title, "Stammtisch im März");
    assert_eq!(topic.link, entry.href);
    assert_eq!(topic.posts.len(), 5);
    assert_eq!(topic.posts[3].date, "02.02.13, 09:05");
}

#[tokio::test]
async fn test_single_page_topic_needs_one_request() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/forum/testforum/topic/7",
        topic_page(&[("anna", "Kurz und gut.")]),
    )
    .await;

    let config = config_for(&server);
    let session = session_for(&config);
    let fetcher = PageFetcher::new(&session, Url::parse(&server.uri()).unwrap());

    let posts = extractor(&config)
        .extract_posts(&fetcher, &fetcher.site_url("/forum/testforum/topic/7"))
        .await
        .unwrap();

    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].subject, "Beitrag");
    assert_eq!(session.requests_sent(), 1);
}

#[tokio::test]
async fn test_list_topics_spans_three_pages() {
    let server = MockServer::start().await;
    let listing = "/forum/testforum/sub/1";

    let topics: Vec<(String, String)> = (1..=12)
        .map(|n| (format!("/forum/testforum/topic/{}", n), format!("Thema {}", n)))
        .collect();
    let page = |range: std::ops::Range<usize>, last_page: Option<u32>| {
        let entries: Vec<(&str, &str)> = topics[range]
            .iter()
            .map(|(href, title)| (href.as_str(), title.as_str()))
            .collect();
        topic_listing(listing, &entries, last_page)
    };

    mount_numbered_page(&server, listing, 2, page(5..10, Some(3))).await;
    mount_numbered_page(&server, listing, 3, page(10..12, Some(3))).await;
    mount_page(&server, listing, page(0..5, Some(3))).await;

    let config = config_for(&server);
    let session = session_for(&config);
    let fetcher = PageFetcher::new(&session, Url::parse(&server.uri()).unwrap());

    let entries = walker()
        .list_topics(&fetcher, &fetcher.site_url(listing))
        .await
        .unwrap();

    assert_eq!(entries.len(), 12);
    let titles: Vec<String> = entries.iter().map(|e| e.label.clone()).collect();
    let expected: Vec<String> = (1..=12).map(|n| format!("Thema {}", n)).collect();
    assert_eq!(titles, expected);
    assert_eq!(
        entries[11].href,
        format!("{}/forum/testforum/topic/12", server.uri())
    );
    assert_eq!(session.requests_sent(), 3);
}

#[tokio::test]
async fn test_malformed_pagination_falls_back_to_first_page() {
    let server = MockServer::start().await;
    let listing = "/forum/testforum/sub/9";
    mount_page(
        &server,
        listing,
        r##"<a class="topictitle" href="/forum/testforum/topic/1">Eins</a>
            <a href="/forum/testforum/sub/9?p=letzte#bot">Letzte Seite</a>"##,
    )
    .await;

    let config = config_for(&server);
    let session = session_for(&config);
    let fetcher = PageFetcher::new(&session, Url::parse(&server.uri()).unwrap());

    let entries = walker()
        .list_topics(&fetcher, &fetcher.site_url(listing))
        .await
        .unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(session.requests_sent(), 1);
}
