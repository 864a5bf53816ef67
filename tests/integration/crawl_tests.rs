//! End-to-end crawls against a mock forum

use crate::common::{
    config_for, html, login_page, mount_numbered_page, mount_page, topic_listing, topic_page,
    FORUM,
};
use carookee_dump::{CrawlOptions, Crawler, Credentials, ForumError, JsonArrayWriter, TopicRecord};
use serde_json::Value;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOPIC_PAGE_1: &str = include_str!("../fixtures/topic_page1.html");
const TOPIC_PAGE_2: &str = include_str!("../fixtures/topic_page2.html");

fn forum_root() -> String {
    r#"<html><body><table class="forumline">
         <tr><td><span class="forumlink"><a class="forumlink" href="/forum/testforum/sub/1">Allgemeines</a></span></td></tr>
         <tr><td><span class="forumlink"><a class="forumlink" href="/forum/testforum/sub/2">Technik</a></span></td></tr>
       </table></body></html>"#
        .to_string()
}

async fn mount_login(server: &MockServer, status: u16) {
    mount_page(server, "/forum/testforum/login", login_page()).await;
    Mock::given(method("POST"))
        .and(path("/forum/testforum/login"))
        .and(body_string_contains("sid=a1b2c3"))
        .and(body_string_contains("username=holger"))
        .respond_with(ResponseTemplate::new(status))
        .expect(1)
        .mount(server)
        .await;
}

/// Two subforums: the first holds the two-page fixture topic and a short
/// topic, the second one short topic
async fn mount_forum(server: &MockServer) {
    mount_page(server, "/forum/testforum", forum_root()).await;

    mount_page(
        server,
        "/forum/testforum/sub/1",
        topic_listing(
            "/forum/testforum/sub/1",
            &[
                ("/forum/testforum/topic/42", "Stammtisch im März"),
                ("/forum/testforum/topic/43", "Vorstellung"),
            ],
            None,
        ),
    )
    .await;
    mount_numbered_page(server, "/forum/testforum/topic/42", 2, TOPIC_PAGE_2).await;
    mount_page(server, "/forum/testforum/topic/42", TOPIC_PAGE_1).await;
    mount_page(
        server,
        "/forum/testforum/topic/43",
        topic_page(&[("anna", "Hallo zusammen")]),
    )
    .await;

    mount_page(
        server,
        "/forum/testforum/sub/2",
        topic_listing(
            "/forum/testforum/sub/2",
            &[("/forum/testforum/topic/50", "Router")],
            None,
        ),
    )
    .await;
    mount_page(
        server,
        "/forum/testforum/topic/50",
        topic_page(&[("bernd", "Neu starten"), ("carla", "Hat geholfen")]),
    )
    .await;
}

fn credentials() -> Credentials {
    Credentials::new("holger", "geheim")
}

#[tokio::test]
async fn test_full_crawl_records_topics_in_order() {
    let server = MockServer::start().await;
    mount_login(&server, 200).await;
    mount_forum(&server).await;

    let crawler = Crawler::new(config_for(&server)).unwrap();
    crawler.login(FORUM, &credentials()).await.unwrap();

    let mut records: Vec<TopicRecord> = Vec::new();
    let stats = crawler
        .run(FORUM, &CrawlOptions::default(), &mut records)
        .await
        .expect("Crawl failed");

    let order: Vec<(&str, &str, usize)> = records
        .iter()
        .map(|r| (r.forum.as_str(), r.topic.as_str(), r.thread.len()))
        .collect();
    assert_eq!(
        order,
        vec![
            ("Allgemeines", "Stammtisch im März", 5),
            ("Allgemeines", "Vorstellung", 1),
            ("Technik", "Router", 2),
        ]
    );
    assert_eq!(records[2].thread[1].author, "carla");
    assert_eq!(records[2].thread[1].content, "Hat geholfen");

    assert_eq!(stats.subforums, 2);
    assert_eq!(stats.topics, 3);
    assert_eq!(stats.posts, 8);
    // root, 2 listings, 2 pages of topic 42, topics 43 and 50
    assert_eq!(stats.requests, 7);
}

#[tokio::test]
async fn test_crawl_writes_json_array() {
    let server = MockServer::start().await;
    mount_login(&server, 200).await;
    mount_forum(&server).await;

    let crawler = Crawler::new(config_for(&server)).unwrap();
    crawler.login(FORUM, &credentials()).await.unwrap();

    let mut writer = JsonArrayWriter::new(Vec::new());
    crawler
        .run(FORUM, &CrawlOptions::default(), &mut writer)
        .await
        .unwrap();
    assert_eq!(writer.written(), 3);

    let output = String::from_utf8(writer.into_inner()).unwrap();
    let parsed: Vec<Value> = serde_json::from_str(&output).expect("Output is not a JSON array");

    assert_eq!(parsed.len(), 3);
    assert_eq!(parsed[0]["Forum"], "Allgemeines");
    assert_eq!(parsed[0]["Topic"], "Stammtisch im März");
    assert_eq!(parsed[0]["Thread"][0]["subject"], "Stammtisch im März");
    assert_eq!(parsed[1]["Thread"][0]["date"], "05.03.13, 19:30");
    assert_eq!(parsed[2]["Forum"], "Technik");
}

#[tokio::test]
async fn test_max_subforums_skips_later_subforums() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forum/testforum/sub/2"))
        .respond_with(html(""))
        .expect(0)
        .mount(&server)
        .await;
    mount_forum(&server).await;

    let crawler = Crawler::new(config_for(&server)).unwrap();
    let options = CrawlOptions {
        max_subforums: Some(1),
    };

    let mut records: Vec<TopicRecord> = Vec::new();
    let stats = crawler.run(FORUM, &options, &mut records).await.unwrap();

    assert_eq!(stats.subforums, 1);
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.forum == "Allgemeines"));
}

#[tokio::test]
async fn test_rejected_login_is_an_error() {
    let server = MockServer::start().await;
    mount_login(&server, 403).await;

    let crawler = Crawler::new(config_for(&server)).unwrap();
    let result = crawler.login(FORUM, &credentials()).await;

    match result {
        Err(ForumError::LoginRejected { forum }) => assert_eq!(forum, FORUM),
        other => panic!("Expected LoginRejected, got {:?}", other),
    }
}

#[tokio::test]
async fn test_topic_error_aborts_crawl() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forum/testforum/topic/43"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_forum(&server).await;

    let crawler = Crawler::new(config_for(&server)).unwrap();
    let mut records: Vec<TopicRecord> = Vec::new();
    let result = crawler
        .run(FORUM, &CrawlOptions::default(), &mut records)
        .await;

    match result {
        Err(ForumError::HttpStatus { url, status }) => {
            assert_eq!(status, 500);
            assert!(url.ends_with("/forum/testforum/topic/43"));
        }
        other => panic!("Expected HttpStatus, got {:?}", other),
    }
    // Topics finished before the failure were already handed over
    assert_eq!(records.len(), 1);
}

#[tokio::test]
async fn test_aborted_crawl_leaves_valid_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forum/testforum/topic/43"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_forum(&server).await;

    let crawler = Crawler::new(config_for(&server)).unwrap();
    let mut writer = JsonArrayWriter::new(Vec::new());
    let result = crawler
        .run(FORUM, &CrawlOptions::default(), &mut writer)
        .await;

    assert!(matches!(result, Err(ForumError::HttpStatus { status: 500, .. })));

    let output = String::from_utf8(writer.into_inner()).unwrap();
    let parsed: Vec<Value> =
        serde_json::from_str(&output).expect("Partial output is not a JSON array");
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0]["Topic"], "Stammtisch im März");
}

#[tokio::test]
async fn test_forum_without_subforums_yields_empty_output() {
    let server = MockServer::start().await;
    mount_page(&server, "/forum/testforum", "<html><body>Leer</body></html>").await;

    let crawler = Crawler::new(config_for(&server)).unwrap();
    let mut writer = JsonArrayWriter::new(Vec::new());
    let stats = crawler
        .run(FORUM, &CrawlOptions::default(), &mut writer)
        .await
        .unwrap();

    assert_eq!(stats.topics, 0);
    assert_eq!(stats.requests, 1);
    let parsed: Value = serde_json::from_slice(&writer.into_inner()).unwrap();
    assert_eq!(parsed, Value::Array(vec![]));
}
