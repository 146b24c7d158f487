//! Integration tests for the search run against a mock Data API.
//!
//! These tests verify:
//! - The 10-page bound and continuation-token following
//! - Batching of video and channel lookups and channel de-duplication
//! - Abort-on-error with body messages and status fallbacks
//! - End-to-end qualification and ranking

mod helpers;

use std::sync::{Arc, Mutex};

use chrono::Utc;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use helpers::*;
use video_scout::search::{ProgressCallback, SearchProgress};
use video_scout::error_handling::Endpoint;
use video_scout::{run_search, ApiError, FilterConfig, RatioThreshold, ShortsMode};

/// Answers `videos.list` with one video per requested id, all on `channel_of(id)`.
fn videos_responder(
    views: u64,
    channel_of: fn(&str) -> String,
) -> impl Fn(&Request) -> ResponseTemplate + Send + Sync {
    move |req: &Request| {
        let items = requested_ids(req)
            .iter()
            .map(|id| video(id, &channel_of(id), views, "PT5M", &format!("Video {}", id)))
            .collect();
        ResponseTemplate::new(200).set_body_json(list(items))
    }
}

fn recording_callback() -> (ProgressCallback, Arc<Mutex<Vec<SearchProgress>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let callback: ProgressCallback = Some(Arc::new(move |p: &SearchProgress| {
        sink.lock().unwrap().push(*p);
    }));
    (callback, seen)
}

#[tokio::test]
async fn test_search_stops_after_ten_pages() {
    let server = MockServer::start().await;
    // every page carries fresh ids and points at the next page
    Mock::given(method("GET"))
        .and(path(endpoint("search")))
        .respond_with(|req: &Request| {
            let page: u32 = query_value(req, "pageToken")
                .and_then(|t| t.parse().ok())
                .unwrap_or(0);
            let next = (page + 1).to_string();
            ResponseTemplate::new(200)
                .set_body_json(search_page(&ids(&format!("p{}_", page), 50), Some(&next)))
        })
        .expect(10)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(endpoint("videos")))
        .respond_with(ResponseTemplate::new(200).set_body_json(list(vec![])))
        .expect(10)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(endpoint("channels")))
        .respond_with(ResponseTemplate::new(200).set_body_json(list(vec![])))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let (callback, seen) = recording_callback();
    let outcome = run_search(&client, &FilterConfig::default(), 120, Utc::now(), &callback)
        .await
        .expect("search should succeed");

    assert_eq!(outcome.progress.current_page, 10);
    assert_eq!(outcome.progress.total_pages, 10);
    assert_eq!(outcome.progress.total_fetched, 500);
    assert!(outcome.rows.is_empty());

    let seen = seen.lock().unwrap();
    // one update per page plus the final one
    assert_eq!(seen.len(), 11);
    assert_eq!(seen[0].current_page, 1);
    assert_eq!(seen[0].total_fetched, 50);
    assert_eq!(seen[9].total_fetched, 500);
}

#[tokio::test]
async fn test_search_follows_token_until_absent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(endpoint("search")))
        .and(query_param_is_missing("pageToken"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(search_page(&ids("a", 3), Some("page2"))),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(endpoint("search")))
        .and(query_param("pageToken", "page2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page(&ids("b", 2), None)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(endpoint("videos")))
        .respond_with(videos_responder(1_000, |_| "UC1".to_string()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(endpoint("channels")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(list(vec![channel("UC1", 10, false, None)])),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let filter = FilterConfig {
        min_views: 0,
        ..Default::default()
    };
    let outcome = run_search(&client, &filter, 120, Utc::now(), &None)
        .await
        .expect("search should succeed");

    assert_eq!(outcome.progress.current_page, 2);
    assert_eq!(outcome.progress.total_fetched, 5);
    assert_eq!(outcome.total_before, 5);
    assert_eq!(outcome.rows.len(), 5);
}

#[tokio::test]
async fn test_search_sends_query_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(endpoint("search")))
        .and(query_param("key", TEST_KEY))
        .and(query_param("part", "snippet"))
        .and(query_param("type", "video"))
        .and(query_param("maxResults", "20"))
        .and(query_param("q", "hair care"))
        .and(query_param("order", "relevance"))
        .and(query_param("regionCode", "JP"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page(&[], None)))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let filter = FilterConfig {
        keyword: " hair care ".to_string(),
        country: Some("jp".to_string()),
        page_size: video_scout::PageSize::Twenty,
        ..Default::default()
    };
    let outcome = run_search(&client, &filter, 120, Utc::now(), &None)
        .await
        .expect("empty search is not an error");
    assert!(outcome.rows.is_empty());
    assert_eq!(outcome.keyword, "hair care");

    let requests = server.received_requests().await.unwrap();
    let published_after = query_value(&requests[0], "publishedAfter").unwrap();
    assert!(published_after.ends_with('Z'));
    assert!(chrono::DateTime::parse_from_rfc3339(&published_after).is_ok());
}

#[tokio::test]
async fn test_lookups_are_batched_and_channels_deduplicated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(endpoint("search")))
        .and(query_param_is_missing("pageToken"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(search_page(&ids("v", 50), Some("p2"))),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(endpoint("search")))
        .and(query_param("pageToken", "p2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(search_page(&ids("w", 50), Some("p3"))),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(endpoint("search")))
        .and(query_param("pageToken", "p3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page(&ids("x", 20), None)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(endpoint("videos")))
        .respond_with(videos_responder(50_000, |id| {
            if id.starts_with('w') {
                "UC_B".to_string()
            } else {
                "UC_A".to_string()
            }
        }))
        .expect(3)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(endpoint("channels")))
        .respond_with(ResponseTemplate::new(200).set_body_json(list(vec![
            channel("UC_A", 1_000, false, Some("JP")),
            channel("UC_B", 1_000, false, Some("US")),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let outcome = run_search(&client, &FilterConfig::default(), 120, Utc::now(), &None)
        .await
        .expect("search should succeed");
    assert_eq!(outcome.rows.len(), 120);

    let requests = server.received_requests().await.unwrap();
    let video_batches: Vec<usize> = requests
        .iter()
        .filter(|r| r.url.path() == endpoint("videos"))
        .map(|r| requested_ids(r).len())
        .collect();
    assert_eq!(video_batches, vec![50, 50, 20]);

    let channel_request = requests
        .iter()
        .find(|r| r.url.path() == endpoint("channels"))
        .expect("channel lookup");
    assert_eq!(requested_ids(channel_request), vec!["UC_A", "UC_B"]);
}

#[tokio::test]
async fn test_error_message_from_body_aborts_search() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(endpoint("search")))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page(&ids("v", 3), None)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(endpoint("videos")))
        .respond_with(api_error(403, "The request cannot be completed because you have exceeded your quota."))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(endpoint("channels")))
        .respond_with(ResponseTemplate::new(200).set_body_json(list(vec![])))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = run_search(&client, &FilterConfig::default(), 120, Utc::now(), &None)
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "The request cannot be completed because you have exceeded your quota."
    );
    assert!(matches!(err, ApiError::Http { status: 403, .. }));
    assert_eq!(client.stats().total_failures(), 1);
}

#[tokio::test]
async fn test_unparseable_error_body_uses_status_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(endpoint("search")))
        .respond_with(ResponseTemplate::new(503).set_body_string("<html>unavailable</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = run_search(&client, &FilterConfig::default(), 120, Utc::now(), &None)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "search.list HTTP 503");
}

#[tokio::test]
async fn test_unreadable_success_body_aborts_search() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(endpoint("search")))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page(&ids("v", 2), None)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(endpoint("videos")))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(endpoint("channels")))
        .respond_with(ResponseTemplate::new(200).set_body_json(list(vec![])))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = run_search(&client, &FilterConfig::default(), 120, Utc::now(), &None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ApiError::Decode {
            endpoint: Endpoint::Videos,
            ..
        }
    ));
    assert!(err.to_string().starts_with("videos.list returned an unreadable body"));
    assert_eq!(client.stats().failure_count(Endpoint::Videos), 1);
}

#[tokio::test]
async fn test_ids_repeated_across_pages_are_kept_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(endpoint("search")))
        .and(query_param_is_missing("pageToken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page(
            &["a".to_string(), "dup".to_string()],
            Some("p2"),
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(endpoint("search")))
        .and(query_param("pageToken", "p2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page(
            &["dup".to_string(), "b".to_string()],
            None,
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(endpoint("videos")))
        .respond_with(videos_responder(90_000, |_| "UC1".to_string()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(endpoint("channels")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(list(vec![channel("UC1", 1_000, false, None)])),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let outcome = run_search(&client, &FilterConfig::default(), 120, Utc::now(), &None)
        .await
        .expect("search should succeed");

    assert_eq!(outcome.progress.total_fetched, 3);
    let requests = server.received_requests().await.unwrap();
    let videos_request = requests
        .iter()
        .find(|r| r.url.path() == endpoint("videos"))
        .expect("videos lookup issued");
    assert_eq!(requested_ids(videos_request), vec!["a", "dup", "b"]);

    let mut row_ids: Vec<&str> = outcome.rows.iter().map(|r| r.video_id.as_str()).collect();
    row_ids.sort_unstable();
    assert_eq!(row_ids, vec!["a", "b", "dup"]);
}

#[tokio::test]
async fn test_search_ranks_qualifying_rows() {
    let server = MockServer::start().await;
    let search_ids: Vec<String> = ["big", "short", "hidden", "weak", "small"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    Mock::given(method("GET"))
        .and(path(endpoint("search")))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page(&search_ids, None)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(endpoint("videos")))
        .respond_with(ResponseTemplate::new(200).set_body_json(list(vec![
            video("small", "UC_SMALL", 40_000, "PT8M", "small channel hit"),
            video("big", "UC_SMALL", 90_000, "PT12M", "bigger hit"),
            video("short", "UC_SMALL", 80_000, "PT45S", "quick tip"),
            video("hidden", "UC_HIDDEN", 70_000, "PT9M", "hidden subs"),
            video("weak", "UC_BIG", 60_000, "PT9M", "big channel"),
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(endpoint("channels")))
        .respond_with(ResponseTemplate::new(200).set_body_json(list(vec![
            channel("UC_SMALL", 10_000, false, Some("JP")),
            channel("UC_HIDDEN", 0, true, Some("JP")),
            channel("UC_BIG", 1_000_000, false, Some("JP")),
        ])))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let strict = FilterConfig {
        ratio_threshold: RatioThreshold::Three,
        ..Default::default()
    };
    let outcome = run_search(&client, &strict, 120, Utc::now(), &None)
        .await
        .unwrap();
    let ranked: Vec<&str> = outcome.rows.iter().map(|r| r.video_id.as_str()).collect();
    assert_eq!(ranked, vec!["big", "small"]);
    assert_eq!(outcome.total_before, 5);
    assert_eq!(outcome.progress.total_filtered, 2);
    assert_eq!(outcome.rows[0].matched_rule.label(), "3x");
    assert_eq!(outcome.rows[0].spread_rate, Some(9.0));

    let relaxed = FilterConfig {
        include_hidden: true,
        shorts_mode: ShortsMode::Include,
        ..Default::default()
    };
    let outcome = run_search(&client, &relaxed, 120, Utc::now(), &None)
        .await
        .unwrap();
    let ranked: Vec<&str> = outcome.rows.iter().map(|r| r.video_id.as_str()).collect();
    assert_eq!(ranked, vec!["big", "short", "hidden", "weak", "small"]);
    let hidden = &outcome.rows[2];
    assert!(hidden.hidden_subscriber_count);
    assert_eq!(hidden.spread_rate, None);
    assert_eq!(hidden.matched_rule.label(), "minViews");
}
