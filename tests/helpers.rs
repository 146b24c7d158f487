// Shared test helpers: JSON fixtures in the Data API's wire shape and a
// mock API server wired into a client or session.

#![allow(dead_code)] // Each test binary uses a different subset

use std::sync::Arc;

use serde_json::{json, Value};
use wiremock::{MockServer, Request, ResponseTemplate};

use video_scout::storage::{KeyStore, MemoryKeyStore};
use video_scout::{ApiClient, Config, Session};

pub const API_PATH: &str = "/youtube/v3";
pub const TEST_KEY: &str = "test-key";

pub fn endpoint(name: &str) -> String {
    format!("{}/{}", API_PATH, name)
}

/// Library config pointing at the mock server.
pub fn test_config(server: &MockServer) -> Config {
    Config {
        api_base_url: format!("{}{}", server.uri(), API_PATH),
        timeout_seconds: 5,
        ..Default::default()
    }
}

pub fn test_client(server: &MockServer) -> ApiClient {
    ApiClient::new(&test_config(server), TEST_KEY).expect("Failed to build API client")
}

/// Session with `TEST_KEY` already stored.
pub fn test_session(server: &MockServer) -> Session {
    test_session_with_store(server, Arc::new(MemoryKeyStore::with_key(TEST_KEY)))
}

pub fn test_session_with_store(server: &MockServer, store: Arc<dyn KeyStore>) -> Session {
    Session::new(test_config(server), store).expect("Failed to build session")
}

/// One `search.list` page.
pub fn search_page(video_ids: &[String], next_page_token: Option<&str>) -> Value {
    let items: Vec<Value> = video_ids
        .iter()
        .map(|id| json!({"kind": "youtube#searchResult", "id": {"kind": "youtube#video", "videoId": id}}))
        .collect();
    let mut page = json!({"kind": "youtube#searchListResponse", "items": items});
    if let Some(token) = next_page_token {
        page["nextPageToken"] = json!(token);
    }
    page
}

pub fn ids(prefix: &str, count: usize) -> Vec<String> {
    (0..count).map(|i| format!("{}{}", prefix, i)).collect()
}

/// A `videos.list` item.
pub fn video(id: &str, channel_id: &str, views: u64, duration: &str, title: &str) -> Value {
    json!({
        "id": id,
        "snippet": {
            "title": title,
            "description": "",
            "channelId": channel_id,
            "channelTitle": format!("Channel {}", channel_id),
            "publishedAt": "2025-05-01T12:00:00Z",
            "thumbnails": {
                "default": {"url": format!("https://i.ytimg.com/vi/{}/default.jpg", id)},
                "medium": {"url": format!("https://i.ytimg.com/vi/{}/mqdefault.jpg", id)}
            },
            "tags": []
        },
        "statistics": {"viewCount": views.to_string(), "likeCount": "10"},
        "contentDetails": {"duration": duration}
    })
}

/// A `channels.list` item.
pub fn channel(id: &str, subscribers: u64, hidden: bool, country: Option<&str>) -> Value {
    let mut snippet = json!({"title": format!("Channel {}", id)});
    if let Some(country) = country {
        snippet["country"] = json!(country);
    }
    json!({
        "id": id,
        "snippet": snippet,
        "statistics": {
            "subscriberCount": subscribers.to_string(),
            "hiddenSubscriberCount": hidden
        }
    })
}

pub fn list(items: Vec<Value>) -> Value {
    json!({ "items": items })
}

/// A comment resource; `parent_id` is set only on replies that declare it.
pub fn comment(id: &str, text: &str, parent_id: Option<&str>) -> Value {
    let mut snippet = json!({
        "authorDisplayName": format!("author of {}", id),
        "textDisplay": text,
        "textOriginal": text,
        "likeCount": 2,
        "publishedAt": "2025-06-01T00:00:00Z",
        "updatedAt": "2025-06-02T00:00:00Z"
    });
    if let Some(parent) = parent_id {
        snippet["parentId"] = json!(parent);
    }
    json!({ "id": id, "snippet": snippet })
}

pub fn thread(top: Value, replies: Vec<Value>) -> Value {
    let mut thread = json!({ "snippet": { "topLevelComment": top } });
    if !replies.is_empty() {
        thread["replies"] = json!({ "comments": replies });
    }
    thread
}

pub fn comment_page(threads: Vec<Value>, next_page_token: Option<&str>) -> Value {
    let mut page = json!({ "items": threads });
    if let Some(token) = next_page_token {
        page["nextPageToken"] = json!(token);
    }
    page
}

/// Value of query parameter `name` in `request`.
pub fn query_value(request: &Request, name: &str) -> Option<String> {
    request
        .url
        .query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

/// Comma-separated `id` parameter of a lookup request.
pub fn requested_ids(request: &Request) -> Vec<String> {
    query_value(request, "id")
        .map(|ids| ids.split(',').map(str::to_string).collect())
        .unwrap_or_default()
}

/// Error body in the Data API's shape.
pub fn api_error(status: u16, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({
        "error": {"code": status, "message": message, "errors": [{"reason": "forbidden"}]}
    }))
}
