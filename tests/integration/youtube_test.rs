// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{full_credentials, received_count, received_query_values, service};
use collectrs::domain::comments::{ScrapeError, StaticCredentials};
use collectrs::domain::models::comment::{Platform, ScrapeRequest};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn comment(id: &str, text: &str, author: &str) -> Value {
    json!({
        "id": id,
        "snippet": {
            "textOriginal": text,
            "authorDisplayName": author,
            "authorChannelId": {"value": format!("ch-{}", author)},
            "publishedAt": "2025-05-05T12:00:00Z",
            "likeCount": 1
        }
    })
}

#[tokio::test]
async fn test_threads_are_flattened_top_level_first() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/commentThreads"))
        .and(query_param("part", "snippet,replies"))
        .and(query_param("textFormat", "plainText"))
        .and(query_param("maxResults", "25"))
        .and(query_param("videoId", "dQw4w9WgXcQ"))
        .and(query_param("key", "yt-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "nextPageToken": "NEXT",
            "items": [{
                "snippet": {
                    "totalReplyCount": 2,
                    "topLevelComment": comment("top", "hello", "ann")
                },
                "replies": {
                    "comments": [
                        comment("r1", "hi ann", "ben"),
                        comment("r2", "hey", "cat")
                    ]
                }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = service(&server, full_credentials())
        .scrape(&ScrapeRequest::new(Platform::Youtube, "dQw4w9WgXcQ"))
        .await
        .unwrap();

    assert_eq!(result.comments.len(), 3);
    assert_eq!(result.next_cursor.as_deref(), Some("NEXT"));

    let ids: Vec<&str> = result.comments.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, ["top", "r1", "r2"]);

    let top = &result.comments[0];
    assert_eq!(top.text, "hello");
    assert_eq!(top.author_name.as_deref(), Some("ann"));
    assert_eq!(top.author_id.as_deref(), Some("ch-ann"));
    assert_eq!(top.created_at.as_deref(), Some("2025-05-05T12:00:00Z"));
    assert_eq!(top.like_count, Some(1));
    assert_eq!(top.reply_count, Some(2));

    // Replies never carry a reply count
    assert!(result.comments[1..].iter().all(|c| c.reply_count.is_none()));
}

#[tokio::test]
async fn test_page_token_and_clamped_max_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/commentThreads"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .mount(&server)
        .await;

    let result = service(&server, full_credentials())
        .scrape(
            &ScrapeRequest::new(Platform::Youtube, "dQw4w9WgXcQ")
                .with_limit(500)
                .with_cursor("PAGE2"),
        )
        .await
        .unwrap();

    assert!(result.comments.is_empty());
    assert_eq!(result.next_cursor, None);
    assert_eq!(
        received_query_values(&server, "maxResults").await,
        vec![Some("100".to_string())]
    );
    assert_eq!(
        received_query_values(&server, "pageToken").await,
        vec![Some("PAGE2".to_string())]
    );
}

#[tokio::test]
async fn test_quota_error_is_upstream_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/commentThreads"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": {"code": 403, "message": "The request cannot be completed because you have exceeded your quota."}
        })))
        .mount(&server)
        .await;

    let err = service(&server, full_credentials())
        .scrape(&ScrapeRequest::new(Platform::Youtube, "dQw4w9WgXcQ"))
        .await
        .unwrap_err();

    match err {
        ScrapeError::Upstream {
            platform,
            status,
            message,
        } => {
            assert_eq!(platform, Platform::Youtube);
            assert_eq!(status, 403);
            assert!(message.contains("exceeded your quota"));
        }
        other => panic!("expected upstream error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_api_key() {
    let server = MockServer::start().await;

    let err = service(&server, StaticCredentials::default())
        .scrape(&ScrapeRequest::new(Platform::Youtube, "dQw4w9WgXcQ"))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ScrapeError::Configuration {
            variable: "YOUTUBE_API_KEY"
        }
    );
    assert_eq!(received_count(&server).await, 0);
}
