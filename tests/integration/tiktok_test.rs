// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{full_credentials, received_count, service, service_with_token_cache};
use collectrs::domain::comments::{CredentialKey, ScrapeError, StaticCredentials};
use collectrs::domain::models::comment::{Platform, ScrapeRequest};
use collectrs::infrastructure::comments::tiktok::TIKTOK_COMMENT_FIELDS;
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN_PATH: &str = "/v2/oauth/token/";
const LIST_PATH: &str = "/v2/research/video/comment/list/";

async fn mount_token(server: &MockServer, expires_in: u64, expected_calls: u64) {
    mount_token_body(
        server,
        json!({
            "access_token": "clt.token",
            "expires_in": expires_in,
            "token_type": "Bearer"
        }),
        expected_calls,
    )
    .await;
}

async fn mount_token_body(server: &MockServer, body: Value, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string(
            "client_key=tt-key&client_secret=tt-secret&grant_type=client_credentials",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(expected_calls)
        .mount(server)
        .await;
}

fn list_body() -> Value {
    json!({
        "data": {
            "comments": [
                {
                    "id": 7311111111111111111u64,
                    "text": "nice",
                    "like_count": 3,
                    "reply_count": 0,
                    "parent_comment_id": 0,
                    "create_time": 1700000000
                },
                {
                    "id": "7311111111111111112",
                    "text": "ok",
                    "create_time": 0
                }
            ],
            "has_more": true,
            "cursor": 100
        },
        "error": {"code": "ok", "message": ""}
    })
}

#[tokio::test]
async fn test_token_then_comment_list() {
    let server = MockServer::start().await;
    mount_token(&server, 7200, 1).await;
    Mock::given(method("POST"))
        .and(path(LIST_PATH))
        .and(query_param("fields", TIKTOK_COMMENT_FIELDS))
        .and(header("authorization", "Bearer clt.token"))
        .and(header("content-type", "application/json"))
        .and(body_string(r#"{"video_id":7300000000000000000,"max_count":25}"#))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_body()))
        .expect(1)
        .mount(&server)
        .await;

    let result = service(&server, full_credentials())
        .scrape(&ScrapeRequest::new(Platform::Tiktok, "7300000000000000000"))
        .await
        .unwrap();

    assert_eq!(result.platform, Platform::Tiktok);
    assert_eq!(result.comments.len(), 2);
    assert_eq!(result.next_cursor.as_deref(), Some("100"));

    let first = &result.comments[0];
    assert_eq!(first.id, "7311111111111111111");
    assert_eq!(first.text, "nice");
    assert_eq!(first.created_at.as_deref(), Some("2023-11-14T22:13:20.000Z"));
    assert_eq!(first.like_count, Some(3));
    assert_eq!(first.reply_count, Some(0));
    assert_eq!(first.author_name, None);
    assert_eq!(first.author_id, None);

    assert_eq!(result.comments[1].id, "7311111111111111112");
    assert_eq!(result.comments[1].created_at, None);
}

#[tokio::test]
async fn test_large_ids_and_cursor_keep_full_precision() {
    let server = MockServer::start().await;
    mount_token(&server, 7200, 1).await;
    Mock::given(method("POST"))
        .and(path(LIST_PATH))
        .and(body_string(
            r#"{"video_id":9007199254740993,"max_count":40,"cursor":200}"#,
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"comments": [], "has_more": false, "cursor": 240},
            "error": {"code": "ok"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = service(&server, full_credentials())
        .scrape(
            &ScrapeRequest::new(Platform::Tiktok, "9007199254740993")
                .with_limit(40)
                .with_cursor("200"),
        )
        .await
        .unwrap();

    assert!(result.comments.is_empty());
    // has_more=false ends pagination regardless of the cursor value
    assert_eq!(result.next_cursor, None);
}

#[tokio::test]
async fn test_non_numeric_ids_fail_before_any_request() {
    let server = MockServer::start().await;
    let service = service(&server, full_credentials());

    for video_id in ["abc123", "45x"] {
        let err = service
            .scrape(&ScrapeRequest::new(Platform::Tiktok, video_id))
            .await
            .unwrap_err();
        assert_eq!(err, ScrapeError::validation("TikTok video IDs must be numeric."));
    }

    let err = service
        .scrape(&ScrapeRequest::new(Platform::Tiktok, "123").with_cursor("next"))
        .await
        .unwrap_err();
    assert_eq!(err, ScrapeError::validation("TikTok cursor must be numeric."));

    assert_eq!(received_count(&server).await, 0);
}

#[tokio::test]
async fn test_validation_runs_before_credential_lookup() {
    let server = MockServer::start().await;

    let err = service(&server, StaticCredentials::default())
        .scrape(&ScrapeRequest::new(Platform::Tiktok, "abc123"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "validation");
}

#[tokio::test]
async fn test_missing_client_secret() {
    let server = MockServer::start().await;
    let credentials = StaticCredentials::default().with(CredentialKey::TiktokClientKey, "tt-key");

    let err = service(&server, credentials)
        .scrape(&ScrapeRequest::new(Platform::Tiktok, "123"))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ScrapeError::Configuration {
            variable: "TIKTOK_CLIENT_SECRET"
        }
    );
    assert_eq!(received_count(&server).await, 0);
}

#[tokio::test]
async fn test_embedded_error_code_fails_the_call() {
    let server = MockServer::start().await;
    mount_token(&server, 7200, 1).await;
    Mock::given(method("POST"))
        .and(path(LIST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {},
            "error": {"code": "access_token_invalid", "message": "The access token is invalid"}
        })))
        .mount(&server)
        .await;

    let err = service(&server, full_credentials())
        .scrape(&ScrapeRequest::new(Platform::Tiktok, "123"))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ScrapeError::upstream(
            Platform::Tiktok,
            200,
            "access_token_invalid: The access token is invalid"
        )
    );
}

#[tokio::test]
async fn test_token_rejection_is_upstream_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": "invalid_client",
            "error_description": "Client key or secret is incorrect."
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(LIST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_body()))
        .expect(0)
        .mount(&server)
        .await;

    let err = service(&server, full_credentials())
        .scrape(&ScrapeRequest::new(Platform::Tiktok, "123"))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ScrapeError::upstream(
            Platform::Tiktok,
            200,
            "token request failed: Client key or secret is incorrect."
        )
    );
}

#[tokio::test]
async fn test_token_endpoint_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "unauthorized"})))
        .mount(&server)
        .await;

    let err = service(&server, full_credentials())
        .scrape(&ScrapeRequest::new(Platform::Tiktok, "123"))
        .await
        .unwrap_err();

    assert_eq!(err, ScrapeError::upstream(Platform::Tiktok, 401, "unauthorized"));
}

#[tokio::test]
async fn test_token_requested_per_call_without_cache() {
    let server = MockServer::start().await;
    mount_token(&server, 7200, 2).await;
    Mock::given(method("POST"))
        .and(path(LIST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_body()))
        .expect(2)
        .mount(&server)
        .await;

    let service = service_with_token_cache(&server, full_credentials(), false);
    let request = ScrapeRequest::new(Platform::Tiktok, "123");
    let first = service.scrape(&request).await.unwrap();
    let second = service.scrape(&request).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_cached_token_is_reused() {
    let server = MockServer::start().await;
    mount_token(&server, 7200, 1).await;
    Mock::given(method("POST"))
        .and(path(LIST_PATH))
        .and(header("authorization", "Bearer clt.token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_body()))
        .expect(2)
        .mount(&server)
        .await;

    let service = service_with_token_cache(&server, full_credentials(), true);
    let request = ScrapeRequest::new(Platform::Tiktok, "123");
    service.scrape(&request).await.unwrap();
    service.scrape(&request).await.unwrap();
}

#[tokio::test]
async fn test_short_lived_token_is_not_cached() {
    let server = MockServer::start().await;
    // Lifetime shorter than the refresh margin
    mount_token(&server, 30, 2).await;
    Mock::given(method("POST"))
        .and(path(LIST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_body()))
        .expect(2)
        .mount(&server)
        .await;

    let service = service_with_token_cache(&server, full_credentials(), true);
    let request = ScrapeRequest::new(Platform::Tiktok, "123");
    service.scrape(&request).await.unwrap();
    service.scrape(&request).await.unwrap();
}

#[tokio::test]
async fn test_huge_token_lifetime_is_capped() {
    let server = MockServer::start().await;
    mount_token_body(
        &server,
        json!({"access_token": "clt.token", "expires_in": u64::MAX}),
        1,
    )
    .await;
    Mock::given(method("POST"))
        .and(path(LIST_PATH))
        .and(header("authorization", "Bearer clt.token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_body()))
        .expect(2)
        .mount(&server)
        .await;

    let service = service_with_token_cache(&server, full_credentials(), true);
    let request = ScrapeRequest::new(Platform::Tiktok, "123");
    let first = service.scrape(&request).await.unwrap();
    let second = service.scrape(&request).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_concurrent_scrapes_share_one_token_request() {
    let server = MockServer::start().await;
    mount_token(&server, 7200, 1).await;
    Mock::given(method("POST"))
        .and(path(LIST_PATH))
        .and(header("authorization", "Bearer clt.token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_body()))
        .expect(8)
        .mount(&server)
        .await;

    let service = Arc::new(service_with_token_cache(&server, full_credentials(), true));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .scrape(&ScrapeRequest::new(Platform::Tiktok, "123"))
                    .await
            })
        })
        .collect();

    for handle in handles {
        let result = handle.await.unwrap().unwrap();
        assert_eq!(result.comments.len(), 2);
    }
}
