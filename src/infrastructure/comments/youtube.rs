// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::comments::{
    normalize_limit, require_credential, CommentAdapter, CredentialKey, CredentialProvider,
    ScrapeError, MAX_PAGE_LIMIT,
};
use crate::domain::models::comment::{NormalizedComment, Platform, ScrapeResult};
use crate::infrastructure::comments::upstream::{
    build_url, decode_lenient, lenient, reject_error_envelope, send_json, string_or_number,
};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// `commentThreads.list` 响应
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadListResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub next_page_token: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub items: Option<Vec<Value>>,
}

#[derive(Debug, Default, Deserialize)]
struct CommentThread {
    #[serde(default, deserialize_with = "lenient")]
    snippet: Option<ThreadSnippet>,
    #[serde(default, deserialize_with = "lenient")]
    replies: Option<ThreadReplies>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThreadSnippet {
    #[serde(default, deserialize_with = "lenient")]
    total_reply_count: Option<i64>,
    #[serde(default)]
    top_level_comment: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct ThreadReplies {
    #[serde(default, deserialize_with = "lenient")]
    comments: Option<Vec<Value>>,
}

#[derive(Debug, Default, Deserialize)]
struct YoutubeComment {
    #[serde(default, deserialize_with = "string_or_number")]
    id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    snippet: Option<CommentSnippet>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentSnippet {
    #[serde(default, deserialize_with = "lenient")]
    text_original: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    text_display: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    author_display_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    author_channel_id: Option<ChannelId>,
    #[serde(default, deserialize_with = "lenient")]
    published_at: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    like_count: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
struct ChannelId {
    #[serde(default, deserialize_with = "lenient")]
    value: Option<String>,
}

impl YoutubeComment {
    fn normalize(self, reply_count: Option<i64>, raw: &Value) -> NormalizedComment {
        let snippet = self.snippet.unwrap_or_default();
        NormalizedComment {
            id: self.id.unwrap_or_default(),
            text: snippet
                .text_original
                .or(snippet.text_display)
                .unwrap_or_default(),
            author_name: snippet.author_display_name,
            author_id: snippet.author_channel_id.and_then(|c| c.value),
            created_at: snippet.published_at,
            like_count: snippet.like_count,
            reply_count,
            raw: raw.clone(),
        }
    }
}

/// YouTube 评论适配器
///
/// 每个评论线程展开为：顶层评论一条，随后每条回复各一条
pub struct YoutubeCommentAdapter {
    client: reqwest::Client,
    base_url: Url,
    credentials: Arc<dyn CredentialProvider>,
}

impl YoutubeCommentAdapter {
    pub fn new(
        client: reqwest::Client,
        base_url: Url,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Self {
        Self {
            client,
            base_url,
            credentials,
        }
    }

    pub fn request_url(&self, video_id: &str, limit: u32, cursor: Option<&str>, key: &str) -> Url {
        build_url(
            &self.base_url,
            &["commentThreads"],
            &[
                ("part", Some("snippet,replies".to_string())),
                ("textFormat", Some("plainText".to_string())),
                ("maxResults", Some(limit.to_string())),
                ("pageToken", cursor.map(str::to_string)),
                ("videoId", Some(video_id.to_string())),
                ("key", Some(key.to_string())),
            ],
        )
    }

    /// 展开评论线程并转换为标准化结果
    pub fn parse_page(video_id: &str, body: &Value) -> ScrapeResult {
        let response: CommentThreadListResponse = decode_lenient(body);
        let mut comments = Vec::new();

        for raw_thread in response.items.iter().flatten() {
            let thread: CommentThread = decode_lenient(raw_thread);
            let snippet = thread.snippet.unwrap_or_default();

            // A top-level comment without an id is skipped; its replies are not.
            if let Some(raw_top) = snippet.top_level_comment.as_ref() {
                let top: YoutubeComment = decode_lenient(raw_top);
                if top.id.as_deref().is_some_and(|id| !id.is_empty()) {
                    comments.push(top.normalize(snippet.total_reply_count, raw_top));
                }
            }

            let replies = thread.replies.and_then(|r| r.comments).unwrap_or_default();
            for raw_reply in &replies {
                let reply: YoutubeComment = decode_lenient(raw_reply);
                comments.push(reply.normalize(None, raw_reply));
            }
        }

        ScrapeResult {
            platform: Platform::Youtube,
            target_id: video_id.to_string(),
            comments,
            next_cursor: response.next_page_token,
        }
    }
}

#[async_trait]
impl CommentAdapter for YoutubeCommentAdapter {
    async fn fetch_page(
        &self,
        target_id: &str,
        limit: Option<i64>,
        cursor: Option<&str>,
    ) -> Result<ScrapeResult, ScrapeError> {
        let key = require_credential(self.credentials.as_ref(), CredentialKey::YoutubeApiKey)?;
        let limit = normalize_limit(limit, MAX_PAGE_LIMIT);

        debug!(video_id = target_id, limit, "Requesting YouTube comment threads");
        let url = self.request_url(target_id, limit, cursor, &key);
        let payload = send_json(Platform::Youtube, self.client.get(url)).await?;
        reject_error_envelope(Platform::Youtube, &payload)?;

        Ok(Self::parse_page(target_id, &payload.body))
    }

    fn platform(&self) -> Platform {
        Platform::Youtube
    }
}
