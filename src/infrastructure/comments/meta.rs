// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! Graph API 公共部分（Facebook 与 Instagram 共用）

use crate::domain::comments::ScrapeError;
use crate::domain::models::comment::Platform;
use crate::infrastructure::comments::upstream::{
    build_url, decode_lenient, lenient, reject_error_envelope, send_json, string_or_number,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

/// Graph API 评论列表响应
#[derive(Debug, Default, Deserialize)]
pub struct GraphCommentsResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub data: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "lenient")]
    pub paging: Option<GraphPaging>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GraphPaging {
    #[serde(default, deserialize_with = "lenient")]
    pub cursors: Option<GraphCursors>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GraphCursors {
    #[serde(default, deserialize_with = "lenient")]
    pub after: Option<String>,
}

impl GraphCommentsResponse {
    pub fn parse(body: &Value) -> Self {
        decode_lenient(body)
    }

    /// `paging.cursors.after`，不存在时为 `None`
    pub fn next_cursor(&self) -> Option<String> {
        self.paging
            .as_ref()
            .and_then(|p| p.cursors.as_ref())
            .and_then(|c| c.after.clone())
    }

    /// Each raw item paired with its typed view.
    pub fn items(&self) -> impl Iterator<Item = (GraphCommentItem, &Value)> {
        self.data
            .iter()
            .flatten()
            .map(|raw| (decode_lenient::<GraphCommentItem>(raw), raw))
    }
}

/// 单条 Graph 评论
///
/// 同时覆盖 Facebook 与 Instagram 两种字段集合
#[derive(Debug, Default, Deserialize)]
pub struct GraphCommentItem {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub created_time: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub timestamp: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub like_count: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub comment_count: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub replies_count: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub from: Option<GraphAuthor>,
    #[serde(default, deserialize_with = "lenient")]
    pub username: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GraphAuthor {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub username: Option<String>,
}

/// 构造 `GET /{target_id}/comments` 请求URL
pub fn comments_url(
    graph_url: &Url,
    target_id: &str,
    fields: &str,
    limit: u32,
    cursor: Option<&str>,
    access_token: &str,
) -> Url {
    build_url(
        graph_url,
        &[target_id, "comments"],
        &[
            ("fields", Some(fields.to_string())),
            ("limit", Some(limit.to_string())),
            ("after", cursor.map(str::to_string)),
            ("access_token", Some(access_token.to_string())),
        ],
    )
}

/// Issue the comments call and return the parsed Graph response.
pub async fn fetch_comments(
    client: &reqwest::Client,
    platform: Platform,
    url: Url,
) -> Result<GraphCommentsResponse, ScrapeError> {
    // The query string carries the access token; only the path is logged.
    debug!(platform = %platform, path = url.path(), "Requesting Graph comments");

    let payload = send_json(platform, client.get(url)).await?;
    reject_error_envelope(platform, &payload)?;
    Ok(GraphCommentsResponse::parse(&payload.body))
}
