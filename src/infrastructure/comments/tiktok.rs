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
    build_url, decode_lenient, lenient, send_json, string_or_number,
};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat};
use metrics::counter;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info};
use url::Url;

pub const TIKTOK_COMMENT_FIELDS: &str = "id,text,like_count,reply_count,parent_comment_id,create_time";

/// 缓存令牌的提前过期余量
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// 缓存令牌的最长有效期，上游返回更大的 `expires_in` 时截断
const MAX_TOKEN_TTL: Duration = Duration::from_secs(24 * 60 * 60);

static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").expect("valid digits regex"));

/// 判断字符串是否只包含 ASCII 数字
pub fn is_numeric_id(value: &str) -> bool {
    DIGITS.is_match(value)
}

// "007" is not a valid JSON number; drop the leading zeros.
fn numeric_literal(digits: &str) -> &str {
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() {
        "0"
    } else {
        trimmed
    }
}

/// 评论列表请求体构造器
///
/// `video_id` 与 `cursor` 以 JSON 数字字面量原样输出，不经过浮点数转换，
/// 因此超过 2^53 的视频ID不会丢失精度。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentListBody {
    video_id: String,
    max_count: u32,
    cursor: Option<String>,
}

impl CommentListBody {
    pub fn new(video_id: &str, max_count: u32) -> Result<Self, ScrapeError> {
        if !is_numeric_id(video_id) {
            return Err(ScrapeError::validation("TikTok video IDs must be numeric."));
        }
        Ok(Self {
            video_id: numeric_literal(video_id).to_string(),
            max_count,
            cursor: None,
        })
    }

    pub fn cursor(mut self, cursor: Option<&str>) -> Result<Self, ScrapeError> {
        if let Some(cursor) = cursor {
            if !is_numeric_id(cursor) {
                return Err(ScrapeError::validation("TikTok cursor must be numeric."));
            }
            self.cursor = Some(numeric_literal(cursor).to_string());
        }
        Ok(self)
    }

    pub fn to_json(&self) -> String {
        let mut body = format!(
            r#"{{"video_id":{},"max_count":{}"#,
            self.video_id, self.max_count
        );
        if let Some(cursor) = &self.cursor {
            body.push_str(&format!(r#","cursor":{}"#, cursor));
        }
        body.push('}');
        body
    }
}

#[derive(Debug, Default, Deserialize)]
struct TokenResponse {
    #[serde(default, deserialize_with = "lenient")]
    access_token: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    expires_in: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    error: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    error_description: Option<String>,
}

/// 缓存的访问令牌
struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

/// TikTok 客户端凭据令牌提供者
///
/// 默认每次抓取都申请新令牌；启用缓存后在过期前复用，
/// 互斥锁保证并发请求不会重复申请令牌。
pub struct TiktokTokenProvider {
    client: reqwest::Client,
    token_url: Url,
    credentials: Arc<dyn CredentialProvider>,
    cache: Option<Mutex<Option<CachedToken>>>,
}

impl TiktokTokenProvider {
    pub fn new(
        client: reqwest::Client,
        base_url: &Url,
        credentials: Arc<dyn CredentialProvider>,
        cache_enabled: bool,
    ) -> Self {
        Self {
            client,
            token_url: build_url(base_url, &["v2", "oauth", "token", ""], &[]),
            credentials,
            cache: cache_enabled.then(|| Mutex::new(None)),
        }
    }

    /// 获取 Bearer 令牌
    pub async fn bearer_token(&self) -> Result<String, ScrapeError> {
        let client_key =
            require_credential(self.credentials.as_ref(), CredentialKey::TiktokClientKey)?;
        let client_secret =
            require_credential(self.credentials.as_ref(), CredentialKey::TiktokClientSecret)?;

        let Some(cache) = &self.cache else {
            return self
                .request_token(&client_key, &client_secret)
                .await
                .map(|(token, _)| token);
        };

        let mut cached = cache.lock().await;
        if let Some(token) = cached.as_ref().filter(|t| t.expires_at > Instant::now()) {
            debug!("Reusing cached TikTok client token");
            return Ok(token.access_token.clone());
        }

        let (access_token, expires_in) = self.request_token(&client_key, &client_secret).await?;
        *cached = expires_in
            .and_then(|secs| Duration::from_secs(secs).checked_sub(TOKEN_EXPIRY_MARGIN))
            .filter(|ttl| !ttl.is_zero())
            .and_then(|ttl| Instant::now().checked_add(ttl.min(MAX_TOKEN_TTL)))
            .map(|expires_at| CachedToken {
                access_token: access_token.clone(),
                expires_at,
            });

        Ok(access_token)
    }

    async fn request_token(
        &self,
        client_key: &str,
        client_secret: &str,
    ) -> Result<(String, Option<u64>), ScrapeError> {
        counter!("tiktok_token_requests_total").increment(1);

        let form = serde_urlencoded::to_string([
            ("client_key", client_key),
            ("client_secret", client_secret),
            ("grant_type", "client_credentials"),
        ])
        .map_err(|e| ScrapeError::validation(format!("invalid TikTok client credentials: {}", e)))?;

        let request = self
            .client
            .post(self.token_url.clone())
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(form);
        let payload = send_json(Platform::Tiktok, request).await?;
        let response: TokenResponse = decode_lenient(&payload.body);

        match response.access_token.filter(|t| !t.is_empty()) {
            Some(token) => Ok((token, response.expires_in)),
            None => {
                let reason = response
                    .error_description
                    .or(response.error)
                    .unwrap_or_else(|| "Unknown error".to_string());
                Err(ScrapeError::upstream(
                    Platform::Tiktok,
                    payload.status,
                    format!("token request failed: {}", reason),
                ))
            }
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct CommentListResponse {
    #[serde(default, deserialize_with = "lenient")]
    data: Option<CommentListData>,
    #[serde(default, deserialize_with = "lenient")]
    error: Option<ApiError>,
}

#[derive(Debug, Default, Deserialize)]
struct CommentListData {
    #[serde(default, deserialize_with = "lenient")]
    comments: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "lenient")]
    has_more: Option<bool>,
    #[serde(default)]
    cursor: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiError {
    #[serde(default, deserialize_with = "lenient")]
    code: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct TiktokComment {
    #[serde(default, deserialize_with = "string_or_number")]
    id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    text: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    like_count: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    reply_count: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    create_time: Option<i64>,
}

/// 将秒级时间戳转换为带毫秒的 ISO-8601 UTC 字符串，0 视为缺失
fn iso_timestamp(epoch_seconds: Option<i64>) -> Option<String> {
    epoch_seconds
        .filter(|secs| *secs != 0)
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

// Integral cursors sent as floats (`100.0`) are echoed back as plain digits.
fn cursor_literal(n: &serde_json::Number) -> String {
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    match n.as_f64() {
        Some(f) if f >= 0.0 && f.fract() == 0.0 && f < u64::MAX as f64 => (f as u64).to_string(),
        _ => n.to_string(),
    }
}

/// TikTok 评论适配器
pub struct TiktokCommentAdapter {
    client: reqwest::Client,
    list_url: Url,
    tokens: TiktokTokenProvider,
}

impl TiktokCommentAdapter {
    pub fn new(client: reqwest::Client, base_url: &Url, tokens: TiktokTokenProvider) -> Self {
        let list_url = build_url(
            base_url,
            &["v2", "research", "video", "comment", "list", ""],
            &[("fields", Some(TIKTOK_COMMENT_FIELDS.to_string()))],
        );
        Self {
            client,
            list_url,
            tokens,
        }
    }

    /// 转换评论列表响应；嵌入的错误码不是 `ok` 时返回上游错误
    pub fn parse_page(video_id: &str, status: u16, body: &Value) -> Result<ScrapeResult, ScrapeError> {
        let response: CommentListResponse = decode_lenient(body);

        if let Some(error) = response.error {
            if let Some(code) = error.code.filter(|c| !c.is_empty() && c != "ok") {
                let message = error
                    .message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| "Unknown API error".to_string());
                return Err(ScrapeError::upstream(
                    Platform::Tiktok,
                    status,
                    format!("{}: {}", code, message),
                ));
            }
        }

        let data = response.data.unwrap_or_default();
        let comments = data
            .comments
            .iter()
            .flatten()
            .map(|raw| {
                let item: TiktokComment = decode_lenient(raw);
                NormalizedComment {
                    id: item.id.unwrap_or_default(),
                    text: item.text.unwrap_or_default(),
                    author_name: None,
                    author_id: None,
                    created_at: iso_timestamp(item.create_time),
                    like_count: item.like_count,
                    reply_count: item.reply_count,
                    raw: raw.clone(),
                }
            })
            .collect();

        let next_cursor = if data.has_more == Some(true) {
            match data.cursor {
                Some(Value::Number(n)) => Some(cursor_literal(&n)),
                Some(Value::String(s)) => Some(s),
                _ => None,
            }
        } else {
            None
        };

        Ok(ScrapeResult {
            platform: Platform::Tiktok,
            target_id: video_id.to_string(),
            comments,
            next_cursor,
        })
    }
}

#[async_trait]
impl CommentAdapter for TiktokCommentAdapter {
    async fn fetch_page(
        &self,
        target_id: &str,
        limit: Option<i64>,
        cursor: Option<&str>,
    ) -> Result<ScrapeResult, ScrapeError> {
        let max_count = normalize_limit(limit, MAX_PAGE_LIMIT);
        let body = CommentListBody::new(target_id, max_count)?.cursor(cursor)?;

        let token = self.tokens.bearer_token().await?;
        debug!(video_id = target_id, max_count, "Requesting TikTok comments");

        let request = self
            .client
            .post(self.list_url.clone())
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .header(CONTENT_TYPE, "application/json")
            .body(body.to_json());
        let payload = send_json(Platform::Tiktok, request).await?;

        let result = Self::parse_page(target_id, payload.status, &payload.body)?;
        info!(video_id = target_id, count = result.comments.len(), "TikTok page parsed");
        Ok(result)
    }

    fn platform(&self) -> Platform {
        Platform::Tiktok
    }
}
