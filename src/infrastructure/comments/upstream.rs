// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::comments::ScrapeError;
use crate::domain::models::comment::Platform;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

/// 上游响应
///
/// 无法解析为 JSON 的响应体以字符串形式保留
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamPayload {
    pub status: u16,
    pub body: Value,
}

/// 构造上游URL
///
/// 只设置有值且非空的查询参数
pub fn build_url(base: &Url, segments: &[&str], params: &[(&str, Option<String>)]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty();
        for segment in segments {
            path.push(segment);
        }
    }

    let present: Vec<(&str, &str)> = params
        .iter()
        .filter_map(|(key, value)| match value.as_deref() {
            Some(v) if !v.is_empty() => Some((*key, v)),
            _ => None,
        })
        .collect();
    if !present.is_empty() {
        url.query_pairs_mut().extend_pairs(present);
    }

    url
}

/// Execute a request and classify the outcome.
///
/// Non-2xx statuses become `ScrapeError::Upstream` carrying the best-effort
/// message extracted from the body; transport failures become
/// `ScrapeError::Network`.
pub async fn send_json(
    platform: Platform,
    request: reqwest::RequestBuilder,
) -> Result<UpstreamPayload, ScrapeError> {
    let response = request
        .send()
        .await
        .map_err(|e| network_error(platform, e))?;

    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| network_error(platform, e))?;
    let body = parse_body(&text);

    if !status.is_success() {
        let message =
            extract_error_message(&body).unwrap_or_else(|| "Unknown API error".to_string());
        warn!(
            platform = %platform,
            status = status.as_u16(),
            message = %message,
            "Upstream request rejected"
        );
        return Err(ScrapeError::upstream(platform, status.as_u16(), message));
    }

    debug!(platform = %platform, status = status.as_u16(), "Upstream request succeeded");
    Ok(UpstreamPayload {
        status: status.as_u16(),
        body,
    })
}

/// Fail a successful response that still carries an error envelope.
pub fn reject_error_envelope(
    platform: Platform,
    payload: &UpstreamPayload,
) -> Result<(), ScrapeError> {
    match extract_error_message(&payload.body) {
        Some(message) => {
            warn!(platform = %platform, message = %message, "Upstream returned an error envelope");
            Err(ScrapeError::upstream(platform, payload.status, message))
        }
        None => Ok(()),
    }
}

/// 从上游错误响应中提取错误消息
///
/// 优先级：`error.message` > 顶层 `message` > 字符串形式的 `error`。空字符串视为缺失。
pub fn extract_error_message(body: &Value) -> Option<String> {
    let object = body.as_object()?;

    let nested = object
        .get("error")
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str);
    let top_level = object.get("message").and_then(Value::as_str);
    let bare = object.get("error").and_then(Value::as_str);

    [nested, top_level, bare]
        .into_iter()
        .flatten()
        .find(|m| !m.is_empty())
        .map(str::to_string)
}

fn parse_body(text: &str) -> Value {
    if text.is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

fn network_error(platform: Platform, err: reqwest::Error) -> ScrapeError {
    warn!(platform = %platform, error = %err, "Upstream request failed before a response");
    ScrapeError::Network {
        platform,
        message: err.to_string(),
        timeout: err.is_timeout(),
    }
}

/// Decode `T` from a JSON value, falling back to `T::default()` on any shape mismatch.
pub fn decode_lenient<T: DeserializeOwned + Default>(value: &Value) -> T {
    serde_json::from_value(value.clone()).unwrap_or_default()
}

/// Field deserializer that turns a wrongly typed value into `None` instead of failing.
pub fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Accepts identifiers sent either as JSON strings or as JSON numbers.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
