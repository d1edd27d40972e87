// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// 评论平台枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Facebook Graph API
    Facebook,
    /// Instagram Graph API
    Instagram,
    /// YouTube Data API v3
    Youtube,
    /// TikTok Research API
    Tiktok,
}

impl Platform {
    /// 所有支持的平台
    pub const ALL: [Platform; 4] = [
        Platform::Facebook,
        Platform::Instagram,
        Platform::Youtube,
        Platform::Tiktok,
    ];

    /// 获取平台名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Facebook => "facebook",
            Self::Instagram => "instagram",
            Self::Youtube => "youtube",
            Self::Tiktok => "tiktok",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parse error for platform tags outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedPlatform(pub String);

impl fmt::Display for UnsupportedPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unsupported platform: {}", self.0)
    }
}

impl std::error::Error for UnsupportedPlatform {}

impl FromStr for Platform {
    type Err = UnsupportedPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "facebook" => Ok(Self::Facebook),
            "instagram" => Ok(Self::Instagram),
            "youtube" => Ok(Self::Youtube),
            "tiktok" => Ok(Self::Tiktok),
            other => Err(UnsupportedPlatform(other.to_string())),
        }
    }
}

/// 评论抓取请求
///
/// 每次调用构造一次，不做持久化
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapeRequest {
    /// 目标平台
    pub platform: Platform,
    /// 目标对象ID（帖子、视频、媒体）
    pub target_id: String,
    /// 每页数量，缺省时使用平台默认值
    pub limit: Option<i64>,
    /// 分页游标
    pub cursor: Option<String>,
}

impl ScrapeRequest {
    pub fn new(platform: Platform, target_id: impl Into<String>) -> Self {
        Self {
            platform,
            target_id: target_id.into(),
            limit: None,
            cursor: None,
        }
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }
}

/// 标准化评论
///
/// 所有平台适配器输出的统一评论结构。`id` 与 `text` 始终存在，
/// 上游缺失时为空字符串；其余字段缺失时为 `None`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedComment {
    pub id: String,
    pub text: String,
    pub author_name: Option<String>,
    pub author_id: Option<String>,
    pub created_at: Option<String>,
    pub like_count: Option<i64>,
    pub reply_count: Option<i64>,
    /// 上游原始评论数据
    pub raw: Value,
}

/// 单页抓取结果
///
/// `next_cursor` 为 `None` 表示没有更多页面；空的 `comments` 本身不代表分页结束。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeResult {
    pub platform: Platform,
    pub target_id: String,
    pub comments: Vec<NormalizedComment>,
    pub next_cursor: Option<String>,
}

impl ScrapeResult {
    pub fn has_more(&self) -> bool {
        self.next_cursor.is_some()
    }
}
