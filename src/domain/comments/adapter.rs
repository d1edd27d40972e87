// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::comment::{Platform, ScrapeResult};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScrapeError {
    /// Caller input is malformed; raised before any network call.
    #[error("{0}")]
    Validation(String),

    /// A credential required by the selected platform is missing.
    #[error("Missing environment variable: {variable}")]
    Configuration { variable: &'static str },

    /// The platform API rejected the call or returned an error envelope.
    #[error("{platform} API request failed ({status}): {message}")]
    Upstream {
        platform: Platform,
        status: u16,
        message: String,
    },

    /// The request never produced an HTTP status.
    #[error("{platform} API unreachable: {message}")]
    Network {
        platform: Platform,
        message: String,
        timeout: bool,
    },
}

impl ScrapeError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn upstream(platform: Platform, status: u16, message: impl Into<String>) -> Self {
        Self::Upstream {
            platform,
            status,
            message: message.into(),
        }
    }

    /// Stable label used in response bodies and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Configuration { .. } => "configuration",
            Self::Upstream { .. } => "upstream",
            Self::Network { .. } => "network",
        }
    }
}

/// 评论适配器特质
///
/// 每个平台实现一次：构造上游请求、执行调用并把响应转换为标准化结果
#[async_trait]
pub trait CommentAdapter: Send + Sync {
    /// Fetch exactly one page of comments for `target_id`.
    async fn fetch_page(
        &self,
        target_id: &str,
        limit: Option<i64>,
        cursor: Option<&str>,
    ) -> Result<ScrapeResult, ScrapeError>;

    /// The platform this adapter talks to
    fn platform(&self) -> Platform;
}
