// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// 评论抓取请求数据传输对象
///
/// 同时用于 JSON 请求体和查询字符串
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeCommentsRequestDto {
    /// facebook / instagram / youtube / tiktok
    pub platform: String,
    #[validate(length(min = 1, message = "targetId cannot be empty"))]
    pub target_id: String,
    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    pub limit: Option<i64>,
    #[validate(length(min = 1, message = "cursor cannot be empty"))]
    pub cursor: Option<String>,
}
