// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::extract::{Extension, Json, Query};
use std::sync::Arc;

use crate::{
    application::{
        dto::comment_request::ScrapeCommentsRequestDto,
        use_cases::scrape_comments::ScrapeCommentsUseCase,
    },
    domain::models::comment::ScrapeResult,
    presentation::errors::AppError,
};

/// 处理评论抓取请求（JSON 请求体）
///
/// # 参数
///
/// * `use_case` - 评论抓取用例
/// * `payload` - `{platform, targetId, limit?, cursor?}`
///
/// # 返回值
///
/// 成功时返回单页标准化评论；失败时返回分类后的错误响应
pub async fn scrape_comments(
    Extension(use_case): Extension<Arc<ScrapeCommentsUseCase>>,
    Json(payload): Json<ScrapeCommentsRequestDto>,
) -> Result<Json<ScrapeResult>, AppError> {
    let result = use_case.execute(payload).await?;
    Ok(Json(result))
}

/// 处理评论抓取请求（查询字符串）
pub async fn scrape_comments_query(
    Extension(use_case): Extension<Arc<ScrapeCommentsUseCase>>,
    Query(params): Query<ScrapeCommentsRequestDto>,
) -> Result<Json<ScrapeResult>, AppError> {
    let result = use_case.execute(params).await?;
    Ok(Json(result))
}
