// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use validator::Validate;

use crate::application::dto::comment_request::ScrapeCommentsRequestDto;
use crate::domain::comments::ScrapeError;
use crate::domain::models::comment::{Platform, ScrapeRequest, ScrapeResult};
use crate::domain::services::comment_service::CommentService;

// === Section: Use Case Definition ===

pub struct ScrapeCommentsUseCase {
    service: Arc<CommentService>,
}

// === Section: Implementation ===

impl ScrapeCommentsUseCase {
    pub fn new(service: Arc<CommentService>) -> Self {
        Self { service }
    }

    pub async fn execute(
        &self,
        request_dto: ScrapeCommentsRequestDto,
    ) -> Result<ScrapeResult, ScrapeError> {
        let request = map_dto_to_request(request_dto)?;
        self.service.scrape(&request).await
    }
}

/// 将 DTO 转换为领域请求；平台标签和字段约束在此校验
pub fn map_dto_to_request(dto: ScrapeCommentsRequestDto) -> Result<ScrapeRequest, ScrapeError> {
    let platform = dto
        .platform
        .parse::<Platform>()
        .map_err(|e| ScrapeError::validation(e.to_string()))?;

    dto.validate()
        .map_err(|e| ScrapeError::validation(e.to_string()))?;

    Ok(ScrapeRequest {
        platform,
        target_id: dto.target_id,
        limit: dto.limit,
        cursor: dto.cursor,
    })
}
