// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::comments::{CommentAdapter, ScrapeError};
use crate::domain::models::comment::{Platform, ScrapeRequest, ScrapeResult};
use metrics::{counter, histogram};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// 四个平台适配器的集合
#[derive(Clone)]
pub struct PlatformAdapters {
    pub facebook: Arc<dyn CommentAdapter>,
    pub instagram: Arc<dyn CommentAdapter>,
    pub youtube: Arc<dyn CommentAdapter>,
    pub tiktok: Arc<dyn CommentAdapter>,
}

/// 评论抓取服务
///
/// 按平台标签把请求分发给唯一的适配器，不包含任何跨平台逻辑
#[derive(Clone)]
pub struct CommentService {
    adapters: PlatformAdapters,
}

impl CommentService {
    pub fn new(adapters: PlatformAdapters) -> Self {
        Self { adapters }
    }

    fn adapter(&self, platform: Platform) -> &dyn CommentAdapter {
        match platform {
            Platform::Facebook => self.adapters.facebook.as_ref(),
            Platform::Instagram => self.adapters.instagram.as_ref(),
            Platform::Youtube => self.adapters.youtube.as_ref(),
            Platform::Tiktok => self.adapters.tiktok.as_ref(),
        }
    }

    /// 抓取一页评论
    ///
    /// # 参数
    ///
    /// * `request` - 抓取请求
    ///
    /// # 返回值
    ///
    /// * `Ok(ScrapeResult)` - 标准化后的单页结果
    /// * `Err(ScrapeError)` - 已分类的失败
    pub async fn scrape(&self, request: &ScrapeRequest) -> Result<ScrapeResult, ScrapeError> {
        validate_request(request)?;

        let platform = request.platform;
        let started = Instant::now();

        let adapter = self.adapter(platform);
        debug_assert_eq!(adapter.platform(), platform, "adapter wired to the wrong platform");

        let outcome = adapter
            .fetch_page(
                &request.target_id,
                request.limit,
                request.cursor.as_deref(),
            )
            .await;

        histogram!("comment_scrape_duration_seconds", "platform" => platform.name())
            .record(started.elapsed().as_secs_f64());

        match &outcome {
            Ok(result) => {
                counter!("comment_scrapes_total", "platform" => platform.name(), "outcome" => "ok")
                    .increment(1);
                counter!("comments_fetched_total", "platform" => platform.name())
                    .increment(result.comments.len() as u64);
                info!(
                    platform = %platform,
                    target_id = %request.target_id,
                    count = result.comments.len(),
                    has_more = result.has_more(),
                    "Fetched comment page"
                );
            }
            Err(e) => {
                counter!("comment_scrapes_total", "platform" => platform.name(), "outcome" => e.kind())
                    .increment(1);
                warn!(
                    platform = %platform,
                    target_id = %request.target_id,
                    kind = e.kind(),
                    error = %e,
                    "Comment scrape failed"
                );
            }
        }

        outcome
    }
}

fn validate_request(request: &ScrapeRequest) -> Result<(), ScrapeError> {
    if request.target_id.is_empty() {
        return Err(ScrapeError::validation("targetId must not be empty"));
    }
    if matches!(request.cursor.as_deref(), Some("")) {
        return Err(ScrapeError::validation("cursor must not be empty when provided"));
    }
    Ok(())
}
