// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::{describe_counter, describe_histogram, Unit};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::{info, warn};

/// 初始化指标系统
///
/// 安装 Prometheus 记录器并注册评论抓取相关指标。
/// 记录器已被安装时（例如测试中重复初始化）返回 `None`。
pub fn init_metrics() -> Option<PrometheusHandle> {
    let handle = match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => handle,
        Err(e) => {
            warn!("Failed to install Prometheus recorder: {}", e);
            return None;
        }
    };

    describe_counter!(
        "comment_scrapes_total",
        "Total number of comment scrape calls by platform and outcome"
    );
    describe_counter!(
        "comments_fetched_total",
        "Total number of normalized comments returned"
    );
    describe_counter!(
        "tiktok_token_requests_total",
        "Total number of TikTok client token requests"
    );
    describe_histogram!(
        "comment_scrape_duration_seconds",
        Unit::Seconds,
        "Duration of a single comment scrape call"
    );

    info!("Prometheus metrics recorder installed");
    Some(handle)
}
