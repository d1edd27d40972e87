// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::use_cases::scrape_comments::ScrapeCommentsUseCase;
use crate::presentation::handlers::{comment_handler, metrics_handler};
use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::get,
    Extension, Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

/// 创建应用路由
///
/// # 参数
///
/// * `use_case` - 评论抓取用例
/// * `metrics` - Prometheus 句柄，存在时挂载 `/metrics`
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes(use_case: Arc<ScrapeCommentsUseCase>, metrics: Option<PrometheusHandle>) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version));

    let comment_routes = Router::new()
        .route(
            "/v1/comments/scrape",
            get(comment_handler::scrape_comments_query).post(comment_handler::scrape_comments),
        )
        .layer(Extension(use_case));

    let mut router = Router::new().merge(public_routes).merge(comment_routes);

    if let Some(handle) = metrics {
        router = router.route(
            "/metrics",
            get(metrics_handler::metrics).layer(Extension(handle)),
        );
    }

    router.layer(TraceLayer::new_for_http())
}

/// 为前端单页应用挂载静态文件回退
///
/// 存在的文件直接返回，其余路径返回 `index.html`
pub fn with_static_fallback(router: Router, static_dir: Option<&str>) -> Router {
    match static_dir {
        Some(dir) => {
            let index = Path::new(dir).join("index.html");
            router.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(index)))
        }
        None => router,
    }
}

/// 创建 CORS 层
pub fn cors_layer(origin: &str) -> anyhow::Result<CorsLayer> {
    let origin = HeaderValue::from_str(origin.trim_end_matches('/'))?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]))
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
