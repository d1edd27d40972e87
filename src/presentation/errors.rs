// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::domain::comments::ScrapeError;

/// 应用错误类型
///
/// 把已分类的抓取错误映射为 HTTP 状态码和统一的 JSON 错误体
#[derive(Debug)]
pub struct AppError(pub ScrapeError);

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match &self.0 {
            ScrapeError::Validation(_) => StatusCode::BAD_REQUEST,
            ScrapeError::Configuration { .. } => StatusCode::PRECONDITION_FAILED,
            ScrapeError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            ScrapeError::Network { timeout: true, .. } => StatusCode::GATEWAY_TIMEOUT,
            ScrapeError::Network { .. } => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let mut body = json!({
            "error": self.0.to_string(),
            "kind": self.0.kind(),
        });

        match &self.0 {
            ScrapeError::Upstream {
                platform,
                status: upstream_status,
                ..
            } => {
                body["platform"] = json!(platform);
                body["status"] = json!(upstream_status);
            }
            ScrapeError::Network { platform, .. } => {
                body["platform"] = json!(platform);
            }
            ScrapeError::Configuration { variable } => {
                body["variable"] = json!(variable);
            }
            ScrapeError::Validation(_) => {}
        }

        (status, Json(body)).into_response()
    }
}

impl From<ScrapeError> for AppError {
    fn from(err: ScrapeError) -> Self {
        Self(err)
    }
}
