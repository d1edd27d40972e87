// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::Extension;
use metrics_exporter_prometheus::PrometheusHandle;

/// Prometheus 文本格式指标
pub async fn metrics(Extension(handle): Extension<PrometheusHandle>) -> String {
    handle.render()
}
