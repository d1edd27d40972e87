// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use collectrs::application::use_cases::scrape_comments::ScrapeCommentsUseCase;
use collectrs::config::settings::Settings;
use collectrs::infrastructure::comments::CommentAdapterFactory;
use collectrs::presentation::routes;
use collectrs::utils::telemetry;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting collectrs...");

    // 2. Load and validate configuration
    let settings = Settings::new()?;
    settings.validate()?;
    info!("Configuration loaded");

    // 3. Initialize Prometheus Metrics
    let metrics_handle = collectrs::infrastructure::metrics::init_metrics();

    // 4. Initialize adapters and the dispatcher
    let service = Arc::new(CommentAdapterFactory::from_settings(&settings)?.create_service());
    let use_case = Arc::new(ScrapeCommentsUseCase::new(service));

    // 5. Start HTTP server
    let mut app = routes::routes(use_case, metrics_handle);
    app = routes::with_static_fallback(app, settings.server.static_dir.as_deref());
    if let Some(origin) = settings.cors_origin.as_deref() {
        app = app.layer(routes::cors_layer(origin)?);
    }

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
