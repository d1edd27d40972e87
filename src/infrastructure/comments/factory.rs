// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::Settings;
use crate::domain::comments::CredentialProvider;
use crate::domain::services::comment_service::{CommentService, PlatformAdapters};
use crate::infrastructure::comments::facebook::FacebookCommentAdapter;
use crate::infrastructure::comments::instagram::InstagramCommentAdapter;
use crate::infrastructure::comments::tiktok::{TiktokCommentAdapter, TiktokTokenProvider};
use crate::infrastructure::comments::youtube::YoutubeCommentAdapter;
use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use url::Url;

/// 上游 API 地址
#[derive(Debug, Clone)]
pub struct UpstreamEndpoints {
    /// 含版本号的 Graph API 地址
    pub graph: Url,
    pub youtube: Url,
    pub tiktok: Url,
}

impl UpstreamEndpoints {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        Ok(Self {
            graph: parse_endpoint(&settings.graph_api_url(), "upstream.graph_base_url")?,
            youtube: parse_endpoint(&settings.upstream.youtube_base_url, "upstream.youtube_base_url")?,
            tiktok: parse_endpoint(&settings.upstream.tiktok_base_url, "upstream.tiktok_base_url")?,
        })
    }
}

fn parse_endpoint(raw: &str, name: &str) -> anyhow::Result<Url> {
    Url::parse(raw).with_context(|| format!("invalid {}: {}", name, raw))
}

/// 评论适配器工厂
///
/// 创建四个平台适配器并组装成 `CommentService`，所有适配器共享同一个 HTTP 客户端
pub struct CommentAdapterFactory {
    client: reqwest::Client,
    endpoints: UpstreamEndpoints,
    credentials: Arc<dyn CredentialProvider>,
    tiktok_token_cache: bool,
}

impl CommentAdapterFactory {
    pub fn new(
        client: reqwest::Client,
        endpoints: UpstreamEndpoints,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Self {
        Self {
            client,
            endpoints,
            credentials,
            tiktok_token_cache: false,
        }
    }

    /// 根据配置创建工厂
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let client = build_http_client(Duration::from_secs(settings.upstream.timeout_secs))?;
        let endpoints = UpstreamEndpoints::from_settings(settings)?;
        let credentials: Arc<dyn CredentialProvider> = Arc::new(settings.credentials());

        Ok(Self::new(client, endpoints, credentials)
            .with_tiktok_token_cache(settings.upstream.tiktok_token_cache))
    }

    pub fn with_tiktok_token_cache(mut self, enabled: bool) -> Self {
        self.tiktok_token_cache = enabled;
        self
    }

    /// 创建所有平台适配器
    pub fn create_adapters(&self) -> PlatformAdapters {
        let tokens = TiktokTokenProvider::new(
            self.client.clone(),
            &self.endpoints.tiktok,
            self.credentials.clone(),
            self.tiktok_token_cache,
        );

        PlatformAdapters {
            facebook: Arc::new(FacebookCommentAdapter::new(
                self.client.clone(),
                self.endpoints.graph.clone(),
                self.credentials.clone(),
            )),
            instagram: Arc::new(InstagramCommentAdapter::new(
                self.client.clone(),
                self.endpoints.graph.clone(),
                self.credentials.clone(),
            )),
            youtube: Arc::new(YoutubeCommentAdapter::new(
                self.client.clone(),
                self.endpoints.youtube.clone(),
                self.credentials.clone(),
            )),
            tiktok: Arc::new(TiktokCommentAdapter::new(
                self.client.clone(),
                &self.endpoints.tiktok,
                tokens,
            )),
        }
    }

    pub fn create_service(&self) -> CommentService {
        info!(
            graph = %self.endpoints.graph,
            tiktok_token_cache = self.tiktok_token_cache,
            "Creating comment adapters"
        );
        CommentService::new(self.create_adapters())
    }
}

/// 创建带超时的共享 HTTP 客户端
pub fn build_http_client(timeout: Duration) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("collectrs/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("failed to build HTTP client")
}
