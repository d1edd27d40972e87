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

use crate::domain::comments::StaticCredentials;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use url::Url;

/// 应用程序配置设置
///
/// 平台凭据在启动时可以缺失，只在对应平台被调用时检查
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 上游 API 配置
    pub upstream: UpstreamSettings,
    /// 数据库连接URL（启动必需）
    #[serde(default)]
    pub database_url: Option<String>,
    /// 允许的跨域来源（启动必需）
    #[serde(default)]
    pub cors_origin: Option<String>,
    /// Graph API 版本
    pub facebook_graph_api_version: String,
    #[serde(default)]
    pub facebook_access_token: Option<String>,
    #[serde(default)]
    pub instagram_access_token: Option<String>,
    #[serde(default)]
    pub youtube_api_key: Option<String>,
    #[serde(default)]
    pub tiktok_client_key: Option<String>,
    #[serde(default)]
    pub tiktok_client_secret: Option<String>,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
    /// 前端静态文件目录，未设置时不提供静态文件
    #[serde(default)]
    pub static_dir: Option<String>,
}

/// 上游 API 配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamSettings {
    pub graph_base_url: String,
    pub youtube_base_url: String,
    pub tiktok_base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// 是否在过期前复用 TikTok 令牌
    pub tiktok_token_cache: bool,
}

/// 启动配置校验错误
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次加载默认值、配置文件、`.env` 文件和环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        // Real environment variables win over the .env file
        let _ = dotenvy::dotenv();

        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let mut builder = Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::default().separator("__"));

        if let Ok(port) = std::env::var("PORT") {
            builder = builder.set_override("server.port", port)?;
        }

        builder.build()?.try_deserialize()
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3001)?
            .set_default("upstream.graph_base_url", "https://graph.facebook.com")?
            .set_default(
                "upstream.youtube_base_url",
                "https://www.googleapis.com/youtube/v3",
            )?
            .set_default("upstream.tiktok_base_url", "https://open.tiktokapis.com")?
            .set_default("upstream.timeout_secs", 30)?
            .set_default("upstream.tiktok_token_cache", false)?
            .set_default("facebook_graph_api_version", "v23.0")
    }

    /// 校验启动必需的配置项
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.database_url.as_deref().map_or(true, str::is_empty) {
            return Err(SettingsError::Missing("DATABASE_URL"));
        }

        let origin = self
            .cors_origin
            .as_deref()
            .filter(|o| !o.is_empty())
            .ok_or(SettingsError::Missing("CORS_ORIGIN"))?;
        Url::parse(origin).map_err(|e| SettingsError::Invalid {
            name: "CORS_ORIGIN",
            reason: e.to_string(),
        })?;

        if self.facebook_graph_api_version.is_empty() {
            return Err(SettingsError::Invalid {
                name: "FACEBOOK_GRAPH_API_VERSION",
                reason: "must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// `https://graph.facebook.com/{version}`
    pub fn graph_api_url(&self) -> String {
        format!(
            "{}/{}",
            self.upstream.graph_base_url.trim_end_matches('/'),
            self.facebook_graph_api_version
        )
    }

    /// 平台凭据快照，空字符串视为缺失
    pub fn credentials(&self) -> StaticCredentials {
        let present = |value: &Option<String>| value.clone().filter(|v| !v.is_empty());
        StaticCredentials {
            facebook_access_token: present(&self.facebook_access_token),
            instagram_access_token: present(&self.instagram_access_token),
            youtube_api_key: present(&self.youtube_api_key),
            tiktok_client_key: present(&self.tiktok_client_key),
            tiktok_client_secret: present(&self.tiktok_client_secret),
        }
    }
}
