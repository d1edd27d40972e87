// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::comments::adapter::ScrapeError;

/// 平台凭据键
///
/// 每个键对应一个环境变量名
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialKey {
    FacebookAccessToken,
    InstagramAccessToken,
    YoutubeApiKey,
    TiktokClientKey,
    TiktokClientSecret,
}

impl CredentialKey {
    /// 对应的环境变量名
    pub fn env_var(&self) -> &'static str {
        match self {
            Self::FacebookAccessToken => "FACEBOOK_ACCESS_TOKEN",
            Self::InstagramAccessToken => "INSTAGRAM_ACCESS_TOKEN",
            Self::YoutubeApiKey => "YOUTUBE_API_KEY",
            Self::TiktokClientKey => "TIKTOK_CLIENT_KEY",
            Self::TiktokClientSecret => "TIKTOK_CLIENT_SECRET",
        }
    }
}

/// 凭据提供者特质
///
/// 适配器在每次调用时通过它惰性读取密钥，测试中可注入假凭据
pub trait CredentialProvider: Send + Sync {
    fn get(&self, key: CredentialKey) -> Option<String>;
}

/// Resolve a credential or fail with a configuration error naming the variable.
///
/// Empty values count as absent.
pub fn require_credential(
    provider: &dyn CredentialProvider,
    key: CredentialKey,
) -> Result<String, ScrapeError> {
    match provider.get(key) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ScrapeError::Configuration {
            variable: key.env_var(),
        }),
    }
}

/// 静态凭据集合
///
/// 启动时从配置中快照得到，测试中直接构造
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    pub facebook_access_token: Option<String>,
    pub instagram_access_token: Option<String>,
    pub youtube_api_key: Option<String>,
    pub tiktok_client_key: Option<String>,
    pub tiktok_client_secret: Option<String>,
}

impl StaticCredentials {
    pub fn with(mut self, key: CredentialKey, value: impl Into<String>) -> Self {
        let value = Some(value.into());
        match key {
            CredentialKey::FacebookAccessToken => self.facebook_access_token = value,
            CredentialKey::InstagramAccessToken => self.instagram_access_token = value,
            CredentialKey::YoutubeApiKey => self.youtube_api_key = value,
            CredentialKey::TiktokClientKey => self.tiktok_client_key = value,
            CredentialKey::TiktokClientSecret => self.tiktok_client_secret = value,
        }
        self
    }
}

impl CredentialProvider for StaticCredentials {
    fn get(&self, key: CredentialKey) -> Option<String> {
        match key {
            CredentialKey::FacebookAccessToken => self.facebook_access_token.clone(),
            CredentialKey::InstagramAccessToken => self.instagram_access_token.clone(),
            CredentialKey::YoutubeApiKey => self.youtube_api_key.clone(),
            CredentialKey::TiktokClientKey => self.tiktok_client_key.clone(),
            CredentialKey::TiktokClientSecret => self.tiktok_client_secret.clone(),
        }
    }
}
