// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::comments::{
    normalize_limit, require_credential, CommentAdapter, CredentialKey, CredentialProvider,
    ScrapeError, MAX_PAGE_LIMIT,
};
use crate::domain::models::comment::{NormalizedComment, Platform, ScrapeResult};
use crate::infrastructure::comments::meta::{self, GraphCommentsResponse};
use async_trait::async_trait;
use std::sync::Arc;
use url::Url;

pub const FACEBOOK_COMMENT_FIELDS: &str =
    "id,message,from{id,name},created_time,like_count,comment_count";

/// Facebook 评论适配器
pub struct FacebookCommentAdapter {
    client: reqwest::Client,
    graph_url: Url,
    credentials: Arc<dyn CredentialProvider>,
}

impl FacebookCommentAdapter {
    pub fn new(
        client: reqwest::Client,
        graph_url: Url,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Self {
        Self {
            client,
            graph_url,
            credentials,
        }
    }

    /// 将 Graph 响应转换为标准化结果（用于单元测试）
    pub fn parse_page(target_id: &str, response: &GraphCommentsResponse) -> ScrapeResult {
        let comments = response
            .items()
            .map(|(item, raw)| {
                let from = item.from.as_ref();
                NormalizedComment {
                    id: item.id.clone().unwrap_or_default(),
                    text: item.message.clone().unwrap_or_default(),
                    author_name: from.and_then(|f| f.name.clone()),
                    author_id: from.and_then(|f| f.id.clone()),
                    created_at: item.created_time.clone(),
                    like_count: item.like_count,
                    reply_count: item.comment_count,
                    raw: raw.clone(),
                }
            })
            .collect();

        ScrapeResult {
            platform: Platform::Facebook,
            target_id: target_id.to_string(),
            comments,
            next_cursor: response.next_cursor(),
        }
    }
}

#[async_trait]
impl CommentAdapter for FacebookCommentAdapter {
    async fn fetch_page(
        &self,
        target_id: &str,
        limit: Option<i64>,
        cursor: Option<&str>,
    ) -> Result<ScrapeResult, ScrapeError> {
        let token =
            require_credential(self.credentials.as_ref(), CredentialKey::FacebookAccessToken)?;
        let limit = normalize_limit(limit, MAX_PAGE_LIMIT);

        let url = meta::comments_url(
            &self.graph_url,
            target_id,
            FACEBOOK_COMMENT_FIELDS,
            limit,
            cursor,
            &token,
        );
        let response = meta::fetch_comments(&self.client, Platform::Facebook, url).await?;

        Ok(Self::parse_page(target_id, &response))
    }

    fn platform(&self) -> Platform {
        Platform::Facebook
    }
}
