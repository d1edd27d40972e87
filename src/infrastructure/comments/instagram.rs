// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::comments::{
    normalize_limit, require_credential, CommentAdapter, CredentialKey, CredentialProvider,
    ScrapeError, MAX_PAGE_LIMIT,
};
use crate::domain::models::comment::{NormalizedComment, Platform, ScrapeResult};
use crate::infrastructure::comments::meta::{self, GraphCommentItem, GraphCommentsResponse};
use async_trait::async_trait;
use std::sync::Arc;
use url::Url;

pub const INSTAGRAM_COMMENT_FIELDS: &str = "id,text,username,timestamp,like_count,replies_count";

/// Instagram 评论适配器
pub struct InstagramCommentAdapter {
    client: reqwest::Client,
    graph_url: Url,
    credentials: Arc<dyn CredentialProvider>,
}

impl InstagramCommentAdapter {
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

    pub fn parse_page(target_id: &str, response: &GraphCommentsResponse) -> ScrapeResult {
        let comments = response
            .items()
            .map(|(item, raw)| NormalizedComment {
                id: item.id.clone().unwrap_or_default(),
                text: item.text.clone().unwrap_or_default(),
                author_name: author_name(&item),
                author_id: item.from.as_ref().and_then(|f| f.id.clone()),
                created_at: item.timestamp.clone(),
                like_count: item.like_count,
                reply_count: item.replies_count,
                raw: raw.clone(),
            })
            .collect();

        ScrapeResult {
            platform: Platform::Instagram,
            target_id: target_id.to_string(),
            comments,
            next_cursor: response.next_cursor(),
        }
    }
}

// username, then from.username, then from.name
fn author_name(item: &GraphCommentItem) -> Option<String> {
    let from = item.from.as_ref();
    item.username
        .clone()
        .or_else(|| from.and_then(|f| f.username.clone()))
        .or_else(|| from.and_then(|f| f.name.clone()))
}

#[async_trait]
impl CommentAdapter for InstagramCommentAdapter {
    async fn fetch_page(
        &self,
        target_id: &str,
        limit: Option<i64>,
        cursor: Option<&str>,
    ) -> Result<ScrapeResult, ScrapeError> {
        let token =
            require_credential(self.credentials.as_ref(), CredentialKey::InstagramAccessToken)?;
        let limit = normalize_limit(limit, MAX_PAGE_LIMIT);

        let url = meta::comments_url(
            &self.graph_url,
            target_id,
            INSTAGRAM_COMMENT_FIELDS,
            limit,
            cursor,
            &token,
        );
        let response = meta::fetch_comments(&self.client, Platform::Instagram, url).await?;

        Ok(Self::parse_page(target_id, &response))
    }

    fn platform(&self) -> Platform {
        Platform::Instagram
    }
}
