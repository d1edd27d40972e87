// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 评论领域模块
///
/// 定义平台适配器接口、错误分类、凭据解析和分页数量策略
pub mod adapter;
pub mod credentials;
pub mod limit;

pub use adapter::{CommentAdapter, ScrapeError};
pub use credentials::{require_credential, CredentialKey, CredentialProvider, StaticCredentials};
pub use limit::{normalize_limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
