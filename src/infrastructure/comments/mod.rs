// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 评论抓取模块
///
/// 提供各平台评论 API 的适配器实现
/// 包括 Facebook、Instagram、YouTube、TikTok 以及上游错误归一化
pub mod facebook;
pub mod factory;
pub mod instagram;
pub mod meta;
pub mod tiktok;
pub mod upstream;
pub mod youtube;

pub use factory::{build_http_client, CommentAdapterFactory, UpstreamEndpoints};
