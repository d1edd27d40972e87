// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含评论抓取的核心业务逻辑，包括：
/// - 评论（comments）：平台适配器接口、错误分类、凭据和分页策略
/// - 领域模型（models）：平台、请求和归一化评论
/// - 服务（services）：按平台分发请求的评论服务
///
/// 领域层不依赖于任何具体的 HTTP 客户端或平台 API。
pub mod comments;
pub mod models;
pub mod services;
