// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// - 评论服务（comment_service）：校验请求并分发到对应平台的适配器
pub mod comment_service;
