// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 定义平台枚举、抓取请求、归一化评论和分页结果
pub mod comment;
