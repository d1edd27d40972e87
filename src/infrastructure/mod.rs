// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 包含的子模块：
/// - 评论（comments）：各平台评论 API 的适配器与 HTTP 客户端
/// - 指标（metrics）：Prometheus 指标注册
///
/// 基础设施层依赖于领域层的抽象接口，实现具体的上游调用。
pub mod comments;
pub mod metrics;
