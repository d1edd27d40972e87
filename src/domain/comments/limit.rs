// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 默认每页数量
pub const DEFAULT_PAGE_LIMIT: u32 = 25;

/// 所有平台的每页上限
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Effective page size for an upstream call.
///
/// Absent or non-positive limits fall back to the default; anything above
/// `max` is clamped down. Never clamps up.
pub fn normalize_limit(limit: Option<i64>, max: u32) -> u32 {
    match limit {
        Some(value) if value > 0 => value.min(i64::from(max)) as u32,
        _ => DEFAULT_PAGE_LIMIT,
    }
}
