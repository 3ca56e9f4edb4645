// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含的服务：
/// - 链接发现（link_extractor）：从列表页提取拍品链接和分页信息
/// - 分页遍历（pagination_walker）：逐页获取列表页直到没有画廊单元
/// - 字段提取（field_extractor）：按规则表从拍品页提取记录
pub mod field_extractor;
pub mod link_extractor;
pub mod pagination_walker;
