// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：场次、拍品记录和解析后的页面
/// - 服务（services）：链接发现、分页遍历和字段提取
///
/// 领域层只依赖页面获取器特质，不关心具体的HTTP实现。
pub mod models;
pub mod services;
