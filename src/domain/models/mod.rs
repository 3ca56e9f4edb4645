// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// - 场次（event）：拍卖场次及其列表页地址
/// - 拍品（lot）：拍品URL、拍品记录和结果集
/// - 页面（page）：解析后的HTML文档
pub mod event;
pub mod lot;
pub mod page;
